//! Few-shot example scripts loaded once at startup.

use quill_error::CorpusError;
use rand::Rng;
use rand::seq::SliceRandom;
use std::path::Path;
use tracing::{info, instrument, warn};

/// Literal line separating scripts in the corpus file.
pub const EXAMPLE_SEPARATOR: &str = "---";

/// Immutable set of example scripts used for few-shot prompting.
///
/// # Examples
///
/// ```
/// use quill_script::ExampleCorpus;
///
/// let corpus = ExampleCorpus::parse("First script.\n---\n\n---\n  Second script.  ");
/// assert_eq!(corpus.scripts(), ["First script.", "Second script."]);
/// assert_eq!(corpus.sample(5).len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExampleCorpus {
    scripts: Vec<String>,
}

impl ExampleCorpus {
    /// Load the corpus from a text file.
    ///
    /// A missing or unreadable file yields an empty corpus; generation still
    /// works without examples.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(content) => {
                let corpus = Self::parse(&content);
                info!(count = corpus.len(), "Loaded example scripts");
                corpus
            }
            Err(e) => {
                let error = CorpusError::new(path.display().to_string(), e.to_string());
                warn!(error = %error, "Example corpus unavailable, continuing without examples");
                Self::default()
            }
        }
    }

    /// Split `content` on the separator, trimming segments and dropping empty ones.
    pub fn parse(content: &str) -> Self {
        let scripts = content
            .split(EXAMPLE_SEPARATOR)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect();
        Self { scripts }
    }

    /// Build a corpus from scripts already in memory.
    pub fn from_scripts(scripts: Vec<String>) -> Self {
        Self { scripts }
    }

    /// Draw up to `n` distinct scripts uniformly at random.
    pub fn sample(&self, n: usize) -> Vec<&str> {
        self.sample_with(n, &mut rand::thread_rng())
    }

    /// Draw up to `n` distinct scripts using the supplied generator.
    pub fn sample_with<R: Rng + ?Sized>(&self, n: usize, rng: &mut R) -> Vec<&str> {
        self.scripts
            .choose_multiple(rng, n)
            .map(String::as_str)
            .collect()
    }

    /// Number of scripts.
    pub fn len(&self) -> usize {
        self.scripts.len()
    }

    /// Whether the corpus holds no scripts.
    pub fn is_empty(&self) -> bool {
        self.scripts.is_empty()
    }

    /// All scripts in file order.
    pub fn scripts(&self) -> &[String] {
        &self.scripts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::HashSet;
    use std::io::Write;

    fn corpus_of(n: usize) -> ExampleCorpus {
        ExampleCorpus::from_scripts((0..n).map(|i| format!("Script number {}.", i)).collect())
    }

    #[test]
    fn parse_trims_and_drops_empty_segments() {
        let corpus = ExampleCorpus::parse("---\n  alpha \n---\n---\nbeta\n---   \n");
        assert_eq!(corpus.scripts(), ["alpha", "beta"]);
    }

    #[test]
    fn sample_two_returns_distinct_members() {
        let corpus = corpus_of(5);
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..20 {
            let picked = corpus.sample_with(2, &mut rng);
            assert_eq!(picked.len(), 2);
            let unique: HashSet<_> = picked.iter().collect();
            assert_eq!(unique.len(), 2);
            assert!(picked.iter().all(|s| corpus.scripts().iter().any(|c| c.as_str() == *s)));
        }
    }

    #[test]
    fn sample_is_capped_at_corpus_size() {
        assert_eq!(corpus_of(1).sample(2).len(), 1);
        assert!(ExampleCorpus::default().sample(2).is_empty());
    }

    #[test]
    fn seeded_sampling_is_reproducible() {
        let corpus = corpus_of(10);
        let first = corpus.sample_with(2, &mut StdRng::seed_from_u64(42));
        let second = corpus.sample_with(2, &mut StdRng::seed_from_u64(42));
        assert_eq!(first, second);
    }

    #[test]
    fn load_reads_file_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "One.\n---\nTwo.\n---\nThree.\n").unwrap();

        let corpus = ExampleCorpus::load(file.path());
        assert_eq!(corpus.len(), 3);
    }

    #[test]
    fn missing_file_yields_empty_corpus() {
        let dir = tempfile::tempdir().unwrap();
        let corpus = ExampleCorpus::load(dir.path().join("scripts.txt"));
        assert!(corpus.is_empty());
    }
}
