//! Prompt assembly for generation, rewriting, refinement and correction.

use crate::ExampleCorpus;
use quill_core::{Message, Prompt, WordRange};
use rand::Rng;
use std::sync::Arc;

/// Request paired with every few-shot example.
const EXAMPLE_REQUEST: &str = "Write a professional script.";

/// Builds the message sequences sent to the completion provider.
///
/// Topic and refinement text are interpolated verbatim.
///
/// # Examples
///
/// ```
/// use quill_core::{Role, WordRange};
/// use quill_script::{ExampleCorpus, PromptBuilder};
/// use std::sync::Arc;
///
/// let prompts = PromptBuilder::new(Arc::new(ExampleCorpus::default()), 2, WordRange::default());
/// let prompt = prompts.generation_prompt("volcanoes");
///
/// assert_eq!(prompt.roles(), vec![Role::System, Role::User]);
/// assert_eq!(
///     prompt.last_content(),
///     Some("Write a professional script about: volcanoes. Follow the same style as the examples.")
/// );
/// ```
#[derive(Debug, Clone)]
pub struct PromptBuilder {
    corpus: Arc<ExampleCorpus>,
    few_shot: usize,
    range: WordRange,
}

impl PromptBuilder {
    /// Create a builder drawing up to `few_shot` examples per prompt.
    pub fn new(corpus: Arc<ExampleCorpus>, few_shot: usize, range: WordRange) -> Self {
        Self {
            corpus,
            few_shot,
            range,
        }
    }

    /// Target word range written into every instruction.
    pub fn range(&self) -> WordRange {
        self.range
    }

    /// Example corpus backing the few-shot pairs.
    pub fn corpus(&self) -> &ExampleCorpus {
        &self.corpus
    }

    fn system_instructions(&self) -> String {
        format!(
            "You are a professional scriptwriter. Generate a script following these rules:\n\
             1. Write exactly between {} words\n\
             2. Use clear, direct language\n\
             3. Focus on storytelling and engagement\n\
             4. Maintain consistent tone and style with the examples\n\
             5. Structure in a narrative format\n\
             6. Include natural transitions between ideas",
            self.range
        )
    }

    /// Few-shot prompt asking for a script about `topic`.
    pub fn generation_prompt(&self, topic: &str) -> Prompt {
        self.generation_prompt_with(topic, &mut rand::thread_rng())
    }

    /// Few-shot prompt with examples drawn from the supplied generator.
    pub fn generation_prompt_with<R: Rng + ?Sized>(&self, topic: &str, rng: &mut R) -> Prompt {
        let mut prompt = Prompt::new();
        prompt.push(Message::system(self.system_instructions()));

        for example in self.corpus.sample_with(self.few_shot, rng) {
            prompt.push(Message::user(EXAMPLE_REQUEST));
            prompt.push(Message::assistant(example));
        }

        prompt.push(Message::user(format!(
            "Write a professional script about: {}. Follow the same style as the examples.",
            topic
        )));
        prompt
    }

    /// Few-shot prompt whose request is a rewrite instruction.
    pub fn refinement_seed(&self, instruction: &str) -> Prompt {
        self.generation_prompt(instruction)
    }

    /// Instruction to rewrite `text` into the target range.
    pub fn rewrite_instruction(&self, text: &str) -> String {
        format!(
            "Rewrite this script to be between {} words while maintaining the same style:\n\n{}",
            self.range, text
        )
    }

    /// Single system message carrying the prior script and the requested changes.
    pub fn refine_prompt(&self, previous_script: &str, refinement: &str) -> Prompt {
        let content = format!(
            "Below is the script to refine:\n{}\n\n\
             User wants the following refinements: {}\n\n\
             Rules:\n\
             1. Maintain a {}–{} word count range.\n\
             2. Preserve the original tone, style, and clarity.\n\
             3. Keep it engaging, succinct, and impactful.",
            previous_script, refinement, self.range.min, self.range.max
        );
        Prompt::from(vec![Message::system(content)])
    }

    /// Replacement history after an out-of-range refinement attempt.
    pub fn correction_prompt(&self, previous_text: &str, previous_count: usize) -> Prompt {
        Prompt::from(vec![
            Message::system(format!(
                "You generated a script with {} words.\n\
                 Refine again to fit within {}–{} words, preserving important content.",
                previous_count, self.range.min, self.range.max
            )),
            Message::assistant(previous_text),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quill_core::Role;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn builder_with(scripts: &[&str]) -> PromptBuilder {
        let corpus = ExampleCorpus::from_scripts(scripts.iter().map(|s| s.to_string()).collect());
        PromptBuilder::new(Arc::new(corpus), 2, WordRange::default())
    }

    #[test]
    fn generation_prompt_pairs_two_examples() {
        let prompts = builder_with(&["Alpha script.", "Beta script.", "Gamma script."]);
        let prompt = prompts.generation_prompt_with("tides", &mut StdRng::seed_from_u64(1));

        assert_eq!(
            prompt.roles(),
            vec![
                Role::System,
                Role::User,
                Role::Assistant,
                Role::User,
                Role::Assistant,
                Role::User
            ]
        );
        let messages = prompt.messages();
        assert_eq!(messages[1].content, EXAMPLE_REQUEST);
        assert_eq!(messages[3].content, EXAMPLE_REQUEST);
        assert_ne!(messages[2].content, messages[4].content);
        assert!(
            prompts
                .corpus()
                .scripts()
                .iter()
                .any(|s| *s == messages[2].content)
        );
    }

    #[test]
    fn system_message_states_the_range() {
        let prompt = builder_with(&[]).generation_prompt("tides");
        assert!(prompt.messages()[0].content.contains("190-220 words"));
        assert!(prompt.messages()[0].content.starts_with("You are a professional scriptwriter."));
    }

    #[test]
    fn single_example_corpus_yields_one_pair() {
        let prompt = builder_with(&["Only one."]).generation_prompt("tides");
        assert_eq!(prompt.len(), 4);
        assert_eq!(prompt.messages()[2].content, "Only one.");
    }

    #[test]
    fn topic_is_interpolated_verbatim() {
        let prompt = builder_with(&[]).generation_prompt("{braces} and \"quotes\"");
        assert_eq!(
            prompt.last_content(),
            Some(
                "Write a professional script about: {braces} and \"quotes\". Follow the same style as the examples."
            )
        );
    }

    #[test]
    fn rewrite_instruction_embeds_text() {
        let prompts = builder_with(&[]);
        let instruction = prompts.rewrite_instruction("short draft");
        assert_eq!(
            instruction,
            "Rewrite this script to be between 190-220 words while maintaining the same style:\n\nshort draft"
        );

        let seed = prompts.refinement_seed(&instruction);
        assert!(seed.last_content().unwrap().contains("short draft"));
    }

    #[test]
    fn refine_prompt_is_one_system_message() {
        let prompt = builder_with(&["ignored"]).refine_prompt("Old script.", "make it funnier");
        assert_eq!(prompt.roles(), vec![Role::System]);
        let content = prompt.last_content().unwrap();
        assert!(content.starts_with("Below is the script to refine:\nOld script.\n\n"));
        assert!(content.contains("User wants the following refinements: make it funnier"));
        assert!(content.contains("1. Maintain a 190–220 word count range."));
    }

    #[test]
    fn correction_prompt_replays_previous_attempt() {
        let prompt = builder_with(&[]).correction_prompt("Too long draft.", 250);
        assert_eq!(prompt.roles(), vec![Role::System, Role::Assistant]);
        assert_eq!(
            prompt.messages()[0].content,
            "You generated a script with 250 words.\nRefine again to fit within 190–220 words, preserving important content."
        );
        assert_eq!(prompt.last_content(), Some("Too long draft."));
    }
}
