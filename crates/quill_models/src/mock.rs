//! Scripted driver for deterministic testing without API calls.

use async_trait::async_trait;
use parking_lot::Mutex;
use quill_core::{GenerateRequest, GenerateResponse};
use quill_error::{ProviderError, ProviderErrorKind, QuillResult};
use quill_interface::QuillDriver;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Pre-programmed reply for one completion call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockResponse {
    /// Return this text as the completion.
    Text(String),
    /// Fail the call with this provider error.
    Error(ProviderErrorKind),
}

impl MockResponse {
    /// A completion of exactly `words` whitespace-separated words.
    pub fn words(words: usize) -> Self {
        Self::Text(filler_text(words))
    }
}

/// Driver that replays responses in order; the last one repeats once exhausted.
///
/// Every request is recorded so tests can assert on prompts and sampling
/// parameters.
///
/// # Examples
///
/// ```
/// use quill_core::{GenerateRequest, Message};
/// use quill_interface::QuillDriver;
/// use quill_models::mock::{MockDriver, MockResponse};
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let mock = MockDriver::new(vec![MockResponse::words(50), MockResponse::words(205)]);
/// let request = GenerateRequest::builder()
///     .messages(vec![Message::user("hi")])
///     .build()?;
///
/// assert_eq!(mock.generate(&request).await?.text().split_whitespace().count(), 50);
/// assert_eq!(mock.generate(&request).await?.text().split_whitespace().count(), 205);
/// assert_eq!(mock.generate(&request).await?.text().split_whitespace().count(), 205);
/// assert_eq!(mock.call_count(), 3);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct MockDriver {
    responses: Vec<MockResponse>,
    call_count: AtomicUsize,
    requests: Mutex<Vec<GenerateRequest>>,
}

impl MockDriver {
    /// Create a driver that replays `responses` in order.
    pub fn new(responses: Vec<MockResponse>) -> Self {
        Self {
            responses,
            call_count: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Create a driver that always returns `text`.
    pub fn new_success(text: impl Into<String>) -> Self {
        Self::new(vec![MockResponse::Text(text.into())])
    }

    /// Create a driver that always fails with `kind`.
    pub fn new_error(kind: ProviderErrorKind) -> Self {
        Self::new(vec![MockResponse::Error(kind)])
    }

    /// Number of completion calls made so far.
    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    /// Requests received, in call order.
    pub fn requests(&self) -> Vec<GenerateRequest> {
        self.requests.lock().clone()
    }
}

#[async_trait]
impl QuillDriver for MockDriver {
    async fn generate(&self, req: &GenerateRequest) -> QuillResult<GenerateResponse> {
        let call = self.call_count.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().push(req.clone());

        let index = call.min(self.responses.len().saturating_sub(1));
        match self.responses.get(index) {
            Some(MockResponse::Text(text)) => Ok(GenerateResponse::new(text.clone())),
            Some(MockResponse::Error(kind)) => {
                Err(ProviderError::for_provider("mock", kind.clone()).into())
            }
            None => Err(ProviderError::for_provider("mock", ProviderErrorKind::EmptyResponse).into()),
        }
    }

    fn provider_name(&self) -> &'static str {
        "mock"
    }

    fn model_name(&self) -> &str {
        "mock-model"
    }
}

/// Text of exactly `words` words, ending with a period.
pub fn filler_text(words: usize) -> String {
    let mut text = (0..words)
        .map(|i| format!("word{}", i))
        .collect::<Vec<_>>()
        .join(" ");
    if !text.is_empty() {
        text.push('.');
    }
    text
}
