//! The generation adapter boundary.
//!
//! [`GenerationAdapter`] is what an agent holds: one method that turns a
//! conversation plus declared tools into response text. [`ChatAdapter`] is
//! the standard implementation over any [`Backend`].

use crate::backend::{Backend, BackendRequest};
use crate::config::AdapterConfig;
use crate::error::{BackendError, ConfigurationError};
use crate::types::{Conversation, ToolCapability};
use async_trait::async_trait;

/// Advisory appended to the prompt when an agent declares any tool.
pub const TOOL_ADVISORY: &str = "If it is relevant, prefer using the available search tool to answer.";

/// Uniform "generate text for a role-instructed conversation" capability.
///
/// Object-safe so agents can own any variant behind a `Box`. Backend
/// specific failures never leak past this boundary; every failure is a
/// [`BackendError`].
#[async_trait]
pub trait GenerationAdapter: Send + Sync {
    /// The configuration this adapter sends with every call.
    fn config(&self) -> &AdapterConfig;

    /// Generate response text for a single-turn conversation.
    async fn generate(
        &self,
        conversation: &Conversation,
        tools: &[ToolCapability],
    ) -> Result<String, BackendError>;
}

/// A [`GenerationAdapter`] over one [`Backend`].
///
/// Generic over `B: Backend` (not object-safe). The object-safe boundary
/// is [`GenerationAdapter`], which `ChatAdapter<B>` implements via
/// `#[async_trait]`.
pub struct ChatAdapter<B: Backend> {
    backend: B,
    config: AdapterConfig,
}

impl<B: Backend> ChatAdapter<B> {
    /// Wrap a backend, validating the configuration first.
    pub fn new(backend: B, config: AdapterConfig) -> Result<Self, ConfigurationError> {
        config.validate()?;
        Ok(Self { backend, config })
    }

    /// The wrapped backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Translate a conversation into the request the backend receives.
    ///
    /// Only the last entry becomes the prompt. Declared tools append
    /// [`TOOL_ADVISORY`]. Deterministic for a given config and input.
    pub fn build_request(
        &self,
        conversation: &Conversation,
        tools: &[ToolCapability],
    ) -> Result<BackendRequest, BackendError> {
        if !conversation.has_user_entry() {
            return Err(BackendError::new("conversation has no user entry"));
        }
        let last = conversation
            .last()
            .ok_or_else(|| BackendError::new("conversation has no user entry"))?;

        let prompt = if tools.is_empty() {
            last.content.clone()
        } else {
            format!("{}\n\n{TOOL_ADVISORY}", last.content)
        };

        Ok(BackendRequest {
            model: self.config.model_identifier.clone(),
            system: conversation.system().map(str::to_owned),
            prompt,
            max_tokens: self.config.max_output_tokens,
            temperature: self.config.temperature,
        })
    }
}

#[async_trait]
impl<B: Backend + 'static> GenerationAdapter for ChatAdapter<B> {
    fn config(&self) -> &AdapterConfig {
        &self.config
    }

    async fn generate(
        &self,
        conversation: &Conversation,
        tools: &[ToolCapability],
    ) -> Result<String, BackendError> {
        let request = self.build_request(conversation, tools)?;

        tracing::debug!(
            model = %request.model,
            tools = tools.len(),
            max_tokens = request.max_tokens,
            "conduit.adapter.generate"
        );

        let response = self.backend.complete(request).await.map_err(|fault| {
            tracing::warn!(error = %fault, retryable = fault.is_retryable(), "conduit.adapter.backend_fault");
            BackendError::from(fault)
        })?;

        tracing::debug!(
            model = %response.model,
            completions = response.completions.len(),
            input_tokens = response.usage.input_tokens,
            output_tokens = response.usage.output_tokens,
            "conduit.adapter.response"
        );

        response
            .completions
            .into_iter()
            .next()
            .map(|completion| completion.text)
            .ok_or_else(|| BackendError::new("no completion returned"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{BackendResponse, Completion, TokenUsage};
    use crate::error::BackendFault;
    use crate::types::Message;
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    // -- Mock Backend --

    struct MockBackend {
        responses: Mutex<VecDeque<Result<BackendResponse, BackendFault>>>,
        requests: Mutex<Vec<BackendRequest>>,
        call_count: AtomicUsize,
    }

    impl MockBackend {
        fn new(responses: Vec<Result<BackendResponse, BackendFault>>) -> Self {
            Self {
                responses: Mutex::new(responses.into()),
                requests: Mutex::new(vec![]),
                call_count: AtomicUsize::new(0),
            }
        }

        fn text(text: &str) -> Self {
            Self::new(vec![Ok(response(vec![Completion::text(text)]))])
        }

        fn captured_requests(&self) -> Vec<BackendRequest> {
            self.requests.lock().unwrap().clone()
        }
    }

    impl Backend for MockBackend {
        fn complete(
            &self,
            request: BackendRequest,
        ) -> impl std::future::Future<Output = Result<BackendResponse, BackendFault>> + Send
        {
            self.call_count.fetch_add(1, Ordering::SeqCst);
            self.requests.lock().unwrap().push(request);
            let result = self
                .responses
                .lock()
                .unwrap()
                .pop_front()
                .expect("MockBackend: no more responses queued");
            async move { result }
        }
    }

    // -- Helpers --

    fn response(completions: Vec<Completion>) -> BackendResponse {
        BackendResponse {
            completions,
            model: "mock-model".into(),
            usage: TokenUsage {
                input_tokens: 10,
                output_tokens: 5,
            },
        }
    }

    fn conversation(query: &str) -> Conversation {
        Conversation::new()
            .with(Message::system("You are a weather assistant."))
            .with(Message::user(query))
    }

    fn adapter(backend: MockBackend) -> ChatAdapter<MockBackend> {
        ChatAdapter::new(backend, AdapterConfig::new("mock-model")).unwrap()
    }

    // -- Tests --

    #[tokio::test]
    async fn returns_first_completion_text() {
        let backend = MockBackend::new(vec![Ok(response(vec![
            Completion::text("first"),
            Completion::text("second"),
        ]))]);
        let adapter = adapter(backend);

        let text = adapter.generate(&conversation("Hi"), &[]).await.unwrap();
        assert_eq!(text, "first");
    }

    #[tokio::test]
    async fn sends_configuration_with_request() {
        let config = AdapterConfig::new("gemini-1.5-flash")
            .max_output_tokens(300)
            .temperature(0.2);
        let adapter = ChatAdapter::new(MockBackend::text("ok"), config).unwrap();

        adapter.generate(&conversation("Hi"), &[]).await.unwrap();

        let requests = adapter.backend().captured_requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].model, "gemini-1.5-flash");
        assert_eq!(requests[0].max_tokens, 300);
        assert_eq!(requests[0].temperature, 0.2);
        assert_eq!(requests[0].system.as_deref(), Some("You are a weather assistant."));
        assert_eq!(requests[0].prompt, "Hi");
    }

    #[tokio::test]
    async fn tools_append_advisory() {
        let adapter = adapter(MockBackend::text("ok"));
        let tools = vec![ToolCapability::new("web_search")];

        adapter.generate(&conversation("Latest news?"), &tools).await.unwrap();

        let prompt = &adapter.backend().captured_requests()[0].prompt;
        assert!(prompt.starts_with("Latest news?"));
        assert!(prompt.ends_with(TOOL_ADVISORY));
    }

    #[tokio::test]
    async fn no_tools_no_advisory() {
        let adapter = adapter(MockBackend::text("ok"));

        adapter.generate(&conversation("Latest news?"), &[]).await.unwrap();

        let prompt = &adapter.backend().captured_requests()[0].prompt;
        assert!(!prompt.contains(TOOL_ADVISORY));
    }

    #[tokio::test]
    async fn only_last_entry_becomes_prompt() {
        let adapter = adapter(MockBackend::text("ok"));
        let conv = Conversation::from(vec![
            Message::user("earlier question"),
            Message::user("the real question"),
        ]);

        adapter.generate(&conv, &[]).await.unwrap();

        let request = &adapter.backend().captured_requests()[0];
        assert_eq!(request.prompt, "the real question");
        assert!(request.system.is_none());
    }

    #[tokio::test]
    async fn zero_completions_is_backend_error() {
        let adapter = adapter(MockBackend::new(vec![Ok(response(vec![]))]));

        let err = adapter.generate(&conversation("Hi"), &[]).await.unwrap_err();
        assert_eq!(err.message(), "no completion returned");
    }

    #[tokio::test]
    async fn backend_fault_becomes_backend_error() {
        let adapter = adapter(MockBackend::new(vec![Err(BackendFault::RequestFailed(
            "connection refused".into(),
        ))]));

        let err = adapter.generate(&conversation("Hi"), &[]).await.unwrap_err();
        assert!(err.message().contains("connection refused"));
        assert!(err.is_retryable());
    }

    #[tokio::test]
    async fn missing_user_entry_skips_backend() {
        let adapter = adapter(MockBackend::new(vec![]));
        let conv = Conversation::new().with(Message::system("instructions only"));

        let err = adapter.generate(&conv, &[]).await.unwrap_err();
        assert_eq!(err.message(), "conversation has no user entry");
        assert_eq!(adapter.backend().call_count.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn identical_adapters_build_identical_requests() {
        let a = adapter(MockBackend::new(vec![]));
        let b = adapter(MockBackend::new(vec![]));
        let tools = vec![ToolCapability::new("web_search")];
        let conv = conversation("What is the capital of France?");

        assert_eq!(
            a.build_request(&conv, &tools).unwrap(),
            b.build_request(&conv, &tools).unwrap()
        );
    }

    #[test]
    fn invalid_config_rejected() {
        let result = ChatAdapter::new(
            MockBackend::new(vec![]),
            AdapterConfig::default().temperature(3.0),
        );
        assert!(matches!(result, Err(ConfigurationError::InvalidValue { .. })));
    }

    #[test]
    fn usable_as_boxed_dyn_adapter() {
        let adapter: Box<dyn GenerationAdapter> = Box::new(adapter(MockBackend::new(vec![])));
        assert_eq!(adapter.config().model_identifier, "mock-model");
    }
}
