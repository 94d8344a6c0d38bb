//! Mock generation backend for deterministic testing.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use lovesnotes_inference::mock::MockGenerationBackend;
//! use lovesnotes_core::GenerationBackend;
//!
//! # async fn demo() {
//! let backend = MockGenerationBackend::new().with_fixed_response("Milk, eggs, bread");
//! let text = backend.generate("Write a shopping list").await.unwrap();
//! assert_eq!(text, "Milk, eggs, bread");
//! assert_eq!(backend.generate_call_count(), 1);
//! # }
//! ```

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;

use lovesnotes_core::{validate_prompt, Error, GenerationBackend, Result};

/// Mock generation backend for testing.
///
/// Clones share the call log and the failure switch.
#[derive(Clone)]
pub struct MockGenerationBackend {
    config: Arc<MockConfig>,
    failing: Arc<AtomicBool>,
    call_log: Arc<Mutex<Vec<MockCall>>>,
}

#[derive(Debug, Clone)]
struct MockConfig {
    model: String,
    fixed_responses: HashMap<String, String>,
    default_response: String,
}

/// One recorded `generate` call.
#[derive(Debug, Clone)]
pub struct MockCall {
    pub prompt: String,
    pub timestamp: std::time::Instant,
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            model: "mock-model".to_string(),
            fixed_responses: HashMap::new(),
            default_response: "Mock response".to_string(),
        }
    }
}

impl MockGenerationBackend {
    /// Create a new mock backend with default configuration.
    pub fn new() -> Self {
        Self {
            config: Arc::new(MockConfig::default()),
            failing: Arc::new(AtomicBool::new(false)),
            call_log: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Set the response returned for any unmapped prompt.
    pub fn with_fixed_response(mut self, response: impl Into<String>) -> Self {
        Arc::make_mut(&mut self.config).default_response = response.into();
        self
    }

    /// Return `output` whenever the prompt is exactly `prompt`.
    pub fn with_response_mapping(
        mut self,
        prompt: impl Into<String>,
        output: impl Into<String>,
    ) -> Self {
        Arc::make_mut(&mut self.config)
            .fixed_responses
            .insert(prompt.into(), output.into());
        self
    }

    /// Set the reported model name.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        Arc::make_mut(&mut self.config).model = model.into();
        self
    }

    /// Start in failing mode.
    pub fn failing(self) -> Self {
        self.set_failing(true);
        self
    }

    /// Make every subsequent call fail with `Error::Inference`.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Get all logged calls for assertion.
    pub fn get_calls(&self) -> Vec<MockCall> {
        self.calls().clone()
    }

    /// Clear the call log.
    pub fn clear_calls(&self) {
        self.calls().clear()
    }

    /// Number of calls that reached the backend.
    pub fn generate_call_count(&self) -> usize {
        self.calls().len()
    }

    fn calls(&self) -> MutexGuard<'_, Vec<MockCall>> {
        self.call_log.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Default for MockGenerationBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl GenerationBackend for MockGenerationBackend {
    async fn generate(&self, prompt: &str) -> Result<String> {
        validate_prompt(prompt)?;
        self.calls().push(MockCall {
            prompt: prompt.to_string(),
            timestamp: std::time::Instant::now(),
        });

        if self.failing.load(Ordering::SeqCst) {
            return Err(Error::Inference("simulated provider failure".to_string()));
        }

        if let Some(response) = self.config.fixed_responses.get(prompt) {
            return Ok(response.clone());
        }
        Ok(self.config.default_response.clone())
    }

    fn model_name(&self) -> &str {
        &self.config.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_default_response() {
        let backend = MockGenerationBackend::new();
        assert_eq!(backend.generate("anything").await.unwrap(), "Mock response");
        assert_eq!(backend.model_name(), "mock-model");
    }

    #[tokio::test]
    async fn test_response_mapping_wins_over_default() {
        let backend = MockGenerationBackend::new()
            .with_fixed_response("default")
            .with_response_mapping("poem", "roses are red");
        assert_eq!(backend.generate("poem").await.unwrap(), "roses are red");
        assert_eq!(backend.generate("other").await.unwrap(), "default");
    }

    #[tokio::test]
    async fn test_empty_prompt_is_not_logged() {
        let backend = MockGenerationBackend::new();
        let err = backend.generate("").await.unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
        assert_eq!(backend.generate_call_count(), 0);
    }

    #[tokio::test]
    async fn test_failing_mode_toggles() {
        let backend = MockGenerationBackend::new().failing();
        let clone = backend.clone();
        assert!(matches!(
            clone.generate("x").await.unwrap_err(),
            Error::Inference(_)
        ));

        backend.set_failing(false);
        assert!(clone.generate("x").await.is_ok());
        assert_eq!(backend.generate_call_count(), 2);

        let calls = backend.get_calls();
        assert_eq!(calls[0].prompt, "x");
        backend.clear_calls();
        assert_eq!(clone.generate_call_count(), 0);
    }
}
