//! Fake language model.

use std::sync::Mutex;

use platform_core::{async_trait, ChatMessage, LanguageModel, PlatformError};

enum Mode {
    Reply(String),
    Empty,
    Fail,
}

/// A [`LanguageModel`] fake with a fixed reply, empty, or failing mode.
pub struct MockLanguageModel {
    mode: Mutex<Mode>,
    calls: Mutex<Vec<(String, Vec<ChatMessage>)>>,
}

impl MockLanguageModel {
    /// Create a fake that always returns the given reply.
    pub fn replying(reply: &str) -> Self {
        Self {
            mode: Mutex::new(Mode::Reply(reply.to_string())),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Change the fixed reply for subsequent completions.
    pub fn set_reply(&self, reply: &str) {
        *self.mode.lock().unwrap() = Mode::Reply(reply.to_string());
    }

    /// Make subsequent completions return [`PlatformError::EmptyCompletion`].
    pub fn set_empty(&self) {
        *self.mode.lock().unwrap() = Mode::Empty;
    }

    /// Make subsequent completions fail with an API error.
    pub fn set_fail(&self) {
        *self.mode.lock().unwrap() = Mode::Fail;
    }

    /// The `(system, messages)` of the most recent completion, if any.
    pub fn last_call(&self) -> Option<(String, Vec<ChatMessage>)> {
        self.calls.lock().unwrap().last().cloned()
    }

    /// Number of completions requested.
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl LanguageModel for MockLanguageModel {
    async fn complete(
        &self,
        system: &str,
        messages: &[ChatMessage],
    ) -> Result<String, PlatformError> {
        self.calls
            .lock()
            .unwrap()
            .push((system.to_string(), messages.to_vec()));

        match &*self.mode.lock().unwrap() {
            Mode::Reply(text) => Ok(text.clone()),
            Mode::Empty => Err(PlatformError::EmptyCompletion),
            Mode::Fail => Err(PlatformError::Api {
                status: 500,
                message: "mock completion failure".to_string(),
            }),
        }
    }
}
