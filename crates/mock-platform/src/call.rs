//! Fake call platform.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use platform_core::{async_trait, CallPlatform, ChatUser, PlatformError, RealtimeSession};

/// A [`CallPlatform`] fake recording every interaction.
///
/// Signature verification result and call-end failures are
/// configurable; everything else always succeeds.
pub struct MockCallPlatform {
    verify_result: AtomicBool,
    fail_end_call: AtomicBool,
    ended: Mutex<Vec<String>>,
    connected: Mutex<Vec<(String, String)>>,
    instructions: Arc<Mutex<Vec<String>>>,
    upserted: Mutex<Vec<ChatUser>>,
}

impl MockCallPlatform {
    /// Create a fake that verifies every signature.
    pub fn new() -> Self {
        Self {
            verify_result: AtomicBool::new(true),
            fail_end_call: AtomicBool::new(false),
            ended: Mutex::new(Vec::new()),
            connected: Mutex::new(Vec::new()),
            instructions: Arc::new(Mutex::new(Vec::new())),
            upserted: Mutex::new(Vec::new()),
        }
    }

    /// Set whether `verify_webhook` accepts or rejects.
    pub fn set_verify(&self, result: bool) {
        self.verify_result.store(result, Ordering::SeqCst);
    }

    /// Make `end_call` fail with an API error.
    pub fn set_fail_end_call(&self, fail: bool) {
        self.fail_end_call.store(fail, Ordering::SeqCst);
    }

    /// Call ids passed to `end_call`, in order.
    pub fn ended(&self) -> Vec<String> {
        self.ended.lock().unwrap().clone()
    }

    /// `(call_id, agent_user_id)` pairs passed to `connect_agent`.
    pub fn connected(&self) -> Vec<(String, String)> {
        self.connected.lock().unwrap().clone()
    }

    /// Instructions applied to connected sessions, in order.
    pub fn instructions(&self) -> Vec<String> {
        self.instructions.lock().unwrap().clone()
    }

    /// Users passed to `upsert_users`.
    pub fn upserted(&self) -> Vec<ChatUser> {
        self.upserted.lock().unwrap().clone()
    }
}

impl Default for MockCallPlatform {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CallPlatform for MockCallPlatform {
    fn verify_webhook(&self, _body: &[u8], _signature: &str) -> bool {
        self.verify_result.load(Ordering::SeqCst)
    }

    async fn end_call(&self, call_id: &str) -> Result<(), PlatformError> {
        if self.fail_end_call.load(Ordering::SeqCst) {
            return Err(PlatformError::Api {
                status: 500,
                message: "mock end_call failure".to_string(),
            });
        }
        self.ended.lock().unwrap().push(call_id.to_string());
        Ok(())
    }

    async fn connect_agent(
        &self,
        call_id: &str,
        agent_user_id: &str,
    ) -> Result<Box<dyn RealtimeSession>, PlatformError> {
        self.connected
            .lock()
            .unwrap()
            .push((call_id.to_string(), agent_user_id.to_string()));

        Ok(Box::new(MockRealtimeSession {
            instructions: self.instructions.clone(),
        }))
    }

    async fn upsert_users(&self, users: &[ChatUser]) -> Result<(), PlatformError> {
        self.upserted.lock().unwrap().extend_from_slice(users);
        Ok(())
    }

    async fn create_token(&self, user_id: &str) -> Result<String, PlatformError> {
        Ok(format!("token-{user_id}"))
    }
}

struct MockRealtimeSession {
    instructions: Arc<Mutex<Vec<String>>>,
}

#[async_trait]
impl RealtimeSession for MockRealtimeSession {
    async fn update_instructions(&self, instructions: &str) -> Result<(), PlatformError> {
        self.instructions
            .lock()
            .unwrap()
            .push(instructions.to_string());
        Ok(())
    }
}
