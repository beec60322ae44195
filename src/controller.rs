use crate::api::CompletionBackend;
use crate::assembler::{assemble_user_message, UserInput};
use crate::attachment::DEFAULT_MAX_FILE_CHARS;
use crate::error::{ChatError, Result};
use crate::models::{Message, SessionMap};
use crate::session::{new_session_id, SessionStore};
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

/// Handle to the session a caller is talking in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionContext {
    session_id: String,
}

impl SessionContext {
    pub fn new(session_id: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
        }
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerState {
    Idle,
    Sending,
}

/// Resets the controller to `Idle` however `send_turn` exits, including when
/// its future is dropped mid-request.
struct SendingGuard<'a>(&'a watch::Sender<ControllerState>);

impl<'a> SendingGuard<'a> {
    fn enter(state: &'a watch::Sender<ControllerState>) -> Self {
        state.send_replace(ControllerState::Sending);
        Self(state)
    }
}

impl Drop for SendingGuard<'_> {
    fn drop(&mut self) {
        self.0.send_replace(ControllerState::Idle);
    }
}

pub struct SessionController<S, B> {
    store: S,
    backend: B,
    system_prompt: Option<String>,
    max_file_chars: usize,
    state: watch::Sender<ControllerState>,
}

impl<S: SessionStore, B: CompletionBackend> SessionController<S, B> {
    pub fn new(store: S, backend: B) -> Self {
        Self {
            store,
            backend,
            system_prompt: None,
            max_file_chars: DEFAULT_MAX_FILE_CHARS,
            state: watch::channel(ControllerState::Idle).0,
        }
    }

    /// Prepend a system message to every outgoing request. It is never stored.
    pub fn with_system_prompt(mut self, prompt: Option<String>) -> Self {
        self.system_prompt = prompt.filter(|p| !p.trim().is_empty());
        self
    }

    pub fn with_max_file_chars(mut self, max_file_chars: usize) -> Self {
        self.max_file_chars = max_file_chars;
        self
    }

    pub fn state(&self) -> ControllerState {
        *self.state.borrow()
    }

    /// A receiver that follows Idle/Sending transitions, for callers that
    /// want to show progress while `send_turn` is running.
    pub fn subscribe_state(&self) -> watch::Receiver<ControllerState> {
        self.state.subscribe()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Create and persist an empty session.
    pub fn start_new_session(&mut self) -> Result<SessionContext> {
        let session_id = new_session_id();
        self.store.create_session(&session_id)?;
        log::info!("started session {}", session_id);
        Ok(SessionContext::new(session_id))
    }

    /// Continue the first stored session, or start one if none exist.
    pub fn resume_or_start(&mut self) -> Result<SessionContext> {
        match self.store.load()?.first() {
            Some(session) => Ok(SessionContext::new(session.id.clone())),
            None => self.start_new_session(),
        }
    }

    /// Continue a specific stored session.
    pub fn open_session(&self, session_id: &str) -> Result<SessionContext> {
        if self.store.load()?.contains(session_id) {
            Ok(SessionContext::new(session_id))
        } else {
            Err(ChatError::SessionError(format!(
                "No session with id {}",
                session_id
            )))
        }
    }

    pub fn sessions(&self) -> Result<SessionMap> {
        self.store.load()
    }

    pub fn history(&self, ctx: &SessionContext) -> Result<Vec<Message>> {
        Ok(self
            .store
            .load()?
            .get(ctx.session_id())
            .map(|s| s.messages.clone())
            .unwrap_or_default())
    }

    /// Record a user turn, ask the model for a reply and record that too.
    ///
    /// The user turn is persisted before the request goes out. When the
    /// request fails or is cancelled it stays recorded and no assistant turn
    /// is added.
    pub async fn send_turn(
        &mut self,
        ctx: &SessionContext,
        model_id: &str,
        input: &UserInput,
        cancel: &CancellationToken,
    ) -> Result<String> {
        let _sending = SendingGuard::enter(&self.state);

        let parts = assemble_user_message(input, self.max_file_chars)?;
        let history = self.store.append(ctx.session_id(), Message::user(parts))?;

        let mut outgoing = Vec::with_capacity(history.len() + 1);
        if let Some(prompt) = &self.system_prompt {
            outgoing.push(Message::system(prompt.clone()));
        }
        outgoing.extend(history);

        let reply = tokio::select! {
            _ = cancel.cancelled() => {
                log::info!("request for session {} cancelled", ctx.session_id());
                Err(ChatError::Cancelled)
            }
            reply = self.backend.complete(model_id, &outgoing) => reply,
        }?;

        self.store
            .append(ctx.session_id(), Message::assistant(reply.clone()))?;
        Ok(reply)
    }
}
