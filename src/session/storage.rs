use crate::error::Result;
use crate::models::{Message, SessionMap};

/// Trait for session storage backends
pub trait SessionStore: Send + Sync {
    /// Read every stored session. An absent store is an empty map.
    fn load(&self) -> Result<SessionMap>;

    /// Replace the stored sessions with `sessions`.
    fn save(&self, sessions: &SessionMap) -> Result<()>;

    /// Upper bound on messages kept per session.
    fn max_messages(&self) -> usize;

    /// Append `message` to a session, trim it to `max_messages` and persist.
    ///
    /// Returns the session's history as stored after the append.
    fn append(&self, session_id: &str, message: Message) -> Result<Vec<Message>> {
        let mut sessions = self.load()?;
        let session = sessions.entry(session_id);
        session.messages.push(message);
        let dropped = super::trim_history(&mut session.messages, self.max_messages());
        if dropped > 0 {
            log::debug!("session {}: dropped {} oldest message(s)", session_id, dropped);
        }
        let history = session.messages.clone();
        self.save(&sessions)?;
        Ok(history)
    }

    /// Persist an empty session under `session_id`.
    fn create_session(&self, session_id: &str) -> Result<()> {
        let mut sessions = self.load()?;
        sessions.entry(session_id);
        self.save(&sessions)
    }
}
