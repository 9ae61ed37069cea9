use crate::error::{self, Result};
use serde::{Deserialize, Serialize};
use snafu::ensure;
use std::fmt::Debug;

/// A session with the mapping engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub session_token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
}

impl Session {
    pub fn new(session_token: impl Into<String>) -> Self {
        Self {
            session_token: session_token.into(),
            user: None,
        }
    }

    #[must_use]
    pub fn with_user(mut self, user: impl Into<String>) -> Self {
        self.user = Some(user.into());
        self
    }
}

/// Hands out the current session for each request
pub trait SessionProvider: Send + Sync + Debug {
    fn session(&self) -> Result<Session>;
}

/// Always returns the same session. An empty token counts as no session.
#[derive(Debug, Clone)]
pub struct StaticSessionProvider {
    session: Session,
}

impl StaticSessionProvider {
    pub fn new(session: Session) -> Self {
        Self { session }
    }
}

impl SessionProvider for StaticSessionProvider {
    fn session(&self) -> Result<Session> {
        ensure!(
            !self.session.session_token.is_empty(),
            error::NoSession {
                reason: "the session token is empty"
            }
        );

        Ok(self.session.clone())
    }
}
