//! Session and Navigation Capabilities
//!
//! The dashboard never talks to the auth system directly. It is handed a
//! [`SessionProvider`] to learn the session status and sign out, and a
//! [`Navigator`] to send the user elsewhere.

use async_trait::async_trait;
use serde::Deserialize;
use std::sync::Mutex;

use crate::backend::BackendError;

/// Status reported by the session provider
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    /// Session not resolved yet
    Loading,
    Unauthenticated,
    Authenticated,
}

impl SessionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionStatus::Loading => "loading",
            SessionStatus::Authenticated => "authenticated",
            SessionStatus::Unauthenticated => "unauthenticated",
        }
    }
}

impl std::fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Session document returned by the auth backend
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Session {
    pub user: Option<SessionUser>,
    pub expires: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SessionUser {
    pub name: Option<String>,
    pub email: Option<String>,
    pub image: Option<String>,
}

/// Session data together with its status
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSnapshot {
    pub data: Option<Session>,
    pub status: SessionStatus,
}

impl SessionSnapshot {
    pub fn loading() -> Self {
        Self {
            data: None,
            status: SessionStatus::Loading,
        }
    }

    /// Classify a session document: a session without a user is no session
    pub fn from_session(session: Option<Session>) -> Self {
        match session {
            Some(session) if session.user.is_some() => Self {
                data: Some(session),
                status: SessionStatus::Authenticated,
            },
            _ => Self {
                data: None,
                status: SessionStatus::Unauthenticated,
            },
        }
    }
}

/// Source of the current user's session
#[async_trait]
pub trait SessionProvider: Send + Sync {
    /// Resolve the session. Transport failures yield [`SessionStatus::Loading`].
    async fn session(&self) -> SessionSnapshot;

    /// End the current session
    async fn sign_out(&self) -> Result<SignOut, BackendError>;
}

/// Outcome of a sign-out
///
/// `set_cookies` holds the `Set-Cookie` values the auth backend issued; they
/// must reach the browser for the session cookie to be cleared.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SignOut {
    pub set_cookies: Vec<String>,
}

/// Redirect primitive
pub trait Navigator: Send + Sync {
    fn push(&self, route: &str);
}

/// Navigator that remembers the last requested route.
///
/// The web layer turns the recorded route into an HTTP redirect once the
/// page has run.
#[derive(Debug, Default)]
pub struct RedirectRecorder {
    target: Mutex<Option<String>>,
}

impl RedirectRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take the recorded route, if any
    pub fn take(&self) -> Option<String> {
        self.target.lock().ok().and_then(|mut target| target.take())
    }
}

impl Navigator for RedirectRecorder {
    fn push(&self, route: &str) {
        tracing::debug!(route = %route, "Redirect requested");
        if let Ok(mut target) = self.target.lock() {
            *target = Some(route.to_string());
        }
    }
}
