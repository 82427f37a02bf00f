//! Audit event model for asynchronous log writing.

use serde::{Deserialize, Serialize};

/// Who performed an operation.
///
/// Serialized as internally tagged JSON, e.g. `{"type":"cli"}` or
/// `{"type":"user","username":"alice"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Actor {
    /// The local CLI operating directly on the database.
    Cli,
    /// The HTTP API acting without an authenticated principal
    /// (registration, redirect matches).
    Api,
    /// An authenticated user.
    User { username: String },
}

impl Actor {
    /// Actor for operations performed by the named authenticated user.
    pub fn user(username: impl Into<String>) -> Self {
        Self::User {
            username: username.into(),
        }
    }
}

/// What happened.
///
/// Serialized as internally tagged JSON, e.g.
/// `{"type":"redirect_matched","short_link":"docs","url":"https://..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LogEvent {
    UserCreated { username: String },
    UserRead { username: String },
    UserUpdated { username: String },
    UserRemoved { username: String },
    RedirectCreated { short_link: String, url: String },
    RedirectRead { short_link: String },
    RedirectUpdated { short_link: String },
    RedirectRemoved { short_link: String },
    RedirectMatched { short_link: String, url: String },
}

/// An in-memory audit event awaiting persistence.
///
/// Used to pass audit information from HTTP handlers to the background
/// worker via a channel. This decouples the HTTP response from database
/// writes, so responses are never blocked on log persistence.
#[derive(Debug, Clone)]
pub struct AuditEvent {
    pub actor: Actor,
    pub event: LogEvent,
}

impl AuditEvent {
    /// Creates a new audit event.
    pub fn new(actor: Actor, event: LogEvent) -> Self {
        Self { actor, event }
    }
}
