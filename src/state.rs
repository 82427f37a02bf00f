//! Shared application state injected into all HTTP handlers.

use std::sync::Arc;
use tokio::sync::mpsc;

use crate::application::services::{AuthService, RedirectService, UserService};
use crate::domain::log_event::{Actor, AuditEvent, LogEvent};
use crate::infrastructure::persistence::{SqliteRedirectRepository, SqliteUserRepository};

/// Shared application state.
///
/// Holds service instances and the audit event sender. Cloning is cheap;
/// all fields are `Arc`s or channel handles.
#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<UserService<SqliteUserRepository>>,
    pub redirect_service: Arc<RedirectService<SqliteRedirectRepository>>,
    pub auth_service: Arc<AuthService<SqliteUserRepository>>,
    pub audit_sender: mpsc::Sender<AuditEvent>,
}

impl AppState {
    /// Queues an audit event for the background log writer.
    ///
    /// Fire-and-forget: if the queue is full the event is dropped with a
    /// warning rather than blocking the request.
    pub fn audit(&self, actor: Actor, event: LogEvent) {
        if let Err(e) = self.audit_sender.try_send(AuditEvent::new(actor, event)) {
            tracing::warn!(error = %e, "Dropping audit event, queue unavailable");
        }
    }
}
