//! Admin session and admin panel.
//!
//! **Not access control.** The credential pair is configured in plaintext
//! and compared on the client, exactly like the page this replaces. Anyone
//! with the bundle can read it. Keep it for parity, never for protection.

use std::fmt;
use std::time::Duration;

use tracing::{info, warn};

use crate::config::Config;
use crate::error::{AuthenticationError, ExportError};
use crate::export::{ExportFormat, Exporter};
use crate::model::Clock;
use crate::storage::{KeyValueStore, StorageGateway};
use crate::surface::{AdminSurface, FileSink, Notification, NotificationLevel, Notifier};

/// Application-lifetime authentication flag
///
/// Lives as long as the page; nothing is persisted, so a reload logs out.
#[derive(Clone)]
pub struct AdminSession {
    username: String,
    password: String,
    authenticated: bool,
}

impl AdminSession {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            authenticated: false,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    /// Exact match on both values; a mismatch leaves the flag untouched
    pub fn authenticate(&mut self, username: &str, password: &str) -> Result<(), AuthenticationError> {
        if username == self.username && password == self.password {
            self.authenticated = true;
            Ok(())
        } else {
            Err(AuthenticationError)
        }
    }
}

impl fmt::Debug for AdminSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdminSession")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("authenticated", &self.authenticated)
            .finish()
    }
}

/// Login modal, responses counter and export buttons
#[derive(Debug)]
pub struct AdminPanel {
    session: AdminSession,
    exporter: Exporter,
    login_error: Duration,
    notification: Duration,
}

impl AdminPanel {
    pub fn new(config: &Config) -> Self {
        warn!("admin credentials are checked in plaintext on the client; this is not access control");
        Self {
            session: AdminSession::new(config.admin.username.clone(), config.admin.password.clone()),
            exporter: Exporter::new(config),
            login_error: config.admin.login_error_duration(),
            notification: config.notifications.duration(),
        }
    }

    pub fn session(&self) -> &AdminSession {
        &self.session
    }

    pub fn show_login(&self, admin: &mut dyn AdminSurface) {
        admin.show_login();
    }

    pub fn close_login(&self, admin: &mut dyn AdminSurface) {
        admin.close_login();
    }

    pub fn authenticate<S: KeyValueStore>(
        &mut self,
        username: &str,
        password: &str,
        gateway: &StorageGateway<S>,
        admin: &mut dyn AdminSurface,
        notifier: &mut dyn Notifier,
    ) -> Result<(), AuthenticationError> {
        match self.session.authenticate(username, password) {
            Ok(()) => {
                info!("Admin authentication successful");
                admin.close_login();
                admin.show_panel();
                self.refresh_count(gateway, admin);
                notifier.notify(&Notification::new(
                    "Admin authentication successful",
                    NotificationLevel::Success,
                    self.notification,
                ));
                Ok(())
            }
            Err(err) => {
                warn!(%username, "Admin authentication failed");
                admin.show_login_error(&err.to_string(), self.login_error);
                Err(err)
            }
        }
    }

    /// Collapse or expand the panel; prompts for login when locked
    pub fn toggle_panel(&self, admin: &mut dyn AdminSurface) {
        if self.session.is_authenticated() {
            admin.toggle_panel_collapsed();
        } else {
            admin.show_login();
        }
    }

    pub fn refresh_count<S: KeyValueStore>(
        &self,
        gateway: &StorageGateway<S>,
        admin: &mut dyn AdminSurface,
    ) -> usize {
        let count = gateway.count();
        admin.set_responses_count(count);
        count
    }

    pub fn export<S: KeyValueStore>(
        &self,
        format: ExportFormat,
        gateway: &StorageGateway<S>,
        admin: &mut dyn AdminSurface,
        notifier: &mut dyn Notifier,
        sink: &mut dyn FileSink,
        clock: &dyn Clock,
    ) -> Result<usize, ExportError> {
        self.exporter
            .export(format, &self.session, gateway, admin, notifier, sink, clock)
    }
}
