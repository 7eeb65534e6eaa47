use crate::render::ViewMode;
use subtle::ConstantTimeEq;
use tracing::{info, warn};

/// Admin credential compiled into the binary.
///
/// This is a local presentation switch, not a security boundary: anyone holding
/// the binary can recover it.
pub const ADMIN_KEY: &str = match option_env!("CATALOG_ADMIN_KEY") {
    Some(key) => key,
    None => "divinemantra_super_admin_999",
};

pub const LOGIN_REJECTED: &str = "Invalid admin password";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Anonymous,
    Authenticated,
}

/// Two-state session machine deciding which listing is active.
#[derive(Clone)]
pub struct SessionGate {
    state: SessionState,
    secret: String,
    login_error: Option<&'static str>,
}

impl std::fmt::Debug for SessionGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionGate")
            .field("state", &self.state)
            .field("login_error", &self.login_error)
            .finish_non_exhaustive()
    }
}

impl Default for SessionGate {
    fn default() -> Self {
        Self::new(ADMIN_KEY)
    }
}

impl SessionGate {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            state: SessionState::Anonymous,
            secret: secret.into(),
            login_error: None,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_admin(&self) -> bool {
        self.state == SessionState::Authenticated
    }

    pub fn view_mode(&self) -> ViewMode {
        match self.state {
            SessionState::Anonymous => ViewMode::Public,
            SessionState::Authenticated => ViewMode::Admin,
        }
    }

    /// Message left by the last rejected attempt, if any.
    pub fn login_error(&self) -> Option<&'static str> {
        self.login_error
    }

    /// Clear the login form; used when the login prompt is opened or dismissed.
    pub fn reset_login_form(&mut self) {
        self.login_error = None;
    }

    /// Check a submitted credential. Surrounding whitespace is ignored.
    ///
    /// Returns `true` when the session is now authenticated. A rejected attempt
    /// leaves the state untouched and records [`LOGIN_REJECTED`].
    pub fn submit(&mut self, credential: &str) -> bool {
        let candidate = credential.trim();
        if bool::from(candidate.as_bytes().ct_eq(self.secret.as_bytes())) {
            self.state = SessionState::Authenticated;
            self.login_error = None;
            info!("admin session started");
            true
        } else {
            self.login_error = Some(LOGIN_REJECTED);
            warn!("admin login rejected");
            false
        }
    }

    pub fn logout(&mut self) {
        if self.state == SessionState::Authenticated {
            info!("admin session ended");
        }
        self.state = SessionState::Anonymous;
        self.login_error = None;
    }
}
