use crate::domain::ports::CredentialVerifierBox;
use crate::error::{Result, ShopError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum AdminState {
    #[default]
    LoggedOut,
    LoggedIn,
}

/// Admin login state machine over an injected credential check.
pub struct AdminSession {
    verifier: CredentialVerifierBox,
    state: AdminState,
}

impl AdminSession {
    pub fn new(verifier: CredentialVerifierBox) -> Self {
        Self {
            verifier,
            state: AdminState::default(),
        }
    }

    pub fn is_logged_in(&self) -> bool {
        self.state == AdminState::LoggedIn
    }

    pub fn login(&mut self, username: &str, password: &str) -> bool {
        if self.verifier.verify(username, password) {
            self.state = AdminState::LoggedIn;
            tracing::info!(username, "admin login");
            true
        } else {
            tracing::warn!(username, "admin login rejected");
            false
        }
    }

    pub fn logout(&mut self) {
        self.state = AdminState::LoggedOut;
        tracing::info!("admin logout");
    }

    /// Gate for admin-only actions.
    pub fn require_admin(&self) -> Result<()> {
        if self.is_logged_in() {
            Ok(())
        } else {
            Err(ShopError::AdminRequired)
        }
    }
}
