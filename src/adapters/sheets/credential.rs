use error_stack::{report, ResultExt};
use google_sheets4::oauth2::{self, ServiceAccountKey};

use crate::ports::sync_error::SyncError;

/// Service-account key read from the environment. Lives for one run and is
/// never written anywhere.
pub struct Credential(ServiceAccountKey);

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("client_email", &self.0.client_email)
            .field("private_key", &"<redacted>")
            .finish()
    }
}

impl Credential {
    pub fn from_env(var: &str) -> error_stack::Result<Self, SyncError> {
        let json = std::env::var(var)
            .change_context(SyncError::Config)
            .attach_printable_lazy(|| format!("Environment variable {} is not set", var))?;

        Self::from_json(&json)
            .attach_printable_lazy(|| format!("Environment variable {} holds an invalid credential", var))
    }

    pub fn from_json(json: &str) -> error_stack::Result<Self, SyncError> {
        if json.trim().is_empty() {
            return Err(report!(SyncError::Config).attach_printable("Credential is empty"));
        }

        oauth2::parse_service_account_key(json)
            .map(Credential)
            .change_context(SyncError::Config)
            .attach_printable("Credential is not a service-account JSON document")
    }

    pub fn client_email(&self) -> &str {
        &self.0.client_email
    }

    pub(crate) fn into_key(self) -> ServiceAccountKey {
        self.0
    }
}
