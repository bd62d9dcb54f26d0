use error_stack::ResultExt;
use google_sheets4::hyper;
use google_sheets4::oauth2::{self, authenticator::Authenticator};

use crate::ports::sync_error::SyncError;

use super::{credential::Credential, http_client::HttpsConnector};

/// Scope requested for every call; the tool never writes to the spreadsheet.
pub const READ_SCOPE: &str = "https://www.googleapis.com/auth/spreadsheets.readonly";

/// Builds a service-account authenticator and exchanges one token up front so a
/// rejected credential is reported as such instead of as a failed fetch.
pub async fn auth(
    credential: Credential,
    client: hyper::Client<HttpsConnector>,
) -> error_stack::Result<Authenticator<HttpsConnector>, SyncError> {
    let client_email = credential.client_email().to_owned();

    let authenticator = oauth2::ServiceAccountAuthenticator::with_client(credential.into_key(), client)
        .build()
        .await
        .change_context(SyncError::Auth)
        .attach_printable("Could not build an authenticator from the service-account key")?;

    authenticator
        .token(&[READ_SCOPE])
        .await
        .change_context(SyncError::Auth)
        .attach_printable_lazy(|| format!("Token request for {} was refused", client_email))?;

    tracing::debug!(client_email = %client_email, "Service account authenticated");

    Ok(authenticator)
}
