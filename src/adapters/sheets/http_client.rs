use error_stack::ResultExt;
use google_sheets4::{hyper, hyper_rustls};

use crate::ports::sync_error::SyncError;

pub type HttpsConnector = hyper_rustls::HttpsConnector<hyper::client::HttpConnector>;

pub fn http_client() -> error_stack::Result<hyper::Client<HttpsConnector>, SyncError> {
    let connector = hyper_rustls::HttpsConnectorBuilder::new()
        .with_native_roots()
        .change_context(SyncError::Fetch)
        .attach_printable("Could not load the platform's root certificates")?
        .https_only()
        .enable_http1()
        .build();

    Ok(hyper::Client::builder().build(connector))
}
