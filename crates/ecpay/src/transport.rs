//! The seam between request building and the network.

use crate::error::EcpayError;
use crate::params::ParameterSet;

/// Raw outcome of a form POST.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}

impl TransportResponse {
    /// What an operation yields when its endpoint is switched off: no status
    /// from the wire and an empty body.
    pub fn empty() -> Self {
        Self {
            status: 0,
            body: String::new(),
        }
    }
}

/// Sends form-encoded POSTs to the gateway.
///
/// Timeouts, retries and cancellation belong to the implementation. Clients
/// hold a transport by value and may be shared across tasks, so
/// implementations must be `Send + Sync`.
pub trait Transport: Send + Sync {
    /// POST the present entries of `params` as
    /// `application/x-www-form-urlencoded` and return the raw body text.
    fn post_form(
        &self,
        url: &str,
        params: &ParameterSet,
    ) -> impl std::future::Future<Output = Result<TransportResponse, EcpayError>> + Send;
}
