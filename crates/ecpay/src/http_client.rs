use crate::config::TransportConfig;
use crate::error::EcpayError;
use crate::params::ParameterSet;
use crate::transport::{Transport, TransportResponse};

/// [`Transport`] over a pooled `reqwest::Client`.
///
/// Redirects are not followed. Non-2xx statuses are returned as-is; the
/// gateway reports most failures in the body.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    http: reqwest::Client,
}

impl HttpTransport {
    pub fn new(config: &TransportConfig) -> Result<Self, EcpayError> {
        let http = reqwest::Client::builder()
            .connect_timeout(config.connect_timeout())
            .timeout(config.timeout())
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .map_err(|e| EcpayError::HttpError(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { http })
    }

    /// Use a caller-configured reqwest client.
    pub fn with_http_client(http: reqwest::Client) -> Self {
        Self { http }
    }
}

impl Transport for HttpTransport {
    async fn post_form(
        &self,
        url: &str,
        params: &ParameterSet,
    ) -> Result<TransportResponse, EcpayError> {
        let resp = self
            .http
            .post(url)
            .form(&params.to_form_pairs())
            .send()
            .await
            .map_err(|e| EcpayError::HttpError(format!("request failed: {e}")))?;

        let status = resp.status().as_u16();
        let body = resp
            .text()
            .await
            .map_err(|e| EcpayError::HttpError(format!("failed to read response body: {e}")))?;

        Ok(TransportResponse { status, body })
    }
}
