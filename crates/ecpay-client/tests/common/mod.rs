use std::sync::Mutex;

use ecpay_client::{EcpayError, ParameterSet, Transport, TransportResponse};

/// In-memory transport: records each POST and replies with a fixed body.
pub struct RecordingTransport {
    body: String,
    calls: Mutex<Vec<(String, ParameterSet)>>,
}

impl RecordingTransport {
    pub fn new(body: impl Into<String>) -> Self {
        Self {
            body: body.into(),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<(String, ParameterSet)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

impl Transport for RecordingTransport {
    async fn post_form(
        &self,
        url: &str,
        params: &ParameterSet,
    ) -> Result<TransportResponse, EcpayError> {
        self.calls
            .lock()
            .unwrap()
            .push((url.to_string(), params.clone()));
        Ok(TransportResponse {
            status: 200,
            body: self.body.clone(),
        })
    }
}

/// Transport that always fails, standing in for a dropped connection.
pub struct FailingTransport;

impl Transport for FailingTransport {
    async fn post_form(
        &self,
        _url: &str,
        _params: &ParameterSet,
    ) -> Result<TransportResponse, EcpayError> {
        Err(EcpayError::HttpError("connection reset".to_string()))
    }
}
