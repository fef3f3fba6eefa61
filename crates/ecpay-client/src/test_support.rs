use std::sync::Mutex;

use ecpay::{EcpayError, ParameterSet, Transport, TransportResponse};

/// Transport that records every POST and answers with a canned body.
pub(crate) struct RecordingTransport {
    body: String,
    calls: Mutex<Vec<(String, ParameterSet)>>,
}

impl RecordingTransport {
    pub(crate) fn new(body: impl Into<String>) -> Self {
        Self {
            body: body.into(),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn calls(&self) -> Vec<(String, ParameterSet)> {
        self.calls.lock().unwrap().clone()
    }

    pub(crate) fn call_count(&self) -> usize {
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
