//! Request pipeline shared by the three clients: required-field checks,
//! MerchantID injection, signing, endpoint lookup and the POST itself.

use chrono::{FixedOffset, Offset, Utc};
use ecpay::checksum::{sign_and_attach, verify};
use ecpay::{
    ClientConfig, EcpayError, Endpoint, EndpointRegistry, Operation,
    ParameterSet, Transport, TransportResponse, CHECK_MAC_VALUE, MERCHANT_ID,
};

/// Gateway local time is Taiwan time, UTC+8 all year.
const GATEWAY_UTC_OFFSET_SECS: i32 = 8 * 3600;

pub(crate) struct Dispatcher<T> {
    config: ClientConfig,
    registry: EndpointRegistry,
    transport: T,
}

impl<T: Transport> Dispatcher<T> {
    pub(crate) fn new(config: ClientConfig, transport: T) -> Self {
        Self {
            registry: EndpointRegistry::for_family(config.family()),
            config,
            transport,
        }
    }

    pub(crate) fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub(crate) fn transport(&self) -> &T {
        &self.transport
    }

    pub(crate) fn endpoint(&self, operation: Operation) -> Result<Endpoint, EcpayError> {
        self.registry.resolve(operation, self.config.environment())
    }

    /// Add the merchant id, drop absent values and attach `CheckMacValue`.
    pub(crate) fn generate_params(&self, mut params: ParameterSet) -> ParameterSet {
        params.insert(MERCHANT_ID, self.config.credentials().merchant_id.as_str());
        params.compact();
        sign_and_attach(
            self.config.credentials(),
            &mut params,
            self.config.digest_algorithm(),
        );
        params
    }

    /// POST `params` to the endpoint of `operation`.
    ///
    /// An operation with no URL in the current environment performs no I/O
    /// and yields [`TransportResponse::empty`].
    pub(crate) async fn post(
        &self,
        operation: Operation,
        params: &ParameterSet,
    ) -> Result<TransportResponse, EcpayError> {
        let environment = self.config.environment();
        match self.endpoint(operation)? {
            Endpoint::Available(url) => {
                tracing::debug!(
                    operation = %operation,
                    environment = %environment,
                    url,
                    fields = params.len(),
                    "posting gateway request"
                );
                self.transport.post_form(url, params).await
            }
            Endpoint::Unavailable => {
                tracing::warn!(
                    operation = %operation,
                    environment = %environment,
                    "operation not offered in this environment, returning empty response"
                );
                Ok(TransportResponse::empty())
            }
        }
    }

    pub(crate) fn verify_mac(&self, params: &ParameterSet, excluded_fields: &[&str]) -> bool {
        verify(
            self.config.credentials(),
            params,
            CHECK_MAC_VALUE,
            excluded_fields,
            self.config.digest_algorithm(),
        )
    }
}

/// Fail with [`EcpayError::MissingParameter`] naming the first absent field.
pub(crate) fn require(params: &ParameterSet, fields: &[&str]) -> Result<(), EcpayError> {
    match fields.iter().find(|f| !params.contains(f)) {
        Some(missing) => Err(EcpayError::MissingParameter(missing.to_string())),
        None => Ok(()),
    }
}

/// Current unix time in seconds, as the gateway's `TimeStamp` field.
pub(crate) fn unix_timestamp() -> String {
    Utc::now().timestamp().to_string()
}

/// Current gateway local time as `yyyy/MM/dd HH:mm:ss`.
pub(crate) fn gateway_local_time() -> String {
    let offset = FixedOffset::east_opt(GATEWAY_UTC_OFFSET_SECS).unwrap_or_else(|| Utc.fix());
    Utc::now()
        .with_timezone(&offset)
        .format("%Y/%m/%d %H:%M:%S")
        .to_string()
}

/// Eight lower-case hex characters for a generated `MerchantTradeNo`.
pub(crate) fn random_trade_no() -> String {
    hex::encode(rand::random::<[u8; 4]>())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_names_first_missing_field() {
        let params = ParameterSet::from_optional([("A", Some("1")), ("B", None)]);
        assert!(require(&params, &["A"]).is_ok());
        assert!(matches!(
            require(&params, &["A", "B", "C"]),
            Err(EcpayError::MissingParameter(f)) if f == "B"
        ));
    }

    #[test]
    fn test_require_accepts_empty_string() {
        let params: ParameterSet = [("A", "")].into_iter().collect();
        assert!(require(&params, &["A"]).is_ok());
    }

    #[test]
    fn test_random_trade_no_shape() {
        let no = random_trade_no();
        assert_eq!(no.len(), 8);
        assert!(no.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn test_gateway_local_time_format() {
        let now = gateway_local_time();
        assert_eq!(now.len(), 19);
        assert_eq!(&now[4..5], "/");
        assert_eq!(&now[7..8], "/");
        assert_eq!(&now[10..11], " ");
        assert_eq!(&now[13..14], ":");
    }

    #[test]
    fn test_unix_timestamp_is_numeric() {
        let ts: i64 = unix_timestamp().parse().unwrap();
        assert!(ts > 1_700_000_000);
    }
}
