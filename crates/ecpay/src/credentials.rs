//! Resolution of merchant credentials from [`ClientOptions`].
//!
//! Production clients must bring all three secrets. Test clients always get
//! a fixed sandbox set; for logistics the set depends on the carrier family.

use std::fmt;

use crate::config::{
    ClientFamily, ClientOptions, DigestAlgorithm, Environment, LogisticsFamily, LogisticsSubType,
    TransportConfig,
};
use crate::constants::*;
use crate::error::EcpayError;

/// Merchant credentials used to sign requests.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub merchant_id: String,
    pub hash_key: String,
    pub hash_iv: String,
}

impl Credentials {
    pub fn new(
        merchant_id: impl Into<String>,
        hash_key: impl Into<String>,
        hash_iv: impl Into<String>,
    ) -> Self {
        Self {
            merchant_id: merchant_id.into(),
            hash_key: hash_key.into(),
            hash_iv: hash_iv.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("merchant_id", &self.merchant_id)
            .field("hash_key", &"[REDACTED]")
            .field("hash_iv", &"[REDACTED]")
            .finish()
    }
}

/// Frozen configuration of one client. Built once by [`resolve`]; there is
/// no way to change it afterwards.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    family: ClientFamily,
    environment: Environment,
    credentials: Credentials,
    digest_algorithm: DigestAlgorithm,
    logistics_sub_type: Option<LogisticsSubType>,
    transport: TransportConfig,
}

impl ClientConfig {
    pub fn family(&self) -> ClientFamily {
        self.family
    }

    pub fn environment(&self) -> Environment {
        self.environment
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    pub fn digest_algorithm(&self) -> DigestAlgorithm {
        self.digest_algorithm
    }

    pub fn logistics_sub_type(&self) -> Option<LogisticsSubType> {
        self.logistics_sub_type
    }

    pub fn transport(&self) -> &TransportConfig {
        &self.transport
    }
}

/// Resolve the credentials, digest and sub-type a `family` client runs with.
///
/// Fails with [`EcpayError::MissingCredential`] when a production secret is
/// absent (checked in the order merchant id, hash key, hash IV) and with
/// [`EcpayError::InvalidLogisticSubType`] when a logistics client's carrier
/// code is unrecognised, or absent in test mode. Payment and invoice clients
/// never look at the sub-type.
pub fn resolve(family: ClientFamily, options: &ClientOptions) -> Result<ClientConfig, EcpayError> {
    let (credentials, logistics_sub_type) = match options.environment {
        Environment::Production => {
            let credentials = Credentials {
                merchant_id: required(&options.merchant_id, "merchant_id")?,
                hash_key: required(&options.hash_key, "hash_key")?,
                hash_iv: required(&options.hash_iv, "hash_iv")?,
            };
            let sub_type = match family {
                ClientFamily::Logistics => options
                    .logistics_sub_type
                    .as_deref()
                    .map(str::parse::<LogisticsSubType>)
                    .transpose()?,
                ClientFamily::Payment | ClientFamily::Invoice => None,
            };
            (credentials, sub_type)
        }
        Environment::Test => match family {
            ClientFamily::Payment => (
                Credentials::new(
                    SANDBOX_MERCHANT_ID,
                    PAYMENT_SANDBOX_HASH_KEY,
                    PAYMENT_SANDBOX_HASH_IV,
                ),
                None,
            ),
            ClientFamily::Invoice => (
                Credentials::new(
                    SANDBOX_MERCHANT_ID,
                    INVOICE_SANDBOX_HASH_KEY,
                    INVOICE_SANDBOX_HASH_IV,
                ),
                None,
            ),
            ClientFamily::Logistics => {
                let raw = options.logistics_sub_type.as_deref().ok_or_else(|| {
                    EcpayError::InvalidLogisticSubType(
                        "logistics_sub_type is required in test mode".to_string(),
                    )
                })?;
                let sub_type: LogisticsSubType = raw.parse()?;
                let credentials = match sub_type.family() {
                    LogisticsFamily::B2cHomeStyle => Credentials::new(
                        SANDBOX_MERCHANT_ID,
                        LOGISTICS_B2C_SANDBOX_HASH_KEY,
                        LOGISTICS_B2C_SANDBOX_HASH_IV,
                    ),
                    LogisticsFamily::C2cLockerStyle => Credentials::new(
                        SANDBOX_C2C_MERCHANT_ID,
                        LOGISTICS_C2C_SANDBOX_HASH_KEY,
                        LOGISTICS_C2C_SANDBOX_HASH_IV,
                    ),
                };
                (credentials, Some(sub_type))
            }
        },
    };

    Ok(ClientConfig {
        family,
        environment: options.environment,
        credentials,
        digest_algorithm: options
            .digest_algorithm
            .unwrap_or_else(|| family.default_digest()),
        logistics_sub_type,
        transport: options.transport,
    })
}

fn required(value: &Option<String>, name: &'static str) -> Result<String, EcpayError> {
    value.clone().ok_or(EcpayError::MissingCredential(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_production_requires_merchant_id_first() {
        let options = ClientOptions::default();
        let err = resolve(ClientFamily::Payment, &options).unwrap_err();
        assert!(matches!(err, EcpayError::MissingCredential("merchant_id")));
    }

    #[test]
    fn test_production_missing_credential_precedes_sub_type_check() {
        let options = ClientOptions {
            logistics_sub_type: Some("UNKNOWN".to_string()),
            ..ClientOptions::default()
        };
        let err = resolve(ClientFamily::Logistics, &options).unwrap_err();
        assert!(matches!(err, EcpayError::MissingCredential("merchant_id")));
    }

    #[test]
    fn test_production_names_each_missing_field() {
        let mut options = ClientOptions::production("3002607", "key", "iv");
        options.hash_iv = None;
        assert!(matches!(
            resolve(ClientFamily::Invoice, &options),
            Err(EcpayError::MissingCredential("hash_iv"))
        ));
        options.hash_key = None;
        assert!(matches!(
            resolve(ClientFamily::Invoice, &options),
            Err(EcpayError::MissingCredential("hash_key"))
        ));
    }

    #[test]
    fn test_production_uses_supplied_credentials() {
        let options = ClientOptions::production("3002607", "key", "iv");
        let config = resolve(ClientFamily::Payment, &options).unwrap();
        assert_eq!(config.credentials(), &Credentials::new("3002607", "key", "iv"));
        assert_eq!(config.environment(), Environment::Production);
        assert_eq!(config.digest_algorithm(), DigestAlgorithm::Sha256);
    }

    #[test]
    fn test_production_logistics_sub_type_is_optional() {
        let options = ClientOptions::production("3002607", "key", "iv");
        let config = resolve(ClientFamily::Logistics, &options).unwrap();
        assert_eq!(config.logistics_sub_type(), None);
    }

    #[test]
    fn test_production_payment_and_invoice_skip_sub_type() {
        let options = ClientOptions {
            logistics_sub_type: Some("fami".to_string()),
            ..ClientOptions::production("3002607", "key", "iv")
        };
        for family in [ClientFamily::Payment, ClientFamily::Invoice] {
            let config = resolve(family, &options).unwrap();
            assert_eq!(config.logistics_sub_type(), None);
        }
        assert!(matches!(
            resolve(ClientFamily::Logistics, &options),
            Err(EcpayError::InvalidLogisticSubType(s)) if s == "fami"
        ));
    }

    #[test]
    fn test_test_mode_ignores_supplied_credentials() {
        let options = ClientOptions {
            environment: Environment::Test,
            merchant_id: Some("999".to_string()),
            ..ClientOptions::default()
        };
        let config = resolve(ClientFamily::Invoice, &options).unwrap();
        assert_eq!(config.credentials().merchant_id, SANDBOX_MERCHANT_ID);
        assert_eq!(config.credentials().hash_key, INVOICE_SANDBOX_HASH_KEY);
        assert_eq!(config.digest_algorithm(), DigestAlgorithm::Md5);
    }

    #[test]
    fn test_test_mode_digest_override() {
        let options = ClientOptions::test().with_digest_algorithm(DigestAlgorithm::Sha256);
        let config = resolve(ClientFamily::Invoice, &options).unwrap();
        assert_eq!(config.digest_algorithm(), DigestAlgorithm::Sha256);
    }

    #[test]
    fn test_logistics_b2c_and_c2c_sandbox_sets() {
        let b2c = resolve(
            ClientFamily::Logistics,
            &ClientOptions::test().with_logistics_sub_type(LogisticsSubType::Tcat),
        )
        .unwrap();
        assert_eq!(b2c.credentials().merchant_id, SANDBOX_MERCHANT_ID);
        assert_eq!(b2c.credentials().hash_key, LOGISTICS_B2C_SANDBOX_HASH_KEY);

        let c2c = resolve(
            ClientFamily::Logistics,
            &ClientOptions::test().with_logistics_sub_type(LogisticsSubType::OkmartC2c),
        )
        .unwrap();
        assert_eq!(c2c.credentials().merchant_id, SANDBOX_C2C_MERCHANT_ID);
        assert_eq!(c2c.credentials().hash_iv, LOGISTICS_C2C_SANDBOX_HASH_IV);
        assert_eq!(c2c.logistics_sub_type(), Some(LogisticsSubType::OkmartC2c));
    }

    #[test]
    fn test_logistics_unknown_sub_type_fails() {
        let options = ClientOptions {
            logistics_sub_type: Some("UNKNOWN".to_string()),
            ..ClientOptions::test()
        };
        assert!(matches!(
            resolve(ClientFamily::Logistics, &options),
            Err(EcpayError::InvalidLogisticSubType(s)) if s == "UNKNOWN"
        ));
    }

    #[test]
    fn test_logistics_absent_sub_type_fails_in_test_mode() {
        assert!(matches!(
            resolve(ClientFamily::Logistics, &ClientOptions::test()),
            Err(EcpayError::InvalidLogisticSubType(_))
        ));
    }

    #[test]
    fn test_credentials_debug_redacts_secrets() {
        let creds = Credentials::new("2000132", "5294y06JbISpM5x9", "v77hoKGq4kWxNNIS");
        let debug = format!("{creds:?}");
        assert!(debug.contains("2000132"));
        assert!(!debug.contains("5294y06JbISpM5x9"));
        assert!(!debug.contains("v77hoKGq4kWxNNIS"));
    }
}
