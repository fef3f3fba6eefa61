//! Construction options shared by every client family.

use serde::Deserialize;
use std::env;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::error::EcpayError;

const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Gateway environment. Fixed for the lifetime of a client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(try_from = "String")]
pub enum Environment {
    Test,
    #[default]
    Production,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Test => "test",
            Environment::Production => "production",
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Environment {
    type Err = EcpayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "test" => Ok(Environment::Test),
            "production" => Ok(Environment::Production),
            other => Err(EcpayError::InvalidEnvironment(other.to_string())),
        }
    }
}

impl TryFrom<String> for Environment {
    type Error = EcpayError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

/// Hash used for CheckMacValue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "String")]
pub enum DigestAlgorithm {
    Md5,
    Sha256,
}

impl DigestAlgorithm {
    pub fn as_str(&self) -> &'static str {
        match self {
            DigestAlgorithm::Md5 => "md5",
            DigestAlgorithm::Sha256 => "sha256",
        }
    }
}

impl FromStr for DigestAlgorithm {
    type Err = EcpayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "md5" => Ok(DigestAlgorithm::Md5),
            "sha256" => Ok(DigestAlgorithm::Sha256),
            other => Err(EcpayError::InvalidDigestAlgorithm(other.to_string())),
        }
    }
}

impl TryFrom<String> for DigestAlgorithm {
    type Error = EcpayError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

/// The three API families. Each has its own endpoint table, sandbox
/// credentials and default digest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClientFamily {
    Payment,
    Invoice,
    Logistics,
}

impl ClientFamily {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClientFamily::Payment => "payment",
            ClientFamily::Invoice => "invoice",
            ClientFamily::Logistics => "logistics",
        }
    }

    pub fn default_digest(&self) -> DigestAlgorithm {
        match self {
            ClientFamily::Payment => DigestAlgorithm::Sha256,
            ClientFamily::Invoice | ClientFamily::Logistics => DigestAlgorithm::Md5,
        }
    }
}

/// Credential group a logistics sub-type belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogisticsFamily {
    /// Home delivery and B2C convenience-store shipping.
    B2cHomeStyle,
    /// Store-to-store (C2C) locker shipping.
    C2cLockerStyle,
}

/// Carrier codes accepted as `LogisticsSubType`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogisticsSubType {
    Fami,
    Unimart,
    Hilife,
    Tcat,
    Ecan,
    FamiC2c,
    UnimartC2c,
    HilifeC2c,
    OkmartC2c,
}

impl LogisticsSubType {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogisticsSubType::Fami => "FAMI",
            LogisticsSubType::Unimart => "UNIMART",
            LogisticsSubType::Hilife => "HILIFE",
            LogisticsSubType::Tcat => "TCAT",
            LogisticsSubType::Ecan => "ECAN",
            LogisticsSubType::FamiC2c => "FAMIC2C",
            LogisticsSubType::UnimartC2c => "UNIMARTC2C",
            LogisticsSubType::HilifeC2c => "HILIFEC2C",
            LogisticsSubType::OkmartC2c => "OKMARTC2C",
        }
    }

    pub fn family(&self) -> LogisticsFamily {
        match self {
            LogisticsSubType::Fami
            | LogisticsSubType::Unimart
            | LogisticsSubType::Hilife
            | LogisticsSubType::Tcat
            | LogisticsSubType::Ecan => LogisticsFamily::B2cHomeStyle,
            LogisticsSubType::FamiC2c
            | LogisticsSubType::UnimartC2c
            | LogisticsSubType::HilifeC2c
            | LogisticsSubType::OkmartC2c => LogisticsFamily::C2cLockerStyle,
        }
    }
}

impl FromStr for LogisticsSubType {
    type Err = EcpayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let sub_type = match s {
            "FAMI" => LogisticsSubType::Fami,
            "UNIMART" => LogisticsSubType::Unimart,
            "HILIFE" => LogisticsSubType::Hilife,
            "TCAT" => LogisticsSubType::Tcat,
            "ECAN" => LogisticsSubType::Ecan,
            "FAMIC2C" => LogisticsSubType::FamiC2c,
            "UNIMARTC2C" => LogisticsSubType::UnimartC2c,
            "HILIFEC2C" => LogisticsSubType::HilifeC2c,
            "OKMARTC2C" => LogisticsSubType::OkmartC2c,
            other => return Err(EcpayError::InvalidLogisticSubType(other.to_string())),
        };
        Ok(sub_type)
    }
}

impl fmt::Display for LogisticsSubType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Timeouts handed to the HTTP transport. The core never retries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TransportConfig {
    pub connect_timeout_secs: u64,
    pub timeout_secs: u64,
}

impl TransportConfig {
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            connect_timeout_secs: DEFAULT_CONNECT_TIMEOUT_SECS,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// Options a client is constructed from. Unset values get the client
/// family's defaults when credentials are resolved.
#[derive(Clone, Default, Deserialize)]
#[serde(default)]
pub struct ClientOptions {
    pub environment: Environment,
    pub merchant_id: Option<String>,
    pub hash_key: Option<String>,
    pub hash_iv: Option<String>,
    pub digest_algorithm: Option<DigestAlgorithm>,
    /// Raw carrier code; validated when a logistics client is built.
    pub logistics_sub_type: Option<String>,
    pub transport: TransportConfig,
}

impl fmt::Debug for ClientOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientOptions")
            .field("environment", &self.environment)
            .field("merchant_id", &self.merchant_id)
            .field("hash_key", &self.hash_key.as_ref().map(|_| "[REDACTED]"))
            .field("hash_iv", &self.hash_iv.as_ref().map(|_| "[REDACTED]"))
            .field("digest_algorithm", &self.digest_algorithm)
            .field("logistics_sub_type", &self.logistics_sub_type)
            .field("transport", &self.transport)
            .finish()
    }
}

impl ClientOptions {
    /// Sandbox options; credentials are filled in by the library.
    pub fn test() -> Self {
        Self {
            environment: Environment::Test,
            ..Self::default()
        }
    }

    /// Production options with explicit merchant credentials.
    pub fn production(
        merchant_id: impl Into<String>,
        hash_key: impl Into<String>,
        hash_iv: impl Into<String>,
    ) -> Self {
        Self {
            environment: Environment::Production,
            merchant_id: Some(merchant_id.into()),
            hash_key: Some(hash_key.into()),
            hash_iv: Some(hash_iv.into()),
            ..Self::default()
        }
    }

    pub fn with_digest_algorithm(mut self, algorithm: DigestAlgorithm) -> Self {
        self.digest_algorithm = Some(algorithm);
        self
    }

    pub fn with_logistics_sub_type(mut self, sub_type: LogisticsSubType) -> Self {
        self.logistics_sub_type = Some(sub_type.as_str().to_string());
        self
    }

    pub fn with_transport(mut self, transport: TransportConfig) -> Self {
        self.transport = transport;
        self
    }

    /// Read options from `ECPAY_*` environment variables.
    ///
    /// `ECPAY_MODE` defaults to `production` and empty variables count as
    /// unset. Credentials are not checked here; that happens when a client
    /// resolves them.
    pub fn from_env() -> Result<Self, EcpayError> {
        let environment = match non_empty_var("ECPAY_MODE") {
            Some(mode) => mode.parse()?,
            None => Environment::Production,
        };

        let digest_algorithm = non_empty_var("ECPAY_DIGEST")
            .map(|s| s.parse::<DigestAlgorithm>())
            .transpose()?;

        let defaults = TransportConfig::default();
        let transport = TransportConfig {
            connect_timeout_secs: secs_var(
                "ECPAY_CONNECT_TIMEOUT_SECS",
                defaults.connect_timeout_secs,
            )?,
            timeout_secs: secs_var("ECPAY_TIMEOUT_SECS", defaults.timeout_secs)?,
        };

        Ok(Self {
            environment,
            merchant_id: non_empty_var("ECPAY_MERCHANT_ID"),
            hash_key: non_empty_var("ECPAY_HASH_KEY"),
            hash_iv: non_empty_var("ECPAY_HASH_IV"),
            digest_algorithm,
            logistics_sub_type: non_empty_var("ECPAY_LOGISTICS_SUB_TYPE"),
            transport,
        })
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|s| !s.is_empty())
}

fn secs_var(name: &str, default: u64) -> Result<u64, EcpayError> {
    match non_empty_var(name) {
        Some(raw) => raw
            .parse()
            .map_err(|_| EcpayError::ConfigError(format!("{name} must be whole seconds, got '{raw}'"))),
        None => Ok(default),
    }
}
