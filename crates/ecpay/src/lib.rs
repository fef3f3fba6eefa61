//! Request signing and dispatch for the ECPay family of form-POST APIs.
//!
//! Every request to the gateway carries a `CheckMacValue`: a digest over the
//! sorted, wrapped and legacy-URL-encoded parameter set that the gateway
//! recomputes and compares byte for byte. This crate implements that
//! contract plus the pieces every client needs around it:
//!
//! - [`codec`]: percent-encoding with the .NET fix-up, digests
//! - [`checksum`]: signing-string construction, signing, verification
//! - [`endpoint`]: per-family `(operation, environment) -> URL` tables
//! - [`credentials`]: production/sandbox credential resolution
//! - [`transport`]: the form-POST seam, with a reqwest implementation
//!
//! # Quick example
//!
//! ```
//! use ecpay::{checksum, Credentials, DigestAlgorithm, ParameterSet};
//!
//! let credentials = Credentials::new("2000132", "5294y06JbISpM5x9", "v77hoKGq4kWxNNIS");
//! let params: ParameterSet = [
//!     ("MerchantTradeNo", "ABC123"),
//!     ("MerchantTradeDate", "2024/01/01 00:00:00"),
//!     ("PaymentType", "aio"),
//!     ("EncryptType", "1"),
//! ]
//! .into_iter()
//! .collect();
//!
//! let mac = checksum::sign(&credentials, &params, DigestAlgorithm::Sha256);
//! assert_eq!(mac.len(), 64);
//! ```

// Wire contract
pub mod checksum;
pub mod codec;
pub mod constants;
pub mod params;
pub mod security;

// Configuration and dispatch
pub mod config;
pub mod credentials;
pub mod endpoint;
pub mod error;

// Network seam
#[cfg(feature = "full")]
pub mod http_client;
pub mod transport;

// Re-exports
pub use config::{
    ClientFamily, ClientOptions, DigestAlgorithm, Environment, LogisticsFamily, LogisticsSubType,
    TransportConfig,
};
pub use constants::{CHECK_MAC_VALUE, MERCHANT_ID};
pub use credentials::{ClientConfig, Credentials};
pub use endpoint::{Endpoint, EndpointRegistry, Operation};
pub use error::EcpayError;
pub use params::{parse_response_body, ParameterSet, ResponseMap};
pub use transport::{Transport, TransportResponse};

#[cfg(feature = "full")]
pub use http_client::HttpTransport;
