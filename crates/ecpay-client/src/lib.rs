//! Payment, e-invoice and logistics clients for the ECPay gateway.
//!
//! Each client resolves its credentials once at construction, signs every
//! request with `CheckMacValue`, and posts through a [`Transport`]
//! (reqwest by default).
//!
//! # Quick example
//!
//! ```no_run
//! use ecpay_client::{ClientOptions, PaymentClient};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), ecpay_client::EcpayError> {
//! let client = PaymentClient::new(ClientOptions::test())?;
//!
//! let trade = client.query_trade_info("ABC123", None).await?;
//! println!("status: {:?}", trade.get("TradeStatus"));
//! # Ok(())
//! # }
//! ```

mod dispatch;
mod invoice;
mod logistics;
mod payment;

#[cfg(test)]
mod test_support;

pub use invoice::InvoiceClient;
pub use logistics::{LabelForm, LogisticsClient};
pub use payment::{CreditAction, PaymentClient};

// Re-export commonly needed types from core
pub use ecpay::{
    ClientOptions, Credentials, DigestAlgorithm, EcpayError, Endpoint, Environment,
    HttpTransport, LogisticsSubType, ParameterSet, ResponseMap, Transport, TransportConfig,
    TransportResponse, CHECK_MAC_VALUE,
};
