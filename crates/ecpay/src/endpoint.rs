//! Static `(operation, environment) -> URL` tables, one per client family.
//!
//! A missing URL for an environment is a legitimate answer
//! ([`Endpoint::Unavailable`]): some corridors only exist in production.
//! Asking a table about an operation it does not list is a programming
//! error and fails with [`EcpayError::UnknownOperation`].

use std::fmt;

use crate::config::{ClientFamily, Environment};
use crate::error::EcpayError;

/// Every gateway operation this crate can address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Checkout,
    QueryTradeInfo,
    QueryCreditCardTradeInfo,
    QueryCreditCardPeriodInfo,
    CreditDetailDoAction,
    InvoiceIssue,
    InvoiceInvalid,
    AllowanceIssue,
    InvoiceSearch,
    UnimartC2cOrderInfo,
    FamiC2cOrderInfo,
    HilifeC2cOrderInfo,
    OkmartC2cOrderInfo,
    B2cTradeDocument,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Checkout => "checkout",
            Operation::QueryTradeInfo => "query_trade_info",
            Operation::QueryCreditCardTradeInfo => "query_cc_trade_info",
            Operation::QueryCreditCardPeriodInfo => "query_credit_card_period_info",
            Operation::CreditDetailDoAction => "credit_detail_do_action",
            Operation::InvoiceIssue => "invoice_issue",
            Operation::InvoiceInvalid => "invoice_invalid",
            Operation::AllowanceIssue => "allowance_issue",
            Operation::InvoiceSearch => "invoice_search",
            Operation::UnimartC2cOrderInfo => "unimart_c2c_order_info",
            Operation::FamiC2cOrderInfo => "fami_c2c_order_info",
            Operation::HilifeC2cOrderInfo => "hilife_c2c_order_info",
            Operation::OkmartC2cOrderInfo => "okmart_c2c_order_info",
            Operation::B2cTradeDocument => "b2c_trade_document",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of an endpoint lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Available(&'static str),
    /// The operation is not offered in this environment.
    Unavailable,
}

impl Endpoint {
    pub fn url(&self) -> Option<&'static str> {
        match self {
            Endpoint::Available(url) => Some(url),
            Endpoint::Unavailable => None,
        }
    }
}

#[derive(Debug)]
struct EndpointEntry {
    operation: Operation,
    test: Option<&'static str>,
    production: Option<&'static str>,
}

const fn entry(
    operation: Operation,
    test: Option<&'static str>,
    production: Option<&'static str>,
) -> EndpointEntry {
    EndpointEntry {
        operation,
        test,
        production,
    }
}

static PAYMENT_ENDPOINTS: &[EndpointEntry] = &[
    entry(
        Operation::Checkout,
        Some("https://payment-stage.ecpay.com.tw/Cashier/AioCheckOut/V5"),
        Some("https://payment.ecpay.com.tw/Cashier/AioCheckOut/V5"),
    ),
    entry(
        Operation::QueryTradeInfo,
        Some("https://payment-stage.ecpay.com.tw/Cashier/QueryTradeInfo/V5"),
        Some("https://payment.ecpay.com.tw/Cashier/QueryTradeInfo/V5"),
    ),
    entry(
        Operation::QueryCreditCardTradeInfo,
        None,
        Some("https://payment.ecpay.com.tw/CreditDetail/QueryTrade/V2"),
    ),
    entry(
        Operation::QueryCreditCardPeriodInfo,
        Some("https://payment-stage.ecpay.com.tw/Cashier/QueryCreditCardPeriodInfo"),
        Some("https://payment.ecpay.com.tw/Cashier/QueryCreditCardPeriodInfo"),
    ),
    entry(
        Operation::CreditDetailDoAction,
        None,
        Some("https://payment.ecpay.com.tw/CreditDetail/DoAction"),
    ),
];

static INVOICE_ENDPOINTS: &[EndpointEntry] = &[
    entry(
        Operation::InvoiceIssue,
        Some("https://einvoice-stage.ecpay.com.tw/Invoice/Issue"),
        Some("https://einvoice.ecpay.com.tw/Invoice/Issue"),
    ),
    entry(
        Operation::InvoiceInvalid,
        Some("https://einvoice-stage.ecpay.com.tw/Invoice/IssueInvalid"),
        Some("https://einvoice.ecpay.com.tw/Invoice/IssueInvalid"),
    ),
    entry(
        Operation::AllowanceIssue,
        Some("https://einvoice-stage.ecpay.com.tw/Invoice/Allowance"),
        Some("https://einvoice.ecpay.com.tw/Invoice/Allowance"),
    ),
    entry(
        Operation::InvoiceSearch,
        Some("https://einvoice-stage.ecpay.com.tw/Query/Issue"),
        Some("https://einvoice.ecpay.com.tw/Query/Issue"),
    ),
];

static LOGISTICS_ENDPOINTS: &[EndpointEntry] = &[
    entry(
        Operation::UnimartC2cOrderInfo,
        Some("https://logistics-stage.ecpay.com.tw/Express/PrintUniMartC2COrderInfo"),
        Some("https://logistics.ecpay.com.tw/Express/PrintUniMartC2COrderInfo"),
    ),
    entry(
        Operation::FamiC2cOrderInfo,
        Some("https://logistics-stage.ecpay.com.tw/Express/PrintFAMIC2COrderInfo"),
        Some("https://logistics.ecpay.com.tw/Express/PrintFAMIC2COrderInfo"),
    ),
    entry(
        Operation::HilifeC2cOrderInfo,
        Some("https://logistics-stage.ecpay.com.tw/Express/PrintHILIFEC2COrderInfo"),
        Some("https://logistics.ecpay.com.tw/Express/PrintHILIFEC2COrderInfo"),
    ),
    entry(
        Operation::OkmartC2cOrderInfo,
        Some("https://logistics-stage.ecpay.com.tw/Express/PrintOKMARTC2COrderInfo"),
        Some("https://logistics.ecpay.com.tw/Express/PrintOKMARTC2COrderInfo"),
    ),
    entry(
        Operation::B2cTradeDocument,
        Some("https://logistics-stage.ecpay.com.tw/helper/printTradeDocument"),
        Some("https://logistics.ecpay.com.tw/helper/printTradeDocument"),
    ),
];

/// Endpoint table of one client family.
#[derive(Debug, Clone, Copy)]
pub struct EndpointRegistry {
    family: ClientFamily,
    entries: &'static [EndpointEntry],
}

impl EndpointRegistry {
    pub fn for_family(family: ClientFamily) -> Self {
        let entries = match family {
            ClientFamily::Payment => PAYMENT_ENDPOINTS,
            ClientFamily::Invoice => INVOICE_ENDPOINTS,
            ClientFamily::Logistics => LOGISTICS_ENDPOINTS,
        };
        Self { family, entries }
    }

    pub fn family(&self) -> ClientFamily {
        self.family
    }

    /// Look up `operation` for `environment`.
    pub fn resolve(
        &self,
        operation: Operation,
        environment: Environment,
    ) -> Result<Endpoint, EcpayError> {
        let entry = self
            .entries
            .iter()
            .find(|e| e.operation == operation)
            .ok_or(EcpayError::UnknownOperation {
                operation: operation.as_str(),
                family: self.family.as_str(),
            })?;

        let url = match environment {
            Environment::Test => entry.test,
            Environment::Production => entry.production,
        };
        Ok(url.map_or(Endpoint::Unavailable, Endpoint::Available))
    }

    /// Operations listed in this table.
    pub fn operations(&self) -> impl Iterator<Item = Operation> + '_ {
        self.entries.iter().map(|e| e.operation)
    }
}
