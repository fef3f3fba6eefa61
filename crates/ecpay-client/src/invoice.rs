//! E-invoice client.
//!
//! The invoice API signs a handful of free-text fields in encoded form but
//! expects them decoded on the wire, and leaves another set out of the
//! checksum entirely. Both lists are fixed by the gateway:
//! [`INVOICE_SPECIAL_ENCODE_FIELDS`] and [`INVOICE_CHECKSUM_EXCLUDED_FIELDS`].

use ecpay::codec::{dotnet_url_encode, form_decode};
use ecpay::constants::{
    INVOICE_CHECKSUM_EXCLUDED_FIELDS, INVOICE_RESPONSE_DECODE_FIELDS,
    INVOICE_SEARCH_DECODE_FIELDS, INVOICE_SPECIAL_ENCODE_FIELDS,
};
use ecpay::credentials::resolve;
use ecpay::{
    parse_response_body, ClientFamily, ClientOptions, Credentials, DigestAlgorithm, EcpayError,
    Environment, HttpTransport, Operation, ParameterSet, ResponseMap, Transport,
};

use crate::dispatch::{require, unix_timestamp, Dispatcher};

const INVOICE_ISSUE_REQUIRED: &[&str] = &[
    "RelateNumber",
    "Print",
    "Donation",
    "TaxType",
    "SalesAmount",
    "ItemName",
    "ItemCount",
    "ItemWord",
    "ItemPrice",
    "ItemAmount",
    "InvType",
];

const INVOICE_INVALID_REQUIRED: &[&str] = &["InvoiceNumber", "Reason"];

const ALLOWANCE_ISSUE_REQUIRED: &[&str] = &[
    "InvoiceNo",
    "AllowanceNotify",
    "AllowanceAmount",
    "ItemName",
    "ItemCount",
    "ItemWord",
    "ItemPrice",
    "ItemAmount",
];

const INVOICE_SEARCH_REQUIRED: &[&str] = &["RelateNumber"];

/// Client for issuing, voiding and searching e-invoices and allowances.
///
/// Signs with MD5 unless the options say otherwise.
pub struct InvoiceClient<T: Transport = HttpTransport> {
    inner: Dispatcher<T>,
}

impl InvoiceClient<HttpTransport> {
    /// Build a client that talks to the gateway over HTTP.
    pub fn new(options: ClientOptions) -> Result<Self, EcpayError> {
        let config = resolve(ClientFamily::Invoice, &options)?;
        let transport = HttpTransport::new(config.transport())?;
        Ok(Self {
            inner: Dispatcher::new(config, transport),
        })
    }
}

impl<T: Transport> InvoiceClient<T> {
    /// Build a client over a caller-supplied transport.
    pub fn with_transport(options: ClientOptions, transport: T) -> Result<Self, EcpayError> {
        let config = resolve(ClientFamily::Invoice, &options)?;
        Ok(Self {
            inner: Dispatcher::new(config, transport),
        })
    }

    pub fn credentials(&self) -> &Credentials {
        self.inner.config().credentials()
    }

    pub fn environment(&self) -> Environment {
        self.inner.config().environment()
    }

    pub fn digest_algorithm(&self) -> DigestAlgorithm {
        self.inner.config().digest_algorithm()
    }

    pub fn transport(&self) -> &T {
        self.inner.transport()
    }

    /// Check the `CheckMacValue` of a gateway-originated parameter set.
    pub fn verify_mac(&self, params: &ParameterSet) -> bool {
        self.inner.verify_mac(params, &[])
    }

    /// Issue an invoice.
    ///
    /// Multi-item fields are `|`-separated (`ItemName=a|b`, `ItemCount=1|2`).
    pub async fn invoice_issue(&self, params: ParameterSet) -> Result<ResponseMap, EcpayError> {
        require(&params, INVOICE_ISSUE_REQUIRED)?;
        self.send(Operation::InvoiceIssue, params, INVOICE_RESPONSE_DECODE_FIELDS)
            .await
    }

    /// Void an issued invoice.
    pub async fn invoice_invalid(&self, params: ParameterSet) -> Result<ResponseMap, EcpayError> {
        require(&params, INVOICE_INVALID_REQUIRED)?;
        self.send(Operation::InvoiceInvalid, params, INVOICE_RESPONSE_DECODE_FIELDS)
            .await
    }

    /// Issue an allowance (partial credit) against an invoice.
    pub async fn allowance_issue(&self, params: ParameterSet) -> Result<ResponseMap, EcpayError> {
        require(&params, ALLOWANCE_ISSUE_REQUIRED)?;
        self.send(Operation::AllowanceIssue, params, INVOICE_RESPONSE_DECODE_FIELDS)
            .await
    }

    /// Look up an invoice by the merchant's `RelateNumber`.
    ///
    /// The response carries its own `CheckMacValue`, verified over the raw
    /// response fields minus the excluded set; a mismatch is
    /// [`EcpayError::ChecksumMismatch`].
    pub async fn invoice_search_by_merchant_order_no(
        &self,
        params: ParameterSet,
    ) -> Result<ResponseMap, EcpayError> {
        require(&params, INVOICE_SEARCH_REQUIRED)?;
        let post_params = self.prepare(params);
        let res = self
            .inner
            .post(Operation::InvoiceSearch, &post_params)
            .await?;

        let raw = ParameterSet::from(parse_response_body(&res.body, &[]));
        if !self
            .inner
            .verify_mac(&raw, INVOICE_CHECKSUM_EXCLUDED_FIELDS)
        {
            tracing::error!(
                operation = %Operation::InvoiceSearch,
                status = res.status,
                "invoice search response failed CheckMacValue verification"
            );
            return Err(EcpayError::ChecksumMismatch);
        }

        Ok(parse_response_body(&res.body, INVOICE_SEARCH_DECODE_FIELDS))
    }

    async fn send(
        &self,
        operation: Operation,
        params: ParameterSet,
        decode_keys: &[&str],
    ) -> Result<ResponseMap, EcpayError> {
        let post_params = self.prepare(params);
        let res = self.inner.post(operation, &post_params).await?;
        Ok(parse_response_body(&res.body, decode_keys))
    }

    /// Turn caller params into the parameter set that goes on the wire.
    ///
    /// Special fields are encoded before signing, excluded fields are set
    /// aside while signing, and the special fields are decoded again for
    /// transmission. The checksum therefore covers the encoded text while the
    /// gateway receives the decoded text.
    fn prepare(&self, params: ParameterSet) -> ParameterSet {
        let mut params = params;
        params.insert_default("TimeStamp", unix_timestamp());
        params.compact();

        for field in INVOICE_SPECIAL_ENCODE_FIELDS {
            params.map_value(field, dotnet_url_encode);
        }

        let set_aside: Vec<(&str, String)> = INVOICE_CHECKSUM_EXCLUDED_FIELDS
            .iter()
            .filter_map(|field| params.remove(field).map(|value| (*field, value)))
            .collect();

        let mut post_params = self.inner.generate_params(params);
        post_params.extend(set_aside);

        for field in INVOICE_SPECIAL_ENCODE_FIELDS {
            post_params.map_value(field, form_decode);
        }
        post_params
    }
}
