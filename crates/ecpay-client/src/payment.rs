use ecpay::credentials::resolve;
use ecpay::{
    parse_response_body, ClientFamily, ClientOptions, Credentials, DigestAlgorithm, EcpayError,
    Endpoint, Environment, HttpTransport, Operation, ParameterSet, ResponseMap, Transport,
};

use crate::dispatch::{gateway_local_time, random_trade_no, unix_timestamp, Dispatcher};

/// `Action` values accepted by the credit card DoAction API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreditAction {
    /// Request capture.
    Capture,
    /// Refund.
    Refund,
    /// Cancel a capture request.
    Cancel,
    /// Give up the authorization.
    Abandon,
}

impl CreditAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            CreditAction::Capture => "C",
            CreditAction::Refund => "R",
            CreditAction::Cancel => "E",
            CreditAction::Abandon => "N",
        }
    }
}

/// Client for the all-in-one checkout and trade query APIs.
///
/// Signs with SHA-256 unless the options say otherwise.
pub struct PaymentClient<T: Transport = HttpTransport> {
    inner: Dispatcher<T>,
}

impl PaymentClient<HttpTransport> {
    /// Build a client that talks to the gateway over HTTP.
    pub fn new(options: ClientOptions) -> Result<Self, EcpayError> {
        let config = resolve(ClientFamily::Payment, &options)?;
        let transport = HttpTransport::new(config.transport())?;
        Ok(Self {
            inner: Dispatcher::new(config, transport),
        })
    }
}

impl<T: Transport> PaymentClient<T> {
    /// Build a client over a caller-supplied transport.
    pub fn with_transport(options: ClientOptions, transport: T) -> Result<Self, EcpayError> {
        let config = resolve(ClientFamily::Payment, &options)?;
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

    /// Where the browser should POST the checkout form.
    pub fn checkout_endpoint(&self) -> Result<Endpoint, EcpayError> {
        self.inner.endpoint(Operation::Checkout)
    }

    /// Signed form fields for an all-in-one checkout.
    ///
    /// `MerchantTradeNo`, `MerchantTradeDate` and `EncryptType` are generated
    /// unless present in `overrides`. `PaymentType` is always `aio` and
    /// `MerchantID` always comes from the credentials.
    pub fn generate_checkout_params(&self, overrides: ParameterSet) -> ParameterSet {
        let mut params = overrides;
        params.insert_default("MerchantTradeNo", random_trade_no());
        params.insert_default("MerchantTradeDate", gateway_local_time());
        params.insert_default("EncryptType", "1");
        params.insert("PaymentType", "aio");
        self.inner.generate_params(params)
    }

    /// Check the `CheckMacValue` of a gateway notification or return POST.
    pub fn verify_mac(&self, params: &ParameterSet) -> bool {
        self.inner.verify_mac(params, &[])
    }

    /// Look up an order by merchant trade number.
    pub async fn query_trade_info(
        &self,
        merchant_trade_no: &str,
        platform_id: Option<&str>,
    ) -> Result<ResponseMap, EcpayError> {
        let mut params = ParameterSet::new()
            .with("MerchantTradeNo", merchant_trade_no)
            .with("TimeStamp", unix_timestamp());
        params.insert_opt("PlatformID", platform_id);

        self.send(Operation::QueryTradeInfo, params).await
    }

    /// Look up a credit card trade's authorization detail. Production only;
    /// in test mode this returns an empty map without touching the network.
    pub async fn query_cc_trade_info(
        &self,
        credit_refund_id: &str,
        credit_amount: u64,
        credit_check_code: &str,
    ) -> Result<ResponseMap, EcpayError> {
        let params = ParameterSet::new()
            .with("CreditRefundId", credit_refund_id)
            .with("CreditAmount", credit_amount.to_string())
            .with("CreditCheckCode", credit_check_code);

        self.send(Operation::QueryCreditCardTradeInfo, params).await
    }

    /// Look up a recurring (period) credit card order. The gateway answers
    /// this one in JSON.
    pub async fn query_credit_card_period_info(
        &self,
        merchant_trade_no: &str,
    ) -> Result<serde_json::Value, EcpayError> {
        let params = ParameterSet::new()
            .with("MerchantTradeNo", merchant_trade_no)
            .with("TimeStamp", unix_timestamp());
        let post_params = self.inner.generate_params(params);

        let res = self
            .inner
            .post(Operation::QueryCreditCardPeriodInfo, &post_params)
            .await?;
        Ok(serde_json::from_str(&res.body)?)
    }

    /// Capture, refund, cancel or abandon a credit card authorization.
    /// Production only; in test mode this returns an empty map without
    /// touching the network.
    pub async fn credit_detail_do_action(
        &self,
        merchant_trade_no: &str,
        trade_no: &str,
        action: CreditAction,
        total_amount: u64,
    ) -> Result<ResponseMap, EcpayError> {
        let params = ParameterSet::new()
            .with("MerchantTradeNo", merchant_trade_no)
            .with("TradeNo", trade_no)
            .with("Action", action.as_str())
            .with("TotalAmount", total_amount.to_string());

        self.send(Operation::CreditDetailDoAction, params).await
    }

    async fn send(
        &self,
        operation: Operation,
        params: ParameterSet,
    ) -> Result<ResponseMap, EcpayError> {
        let post_params = self.inner.generate_params(params);
        let res = self.inner.post(operation, &post_params).await?;
        Ok(parse_response_body(&res.body, &[]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::RecordingTransport;
    use ecpay::constants::{PAYMENT_SANDBOX_HASH_IV, PAYMENT_SANDBOX_HASH_KEY};
    use ecpay::{checksum, CHECK_MAC_VALUE};

    fn sandbox_client(body: &str) -> PaymentClient<RecordingTransport> {
        PaymentClient::with_transport(ClientOptions::test(), RecordingTransport::new(body)).unwrap()
    }

    #[test]
    fn test_sandbox_credentials_and_digest() {
        let client = sandbox_client("");
        assert_eq!(client.credentials().merchant_id, "2000132");
        assert_eq!(client.credentials().hash_key, PAYMENT_SANDBOX_HASH_KEY);
        assert_eq!(client.credentials().hash_iv, PAYMENT_SANDBOX_HASH_IV);
        assert_eq!(client.digest_algorithm(), DigestAlgorithm::Sha256);
        assert_eq!(client.environment(), Environment::Test);
    }

    #[test]
    fn test_production_without_merchant_id_fails() {
        let result = PaymentClient::with_transport(
            ClientOptions::default(),
            RecordingTransport::new(""),
        );
        assert!(matches!(
            result,
            Err(EcpayError::MissingCredential("merchant_id"))
        ));
    }

    #[test]
    fn test_checkout_params_defaults() {
        let client = sandbox_client("");
        let params = client.generate_checkout_params(ParameterSet::new());

        assert_eq!(params.get("MerchantID"), Some("2000132"));
        assert_eq!(params.get("PaymentType"), Some("aio"));
        assert_eq!(params.get("EncryptType"), Some("1"));
        assert_eq!(params.get("MerchantTradeNo").map(str::len), Some(8));
        assert_eq!(params.get("MerchantTradeDate").map(str::len), Some(19));
        assert!(client.verify_mac(&params));
    }

    #[test]
    fn test_checkout_params_keep_caller_trade_number() {
        let client = sandbox_client("");
        let overrides = ParameterSet::new()
            .with("MerchantTradeNo", "ABC123")
            .with("MerchantTradeDate", "2024/01/01 00:00:00")
            .with("PaymentType", "other")
            .with("MerchantID", "999");
        let params = client.generate_checkout_params(overrides);

        assert_eq!(params.get("MerchantTradeNo"), Some("ABC123"));
        assert_eq!(params.get("MerchantTradeDate"), Some("2024/01/01 00:00:00"));
        assert_eq!(params.get("PaymentType"), Some("aio"));
        assert_eq!(params.get("MerchantID"), Some("2000132"));
    }

    #[test]
    fn test_checkout_params_checksum_matches_signer() {
        let client = sandbox_client("");
        let overrides = ParameterSet::new()
            .with("MerchantTradeNo", "ABC123")
            .with("MerchantTradeDate", "2024/01/01 00:00:00");
        let mut params = client.generate_checkout_params(overrides);
        let mac = params.remove(CHECK_MAC_VALUE).unwrap();
        assert_eq!(
            mac,
            checksum::sign(client.credentials(), &params, DigestAlgorithm::Sha256)
        );
    }

    #[test]
    fn test_checkout_params_drop_absent_overrides() {
        let client = sandbox_client("");
        let overrides = ParameterSet::from_optional([
            ("ClientBackURL", None),
            ("ItemName", Some("Apple iphone 15")),
        ]);
        let params = client.generate_checkout_params(overrides);
        assert!(!params.contains("ClientBackURL"));
        assert_eq!(params.get("ItemName"), Some("Apple iphone 15"));
    }

    #[test]
    fn test_checkout_endpoint() {
        let client = sandbox_client("");
        assert_eq!(
            client.checkout_endpoint().unwrap().url(),
            Some("https://payment-stage.ecpay.com.tw/Cashier/AioCheckOut/V5")
        );
    }

    #[tokio::test]
    async fn test_query_trade_info_posts_signed_params() {
        let client = sandbox_client("MerchantTradeNo=ABC123&TradeStatus=1&TradeAmt=100");
        let res = client.query_trade_info("ABC123", None).await.unwrap();
        assert_eq!(res["TradeStatus"], "1");
        assert_eq!(res["TradeAmt"], "100");

        let calls = client.transport().calls();
        assert_eq!(calls.len(), 1);
        let (url, sent) = &calls[0];
        assert_eq!(
            url,
            "https://payment-stage.ecpay.com.tw/Cashier/QueryTradeInfo/V5"
        );
        assert_eq!(sent.get("MerchantTradeNo"), Some("ABC123"));
        assert_eq!(sent.get("MerchantID"), Some("2000132"));
        assert!(sent.contains("TimeStamp"));
        assert!(!sent.contains("PlatformID"));
        assert!(client.verify_mac(sent));
    }

    #[tokio::test]
    async fn test_query_trade_info_with_platform() {
        let client = sandbox_client("");
        client.query_trade_info("ABC123", Some("3000000")).await.unwrap();
        let calls = client.transport().calls();
        assert_eq!(calls[0].1.get("PlatformID"), Some("3000000"));
    }

    #[tokio::test]
    async fn test_do_action_in_test_mode_skips_network() {
        let client = sandbox_client("RtnCode=1");
        let res = client
            .credit_detail_do_action("ABC123", "2401010000000001", CreditAction::Refund, 100)
            .await
            .unwrap();
        assert!(res.is_empty());
        assert_eq!(client.transport().call_count(), 0);
    }

    #[tokio::test]
    async fn test_cc_trade_info_in_test_mode_skips_network() {
        let client = sandbox_client("RtnCode=1");
        let res = client.query_cc_trade_info("10123456", 100, "59997889").await.unwrap();
        assert!(res.is_empty());
        assert_eq!(client.transport().call_count(), 0);
    }

    #[tokio::test]
    async fn test_do_action_in_production_posts() {
        let options = ClientOptions::production("3002607", "pwFHCqoQZGmho4w6", "EkRm7iFT261dpevs");
        let client = PaymentClient::with_transport(
            options,
            RecordingTransport::new("MerchantID=3002607&RtnCode=1&RtnMsg=OK"),
        )
        .unwrap();
        let res = client
            .credit_detail_do_action("ABC123", "2401010000000001", CreditAction::Capture, 100)
            .await
            .unwrap();
        assert_eq!(res["RtnCode"], "1");

        let calls = client.transport().calls();
        let (url, sent) = &calls[0];
        assert_eq!(url, "https://payment.ecpay.com.tw/CreditDetail/DoAction");
        assert_eq!(sent.get("Action"), Some("C"));
        assert_eq!(sent.get("TotalAmount"), Some("100"));
        assert_eq!(sent.get("MerchantID"), Some("3002607"));
    }

    #[tokio::test]
    async fn test_period_info_parses_json() {
        let client = sandbox_client(r#"{"MerchantID":"2000132","ExecStatus":"1","TotalSuccessTimes":2}"#);
        let info = client.query_credit_card_period_info("ABC123").await.unwrap();
        assert_eq!(info["ExecStatus"], "1");
        assert_eq!(info["TotalSuccessTimes"], 2);
    }

    #[tokio::test]
    async fn test_period_info_rejects_non_json() {
        let client = sandbox_client("not json");
        let err = client.query_credit_card_period_info("ABC123").await.unwrap_err();
        assert!(matches!(err, EcpayError::SerdeError(_)));
    }

    #[test]
    fn test_credit_action_codes() {
        assert_eq!(CreditAction::Capture.as_str(), "C");
        assert_eq!(CreditAction::Refund.as_str(), "R");
        assert_eq!(CreditAction::Cancel.as_str(), "E");
        assert_eq!(CreditAction::Abandon.as_str(), "N");
    }
}
