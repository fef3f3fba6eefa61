use ecpay::credentials::resolve;
use ecpay::{
    ClientFamily, ClientOptions, Credentials, DigestAlgorithm, EcpayError, Endpoint, Environment,
    HttpTransport, LogisticsSubType, Operation, ParameterSet, Transport,
};

use crate::dispatch::{require, Dispatcher};

const C2C_UNIMART_REQUIRED: &[&str] = &["AllPayLogisticsID", "CVSPaymentNo", "CVSValidationNo"];
const C2C_REQUIRED: &[&str] = &["AllPayLogisticsID", "CVSPaymentNo"];
const B2C_REQUIRED: &[&str] = &["AllPayLogisticsID"];

/// A signed form for the browser to POST to the gateway's label printer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelForm {
    pub endpoint: Endpoint,
    pub params: ParameterSet,
}

impl LabelForm {
    /// Form `action`, or `None` when the page is not offered in this
    /// environment.
    pub fn action_url(&self) -> Option<&'static str> {
        self.endpoint.url()
    }
}

/// Client for the logistics shipping-label APIs.
///
/// In test mode the sandbox merchant depends on the carrier family of
/// `logistics_sub_type`, which is therefore required there.
pub struct LogisticsClient<T: Transport = HttpTransport> {
    inner: Dispatcher<T>,
}

impl LogisticsClient<HttpTransport> {
    /// Build a client that talks to the gateway over HTTP.
    pub fn new(options: ClientOptions) -> Result<Self, EcpayError> {
        let config = resolve(ClientFamily::Logistics, &options)?;
        let transport = HttpTransport::new(config.transport())?;
        Ok(Self {
            inner: Dispatcher::new(config, transport),
        })
    }
}

impl<T: Transport> LogisticsClient<T> {
    /// Build a client over a caller-supplied transport.
    pub fn with_transport(options: ClientOptions, transport: T) -> Result<Self, EcpayError> {
        let config = resolve(ClientFamily::Logistics, &options)?;
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

    pub fn logistics_sub_type(&self) -> Option<LogisticsSubType> {
        self.inner.config().logistics_sub_type()
    }

    pub fn transport(&self) -> &T {
        self.inner.transport()
    }

    /// Check the `CheckMacValue` of a logistics status notification.
    pub fn verify_mac(&self, params: &ParameterSet) -> bool {
        self.inner.verify_mac(params, &[])
    }

    /// 7-ELEVEN C2C shipping label.
    pub fn label_form_for_unimart_c2c(&self, params: ParameterSet) -> Result<LabelForm, EcpayError> {
        require(&params, C2C_UNIMART_REQUIRED)?;
        self.label_form(Operation::UnimartC2cOrderInfo, params)
    }

    /// FamilyMart C2C shipping label.
    pub fn label_form_for_fami_c2c(&self, params: ParameterSet) -> Result<LabelForm, EcpayError> {
        require(&params, C2C_REQUIRED)?;
        self.label_form(Operation::FamiC2cOrderInfo, params)
    }

    /// Hi-Life C2C shipping label.
    pub fn label_form_for_hilife_c2c(&self, params: ParameterSet) -> Result<LabelForm, EcpayError> {
        require(&params, C2C_REQUIRED)?;
        self.label_form(Operation::HilifeC2cOrderInfo, params)
    }

    /// OK Mart C2C shipping label.
    pub fn label_form_for_okmart_c2c(&self, params: ParameterSet) -> Result<LabelForm, EcpayError> {
        require(&params, C2C_REQUIRED)?;
        self.label_form(Operation::OkmartC2cOrderInfo, params)
    }

    /// Trade document for B2C store pickup and home delivery.
    pub fn label_form_for_b2c_and_home(&self, params: ParameterSet) -> Result<LabelForm, EcpayError> {
        require(&params, B2C_REQUIRED)?;
        self.label_form(Operation::B2cTradeDocument, params)
    }

    fn label_form(&self, operation: Operation, params: ParameterSet) -> Result<LabelForm, EcpayError> {
        let endpoint = self.inner.endpoint(operation)?;
        tracing::debug!(
            operation = %operation,
            environment = %self.environment(),
            "built logistics label form"
        );
        Ok(LabelForm {
            endpoint,
            params: self.inner.generate_params(params),
        })
    }
}
