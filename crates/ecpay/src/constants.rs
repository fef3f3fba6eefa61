/// Name of the checksum field on requests and verified responses.
pub const CHECK_MAC_VALUE: &str = "CheckMacValue";

/// Merchant id field injected from the resolved credentials.
pub const MERCHANT_ID: &str = "MerchantID";

/// Sandbox merchant shared by the payment client, the invoice client and
/// B2C logistics.
pub const SANDBOX_MERCHANT_ID: &str = "2000132";

/// Sandbox merchant for C2C logistics.
pub const SANDBOX_C2C_MERCHANT_ID: &str = "2000933";

pub const PAYMENT_SANDBOX_HASH_KEY: &str = "5294y06JbISpM5x9";
pub const PAYMENT_SANDBOX_HASH_IV: &str = "v77hoKGq4kWxNNIS";

pub const INVOICE_SANDBOX_HASH_KEY: &str = "ejCk326UnaZWKisg";
pub const INVOICE_SANDBOX_HASH_IV: &str = "q9jcZX8Ib9LM8wYk";

pub const LOGISTICS_B2C_SANDBOX_HASH_KEY: &str = "5294y06JbISpM5x9";
pub const LOGISTICS_B2C_SANDBOX_HASH_IV: &str = "v77hoKGq4kWxNNIS";

pub const LOGISTICS_C2C_SANDBOX_HASH_KEY: &str = "XBERn1YOvpM9nfZc";
pub const LOGISTICS_C2C_SANDBOX_HASH_IV: &str = "h1ONHk4P4yqbl5LK";

/// Invoice fields that are signed in encoded form and sent decoded.
pub const INVOICE_SPECIAL_ENCODE_FIELDS: &[&str] = &[
    "CustomerName",
    "CustomerAddr",
    "CustomerEmail",
    "NotifyMail",
    "InvoiceRemark",
    "ItemName",
    "ItemWord",
    "ItemRemark",
];

/// Invoice fields the gateway leaves out of its own CheckMacValue.
pub const INVOICE_CHECKSUM_EXCLUDED_FIELDS: &[&str] = &[
    "ItemRemark",
    "InvoiceRemark",
    "PosBarCode",
    "ItemName",
    "ItemWord",
    "QRCode_Left",
    "QRCode_Right",
];

/// Response fields decoded for invoice issue, invalidation and allowance.
pub const INVOICE_RESPONSE_DECODE_FIELDS: &[&str] = &["RtnMsg"];

/// Response fields decoded for invoice search.
pub const INVOICE_SEARCH_DECODE_FIELDS: &[&str] = &[
    "RtnMsg",
    "QRCode_Left",
    "QRCode_Right",
    "IIS_Customer_Name",
    "IIS_Customer_Addr",
    "ItemName",
    "ItemWord",
    "InvoiceRemark",
];
