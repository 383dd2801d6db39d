use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A payment as returned by `GET /payments/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,

    #[serde(default)]
    pub authorizing_merchant_id: Option<u32>,

    /// `"1"` when approved, `"0"` when declined.
    #[serde(default)]
    pub approved: String,

    #[serde(default)]
    pub message_id: Option<String>,

    #[serde(default)]
    pub message: Option<String>,

    #[serde(default)]
    pub auth_code: Option<String>,

    pub created: NaiveDateTime,

    #[serde(default)]
    pub order_number: Option<String>,

    /// Transaction type code, e.g. `P` (purchase), `R` (return), `VP` (void purchase).
    #[serde(rename = "type")]
    pub transaction_type: String,

    #[serde(default)]
    pub payment_method: Option<String>,

    pub amount: f64,

    #[serde(default)]
    pub risk_score: Option<f64>,

    #[serde(default)]
    pub card: Option<CardSummary>,

    #[serde(default)]
    pub billing: Option<Address>,

    #[serde(default)]
    pub shipping: Option<Address>,

    #[serde(default)]
    pub adjusted_by: Vec<Adjustment>,
}

impl Transaction {
    pub fn is_approved(&self) -> bool {
        self.approved == "1"
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardSummary {
    #[serde(default)]
    pub card_type: Option<String>,
    #[serde(default)]
    pub last_four: Option<String>,
    #[serde(default)]
    pub cvd_result: Option<String>,
    #[serde(default)]
    pub avs_result: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Address {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub address_line1: Option<String>,
    #[serde(default)]
    pub address_line2: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub province: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub postal_code: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub email_address: Option<String>,
}

/// A void, return or completion applied to a transaction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Adjustment {
    pub id: u64,
    #[serde(rename = "type")]
    pub adjustment_type: String,
    #[serde(default)]
    pub approval: Option<i32>,
    #[serde(default)]
    pub message: Option<String>,
    pub amount: f64,
    #[serde(default)]
    pub created: Option<NaiveDateTime>,
}
