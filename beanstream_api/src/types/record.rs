use serde::{Deserialize, Serialize};

/// Response body of a reports search.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Records {
    #[serde(default)]
    pub records: Vec<TransactionRecord>,
}

/// One row of a transaction search, in the service's column naming.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionRecord {
    #[serde(default)]
    pub row_id: Option<u32>,

    pub trn_id: u64,

    /// Timestamp as formatted by the service.
    #[serde(default)]
    pub trn_date_time: Option<String>,

    #[serde(default)]
    pub trn_type: Option<String>,

    #[serde(default)]
    pub trn_order_number: Option<String>,

    #[serde(default)]
    pub trn_payment_method: Option<String>,

    #[serde(default)]
    pub trn_comments: Option<String>,

    #[serde(default)]
    pub trn_masked_card: Option<String>,

    #[serde(default)]
    pub trn_amount: Option<f64>,

    #[serde(default)]
    pub trn_returns: Option<f64>,

    #[serde(default)]
    pub trn_completions: Option<f64>,

    #[serde(default)]
    pub trn_voided: Option<i32>,

    /// `1` when approved.
    #[serde(default)]
    pub trn_response: Option<i32>,

    #[serde(default)]
    pub trn_card_type: Option<String>,

    #[serde(default)]
    pub trn_batch_no: Option<u64>,

    #[serde(default)]
    pub trn_avs_result: Option<String>,

    #[serde(default)]
    pub trn_cvd_result: Option<String>,

    #[serde(default)]
    pub trn_card_owner: Option<String>,

    #[serde(default)]
    pub trn_ip: Option<String>,

    #[serde(default)]
    pub trn_approval_code: Option<String>,

    #[serde(default)]
    pub message_id: Option<i32>,

    #[serde(default)]
    pub message_text: Option<String>,

    #[serde(default)]
    pub b_name: Option<String>,

    #[serde(default)]
    pub b_email: Option<String>,

    #[serde(default)]
    pub b_phone: Option<String>,

    #[serde(default)]
    pub ref1: Option<String>,
    #[serde(default)]
    pub ref2: Option<String>,
    #[serde(default)]
    pub ref3: Option<String>,
    #[serde(default)]
    pub ref4: Option<String>,
    #[serde(default)]
    pub ref5: Option<String>,
}

impl TransactionRecord {
    pub fn is_approved(&self) -> bool {
        self.trn_response == Some(1)
    }
}
