use anyhow::Result;
use beanstream_api::types::{Transaction, TransactionRecord};
use beanstream_api::ApiError;
use serde::Serialize;
use tabled::settings::Style;
use tabled::{Table, Tabled};

#[derive(Clone, Debug)]
pub enum OutputFormat {
    Table,
    Json,
    Csv,
    Markdown,
}

#[derive(Tabled, Serialize)]
struct TransactionRow {
    #[tabled(rename = "ID")]
    #[serde(rename = "ID")]
    id: String,
    #[tabled(rename = "Created")]
    #[serde(rename = "Created")]
    created: String,
    #[tabled(rename = "Type")]
    #[serde(rename = "Type")]
    transaction_type: String,
    #[tabled(rename = "Amount")]
    #[serde(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Approved")]
    #[serde(rename = "Approved")]
    approved: String,
    #[tabled(rename = "Message")]
    #[serde(rename = "Message")]
    message: String,
    #[tabled(rename = "Order")]
    #[serde(rename = "Order")]
    order_number: String,
    #[tabled(rename = "Card")]
    #[serde(rename = "Card")]
    card: String,
}

#[derive(Tabled, Serialize)]
struct RecordRow {
    #[tabled(rename = "Row")]
    #[serde(rename = "Row")]
    row: String,
    #[tabled(rename = "ID")]
    #[serde(rename = "ID")]
    id: u64,
    #[tabled(rename = "Date")]
    #[serde(rename = "Date")]
    date: String,
    #[tabled(rename = "Type")]
    #[serde(rename = "Type")]
    trn_type: String,
    #[tabled(rename = "Amount")]
    #[serde(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Card")]
    #[serde(rename = "Card")]
    card: String,
    #[tabled(rename = "Result")]
    #[serde(rename = "Result")]
    result: String,
    #[tabled(rename = "Name")]
    #[serde(rename = "Name")]
    name: String,
}

// -- Row builders --

fn build_transaction_rows(transactions: &[&Transaction]) -> Vec<TransactionRow> {
    let mut rows = Vec::new();
    for t in transactions {
        rows.push(TransactionRow {
            id: t.id.clone(),
            created: t.created.to_string(),
            transaction_type: t.transaction_type.clone(),
            amount: format_amount(t.amount),
            approved: yes_no(t.is_approved()),
            message: t.message.clone().unwrap_or_default(),
            order_number: t.order_number.clone().unwrap_or_default(),
            card: t
                .card
                .as_ref()
                .map(|c| {
                    format!(
                        "{} {}",
                        c.card_type.as_deref().unwrap_or(""),
                        c.last_four.as_deref().unwrap_or("")
                    )
                    .trim()
                    .to_string()
                })
                .unwrap_or_default(),
        });
        // Adjustments are listed beneath the transaction they apply to.
        for a in &t.adjusted_by {
            rows.push(TransactionRow {
                id: format!("  {}", a.id),
                created: a.created.map(|c| c.to_string()).unwrap_or_default(),
                transaction_type: a.adjustment_type.clone(),
                amount: format_amount(a.amount),
                approved: yes_no(a.approval == Some(1)),
                message: a.message.clone().unwrap_or_default(),
                order_number: String::new(),
                card: String::new(),
            });
        }
    }
    rows
}

fn build_record_rows(records: &[TransactionRecord]) -> Vec<RecordRow> {
    records
        .iter()
        .map(|r| RecordRow {
            row: r.row_id.map(|n| n.to_string()).unwrap_or_default(),
            id: r.trn_id,
            date: r.trn_date_time.clone().unwrap_or_default(),
            trn_type: r.trn_type.clone().unwrap_or_default(),
            amount: r.trn_amount.map(format_amount).unwrap_or_default(),
            card: r.trn_masked_card.clone().unwrap_or_default(),
            result: r
                .message_text
                .clone()
                .unwrap_or_else(|| yes_no(r.is_approved())),
            name: r.b_name.clone().unwrap_or_default(),
        })
        .collect()
}

// -- Table output --

pub fn print_transaction_table(transaction: &Transaction) {
    println!("{}", Table::new(build_transaction_rows(&[transaction])));
}

pub fn print_records_table(records: &[TransactionRecord]) {
    println!("{}", Table::new(build_record_rows(records)));
}

// -- Markdown output --

pub fn print_transaction_markdown(transaction: &Transaction) {
    let mut table = Table::new(build_transaction_rows(&[transaction]));
    table.with(Style::markdown());
    println!("{}", table);
}

pub fn print_records_markdown(records: &[TransactionRecord]) {
    let mut table = Table::new(build_record_rows(records));
    table.with(Style::markdown());
    println!("{}", table);
}

// -- CSV output --

pub fn print_transaction_csv(transaction: &Transaction) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(std::io::stdout());
    for row in build_transaction_rows(&[transaction]) {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn print_records_csv(records: &[TransactionRecord]) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(std::io::stdout());
    for row in build_record_rows(records) {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn print_json<T: serde::Serialize>(data: &T) {
    match serde_json::to_string_pretty(data) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Failed to serialize to JSON: {}", e),
    }
}

// -- Errors --

pub fn print_error(err: &anyhow::Error) {
    let api = err
        .downcast_ref::<beanstream_api::Error>()
        .and_then(|e| e.as_api_error());
    match api {
        Some(api) => {
            for line in describe_api_error(api) {
                eprintln!("{}", line);
            }
        }
        None => eprintln!("Error: {:#}", err),
    }
}

/// The user-facing message first, then diagnostics for developer-facing errors.
fn describe_api_error(api: &ApiError) -> Vec<String> {
    let mut lines = vec![format!("Error: {}", api.user_facing_message())];
    if !api.is_user_error() {
        lines.push(format!(
            "  {} (HTTP {}, category {}, code {}): {}",
            api.kind(),
            api.status(),
            api.category(),
            api.code(),
            api.message()
        ));
        for detail in api.details() {
            lines.push(format!("  {}: {}", detail.field, detail.message));
        }
        if api.is_retryable() {
            lines.push("  The service reported an internal error; the request may be retried.".to_string());
        }
    }
    lines
}

fn format_amount(amount: f64) -> String {
    format!("${:.2}", amount)
}

fn yes_no(value: bool) -> String {
    let s = if value { "yes" } else { "no" };
    s.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use beanstream_api::types::Records;
    use beanstream_api::{map_error, ErrorEnvelope, GENERIC_USER_MESSAGE};

    fn load_transaction_fixture() -> Transaction {
        let json_str = include_str!("../../beanstream_api/tests/fixtures/transaction.json");
        serde_json::from_str(json_str).unwrap()
    }

    fn load_records_fixture() -> Vec<TransactionRecord> {
        let json_str = include_str!("../../beanstream_api/tests/fixtures/records.json");
        let resp: Records = serde_json::from_str(json_str).unwrap();
        resp.records
    }

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(100.0), "$100.00");
        assert_eq!(format_amount(12.5), "$12.50");
    }

    #[test]
    fn test_transaction_rows_include_adjustments() {
        let tx = load_transaction_fixture();
        let rows = build_transaction_rows(&[&tx]);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].id, "10000123");
        assert_eq!(rows[0].approved, "yes");
        assert_eq!(rows[0].card, "VI 1234");
        assert_eq!(rows[1].id, "  10000124");
        assert_eq!(rows[1].amount, "$25.50");
    }

    #[test]
    fn test_record_rows_keep_service_order() {
        let rows = build_record_rows(&load_records_fixture());
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].id, 10000125);
        assert_eq!(rows[0].result, "DECLINE");
        assert_eq!(rows[1].id, 10000123);
    }

    #[test]
    fn test_records_table_has_headers() {
        let table = Table::new(build_record_rows(&load_records_fixture())).to_string();
        assert!(table.contains("Amount"));
        assert!(table.contains("4030XXXXXXXX3333"));
    }

    #[test]
    fn test_user_facing_error_shows_only_message() {
        let envelope = ErrorEnvelope::parse(r#"{"category":3,"code":52,"message":"Insufficient funds"}"#);
        let lines = describe_api_error(&map_error(400, envelope));
        assert_eq!(lines, vec!["Error: Insufficient funds".to_string()]);
    }

    #[test]
    fn test_developer_facing_error_adds_diagnostics() {
        let envelope = ErrorEnvelope::parse(
            r#"{"category":1,"code":21,"message":"Authentication failed"}"#,
        );
        let lines = describe_api_error(&map_error(401, envelope));
        assert_eq!(lines[0], format!("Error: {}", GENERIC_USER_MESSAGE));
        assert!(lines[1].contains("HTTP 401"));
        assert!(lines[1].contains("Authentication failed"));
    }

    #[test]
    fn test_server_error_mentions_retry() {
        let lines = describe_api_error(&map_error(503, None));
        assert!(lines.iter().any(|l| l.contains("retried")));
    }
}
