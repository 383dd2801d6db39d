use anyhow::Result;
use beanstream_api::Client;
use clap::Args;

use crate::output::{
    print_json, print_transaction_csv, print_transaction_markdown, print_transaction_table,
    OutputFormat,
};

#[derive(Args)]
pub struct TransactionArgs {
    /// Payment (transaction) ID
    pub payment_id: String,
}

pub async fn run(args: &TransactionArgs, client: &Client, format: &OutputFormat) -> Result<()> {
    let transaction = client.get_transaction(&args.payment_id).await?;

    match format {
        OutputFormat::Table => print_transaction_table(&transaction),
        OutputFormat::Json => print_json(&transaction),
        OutputFormat::Csv => print_transaction_csv(&transaction)?,
        OutputFormat::Markdown => print_transaction_markdown(&transaction),
    }

    Ok(())
}
