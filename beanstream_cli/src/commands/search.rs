use anyhow::{bail, Result};
use beanstream_api::{Client, Criteria, SearchQuery};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use clap::Args;

use crate::output::{
    print_json, print_records_csv, print_records_markdown, print_records_table, OutputFormat,
};

#[derive(Args)]
pub struct SearchArgs {
    /// Start of the range: YYYY-MM-DD or YYYY-MM-DDTHH:MM:SS
    #[arg(long)]
    pub start: String,

    /// End of the range; a bare date means the end of that day
    #[arg(long)]
    pub end: String,

    /// First row to return
    #[arg(long, default_value = "1")]
    pub start_row: u32,

    /// Last row to return (at most 1000 rows past --start-row)
    #[arg(long, default_value = "100")]
    pub end_row: u32,

    /// Filter as FIELD:OP:VALUE, e.g. order_number:=:1234 or amount:>=:10 (repeatable)
    #[arg(long = "criteria")]
    pub criteria: Vec<String>,
}

pub async fn run(args: &SearchArgs, client: &Client, format: &OutputFormat) -> Result<()> {
    let start = parse_datetime(&args.start, NaiveTime::MIN)?;
    let end = parse_datetime(&args.end, end_of_day())?;

    let mut criteria = Vec::with_capacity(args.criteria.len());
    for raw in &args.criteria {
        match raw.parse::<Criteria>() {
            Ok(c) => criteria.push(c),
            Err(e) => bail!("invalid --criteria {:?}: {}", raw, e),
        }
    }

    let query = SearchQuery::new(start, end, args.start_row, args.end_row)?.with_criteria(criteria);
    let records = client.search_transactions(&query).await?;

    match format {
        OutputFormat::Table => print_records_table(&records),
        OutputFormat::Json => print_json(&records),
        OutputFormat::Csv => print_records_csv(&records)?,
        OutputFormat::Markdown => print_records_markdown(&records),
    }

    Ok(())
}

fn end_of_day() -> NaiveTime {
    NaiveTime::from_hms_opt(23, 59, 59).unwrap_or(NaiveTime::MIN)
}

/// Accepts a full timestamp, or a date combined with `time_of_day`.
fn parse_datetime(input: &str, time_of_day: NaiveTime) -> Result<NaiveDateTime> {
    let input = input.trim();
    for fmt in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(input, fmt) {
            return Ok(dt);
        }
    }
    match NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        Ok(date) => Ok(date.and_time(time_of_day)),
        Err(_) => bail!("invalid date {:?}, expected YYYY-MM-DD or YYYY-MM-DDTHH:MM:SS", input),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_date_uses_time_of_day() {
        let start = parse_datetime("2024-06-01", NaiveTime::MIN).unwrap();
        assert_eq!(start.to_string(), "2024-06-01 00:00:00");

        let end = parse_datetime("2024-06-30", end_of_day()).unwrap();
        assert_eq!(end.to_string(), "2024-06-30 23:59:59");
    }

    #[test]
    fn full_timestamp_is_kept() {
        let dt = parse_datetime("2024-06-01T10:15:14", end_of_day()).unwrap();
        assert_eq!(dt.to_string(), "2024-06-01 10:15:14");

        let dt = parse_datetime("2024-06-01 10:15:14", end_of_day()).unwrap();
        assert_eq!(dt.to_string(), "2024-06-01 10:15:14");
    }

    #[test]
    fn rejects_garbage() {
        assert!(parse_datetime("06/01/2024", NaiveTime::MIN).is_err());
        assert!(parse_datetime("", NaiveTime::MIN).is_err());
    }
}
