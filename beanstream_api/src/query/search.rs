//! The reports search request body.

use chrono::NaiveDateTime;
use serde::Serialize;

use super::criteria::Criteria;
use crate::Error;

/// Largest `end_row - start_row` window accepted in one search.
pub const MAX_ROWS_PER_QUERY: u32 = 1000;

/// Body of `POST /reports`.
///
/// Construction validates the date order and the row window, so a value of
/// this type is always sendable.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchQuery {
    name: &'static str,
    #[serde(serialize_with = "serialize_date")]
    start_date: NaiveDateTime,
    #[serde(serialize_with = "serialize_date")]
    end_date: NaiveDateTime,
    start_row: u32,
    end_row: u32,
    criteria: Vec<Criteria>,
}

impl SearchQuery {
    /// `end_row - start_row` may be at most [`MAX_ROWS_PER_QUERY`].
    pub fn new(
        start_date: NaiveDateTime,
        end_date: NaiveDateTime,
        start_row: u32,
        end_row: u32,
    ) -> Result<Self, Error> {
        if end_date < start_date {
            return Err(Error::InvalidArgument(
                "end date cannot be earlier than start date".to_string(),
            ));
        }
        if end_row < start_row {
            return Err(Error::InvalidArgument(
                "end row cannot be less than start row".to_string(),
            ));
        }
        if end_row - start_row > MAX_ROWS_PER_QUERY {
            return Err(Error::InvalidArgument(format!(
                "cannot query more than {} rows at a time",
                MAX_ROWS_PER_QUERY
            )));
        }
        Ok(Self {
            name: "Search",
            start_date,
            end_date,
            start_row,
            end_row,
            criteria: Vec::new(),
        })
    }

    pub fn with_criterion(mut self, criterion: Criteria) -> Self {
        self.criteria.push(criterion);
        self
    }

    pub fn with_criteria(mut self, criteria: impl IntoIterator<Item = Criteria>) -> Self {
        self.criteria.extend(criteria);
        self
    }

    pub fn start_date(&self) -> NaiveDateTime {
        self.start_date
    }

    pub fn end_date(&self) -> NaiveDateTime {
        self.end_date
    }

    pub fn start_row(&self) -> u32 {
        self.start_row
    }

    pub fn end_row(&self) -> u32 {
        self.end_row
    }

    pub fn criteria(&self) -> &[Criteria] {
        &self.criteria
    }
}

fn serialize_date<S>(date: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.collect_str(&date.format("%Y-%m-%dT%H:%M:%S"))
}
