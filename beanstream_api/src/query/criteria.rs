//! Search filters: a field, a comparison operator and a value.

use std::{fmt, str::FromStr};

use serde::{Serialize, Serializer};

/// Searchable columns, serialized as the service's numeric field ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryField {
    TransactionId = 1,
    Amount = 2,
    MaskedCardNumber = 3,
    CardOwner = 4,
    OrderNumber = 5,
    IpAddress = 6,
    AuthorizationCode = 7,
    TransType = 8,
    CardType = 9,
    Response = 10,
    BillingName = 11,
    BillingEmail = 12,
    BillingPhone = 13,
    ProcessedBy = 14,
    Ref1 = 15,
    Ref2 = 16,
    Ref3 = 17,
    Ref4 = 18,
    Ref5 = 19,
    ProductName = 20,
    ProductId = 21,
    CustCode = 22,
    IdAdjustmentTo = 23,
    IdAdjustedBy = 24,
}

const FIELD_NAMES: &[(&str, QueryField)] = &[
    ("transaction_id", QueryField::TransactionId),
    ("amount", QueryField::Amount),
    ("masked_card_number", QueryField::MaskedCardNumber),
    ("card_owner", QueryField::CardOwner),
    ("order_number", QueryField::OrderNumber),
    ("ip_address", QueryField::IpAddress),
    ("authorization_code", QueryField::AuthorizationCode),
    ("trans_type", QueryField::TransType),
    ("card_type", QueryField::CardType),
    ("response", QueryField::Response),
    ("billing_name", QueryField::BillingName),
    ("billing_email", QueryField::BillingEmail),
    ("billing_phone", QueryField::BillingPhone),
    ("processed_by", QueryField::ProcessedBy),
    ("ref1", QueryField::Ref1),
    ("ref2", QueryField::Ref2),
    ("ref3", QueryField::Ref3),
    ("ref4", QueryField::Ref4),
    ("ref5", QueryField::Ref5),
    ("product_name", QueryField::ProductName),
    ("product_id", QueryField::ProductId),
    ("cust_code", QueryField::CustCode),
    ("id_adjustment_to", QueryField::IdAdjustmentTo),
    ("id_adjusted_by", QueryField::IdAdjustedBy),
];

impl QueryField {
    pub fn id(self) -> u8 {
        self as u8
    }

    pub fn name(self) -> &'static str {
        FIELD_NAMES
            .iter()
            .find(|(_, f)| *f == self)
            .map(|(n, _)| *n)
            .unwrap_or("unknown")
    }
}

impl fmt::Display for QueryField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for QueryField {
    type Err = String;

    /// Accepts the snake_case name (`order_number`) or the numeric id (`5`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_ascii_lowercase().replace('-', "_");
        FIELD_NAMES
            .iter()
            .find(|(name, field)| *name == s || field.id().to_string() == s)
            .map(|(_, field)| *field)
            .ok_or_else(|| format!("unknown query field: {}", s))
    }
}

impl Serialize for QueryField {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.id())
    }
}

/// Comparison operators, serialized as the URL-encoded tokens the service expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Equals,
    LessThan,
    GreaterThan,
    LessThanEqual,
    GreaterThanEqual,
    StartWith,
}

impl Operator {
    pub fn token(self) -> &'static str {
        match self {
            Self::Equals => "%3D",
            Self::LessThan => "%3C",
            Self::GreaterThan => "%3E",
            Self::LessThanEqual => "%3C%3D",
            Self::GreaterThanEqual => "%3E%3D",
            Self::StartWith => "START%20WITH",
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Self::Equals => "=",
            Self::LessThan => "<",
            Self::GreaterThan => ">",
            Self::LessThanEqual => "<=",
            Self::GreaterThanEqual => ">=",
            Self::StartWith => "startwith",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for Operator {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "=" | "eq" => Ok(Self::Equals),
            "<" | "lt" => Ok(Self::LessThan),
            ">" | "gt" => Ok(Self::GreaterThan),
            "<=" | "le" => Ok(Self::LessThanEqual),
            ">=" | "ge" => Ok(Self::GreaterThanEqual),
            "startwith" | "start_with" | "starts" => Ok(Self::StartWith),
            other => Err(format!("unknown operator: {}", other)),
        }
    }
}

impl Serialize for Operator {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.token())
    }
}

/// A single search filter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Criteria {
    pub field: QueryField,
    pub operator: Operator,
    pub value: String,
}

impl Criteria {
    pub fn new(field: QueryField, operator: Operator, value: impl Into<String>) -> Self {
        Self {
            field,
            operator,
            value: value.into(),
        }
    }
}

impl FromStr for Criteria {
    type Err = String;

    /// Parses `FIELD:OP:VALUE`, e.g. `order_number:=:1234`. The value may contain colons.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.splitn(3, ':');
        match (parts.next(), parts.next(), parts.next()) {
            (Some(field), Some(op), Some(value)) => Ok(Self::new(field.parse()?, op.parse()?, value)),
            _ => Err(format!("expected FIELD:OP:VALUE, got {:?}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_service_ids() {
        let c = Criteria::new(QueryField::OrderNumber, Operator::Equals, "1234");
        assert_eq!(
            serde_json::to_value(&c).unwrap(),
            serde_json::json!({"field": 5, "operator": "%3D", "value": "1234"})
        );
    }

    #[test]
    fn start_with_token() {
        let c = Criteria::new(QueryField::BillingName, Operator::StartWith, "Jo");
        let json = serde_json::to_string(&c).unwrap();
        assert!(json.contains(r#""operator":"START%20WITH""#));
        assert!(json.contains(r#""field":11"#));
    }

    #[test]
    fn field_ids_are_contiguous() {
        for (i, (_, field)) in FIELD_NAMES.iter().enumerate() {
            assert_eq!(field.id() as usize, i + 1);
        }
    }

    #[test]
    fn parses_field_by_name_or_id() {
        assert_eq!("order_number".parse::<QueryField>().unwrap(), QueryField::OrderNumber);
        assert_eq!("Order-Number".parse::<QueryField>().unwrap(), QueryField::OrderNumber);
        assert_eq!("24".parse::<QueryField>().unwrap(), QueryField::IdAdjustedBy);
        assert!("nope".parse::<QueryField>().is_err());
    }

    #[test]
    fn parses_criteria_triplet() {
        let c: Criteria = "amount:>=:10.00".parse().unwrap();
        assert_eq!(c.field, QueryField::Amount);
        assert_eq!(c.operator, Operator::GreaterThanEqual);
        assert_eq!(c.value, "10.00");

        let c: Criteria = "ref1:=:a:b".parse().unwrap();
        assert_eq!(c.value, "a:b");

        assert!("amount:>=".parse::<Criteria>().is_err());
        assert!("amount:~:1".parse::<Criteria>().is_err());
    }
}
