use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::FilterError;

/// Comparison operator of a leaf node.
///
/// Serialises to the SQL token it renders as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operator {
    /// `=`, or `is null` when the value is null
    #[serde(rename = "=")]
    Eq,
    /// `!=`, or `is not null` when the value is null
    #[serde(rename = "!=")]
    Ne,
    #[serde(rename = ">")]
    Gt,
    #[serde(rename = ">=")]
    Gte,
    #[serde(rename = "<")]
    Lt,
    #[serde(rename = "<=")]
    Lte,
    #[serde(rename = "like")]
    Like,
    /// Takes a 2-element array: `between a and b`
    #[serde(rename = "between")]
    Between,
    /// Takes a non-empty array: `in (a, b, c)`
    #[serde(rename = "in")]
    In,
}

impl Operator {
    pub const ALL: [Operator; 9] = [
        Operator::Eq,
        Operator::Ne,
        Operator::Gt,
        Operator::Gte,
        Operator::Lt,
        Operator::Lte,
        Operator::Like,
        Operator::Between,
        Operator::In,
    ];

    /// The SQL token for this operator.
    pub fn as_sql(&self) -> &'static str {
        match self {
            Operator::Eq => "=",
            Operator::Ne => "!=",
            Operator::Gt => ">",
            Operator::Gte => ">=",
            Operator::Lt => "<",
            Operator::Lte => "<=",
            Operator::Like => "like",
            Operator::Between => "between",
            Operator::In => "in",
        }
    }
}

impl std::fmt::Display for Operator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_sql())
    }
}

impl FromStr for Operator {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        Operator::ALL
            .into_iter()
            .find(|op| op.as_sql() == lower)
            .ok_or_else(|| FilterError::InvalidOption(format!("unknown operator '{}'", s)))
    }
}

/// Boolean combinator of a group node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Logic {
    And,
    Or,
}

impl Logic {
    pub fn as_sql(&self) -> &'static str {
        match self {
            Logic::And => "and",
            Logic::Or => "or",
        }
    }
}

impl std::fmt::Display for Logic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_sql())
    }
}

impl FromStr for Logic {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "and" => Ok(Logic::And),
            "or" => Ok(Logic::Or),
            _ => Err(FilterError::InvalidOption(format!("unknown logic '{}'", s))),
        }
    }
}

/// Declared type of a leaf value, deciding how literal SQL quotes it.
///
/// Serialises as its position (`0` = NUMERIC ... `4` = OTHER); the upper-case
/// name is accepted on input as well.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataType {
    /// Any numeric value, e.g. integer, decimal, float.
    Numeric,
    /// Any date-time value: time, date, datetime, datetime with timezone.
    Epoch,
    /// Any string value: fixed length, varying length, text.
    String,
    /// true/false.
    Boolean,
    /// Anything else.
    Other,
}

impl DataType {
    pub const ALL: [DataType; 5] = [
        DataType::Numeric,
        DataType::Epoch,
        DataType::String,
        DataType::Boolean,
        DataType::Other,
    ];

    pub fn code(&self) -> u8 {
        *self as u8
    }

    pub fn from_code(code: u64) -> Option<Self> {
        usize::try_from(code)
            .ok()
            .and_then(|i| DataType::ALL.get(i).copied())
    }

    pub fn name(&self) -> &'static str {
        match self {
            DataType::Numeric => "NUMERIC",
            DataType::Epoch => "EPOCH",
            DataType::String => "STRING",
            DataType::Boolean => "BOOLEAN",
            DataType::Other => "OTHER",
        }
    }

    /// Whether literal SQL wraps values of this type in single quotes.
    pub fn is_quoted(&self) -> bool {
        matches!(self, DataType::String | DataType::Epoch)
    }
}

impl Serialize for DataType {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.code())
    }
}

impl<'de> Deserialize<'de> for DataType {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(DataTypeVisitor)
    }
}

struct DataTypeVisitor;

impl serde::de::Visitor<'_> for DataTypeVisitor {
    type Value = DataType;

    fn expecting(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("a data type code 0-4 or its name")
    }

    fn visit_u64<E: serde::de::Error>(self, code: u64) -> Result<DataType, E> {
        DataType::from_code(code)
            .ok_or_else(|| E::invalid_value(serde::de::Unexpected::Unsigned(code), &self))
    }

    fn visit_i64<E: serde::de::Error>(self, code: i64) -> Result<DataType, E> {
        u64::try_from(code)
            .ok()
            .and_then(DataType::from_code)
            .ok_or_else(|| E::invalid_value(serde::de::Unexpected::Signed(code), &self))
    }

    fn visit_str<E: serde::de::Error>(self, name: &str) -> Result<DataType, E> {
        DataType::ALL
            .into_iter()
            .find(|t| t.name().eq_ignore_ascii_case(name))
            .ok_or_else(|| E::invalid_value(serde::de::Unexpected::Str(name), &self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operator_tokens_round_trip() {
        for op in Operator::ALL {
            assert_eq!(op.as_sql().parse::<Operator>().unwrap(), op);
            assert_eq!(
                serde_json::to_string(&op).unwrap(),
                format!("\"{}\"", op.as_sql())
            );
        }
    }

    #[test]
    fn test_operator_parse_is_case_insensitive() {
        assert_eq!("LIKE".parse::<Operator>().unwrap(), Operator::Like);
        assert!("~".parse::<Operator>().is_err());
    }

    #[test]
    fn test_logic_serde() {
        assert_eq!(serde_json::to_string(&Logic::Or).unwrap(), "\"or\"");
        let logic: Logic = serde_json::from_str("\"and\"").unwrap();
        assert_eq!(logic, Logic::And);
    }

    #[test]
    fn test_quoted_types() {
        assert!(DataType::String.is_quoted());
        assert!(DataType::Epoch.is_quoted());
        assert!(!DataType::Numeric.is_quoted());
        assert!(!DataType::Boolean.is_quoted());
        assert!(!DataType::Other.is_quoted());
    }

    #[test]
    fn test_data_type_codes() {
        for (i, t) in DataType::ALL.into_iter().enumerate() {
            assert_eq!(serde_json::to_string(&t).unwrap(), i.to_string());
            let back: DataType = serde_json::from_str(&i.to_string()).unwrap();
            assert_eq!(back, t);
        }
    }

    #[test]
    fn test_data_type_accepts_names() {
        let t: DataType = serde_json::from_str("\"EPOCH\"").unwrap();
        assert_eq!(t, DataType::Epoch);
        let t: DataType = serde_json::from_str("\"string\"").unwrap();
        assert_eq!(t, DataType::String);
        assert!(serde_json::from_str::<DataType>("5").is_err());
        assert!(serde_json::from_str::<DataType>("-1").is_err());
        assert!(serde_json::from_str::<DataType>("\"DATE\"").is_err());
    }
}
