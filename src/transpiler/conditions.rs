//! Leaf encoding: operator token plus right-hand side.

use super::params::ParamContext;
use crate::ast::{DataType, Leaf, Operator, Value};
use crate::error::{FilterError, FilterResult};

/// How a leaf's values become SQL tokens.
pub(crate) enum Encoding<'a> {
    /// Values are written into the SQL text, quoted by data type.
    Literal,
    /// Values are bound and replaced by `$N` placeholders.
    Parameters(&'a mut ParamContext),
}

impl Encoding<'_> {
    fn encode(&mut self, value: &Value, quoted: bool) -> String {
        match self {
            Encoding::Literal if quoted => format!("'{}'", value),
            Encoding::Literal => value.to_string(),
            Encoding::Parameters(params) => params.bind(value.clone()),
        }
    }
}

/// Type of a value when the leaf does not declare one.
///
/// Arrays take the type of their first element.
pub fn infer_data_type(value: &Value) -> DataType {
    match value {
        Value::Int(_) | Value::UInt(_) | Value::Float(_) => DataType::Numeric,
        Value::String(_) => DataType::String,
        Value::Bool(_) => DataType::Boolean,
        Value::Array(items) => match items.first() {
            Some(first) if !first.is_null() => infer_data_type(first),
            _ => DataType::Other,
        },
        Value::Null | Value::Object(_) => DataType::Other,
    }
}

/// Operator and value of a leaf, e.g. `between 1 and 5` or `in ($2, $3)`.
pub(crate) fn op_val<F: AsRef<str>>(
    leaf: &Leaf<F>,
    encoding: &mut Encoding<'_>,
) -> FilterResult<String> {
    // Null always means a null test, whatever the declared type.
    if leaf.val.is_null() {
        let test = if leaf.op == Operator::Eq { "is null" } else { "is not null" };
        return Ok(test.to_string());
    }

    let quoted = leaf
        .data_type
        .unwrap_or_else(|| infer_data_type(&leaf.val))
        .is_quoted();

    match leaf.op {
        Operator::Between => match leaf.val.as_array() {
            Some([low, high]) => {
                let low = encoding.encode(low, quoted);
                let high = encoding.encode(high, quoted);
                Ok(format!("{} {} and {}", leaf.op, low, high))
            }
            _ => Err(FilterError::shape(leaf.field.as_ref(), leaf.op, "a 2-element array")),
        },
        Operator::In => match leaf.val.as_array() {
            Some(items) if !items.is_empty() => {
                let list: Vec<String> = items.iter().map(|v| encoding.encode(v, quoted)).collect();
                Ok(format!("{} ({})", leaf.op, list.join(", ")))
            }
            _ => Err(FilterError::shape(leaf.field.as_ref(), leaf.op, "a non-empty array")),
        },
        op => {
            if leaf.val.as_array().is_some() {
                return Err(FilterError::shape(leaf.field.as_ref(), op, "a single value"));
            }
            Ok(format!("{} {}", op, encoding.encode(&leaf.val, quoted)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn literal(leaf: &Leaf) -> String {
        op_val(leaf, &mut Encoding::Literal).unwrap()
    }

    fn leaf(op: Operator, val: impl Into<Value>) -> Leaf {
        Leaf::new("f".to_string(), op, val)
    }

    #[test]
    fn test_infer_data_type() {
        assert_eq!(infer_data_type(&Value::from(1)), DataType::Numeric);
        assert_eq!(infer_data_type(&Value::from(1.5)), DataType::Numeric);
        assert_eq!(infer_data_type(&Value::UInt(u64::MAX)), DataType::Numeric);
        assert_eq!(infer_data_type(&Value::from("a")), DataType::String);
        assert_eq!(infer_data_type(&Value::from(false)), DataType::Boolean);
        assert_eq!(infer_data_type(&Value::from(vec!["a", "b"])), DataType::String);
        assert_eq!(infer_data_type(&Value::from(vec![vec![1]])), DataType::Numeric);
        assert_eq!(infer_data_type(&Value::Array(vec![])), DataType::Other);
        assert_eq!(
            infer_data_type(&Value::Array(vec![Value::Null, Value::from("a")])),
            DataType::Other
        );
        assert_eq!(infer_data_type(&Value::Null), DataType::Other);
    }

    #[test]
    fn test_null_tests() {
        assert_eq!(literal(&leaf(Operator::Eq, Value::Null)), "is null");
        assert_eq!(literal(&leaf(Operator::Ne, Value::Null)), "is not null");
        assert_eq!(literal(&leaf(Operator::Gt, Value::Null)), "is not null");
        // Checked before the declared type.
        let typed = leaf(Operator::Eq, Value::Null).with_data_type(DataType::String);
        assert_eq!(literal(&typed), "is null");
    }

    #[test]
    fn test_scalar_literals() {
        assert_eq!(literal(&leaf(Operator::Eq, 1)), "= 1");
        assert_eq!(literal(&leaf(Operator::Eq, u64::MAX)), "= 18446744073709551615");
        assert_eq!(literal(&leaf(Operator::Ne, "a")), "!= 'a'");
        assert_eq!(literal(&leaf(Operator::Gte, true)), ">= true");
        assert_eq!(literal(&leaf(Operator::Like, "%z")), "like '%z'");
    }

    #[test]
    fn test_between_and_in_literals() {
        assert_eq!(literal(&leaf(Operator::Between, (1, 5))), "between 1 and 5");
        assert_eq!(
            literal(&leaf(Operator::Between, ("a", "b"))),
            "between 'a' and 'b'"
        );
        assert_eq!(literal(&leaf(Operator::In, vec![1, 2, 3])), "in (1, 2, 3)");
        assert_eq!(literal(&leaf(Operator::In, vec!["x", "y"])), "in ('x', 'y')");
    }

    #[test]
    fn test_data_type_override() {
        let quoted = leaf(Operator::Eq, "42").with_data_type(DataType::String);
        assert_eq!(literal(&quoted), "= '42'");

        let unquoted = leaf(Operator::Gt, "now()").with_data_type(DataType::Numeric);
        assert_eq!(literal(&unquoted), "> now()");

        let epoch = leaf(Operator::Between, ("2020-01-01", "2020-02-01"))
            .with_data_type(DataType::Epoch);
        assert_eq!(literal(&epoch), "between '2020-01-01' and '2020-02-01'");

        let number_as_string = leaf(Operator::In, vec![1, 2]).with_data_type(DataType::String);
        assert_eq!(literal(&number_as_string), "in ('1', '2')");
    }

    #[test]
    fn test_parameters_bind_in_order() {
        let mut params = ParamContext::new(3);
        let mut encoding = Encoding::Parameters(&mut params);
        assert_eq!(
            op_val(&leaf(Operator::Between, (1, 5)), &mut encoding).unwrap(),
            "between $3 and $4"
        );
        assert_eq!(
            op_val(&leaf(Operator::In, vec!["a", "b"]), &mut encoding).unwrap(),
            "in ($5, $6)"
        );
        assert_eq!(op_val(&leaf(Operator::Eq, Value::Null), &mut encoding).unwrap(), "is null");
        assert_eq!(
            params.into_values(),
            vec![Value::Int(1), Value::Int(5), Value::from("a"), Value::from("b")]
        );
    }

    #[test]
    fn test_invalid_shapes() {
        let mut encoding = Encoding::Literal;
        let err = op_val(&leaf(Operator::Between, vec![1, 2, 3]), &mut encoding).unwrap_err();
        assert!(matches!(err, FilterError::InvalidShape { op: Operator::Between, .. }));

        let err = op_val(&leaf(Operator::Between, 1), &mut encoding).unwrap_err();
        assert!(matches!(err, FilterError::InvalidShape { .. }));

        let err = op_val(&leaf(Operator::In, Value::Array(vec![])), &mut encoding).unwrap_err();
        assert!(matches!(err, FilterError::InvalidShape { op: Operator::In, .. }));

        let err = op_val(&leaf(Operator::In, "x"), &mut encoding).unwrap_err();
        assert!(matches!(err, FilterError::InvalidShape { .. }));

        let err = op_val(&leaf(Operator::Eq, vec![1, 2]), &mut encoding).unwrap_err();
        assert_eq!(err.to_string(), "Invalid value for 'f =': expected a single value");
    }
}
