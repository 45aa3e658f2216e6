//! SQL literal values.
//!
//! Values are rendered inline into statement text (there is no parameter
//! binding at this layer), so the quoting rules are fixed here:
//!
//! | Value              | Rendered as              |
//! |--------------------|--------------------------|
//! | integers           | bare: `42`, `-7`         |
//! | finite floats      | bare: `2.5`              |
//! | text               | `'it''s'` (quote doubled)|
//! | booleans           | `TRUE` / `FALSE`         |
//! | null / `None`      | `NULL`                   |
//!
//! Non-finite floats and text containing NUL cannot be expressed as literals
//! and are rejected with [`StmtError::InvalidArgument`].

use crate::error::{StmtError, StmtResult};

/// A literal value that can be rendered into SQL text.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl Value {
    /// Render this value as a SQL literal.
    pub fn to_literal(&self) -> StmtResult<String> {
        let mut out = String::new();
        self.write_literal(&mut out)?;
        Ok(out)
    }

    pub(crate) fn write_literal(&self, out: &mut String) -> StmtResult<()> {
        match self {
            Value::Null => out.push_str("NULL"),
            Value::Bool(true) => out.push_str("TRUE"),
            Value::Bool(false) => out.push_str("FALSE"),
            Value::Int(n) => out.push_str(&n.to_string()),
            Value::Float(f) => {
                if !f.is_finite() {
                    return Err(StmtError::invalid_argument(format!(
                        "{f} cannot be rendered as a SQL literal"
                    )));
                }
                out.push_str(&f.to_string());
            }
            Value::Text(s) => {
                if s.contains('\0') {
                    return Err(StmtError::invalid_argument(
                        "text literal contains a NUL character",
                    ));
                }
                out.reserve(s.len() + 2);
                out.push('\'');
                for ch in s.chars() {
                    if ch == '\'' {
                        out.push('\'');
                    }
                    out.push(ch);
                }
                out.push('\'');
            }
        }
        Ok(())
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}

macro_rules! impl_from_int {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Value {
                fn from(v: $t) -> Self {
                    Value::Int(i64::from(v))
                }
            }
        )*
    };
}

impl_from_int!(i8, i16, i32, i64, u8, u16, u32);

macro_rules! impl_try_from_wide_int {
    ($($t:ty),*) => {
        $(
            impl TryFrom<$t> for Value {
                type Error = StmtError;

                fn try_from(v: $t) -> StmtResult<Self> {
                    i64::try_from(v).map(Value::Int).map_err(|_| {
                        StmtError::invalid_argument(format!(
                            "{v} does not fit a 64-bit signed integer literal"
                        ))
                    })
                }
            }
        )*
    };
}

// Unsigned types that can exceed i64::MAX convert fallibly.
impl_try_from_wide_int!(u64, usize);

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::Float(f64::from(v))
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl From<&String> for Value {
    fn from(v: &String) -> Self {
        Value::Text(v.clone())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

impl TryFrom<serde_json::Value> for Value {
    type Error = StmtError;

    fn try_from(v: serde_json::Value) -> StmtResult<Self> {
        use serde_json::Value as Json;

        match v {
            Json::Null => Ok(Value::Null),
            Json::Bool(b) => Ok(Value::Bool(b)),
            Json::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Ok(Value::Int(i))
                } else if let Some(f) = n.as_f64() {
                    Ok(Value::Float(f))
                } else {
                    Err(StmtError::invalid_argument(format!(
                        "number {n} does not fit a SQL literal"
                    )))
                }
            }
            Json::String(s) => Ok(Value::Text(s)),
            Json::Array(_) | Json::Object(_) => Err(StmtError::invalid_argument(
                "only scalar JSON values can be rendered as SQL literals",
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn lit(v: impl Into<Value>) -> String {
        let v: Value = v.into();
        v.to_literal().unwrap()
    }

    #[test]
    fn numbers_are_bare() {
        assert_eq!(lit(1), "1");
        assert_eq!(lit(-42_i64), "-42");
        assert_eq!(lit(7_u32), "7");
        assert_eq!(lit(2.5), "2.5");
    }

    #[test]
    fn strings_are_quoted_and_escaped() {
        assert_eq!(lit("x"), "'x'");
        assert_eq!(lit("it's"), "'it''s'");
        assert_eq!(lit(String::from("'; DROP TABLE t; --")), "'''; DROP TABLE t; --'");
        assert_eq!(lit(""), "''");
    }

    #[test]
    fn wide_unsigned_ints_are_checked() {
        assert_eq!(Value::try_from(42_u64).unwrap(), Value::Int(42));
        assert_eq!(Value::try_from(7_usize).unwrap(), Value::Int(7));
        assert_eq!(
            Value::try_from(i64::MAX as u64).unwrap(),
            Value::Int(i64::MAX)
        );
        let err = Value::try_from(u64::MAX).unwrap_err();
        assert!(err.is_invalid_argument());
        assert!(err.to_string().contains(&u64::MAX.to_string()));
    }

    #[test]
    fn booleans_and_null() {
        assert_eq!(lit(true), "TRUE");
        assert_eq!(lit(false), "FALSE");
        assert_eq!(lit(None::<i32>), "NULL");
        assert_eq!(lit(Some("a")), "'a'");
    }

    #[test]
    fn rejects_unrepresentable_values() {
        assert!(Value::Float(f64::NAN).to_literal().unwrap_err().is_invalid_argument());
        assert!(Value::Float(f64::INFINITY).to_literal().is_err());
        assert!(Value::from("a\0b").to_literal().is_err());
    }

    #[test]
    fn converts_json_scalars() {
        assert_eq!(Value::try_from(json!(3)).unwrap(), Value::Int(3));
        assert_eq!(Value::try_from(json!(1.5)).unwrap(), Value::Float(1.5));
        assert_eq!(Value::try_from(json!("s")).unwrap(), Value::Text("s".into()));
        assert_eq!(Value::try_from(json!(null)).unwrap(), Value::Null);
        assert!(Value::try_from(json!([1, 2])).is_err());
        assert!(Value::try_from(json!({"a": 1})).is_err());
    }
}
