//! Coercion between typed field values and document values.

use thiserror::Error;
use toml::Value;

/// A value that can live at a leaf of the configuration tree.
///
/// `from_value` returns `None` when the document holds something that cannot
/// be coerced; the caller turns that into an `InvalidFieldValue` error.
pub trait ConfigValue: Sized {
    /// What the document was expected to contain, for error messages.
    fn expected() -> String;

    fn from_value(value: &Value) -> Option<Self>;

    fn to_value(&self) -> Value;
}

impl ConfigValue for bool {
    fn expected() -> String {
        "a boolean".into()
    }

    fn from_value(value: &Value) -> Option<Self> {
        value.as_bool()
    }

    fn to_value(&self) -> Value {
        Value::Boolean(*self)
    }
}

impl ConfigValue for String {
    fn expected() -> String {
        "a string".into()
    }

    fn from_value(value: &Value) -> Option<Self> {
        value.as_str().map(str::to_string)
    }

    fn to_value(&self) -> Value {
        Value::String(self.clone())
    }
}

macro_rules! integer_value {
    ($($ty:ty),* $(,)?) => {
        $(
            impl ConfigValue for $ty {
                fn expected() -> String {
                    format!("an integer between {} and {}", <$ty>::MIN, <$ty>::MAX)
                }

                fn from_value(value: &Value) -> Option<Self> {
                    value.as_integer().and_then(|n| <$ty>::try_from(n).ok())
                }

                fn to_value(&self) -> Value {
                    Value::Integer(i64::from(*self))
                }
            }
        )*
    };
}

// Only types that widen losslessly into a document integer (`i64`).
integer_value!(u16, i32, u32, i64);

impl ConfigValue for f64 {
    fn expected() -> String {
        "a number".into()
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Float(f) => Some(*f),
            Value::Integer(n) => Some(*n as f64),
            _ => None,
        }
    }

    fn to_value(&self) -> Value {
        Value::Float(*self)
    }
}

impl ConfigValue for f32 {
    fn expected() -> String {
        "a number".into()
    }

    /// Finite values outside the `f32` range are rejected rather than
    /// widened to infinity.
    fn from_value(value: &Value) -> Option<Self> {
        let wide = f64::from_value(value)?;
        let narrow = wide as f32;
        if wide.is_finite() && !narrow.is_finite() {
            return None;
        }
        Some(narrow)
    }

    fn to_value(&self) -> Value {
        Value::Float(f64::from(*self))
    }
}

/// Sequences are ordered. A bare scalar reads as a one-element sequence so
/// fields that grew from a single value into a list keep loading.
impl<T: ConfigValue> ConfigValue for Vec<T> {
    fn expected() -> String {
        format!("a sequence of {}", strip_article(&T::expected()))
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Array(items) => items.iter().map(T::from_value).collect(),
            Value::Table(_) => None,
            scalar => T::from_value(scalar).map(|item| vec![item]),
        }
    }

    fn to_value(&self) -> Value {
        Value::Array(self.iter().map(ConfigValue::to_value).collect())
    }
}

fn strip_article(expected: &str) -> &str {
    expected
        .strip_prefix("an ")
        .or_else(|| expected.strip_prefix("a "))
        .unwrap_or(expected)
}

/// A name that does not belong to a closed enumeration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown name `{name}`, expected {}", one_of(.expected))]
pub struct UnknownName {
    pub name: String,
    pub expected: &'static [&'static str],
}

/// `one of A, B, C`, the expectation text for an enumeration.
pub fn one_of(names: &[&str]) -> String {
    format!("one of {}", names.join(", "))
}

/// Short rendering of a document value for error messages.
pub fn describe(value: &Value) -> String {
    match value {
        Value::Table(_) => "a table".into(),
        other => other.to_string(),
    }
}
