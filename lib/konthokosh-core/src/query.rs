//! Query parameter values.

use derive_more::Display;

/// A scalar query parameter value.
///
/// Values are rendered with their natural text form, so `2.0` becomes `2` and
/// booleans become `true`/`false`.
#[derive(Debug, Clone, PartialEq, Display)]
pub enum QueryValue {
    /// A string value.
    #[display("{_0}")]
    Text(String),
    /// An integer value.
    #[display("{_0}")]
    Integer(i64),
    /// A floating point value.
    #[display("{_0}")]
    Float(f64),
    /// A boolean value.
    #[display("{_0}")]
    Bool(bool),
}

impl From<&str> for QueryValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for QueryValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<bool> for QueryValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<f64> for QueryValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

macro_rules! integer_query_value {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for QueryValue {
                fn from(value: $ty) -> Self {
                    Self::Integer(i64::from(value))
                }
            }
        )*
    };
}

integer_query_value!(i8, i16, i32, i64, u8, u16, u32);

impl From<u64> for QueryValue {
    fn from(value: u64) -> Self {
        i64::try_from(value).map_or_else(|_| Self::Text(value.to_string()), Self::Integer)
    }
}

impl From<usize> for QueryValue {
    fn from(value: usize) -> Self {
        i64::try_from(value).map_or_else(|_| Self::Text(value.to_string()), Self::Integer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_scalars() {
        assert_eq!(QueryValue::from("ai").to_string(), "ai");
        assert_eq!(QueryValue::from(2_u32).to_string(), "2");
        assert_eq!(QueryValue::from(-7_i64).to_string(), "-7");
        assert_eq!(QueryValue::from(true).to_string(), "true");
        assert_eq!(QueryValue::from(2.0_f64).to_string(), "2");
        assert_eq!(QueryValue::from(2.5_f64).to_string(), "2.5");
    }

    #[test]
    fn large_unsigned_falls_back_to_text() {
        assert_eq!(
            QueryValue::from(u64::MAX),
            QueryValue::Text(u64::MAX.to_string())
        );
        assert_eq!(QueryValue::from(10_usize), QueryValue::Integer(10));
    }
}
