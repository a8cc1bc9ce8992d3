//! Lenient numeric attribute parsing
//!
//! Widget attributes are free-form strings. A value that does not start with
//! a number reads as zero, and trailing garbage after a numeric prefix is
//! ignored (`"12px"` reads as 12).

use crate::field::FieldDataType;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::sync::LazyLock;

static NUMERIC_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r"^\s*[+-]?(?:\d+(?:\.\d*)?|\.\d+)(?:[eE][+-]?\d+)?")
		.expect("NUMERIC_PREFIX: invalid regex pattern")
});

static NUMERIC_STRING: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r"^\s*[+-]?(?:\d+(?:\.\d*)?|\.\d+)(?:[eE][+-]?\d+)?\s*$")
		.expect("NUMERIC_STRING: invalid regex pattern")
});

/// Parse the leading number of `raw` as a float, `0.0` when there is none
///
/// # Examples
///
/// ```
/// use geoform_widgets::numeric::parse_float;
///
/// assert_eq!(parse_float("2.5"), 2.5);
/// assert_eq!(parse_float(" -1e2 m"), -100.0);
/// assert_eq!(parse_float(""), 0.0);
/// assert_eq!(parse_float("abc"), 0.0);
/// ```
pub fn parse_float(raw: &str) -> f64 {
	NUMERIC_PREFIX
		.find(raw)
		.and_then(|m| m.as_str().trim().parse::<f64>().ok())
		.filter(|value| value.is_finite())
		.unwrap_or(0.0)
}

/// Parse the leading number of `raw` as an integer, truncating fractions
///
/// # Examples
///
/// ```
/// use geoform_widgets::numeric::parse_integer;
///
/// assert_eq!(parse_integer("42"), 42);
/// assert_eq!(parse_integer("2.9"), 2);
/// assert_eq!(parse_integer("1e3"), 1000);
/// assert_eq!(parse_integer("true"), 0);
/// ```
pub fn parse_integer(raw: &str) -> i64 {
	let Some(prefix) = NUMERIC_PREFIX.find(raw) else {
		return 0;
	};
	let prefix = prefix.as_str().trim();
	prefix
		.parse::<i64>()
		.unwrap_or_else(|_| parse_float(prefix) as i64)
}

/// Whether the whole string reads as a number, surrounding blanks allowed
pub fn is_numeric(raw: &str) -> bool {
	NUMERIC_STRING.is_match(raw)
}

/// Render a float the way the web client expects: fourteen significant
/// digits, no trailing zeros, no decimal point for whole numbers.
///
/// # Examples
///
/// ```
/// use geoform_widgets::numeric::format_float;
///
/// assert_eq!(format_float(10.0), "10");
/// assert_eq!(format_float(0.1 + 0.2), "0.3");
/// assert_eq!(format_float(-2.25), "-2.25");
/// ```
pub fn format_float(value: f64) -> String {
	if !value.is_finite() {
		return value.to_string();
	}
	let rounded = format!("{value:.13e}").parse::<f64>().unwrap_or(value);
	format!("{rounded}")
}

/// A range bound or step, typed after the field it constrains
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NumericValue {
	Integer(i64),
	Float(f64),
}

impl NumericValue {
	/// Float fields keep fractions, every other field type is read as integer
	///
	/// # Examples
	///
	/// ```
	/// use geoform_widgets::FieldDataType;
	/// use geoform_widgets::numeric::NumericValue;
	///
	/// assert_eq!(
	///     NumericValue::coerce("2.5", FieldDataType::Float),
	///     NumericValue::Float(2.5)
	/// );
	/// assert_eq!(
	///     NumericValue::coerce("2.5", FieldDataType::Integer),
	///     NumericValue::Integer(2)
	/// );
	/// ```
	pub fn coerce(raw: &str, data_type: FieldDataType) -> Self {
		match data_type {
			FieldDataType::Float => Self::Float(parse_float(raw)),
			_ => Self::Integer(parse_integer(raw)),
		}
	}

	pub fn as_f64(self) -> f64 {
		match self {
			Self::Integer(value) => value as f64,
			Self::Float(value) => value,
		}
	}
}

impl PartialOrd for NumericValue {
	fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
		match (self, other) {
			(Self::Integer(a), Self::Integer(b)) => Some(a.cmp(b)),
			_ => self.as_f64().partial_cmp(&other.as_f64()),
		}
	}
}

impl fmt::Display for NumericValue {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Integer(value) => write!(f, "{value}"),
			Self::Float(value) => f.write_str(&format_float(*value)),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	#[case("0", 0.0)]
	#[case("3.75", 3.75)]
	#[case("+.5", 0.5)]
	#[case("1.", 1.0)]
	#[case("  7 ", 7.0)]
	#[case("12px", 12.0)]
	#[case("-", 0.0)]
	#[case("nan", 0.0)]
	fn test_parse_float(#[case] raw: &str, #[case] expected: f64) {
		assert_eq!(parse_float(raw), expected);
	}

	#[rstest]
	#[case("10", 10)]
	#[case("-3", -3)]
	#[case("-3.7", -3)]
	#[case("9223372036854775807", i64::MAX)]
	#[case("", 0)]
	#[case("x1", 0)]
	fn test_parse_integer(#[case] raw: &str, #[case] expected: i64) {
		assert_eq!(parse_integer(raw), expected);
	}

	#[rstest]
	#[case("10", true)]
	#[case(" 1.5 ", true)]
	#[case("1e3", true)]
	#[case("", false)]
	#[case("10a", false)]
	#[case("Zone A", false)]
	fn test_is_numeric(#[case] raw: &str, #[case] expected: bool) {
		assert_eq!(is_numeric(raw), expected);
	}

	#[rstest]
	#[case(0.5, "0.5")]
	#[case(1.0, "1")]
	#[case(0.1 + 0.1 + 0.1, "0.3")]
	#[case(-0.75, "-0.75")]
	#[case(1234567.0, "1234567")]
	fn test_format_float(#[case] value: f64, #[case] expected: &str) {
		assert_eq!(format_float(value), expected);
	}

	#[rstest]
	fn test_numeric_value_display() {
		assert_eq!(NumericValue::Integer(-4).to_string(), "-4");
		assert_eq!(NumericValue::Float(2.0).to_string(), "2");
		assert_eq!(NumericValue::Float(2.5).to_string(), "2.5");
	}

	#[rstest]
	fn test_numeric_value_ordering() {
		assert!(NumericValue::Integer(2) < NumericValue::Integer(10));
		assert!(NumericValue::Float(2.5) > NumericValue::Integer(2));
	}

	#[rstest]
	fn test_numeric_value_serializes_untagged() {
		assert_eq!(
			serde_json::to_value(NumericValue::Integer(3)).unwrap(),
			serde_json::json!(3)
		);
		assert_eq!(
			serde_json::to_value(NumericValue::Float(0.5)).unwrap(),
			serde_json::json!(0.5)
		);
	}
}
