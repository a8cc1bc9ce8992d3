//! Static datasources for menulist and checkboxes controls

use crate::numeric::{NumericValue, is_numeric, parse_float};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Upper bound on generated range entries; a tiny step over a wide range
/// would otherwise produce an unusable list.
pub const MAX_RANGE_CHOICES: usize = 10_000;

/// One selectable entry: the stored value and the label shown for it
///
/// Serialized form of a [`Datasource`] entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Choice {
	pub value: String,
	pub label: String,
}

/// Ordered value → label mapping
///
/// Values are unique: inserting an existing value replaces its label but
/// keeps its position. Serializes as a list of [`Choice`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "Vec<Choice>", into = "Vec<Choice>")]
pub struct Datasource {
	choices: IndexMap<String, String>,
}

impl Datasource {
	pub fn new() -> Self {
		Self::default()
	}

	/// # Examples
	///
	/// ```
	/// use geoform_widgets::Datasource;
	///
	/// let mut data = Datasource::new();
	/// data.insert("1", "One");
	/// data.insert("2", "Two");
	/// data.insert("1", "Uno");
	///
	/// assert_eq!(data.len(), 2);
	/// assert_eq!(data.get("1"), Some("Uno"));
	/// assert_eq!(data.values().collect::<Vec<_>>(), ["1", "2"]);
	/// ```
	pub fn insert(&mut self, value: impl Into<String>, label: impl Into<String>) {
		self.choices.insert(value.into(), label.into());
	}

	pub fn get(&self, value: &str) -> Option<&str> {
		self.choices.get(value).map(String::as_str)
	}

	pub fn len(&self) -> usize {
		self.choices.len()
	}

	pub fn is_empty(&self) -> bool {
		self.choices.is_empty()
	}

	/// `(value, label)` pairs in order
	pub fn choices(&self) -> impl Iterator<Item = (&str, &str)> {
		self.choices
			.iter()
			.map(|(value, label)| (value.as_str(), label.as_str()))
	}

	pub fn first(&self) -> Option<(&str, &str)> {
		self.choices
			.first()
			.map(|(value, label)| (value.as_str(), label.as_str()))
	}

	pub fn values(&self) -> impl Iterator<Item = &str> {
		self.choices.keys().map(String::as_str)
	}

	pub fn labels(&self) -> impl Iterator<Item = &str> {
		self.choices.values().map(String::as_str)
	}

	/// Stable ascending sort by label, see [`compare_labels`]
	///
	/// # Examples
	///
	/// ```
	/// use geoform_widgets::Datasource;
	///
	/// let mut data = Datasource::new();
	/// data.insert("", "");
	/// data.insert("b", "Beta");
	/// data.insert("a", "Alpha");
	/// data.sort_by_label();
	///
	/// assert_eq!(data.labels().collect::<Vec<_>>(), ["", "Alpha", "Beta"]);
	/// ```
	pub fn sort_by_label(&mut self) {
		self.choices.sort_by(|_, a, _, b| compare_labels(a, b));
	}
}

// IndexMap equality ignores order, which is part of a datasource.
impl PartialEq for Datasource {
	fn eq(&self, other: &Self) -> bool {
		self.choices.iter().eq(other.choices.iter())
	}
}

impl Eq for Datasource {}

impl<V: Into<String>, L: Into<String>> FromIterator<(V, L)> for Datasource {
	fn from_iter<I: IntoIterator<Item = (V, L)>>(iter: I) -> Self {
		let mut data = Self::new();
		for (value, label) in iter {
			data.insert(value, label);
		}
		data
	}
}

impl From<Vec<Choice>> for Datasource {
	fn from(choices: Vec<Choice>) -> Self {
		choices
			.into_iter()
			.map(|choice| (choice.value, choice.label))
			.collect()
	}
}

impl From<Datasource> for Vec<Choice> {
	fn from(data: Datasource) -> Self {
		data.choices
			.into_iter()
			.map(|(value, label)| Choice { value, label })
			.collect()
	}
}

/// Total order on labels: the blank label, then numbers by value, then any
/// other text byte-wise
///
/// # Examples
///
/// ```
/// use geoform_widgets::datasource::compare_labels;
/// use std::cmp::Ordering;
///
/// assert_eq!(compare_labels("9", "10"), Ordering::Less);
/// assert_eq!(compare_labels("Zone 9", "Zone 10"), Ordering::Greater);
/// assert_eq!(compare_labels("", "0"), Ordering::Less);
/// assert_eq!(compare_labels("10", "1a"), Ordering::Less);
/// assert_eq!(compare_labels("9", "1a"), Ordering::Less);
/// ```
pub fn compare_labels(a: &str, b: &str) -> Ordering {
	match (is_numeric(a), is_numeric(b)) {
		(true, true) => parse_float(a).total_cmp(&parse_float(b)),
		(true, false) if b.is_empty() => Ordering::Greater,
		(true, false) => Ordering::Less,
		(false, true) if a.is_empty() => Ordering::Less,
		(false, true) => Ordering::Greater,
		(false, false) => a.cmp(b),
	}
}

/// Values offered by a range widget
///
/// Starts at `min` and walks by `step` while the value stays within `max`;
/// `max` is always appended so that step drift never hides the upper bound.
/// A non-positive step yields only the two bounds. Duplicates are left in
/// place, the datasource collapses them.
///
/// # Examples
///
/// ```
/// use geoform_widgets::datasource::range_choices;
/// use geoform_widgets::numeric::NumericValue::Integer;
///
/// let values = range_choices(Integer(0), Integer(10), Integer(3));
/// assert_eq!(
///     values,
///     [Integer(0), Integer(0), Integer(3), Integer(6), Integer(9), Integer(10)]
/// );
/// ```
pub fn range_choices(min: NumericValue, max: NumericValue, step: NumericValue) -> Vec<NumericValue> {
	let mut values = vec![min];
	let mut truncated = false;
	match (min, max, step) {
		(NumericValue::Integer(min), NumericValue::Integer(max), NumericValue::Integer(step)) => {
			let mut current = min;
			while step > 0 && current <= max {
				if values.len() > MAX_RANGE_CHOICES {
					truncated = true;
					break;
				}
				values.push(NumericValue::Integer(current));
				match current.checked_add(step) {
					Some(next) => current = next,
					None => break,
				}
			}
		}
		_ => {
			let (min, max, step) = (min.as_f64(), max.as_f64(), step.as_f64());
			let mut current = min;
			while step > 0.0 && current <= max {
				if values.len() > MAX_RANGE_CHOICES {
					truncated = true;
					break;
				}
				values.push(NumericValue::Float(current));
				current += step;
			}
		}
	}
	if truncated {
		tracing::warn!(
			limit = MAX_RANGE_CHOICES,
			"Range widget truncated, step too small for its bounds"
		);
	}
	values.push(max);
	values
}

/// Datasource of a range widget: each value is its own label
///
/// # Examples
///
/// ```
/// use geoform_widgets::datasource::range_datasource;
/// use geoform_widgets::numeric::NumericValue::Integer;
///
/// let data = range_datasource(Integer(0), Integer(10), Integer(3));
/// assert_eq!(data.values().collect::<Vec<_>>(), ["0", "3", "6", "9", "10"]);
/// ```
pub fn range_datasource(min: NumericValue, max: NumericValue, step: NumericValue) -> Datasource {
	range_choices(min, max, step)
		.into_iter()
		.map(|value| {
			let text = value.to_string();
			(text.clone(), text)
		})
		.collect()
}
