//! Edit widget descriptors read from a QGIS project
//!
//! QGIS has stored field widgets in two layouts. Projects written before 2.4
//! carry a numeric `type` code with flat attributes on the `edittype` element;
//! later projects carry a `widgetv2type` name and a nested `widgetv2config`
//! element. [`EditWidget`] keeps the two apart so every consumer can tell which
//! attribute naming scheme applies.

use crate::catalog::WidgetKey;
use crate::numeric::{parse_float, parse_integer};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// `widgetv2type` whose `IsMultiline` flag can turn it back into a line edit
const MULTILINE_TEXT_TYPE: &str = "TextEdit";

static EMPTY_ATTRIBUTES: Attributes = Attributes(BTreeMap::new());

/// XML attributes of a single element, by name
///
/// Lookups never fail: a missing attribute reads as an empty string or zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Attributes(BTreeMap<String, String>);

impl Attributes {
	pub fn new() -> Self {
		Self::default()
	}

	/// Builder-style insert
	///
	/// # Examples
	///
	/// ```
	/// use geoform_widgets::Attributes;
	///
	/// let attrs = Attributes::new().with("min", "0").with("max", "10");
	/// assert_eq!(attrs.string("max"), "10");
	/// assert_eq!(attrs.string("step"), "");
	/// assert_eq!(attrs.integer("step"), 0);
	/// ```
	pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
		self.insert(name, value);
		self
	}

	pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
		self.0.insert(name.into(), value.into());
	}

	pub fn contains(&self, name: &str) -> bool {
		self.0.contains_key(name)
	}

	pub fn get(&self, name: &str) -> Option<&str> {
		self.0.get(name).map(String::as_str)
	}

	pub fn string(&self, name: &str) -> &str {
		self.get(name).unwrap_or("")
	}

	pub fn integer(&self, name: &str) -> i64 {
		parse_integer(self.string(name))
	}

	pub fn float(&self, name: &str) -> f64 {
		parse_float(self.string(name))
	}

	/// A `0`/`1` style flag; anything not reading as a non-zero integer is off
	///
	/// # Examples
	///
	/// ```
	/// use geoform_widgets::Attributes;
	///
	/// let attrs = Attributes::new().with("AllowMulti", "1").with("UseHtml", "true");
	/// assert!(attrs.flag("AllowMulti"));
	/// assert!(!attrs.flag("UseHtml"));
	/// assert!(!attrs.flag("missing"));
	/// ```
	pub fn flag(&self, name: &str) -> bool {
		self.integer(name) != 0
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
		self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
	}
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Attributes {
	fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
		Self(
			iter.into_iter()
				.map(|(k, v)| (k.into(), v.into()))
				.collect(),
		)
	}
}

/// A `valuepair` (legacy) or `value` (widgetv2) element of a value map
///
/// `key` is the description shown to the user, `value` is what gets stored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValuePair {
	pub key: String,
	pub value: String,
}

impl ValuePair {
	pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
		Self {
			key: key.into(),
			value: value.into(),
		}
	}
}

/// `FilterFields` block of a relation reference widget
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterFields {
	#[serde(default)]
	pub chain_filters: String,
	#[serde(default)]
	pub fields: Vec<String>,
}

/// Content of a `widgetv2config` element
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WidgetConfig {
	#[serde(default)]
	pub attributes: Attributes,
	#[serde(default)]
	pub values: Vec<ValuePair>,
	#[serde(default)]
	pub filter_fields: Option<FilterFields>,
}

/// A category of the layer renderer, used by the Classification widget
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RendererCategory {
	pub label: String,
	pub value: String,
}

impl RendererCategory {
	pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
		Self {
			label: label.into(),
			value: value.into(),
		}
	}
}

/// The edit widget configured for a field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "schema", rename_all = "snake_case")]
pub enum EditWidget {
	/// Pre-2.4 `edittype` with a numeric `type` attribute
	Legacy {
		type_code: i32,
		#[serde(default)]
		attributes: Attributes,
		#[serde(default)]
		value_pairs: Vec<ValuePair>,
	},
	/// `edittype` with a `widgetv2type` attribute and a `widgetv2config` child
	WidgetV2 {
		type_name: String,
		#[serde(default)]
		attributes: Attributes,
		#[serde(default)]
		config: WidgetConfig,
	},
}

impl EditWidget {
	/// # Examples
	///
	/// ```
	/// use geoform_widgets::{EditWidget, WidgetKey};
	///
	/// let widget = EditWidget::legacy(5).with_attribute("min", "1");
	/// assert_eq!(widget.key(), WidgetKey::Code(5));
	/// assert_eq!(widget.option("min", "Min"), "1");
	/// ```
	pub fn legacy(type_code: i32) -> Self {
		Self::Legacy {
			type_code,
			attributes: Attributes::new(),
			value_pairs: Vec::new(),
		}
	}

	/// # Examples
	///
	/// ```
	/// use geoform_widgets::{EditWidget, WidgetKey};
	///
	/// let widget = EditWidget::widget_v2("Range").with_config_attribute("Min", "1");
	/// assert_eq!(widget.key(), WidgetKey::Name("Range".to_string()));
	/// assert_eq!(widget.option("min", "Min"), "1");
	/// ```
	pub fn widget_v2(type_name: impl Into<String>) -> Self {
		Self::WidgetV2 {
			type_name: type_name.into(),
			attributes: Attributes::new(),
			config: WidgetConfig::default(),
		}
	}

	/// Set an attribute on the `edittype` element itself
	pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
		match &mut self {
			Self::Legacy { attributes, .. } | Self::WidgetV2 { attributes, .. } => {
				attributes.insert(name, value)
			}
		}
		self
	}

	/// Set a `widgetv2config` attribute; legacy widgets keep their options on
	/// the element, so the attribute lands there instead.
	pub fn with_config_attribute(
		mut self,
		name: impl Into<String>,
		value: impl Into<String>,
	) -> Self {
		match &mut self {
			Self::Legacy { attributes, .. } => attributes.insert(name, value),
			Self::WidgetV2 { config, .. } => config.attributes.insert(name, value),
		}
		self
	}

	/// Append a value map entry (`valuepair` or `value` element)
	pub fn with_value_pair(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
		let pair = ValuePair::new(key, value);
		match &mut self {
			Self::Legacy { value_pairs, .. } => value_pairs.push(pair),
			Self::WidgetV2 { config, .. } => config.values.push(pair),
		}
		self
	}

	/// Attach a `FilterFields` block; ignored for legacy widgets
	pub fn with_filter_fields(mut self, filter_fields: FilterFields) -> Self {
		if let Self::WidgetV2 { config, .. } = &mut self {
			config.filter_fields = Some(filter_fields);
		}
		self
	}

	pub fn is_widget_v2(&self) -> bool {
		matches!(self, Self::WidgetV2 { .. })
	}

	/// Attributes of the `edittype` element
	pub fn attributes(&self) -> &Attributes {
		match self {
			Self::Legacy { attributes, .. } | Self::WidgetV2 { attributes, .. } => attributes,
		}
	}

	/// Attributes holding the widget options: the element for legacy widgets,
	/// `widgetv2config` otherwise
	pub fn options(&self) -> &Attributes {
		match self {
			Self::Legacy { attributes, .. } => attributes,
			Self::WidgetV2 { config, .. } => &config.attributes,
		}
	}

	/// `widgetv2config` attributes; empty for legacy widgets
	pub fn config_attributes(&self) -> &Attributes {
		match self {
			Self::Legacy { .. } => &EMPTY_ATTRIBUTES,
			Self::WidgetV2 { config, .. } => &config.attributes,
		}
	}

	/// Read an option under the attribute name used by this widget's schema
	pub fn option(&self, legacy_name: &str, v2_name: &str) -> &str {
		match self {
			Self::Legacy { attributes, .. } => attributes.string(legacy_name),
			Self::WidgetV2 { config, .. } => config.attributes.string(v2_name),
		}
	}

	pub fn value_pairs(&self) -> &[ValuePair] {
		match self {
			Self::Legacy { value_pairs, .. } => value_pairs,
			Self::WidgetV2 { config, .. } => &config.values,
		}
	}

	pub fn filter_fields(&self) -> Option<&FilterFields> {
		match self {
			Self::Legacy { .. } => None,
			Self::WidgetV2 { config, .. } => config.filter_fields.as_ref(),
		}
	}

	/// Catalog key of this widget
	///
	/// A `TextEdit` whose `IsMultiline` is explicitly `"0"` is a plain line
	/// edit since QGIS 2.4.
	///
	/// # Examples
	///
	/// ```
	/// use geoform_widgets::{EditWidget, WidgetKey};
	///
	/// let widget = EditWidget::widget_v2("TextEdit").with_config_attribute("IsMultiline", "0");
	/// assert_eq!(widget.key(), WidgetKey::LINE_EDIT);
	///
	/// let widget = EditWidget::widget_v2("TextEdit").with_config_attribute("IsMultiline", "1");
	/// assert_eq!(widget.key(), WidgetKey::Name("TextEdit".to_string()));
	/// ```
	pub fn key(&self) -> WidgetKey {
		match self {
			Self::Legacy { type_code, .. } => WidgetKey::Code(*type_code),
			Self::WidgetV2 {
				type_name, config, ..
			} => {
				if type_name == MULTILINE_TEXT_TYPE
					&& config.attributes.get("IsMultiline") == Some("0")
				{
					WidgetKey::LINE_EDIT
				} else {
					WidgetKey::Name(type_name.clone())
				}
			}
		}
	}
}
