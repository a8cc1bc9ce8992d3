//! Form control definitions produced by the mapper

use crate::catalog::Markup;
use crate::datasource::Datasource;
use crate::field::FieldDataType;
use crate::lookup::DeferredLookup;
use crate::numeric::NumericValue;
use crate::upload::UploadChoice;
use serde::{Deserialize, Serialize};

/// Type the web form validates a control's value against
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Datatype {
	#[default]
	String,
	Integer,
	Decimal,
	Date,
	#[serde(rename = "datetime")]
	DateTime,
	Time,
	Html,
}

impl Datatype {
	/// Datatype a string control takes for a field of the given category;
	/// text-like categories stay strings
	///
	/// # Examples
	///
	/// ```
	/// use geoform_widgets::{Datatype, FieldDataType};
	///
	/// assert_eq!(Datatype::for_field(FieldDataType::Float), Datatype::Decimal);
	/// assert_eq!(Datatype::for_field(FieldDataType::Boolean), Datatype::String);
	/// ```
	pub fn for_field(data_type: FieldDataType) -> Self {
		match data_type {
			FieldDataType::Integer => Self::Integer,
			FieldDataType::Float => Self::Decimal,
			FieldDataType::Date => Self::Date,
			FieldDataType::DateTime => Self::DateTime,
			FieldDataType::Time => Self::Time,
			FieldDataType::Text
			| FieldDataType::Blob
			| FieldDataType::Geometry
			| FieldDataType::Boolean => Self::String,
		}
	}
}

/// Control variant with its configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "markup", rename_all = "snake_case")]
pub enum Control {
	Input {
		#[serde(default, skip_serializing_if = "Option::is_none")]
		min_value: Option<NumericValue>,
		#[serde(default, skip_serializing_if = "Option::is_none")]
		max_value: Option<NumericValue>,
	},
	Menulist {
		datasource: Datasource,
	},
	Checkboxes {
		datasource: Datasource,
	},
	Hidden,
	Checkbox {
		value_on_check: String,
		value_on_uncheck: String,
	},
	Textarea,
	#[serde(rename = "htmleditor")]
	HtmlEditor,
	Date,
	#[serde(rename = "datetime")]
	DateTime,
	Time,
	Upload(UploadChoice),
}

impl Control {
	/// Control of the given markup with default configuration
	pub fn empty(markup: Markup) -> Self {
		match markup {
			Markup::Input => Self::Input {
				min_value: None,
				max_value: None,
			},
			Markup::Menulist => Self::Menulist {
				datasource: Datasource::new(),
			},
			Markup::Checkboxes => Self::Checkboxes {
				datasource: Datasource::new(),
			},
			Markup::Hidden => Self::Hidden,
			Markup::Checkbox => Self::Checkbox {
				value_on_check: String::new(),
				value_on_uncheck: String::new(),
			},
			Markup::Textarea => Self::Textarea,
			Markup::HtmlEditor => Self::HtmlEditor,
			Markup::Date => Self::Date,
			Markup::DateTime => Self::DateTime,
			Markup::Time => Self::Time,
			Markup::Upload => Self::Upload(UploadChoice::new("", Default::default())),
		}
	}

	pub fn markup(&self) -> Markup {
		match self {
			Self::Input { .. } => Markup::Input,
			Self::Menulist { .. } => Markup::Menulist,
			Self::Checkboxes { .. } => Markup::Checkboxes,
			Self::Hidden => Markup::Hidden,
			Self::Checkbox { .. } => Markup::Checkbox,
			Self::Textarea => Markup::Textarea,
			Self::HtmlEditor => Markup::HtmlEditor,
			Self::Date => Markup::Date,
			Self::DateTime => Markup::DateTime,
			Self::Time => Markup::Time,
			Self::Upload(_) => Markup::Upload,
		}
	}

	/// Datatype the control carries before any field coercion
	pub fn intrinsic_datatype(&self) -> Datatype {
		match self {
			Self::Date => Datatype::Date,
			Self::DateTime => Datatype::DateTime,
			Self::HtmlEditor => Datatype::Html,
			_ => Datatype::String,
		}
	}

	pub fn datasource(&self) -> Option<&Datasource> {
		match self {
			Self::Menulist { datasource } | Self::Checkboxes { datasource } => Some(datasource),
			_ => None,
		}
	}
}

/// A fully configured form control for one layer field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControlDefinition {
	/// Field reference the control is bound to
	pub name: String,
	pub label: String,
	pub control: Control,
	pub datatype: Datatype,
	pub required: bool,
	pub read_only: bool,
	/// Data the caller has to fetch to fill the choices
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub lookup: Option<DeferredLookup>,
}

impl ControlDefinition {
	/// Definition with the control's intrinsic datatype, optional and editable
	pub fn new(name: impl Into<String>, label: impl Into<String>, control: Control) -> Self {
		let datatype = control.intrinsic_datatype();
		Self {
			name: name.into(),
			label: label.into(),
			control,
			datatype,
			required: false,
			read_only: false,
			lookup: None,
		}
	}

	pub fn markup(&self) -> Markup {
		self.control.markup()
	}

	pub fn datasource(&self) -> Option<&Datasource> {
		self.control.datasource()
	}

	/// Narrow a string datatype to the field's category; controls with their
	/// own datatype (dates, HTML) keep it
	///
	/// # Examples
	///
	/// ```
	/// use geoform_widgets::{Control, ControlDefinition, Datatype, FieldDataType};
	///
	/// let mut input = ControlDefinition::new("count", "Count", Control::Input {
	///     min_value: None,
	///     max_value: None,
	/// });
	/// input.coerce_datatype(FieldDataType::Integer);
	/// assert_eq!(input.datatype, Datatype::Integer);
	///
	/// let mut editor = ControlDefinition::new("notes", "Notes", Control::HtmlEditor);
	/// editor.coerce_datatype(FieldDataType::Text);
	/// assert_eq!(editor.datatype, Datatype::Html);
	/// ```
	pub fn coerce_datatype(&mut self, data_type: FieldDataType) {
		if self.datatype == Datatype::String {
			self.datatype = Datatype::for_field(data_type);
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::lookup::UniqueValuesData;
	use rstest::rstest;

	#[rstest]
	#[case(Markup::Input)]
	#[case(Markup::Menulist)]
	#[case(Markup::Checkboxes)]
	#[case(Markup::Hidden)]
	#[case(Markup::Checkbox)]
	#[case(Markup::Textarea)]
	#[case(Markup::HtmlEditor)]
	#[case(Markup::Date)]
	#[case(Markup::DateTime)]
	#[case(Markup::Time)]
	#[case(Markup::Upload)]
	fn test_empty_control_has_requested_markup(#[case] markup: Markup) {
		assert_eq!(Control::empty(markup).markup(), markup);
	}

	#[rstest]
	#[case(Control::Date, FieldDataType::Text, Datatype::Date)]
	#[case(Control::DateTime, FieldDataType::Date, Datatype::DateTime)]
	#[case(Control::Textarea, FieldDataType::Integer, Datatype::Integer)]
	#[case(Control::Hidden, FieldDataType::Time, Datatype::Time)]
	#[case(Control::Time, FieldDataType::DateTime, Datatype::DateTime)]
	#[case(Control::Textarea, FieldDataType::Blob, Datatype::String)]
	fn test_coerce_datatype(
		#[case] control: Control,
		#[case] data_type: FieldDataType,
		#[case] expected: Datatype,
	) {
		let mut definition = ControlDefinition::new("f", "f", control);
		definition.coerce_datatype(data_type);

		assert_eq!(definition.datatype, expected);
	}

	#[rstest]
	fn test_datasource_only_on_list_controls() {
		assert!(Control::empty(Markup::Menulist).datasource().is_some());
		assert!(Control::empty(Markup::Checkboxes).datasource().is_some());
		assert!(Control::empty(Markup::Input).datasource().is_none());
	}

	#[rstest]
	fn test_definition_serializes_tagged_control() {
		let mut datasource = Datasource::new();
		datasource.insert("1", "One");
		let mut definition = ControlDefinition::new("code", "Code", Control::Menulist { datasource });
		definition.lookup = Some(DeferredLookup::UniqueValues(UniqueValuesData::default()));

		assert_eq!(
			serde_json::to_value(&definition).unwrap(),
			serde_json::json!({
				"name": "code",
				"label": "Code",
				"control": {
					"markup": "menulist",
					"datasource": [{"value": "1", "label": "One"}]
				},
				"datatype": "string",
				"required": false,
				"read_only": false,
				"lookup": {"type": "unique_values", "not_null": false, "editable": false}
			})
		);
	}

	#[rstest]
	fn test_input_without_bounds_omits_them() {
		let definition = ControlDefinition::new("n", "n", Control::empty(Markup::Input));

		assert_eq!(
			serde_json::to_value(&definition.control).unwrap(),
			serde_json::json!({"markup": "input"})
		);
	}
}
