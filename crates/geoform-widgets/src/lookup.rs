//! Deferred lookups handed to the caller
//!
//! Unique values, value relations and relation references need data from a
//! layer (this one or another). The mapper cannot query it, so the control is
//! built with an empty datasource and one of these records describes what the
//! resolver has to fetch.

use crate::edit_widget::EditWidget;
use crate::numeric::parse_integer;
use serde::{Deserialize, Serialize};

/// Side-channel record attached to a control whose choices are resolved later
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DeferredLookup {
	UniqueValues(UniqueValuesData),
	ValueRelation(ValueRelationData),
	RelationReference(RelationReferenceData),
}

/// Distinct values already stored in the field
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UniqueValuesData {
	pub not_null: bool,
	/// Free text with completion instead of a closed list
	pub editable: bool,
}

impl UniqueValuesData {
	/// A non-empty `widgetv2config` decides both flags, missing attributes
	/// reading as off.
	///
	/// # Examples
	///
	/// ```
	/// use geoform_widgets::EditWidget;
	/// use geoform_widgets::lookup::UniqueValuesData;
	///
	/// let data = UniqueValuesData::from_widget(&EditWidget::widget_v2("UniqueValuesEditable"), true);
	/// assert!(data.editable);
	/// assert!(!data.not_null);
	///
	/// let widget = EditWidget::widget_v2("UniqueValues")
	///     .with_config_attribute("Editable", "1")
	///     .with_config_attribute("notNull", "1");
	/// let data = UniqueValuesData::from_widget(&widget, false);
	/// assert!(data.editable);
	/// assert!(data.not_null);
	/// ```
	pub fn from_widget(widget: &EditWidget, editable: bool) -> Self {
		let config = widget.config_attributes();
		if config.is_empty() {
			return Self {
				not_null: false,
				editable,
			};
		}
		Self {
			not_null: config.flag("notNull"),
			editable: config.flag("Editable"),
		}
	}
}

/// Key and value columns of another layer
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValueRelationData {
	/// Layer id
	pub layer: String,
	pub key: String,
	pub value: String,
	pub allow_null: bool,
	pub allow_multi: bool,
	pub order_by_value: bool,
	pub filter_expression: String,
	/// widgetv2 only
	#[serde(skip_serializing_if = "Option::is_none")]
	pub use_completer: Option<bool>,
	/// widgetv2 only, `None` when the option is not set
	#[serde(skip_serializing_if = "Option::is_none")]
	pub field_editable: Option<bool>,
}

impl ValueRelationData {
	/// # Examples
	///
	/// ```
	/// use geoform_widgets::EditWidget;
	/// use geoform_widgets::lookup::ValueRelationData;
	///
	/// let widget = EditWidget::legacy(15)
	///     .with_attribute("layer", "districts_1234")
	///     .with_attribute("key", "id")
	///     .with_attribute("value", "name")
	///     .with_attribute("allowNull", "1");
	/// let data = ValueRelationData::from_widget(&widget);
	///
	/// assert_eq!(data.layer, "districts_1234");
	/// assert!(data.allow_null);
	/// assert_eq!(data.use_completer, None);
	/// ```
	pub fn from_widget(widget: &EditWidget) -> Self {
		let option = |legacy: &str, v2: &str| widget.option(legacy, v2).to_string();
		let flag = |legacy: &str, v2: &str| parse_integer(widget.option(legacy, v2)) != 0;
		let config = widget.config_attributes();

		Self {
			layer: option("layer", "Layer"),
			key: option("key", "Key"),
			value: option("value", "Value"),
			allow_null: flag("allowNull", "AllowNull"),
			allow_multi: flag("allowMulti", "AllowMulti"),
			order_by_value: flag("orderByValue", "OrderByValue"),
			filter_expression: option("filterExpression", "FilterExpression"),
			use_completer: widget
				.is_widget_v2()
				.then(|| config.flag("UseCompleter")),
			field_editable: config
				.get("fieldEditable")
				.map(|_| config.flag("fieldEditable")),
		}
	}
}

/// Value picked through a project relation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationReferenceData {
	/// Relation id
	pub relation: String,
	pub allow_null: bool,
	pub order_by_value: bool,
	pub map_identification: bool,
	/// Fields of the referenced layer used to narrow the choice
	pub filters: Vec<String>,
	pub chain_filters: bool,
}

impl RelationReferenceData {
	/// # Examples
	///
	/// ```
	/// use geoform_widgets::EditWidget;
	/// use geoform_widgets::edit_widget::FilterFields;
	/// use geoform_widgets::lookup::RelationReferenceData;
	///
	/// let widget = EditWidget::widget_v2("RelationReference")
	///     .with_config_attribute("Relation", "parcel_owner")
	///     .with_config_attribute("AllowNULL", "1")
	///     .with_filter_fields(FilterFields {
	///         chain_filters: "1".to_string(),
	///         fields: vec!["city".to_string(), "street".to_string()],
	///     });
	/// let data = RelationReferenceData::from_widget(&widget);
	///
	/// assert_eq!(data.relation, "parcel_owner");
	/// assert!(data.allow_null);
	/// assert!(data.chain_filters);
	/// assert_eq!(data.filters, ["city", "street"]);
	/// ```
	pub fn from_widget(widget: &EditWidget) -> Self {
		let flag = |legacy: &str, v2: &str| parse_integer(widget.option(legacy, v2)) != 0;
		let (filters, chain_filters) = match widget.filter_fields() {
			Some(filter_fields) => (
				filter_fields.fields.clone(),
				parse_integer(&filter_fields.chain_filters) != 0,
			),
			None => (Vec::new(), false),
		};

		Self {
			relation: widget.option("relation", "Relation").to_string(),
			allow_null: flag("allowNull", "AllowNULL"),
			order_by_value: flag("orderByValue", "OrderByValue"),
			map_identification: flag("mapIdentification", "MapIdentification"),
			filters,
			chain_filters,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::edit_widget::FilterFields;
	use rstest::rstest;

	#[rstest]
	#[case(EditWidget::legacy(2), false, false, false)]
	#[case(EditWidget::widget_v2("UniqueValuesEditable"), true, true, false)]
	#[case(
		EditWidget::widget_v2("UniqueValuesEditable").with_config_attribute("Editable", "0"),
		true,
		false,
		false
	)]
	#[case(
		EditWidget::widget_v2("UniqueValues").with_config_attribute("notNull", "1"),
		false,
		false,
		true
	)]
	#[case(
		EditWidget::widget_v2("UniqueValuesEditable").with_config_attribute("notNull", "0"),
		true,
		false,
		false
	)]
	#[case(
		EditWidget::widget_v2("UniqueValuesEditable").with_config_attribute("notNull", "1"),
		true,
		false,
		true
	)]
	fn test_unique_values_data(
		#[case] widget: EditWidget,
		#[case] editable_kind: bool,
		#[case] editable: bool,
		#[case] not_null: bool,
	) {
		let data = UniqueValuesData::from_widget(&widget, editable_kind);

		assert_eq!(data, UniqueValuesData { not_null, editable });
	}

	#[rstest]
	fn test_value_relation_widget_v2() {
		let widget = EditWidget::widget_v2("ValueRelation")
			.with_config_attribute("Layer", "roads_abc")
			.with_config_attribute("Key", "gid")
			.with_config_attribute("Value", "label")
			.with_config_attribute("AllowMulti", "1")
			.with_config_attribute("OrderByValue", "1")
			.with_config_attribute("FilterExpression", "\"type\" = 'main'")
			.with_config_attribute("UseCompleter", "1")
			.with_config_attribute("fieldEditable", "0");

		let data = ValueRelationData::from_widget(&widget);

		assert_eq!(
			data,
			ValueRelationData {
				layer: "roads_abc".to_string(),
				key: "gid".to_string(),
				value: "label".to_string(),
				allow_null: false,
				allow_multi: true,
				order_by_value: true,
				filter_expression: "\"type\" = 'main'".to_string(),
				use_completer: Some(true),
				field_editable: Some(false),
			}
		);
	}

	#[rstest]
	fn test_value_relation_missing_attributes_default() {
		let data = ValueRelationData::from_widget(&EditWidget::widget_v2("ValueRelation"));

		assert_eq!(data.layer, "");
		assert!(!data.allow_null);
		assert_eq!(data.use_completer, Some(false));
		assert_eq!(data.field_editable, None);
	}

	#[rstest]
	fn test_relation_reference_without_filters() {
		let widget = EditWidget::legacy(18)
			.with_attribute("relation", "owner_rel")
			.with_attribute("orderByValue", "1");

		let data = RelationReferenceData::from_widget(&widget);

		assert_eq!(data.relation, "owner_rel");
		assert!(data.order_by_value);
		assert!(data.filters.is_empty());
		assert!(!data.chain_filters);
	}

	#[rstest]
	fn test_relation_reference_filters_without_chain() {
		let widget = EditWidget::widget_v2("RelationReference").with_filter_fields(FilterFields {
			chain_filters: String::new(),
			fields: vec!["zone".to_string()],
		});

		let data = RelationReferenceData::from_widget(&widget);

		assert_eq!(data.filters, ["zone"]);
		assert!(!data.chain_filters);
	}

	#[rstest]
	fn test_deferred_lookup_serializes_tagged() {
		let lookup = DeferredLookup::UniqueValues(UniqueValuesData {
			not_null: true,
			editable: false,
		});

		assert_eq!(
			serde_json::to_value(&lookup).unwrap(),
			serde_json::json!({"type": "unique_values", "not_null": true, "editable": false})
		);
	}
}
