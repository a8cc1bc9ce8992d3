//! Layer form tests
//!
//! Tests for mapping a whole layer, from a JSON field list to the serialized
//! form shipped to the client.

use geoform_widgets::{
	DeferredLookup, LayerField, LayerForm, LayerFormMapper, MapperSettings, MappingError, Markup,
	RendererCategory, UnsupportedTypePolicy,
};
use rstest::*;
use serde_json::json;

#[fixture]
fn layer_fields() -> Vec<LayerField> {
	serde_json::from_value(json!([
		{"name": "id", "type": "int4", "not_null": true, "auto_increment": true},
		{
			"name": "species",
			"type": "varchar",
			"not_null": true,
			"alias": "Species",
			"edit_widget": {
				"schema": "widget_v2",
				"type_name": "ValueMap",
				"config": {"values": [{"key": "Oak", "value": "q"}, {"key": "Birch", "value": "b"}]}
			}
		},
		{
			"name": "district",
			"type": "text",
			"edit_widget": {
				"schema": "widget_v2",
				"type_name": "ValueRelation",
				"config": {"attributes": {"Layer": "districts", "Key": "id", "Value": "name"}}
			}
		},
		{
			"name": "height_class",
			"type": "int2",
			"edit_widget": {"schema": "legacy", "type_code": 4}
		},
		{"name": "extra", "type": "hstore"},
		{"name": "geom", "type": "MultiPolygon"}
	]))
	.unwrap()
}

fn categories() -> Vec<RendererCategory> {
	vec![
		RendererCategory::new("Tall", "3"),
		RendererCategory::new("Small", "1"),
	]
}

fn skipping() -> LayerFormMapper {
	LayerFormMapper::with_settings(
		MapperSettings::new().with_unsupported_type_policy(UnsupportedTypePolicy::Skip),
	)
}

// ============================================================================
// Unsupported type policy
// ============================================================================

#[rstest]
fn test_abort_policy_fails_on_unsupported_type(layer_fields: Vec<LayerField>) {
	let err = LayerFormMapper::new()
		.map_layer(&layer_fields, &categories())
		.unwrap_err();

	assert!(matches!(
		err,
		MappingError::UnsupportedType { ref field, .. } if field == "height_class"
	));
}

#[rstest]
fn test_skip_policy_reports_every_unsupported_field(layer_fields: Vec<LayerField>) {
	let form = skipping().map_layer(&layer_fields, &categories()).unwrap();

	let skipped: Vec<_> = form.skipped().iter().map(|s| s.name.as_str()).collect();
	assert_eq!(skipped, ["height_class", "extra"]);
	assert_eq!(form.len(), 4);
}

#[rstest]
fn test_policy_from_json_settings(layer_fields: Vec<LayerField>) {
	let settings = MapperSettings::from_json(r#"{"unsupported_type_policy": "skip"}"#).unwrap();

	let form = LayerFormMapper::with_settings(settings)
		.map_layer(&layer_fields, &[])
		.unwrap();

	assert_eq!(form.skipped().len(), 2);
}

// ============================================================================
// Form content
// ============================================================================

#[rstest]
fn test_form_controls(layer_fields: Vec<LayerField>) {
	let form = skipping().map_layer(&layer_fields, &categories()).unwrap();

	let id = form.control("id").unwrap();
	assert_eq!(id.markup(), Markup::Input);
	assert!(!id.required);

	let species = form.control("species").unwrap();
	assert_eq!(species.label, "Species");
	assert_eq!(
		species.datasource().unwrap().labels().collect::<Vec<_>>(),
		["", "Birch", "Oak"]
	);

	assert_eq!(form.control("geom").unwrap().markup(), Markup::Hidden);
}

#[rstest]
fn test_deferred_lookups_listed_by_control(layer_fields: Vec<LayerField>) {
	let form = skipping().map_layer(&layer_fields, &[]).unwrap();

	let lookups: Vec<_> = form.deferred_lookups().collect();

	assert_eq!(lookups.len(), 1);
	let (name, lookup) = lookups[0];
	assert_eq!(name, "district");
	let DeferredLookup::ValueRelation(data) = lookup else {
		panic!("expected a value relation lookup, got {lookup:?}");
	};
	assert_eq!(data.layer, "districts");
	assert_eq!(data.value, "name");
}

#[rstest]
fn test_classification_with_renderer_categories() {
	let fields: Vec<LayerField> = serde_json::from_value(json!([
		{"name": "size", "type": "smallint", "edit_widget": {"schema": "widget_v2", "type_name": "Classification"}}
	]))
	.unwrap();

	let form = LayerFormMapper::new().map_layer(&fields, &categories()).unwrap();

	let size = form.control("size").unwrap();
	assert_eq!(
		size.datasource().unwrap().values().collect::<Vec<_>>(),
		["1", "3"]
	);
}

// ============================================================================
// Serialization
// ============================================================================

#[rstest]
fn test_form_serializes_and_reads_back(layer_fields: Vec<LayerField>) {
	let form = skipping().map_layer(&layer_fields, &categories()).unwrap();

	let value = serde_json::to_value(&form).unwrap();

	assert_eq!(value["controls"][1]["control"]["markup"], json!("menulist"));
	assert_eq!(value["controls"][2]["lookup"]["type"], json!("value_relation"));
	assert_eq!(value["skipped"][1]["declared_type"], json!("hstore"));

	let read_back: LayerForm = serde_json::from_value(value).unwrap();
	assert_eq!(read_back, form);
}
