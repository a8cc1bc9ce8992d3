//! Facade tests
//!
//! Checks that the prelude and the widgets module expose the mapping API.

#![cfg(feature = "widgets")]

use geoform::prelude::*;
use rstest::rstest;

#[rstest]
fn test_prelude_maps_field() {
	let widget = EditWidget::widget_v2("TextEdit").with_config_attribute("IsMultiline", "0");
	let field = FieldDescriptor::new("comment", "text");

	let control = FieldWidgetMapper::new()
		.construct("comment", Some(&widget), None, &[], &field)
		.unwrap();

	assert_eq!(control.markup(), Markup::Input);
	assert_eq!(control.datatype, Datatype::String);
}

#[rstest]
fn test_widgets_module_reexports_submodules() {
	let data = geoform::widgets::datasource::range_datasource(
		geoform::widgets::NumericValue::Integer(1),
		geoform::widgets::NumericValue::Integer(3),
		geoform::widgets::NumericValue::Integer(1),
	);

	assert_eq!(data.values().collect::<Vec<_>>(), ["1", "2", "3"]);
}

#[rstest]
fn test_form_serializes_through_facade() {
	let fields = [LayerField::new(FieldDescriptor::new("when", "date"))];

	let form = LayerFormMapper::new().map_layer(&fields, &[]).unwrap();

	assert_eq!(
		serde_json::to_value(form.controls()).unwrap(),
		serde_json::json!([{
			"name": "when",
			"label": "when",
			"control": {"markup": "input"},
			"datatype": "date",
			"required": false,
			"read_only": false
		}])
	);
}
