//! Field to form control mapping
//!
//! [`FieldWidgetMapper::construct`] turns one layer field and its edit widget
//! into a [`ControlDefinition`]:
//!
//! 1. the declared type is resolved through the cast table, failing on
//!    unknown types;
//! 2. geometry fields become hidden controls, whatever their widget;
//! 3. the widget key resolves to a catalog kind, whose markup is picked;
//! 4. the control is configured from the widget options (bounds, choices,
//!    checkbox states, upload constraints);
//! 5. label, datatype, required and read-only flags are settled.

use crate::catalog::{Markup, RangeStyle, WidgetKey, WidgetKind};
use crate::control::{Control, ControlDefinition};
use crate::datasource::{Datasource, range_choices};
use crate::edit_widget::{Attributes, EditWidget, RendererCategory, ValuePair};
use crate::error::MappingResult;
use crate::field::{FieldDataType, FieldDescriptor};
use crate::lookup::{DeferredLookup, RelationReferenceData, UniqueValuesData, ValueRelationData};
use crate::numeric::{NumericValue, parse_integer};
use crate::settings::MapperSettings;
use crate::upload::{UploadChoice, UploadConstraints};

/// Builds form controls from layer fields
#[derive(Debug, Clone, Default)]
pub struct FieldWidgetMapper {
	settings: MapperSettings,
}

impl FieldWidgetMapper {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_settings(settings: MapperSettings) -> Self {
		Self { settings }
	}

	pub fn settings(&self) -> &MapperSettings {
		&self.settings
	}

	/// Build the control of `field`, bound to `field_ref`
	///
	/// `alias` overrides the field's own alias as label when non-empty.
	/// `renderer_categories` only matter for classification widgets.
	///
	/// # Examples
	///
	/// ```
	/// use geoform_widgets::{Datatype, EditWidget, FieldDescriptor, FieldWidgetMapper, Markup};
	///
	/// let mapper = FieldWidgetMapper::new();
	/// let widget = EditWidget::widget_v2("ValueMap")
	///     .with_value_pair("Paved", "1")
	///     .with_value_pair("Gravel", "2");
	/// let field = FieldDescriptor::new("surface", "int4").with_not_null(true);
	///
	/// let control = mapper
	///     .construct("surface", Some(&widget), Some("Surface"), &[], &field)
	///     .unwrap();
	///
	/// assert_eq!(control.markup(), Markup::Menulist);
	/// assert_eq!(control.label, "Surface");
	/// assert_eq!(control.datatype, Datatype::Integer);
	/// assert!(control.required);
	/// let datasource = control.datasource().unwrap();
	/// assert_eq!(datasource.values().collect::<Vec<_>>(), ["", "2", "1"]);
	/// assert_eq!(datasource.labels().collect::<Vec<_>>(), ["", "Gravel", "Paved"]);
	/// ```
	pub fn construct(
		&self,
		field_ref: &str,
		edit_widget: Option<&EditWidget>,
		alias: Option<&str>,
		renderer_categories: &[RendererCategory],
		field: &FieldDescriptor,
	) -> MappingResult<ControlDefinition> {
		let data_type = field.data_type()?;
		let label = match alias {
			Some(alias) if !alias.is_empty() => alias,
			_ => field.label(),
		};

		if data_type.is_geometry() {
			let mut definition = ControlDefinition::new(field_ref, label, Control::Hidden);
			definition.required = field.is_required();
			tracing::debug!(field = %field_ref, "Geometry field mapped to hidden control");
			return Ok(definition);
		}

		let key = edit_widget.map_or(WidgetKey::LINE_EDIT, EditWidget::key);
		let kind = key.kind();
		let entry = kind.catalog_entry();
		if kind == WidgetKind::Unknown {
			tracing::warn!(
				field = %field_ref,
				widget = %key,
				fallback = entry.name,
				"Unknown edit widget, falling back"
			);
		}
		let markup = kind.select_markup(edit_widget);
		let options = WidgetOptions(edit_widget);

		let control = match markup {
			Markup::Input => input_control(kind, &options, data_type),
			Markup::Menulist | Markup::Checkboxes => {
				let datasource = self.fill_datasource(
					kind,
					&options,
					data_type,
					renderer_categories,
					field.is_required(),
				);
				if markup == Markup::Menulist {
					Control::Menulist { datasource }
				} else {
					Control::Checkboxes { datasource }
				}
			}
			Markup::Checkbox => Control::Checkbox {
				value_on_check: options.get("checked", "CheckedState").to_string(),
				value_on_uncheck: options.get("unchecked", "UncheckedState").to_string(),
			},
			Markup::Upload => {
				Control::Upload(UploadChoice::new(field_ref, self.upload_constraints(kind, &options)))
			}
			Markup::Hidden
			| Markup::Textarea
			| Markup::HtmlEditor
			| Markup::Date
			| Markup::DateTime
			| Markup::Time => Control::empty(markup),
		};

		let mut definition = ControlDefinition::new(field_ref, label, control);
		definition.required = field.is_required() && markup != Markup::Checkbox;
		definition.read_only = entry.readonly || options.not_editable();
		definition.coerce_datatype(data_type);
		definition.lookup = deferred_lookup(kind, edit_widget);

		tracing::debug!(
			field = %field_ref,
			widget = %key,
			kind = entry.name,
			markup = %markup,
			datatype = ?definition.datatype,
			required = definition.required,
			read_only = definition.read_only,
			"Mapped field to form control"
		);
		Ok(definition)
	}

	/// Build the control of `field` under its own name and alias
	pub fn map_field(
		&self,
		field: &FieldDescriptor,
		edit_widget: Option<&EditWidget>,
		renderer_categories: &[RendererCategory],
	) -> MappingResult<ControlDefinition> {
		self.construct(&field.name, edit_widget, None, renderer_categories, field)
	}

	fn fill_datasource(
		&self,
		kind: WidgetKind,
		options: &WidgetOptions<'_>,
		data_type: FieldDataType,
		renderer_categories: &[RendererCategory],
		required: bool,
	) -> Datasource {
		let mut datasource = Datasource::new();
		if required && self.settings.blank_choice_for_required && !kind.is_deferred() {
			datasource.insert("", "");
		}

		match kind {
			WidgetKind::Enumeration => {
				datasource.insert("0", self.settings.enumeration_placeholder.as_str());
			}
			WidgetKind::ValueMap => {
				for pair in options.value_pairs() {
					datasource.insert(pair.value.as_str(), pair.key.as_str());
				}
			}
			WidgetKind::Classification => {
				for category in renderer_categories {
					datasource.insert(category.value.as_str(), category.label.as_str());
				}
			}
			WidgetKind::Range(_) => {
				let (min, max) = options.bounds(data_type);
				let step = NumericValue::coerce(options.get("step", "Step"), data_type);
				for value in range_choices(min, max, step) {
					let text = value.to_string();
					datasource.insert(text.clone(), text);
				}
			}
			_ => {}
		}

		datasource.sort_by_label();
		datasource
	}

	fn upload_constraints(&self, kind: WidgetKind, options: &WidgetOptions<'_>) -> UploadConstraints {
		match kind {
			WidgetKind::Photo => UploadConstraints::photo(&self.settings.photo_mime_types),
			WidgetKind::ExternalResource => {
				let empty = Attributes::new();
				let attributes = options.0.map_or(&empty, EditWidget::options);
				UploadConstraints::external_resource(attributes, &self.settings.photo_mime_types)
			}
			_ => UploadConstraints::default(),
		}
	}
}

/// Option reader tolerating fields without an edit widget
struct WidgetOptions<'a>(Option<&'a EditWidget>);

impl WidgetOptions<'_> {
	fn get(&self, legacy_name: &str, v2_name: &str) -> &str {
		self.0
			.map_or("", |widget| widget.option(legacy_name, v2_name))
	}

	fn value_pairs(&self) -> &[ValuePair] {
		self.0.map(EditWidget::value_pairs).unwrap_or_default()
	}

	fn bounds(&self, data_type: FieldDataType) -> (NumericValue, NumericValue) {
		(
			NumericValue::coerce(self.get("min", "Min"), data_type),
			NumericValue::coerce(self.get("max", "Max"), data_type),
		)
	}

	/// `editable="0"` on the element, or for widgetv2 without that attribute,
	/// `fieldEditable="0"` in the config
	fn not_editable(&self) -> bool {
		let Some(widget) = self.0 else {
			return false;
		};
		match widget.attributes().get("editable") {
			Some(editable) => parse_integer(editable) == 0,
			None => widget
				.config_attributes()
				.get("fieldEditable")
				.is_some_and(|editable| parse_integer(editable) == 0),
		}
	}
}

fn input_control(kind: WidgetKind, options: &WidgetOptions<'_>, data_type: FieldDataType) -> Control {
	match kind {
		WidgetKind::Range(RangeStyle::Legacy | RangeStyle::Edit) => {
			let (min, max) = options.bounds(data_type);
			Control::Input {
				min_value: Some(min),
				max_value: Some(max),
			}
		}
		_ => Control::empty(Markup::Input),
	}
}

fn deferred_lookup(kind: WidgetKind, edit_widget: Option<&EditWidget>) -> Option<DeferredLookup> {
	let widget = edit_widget?;
	match kind {
		WidgetKind::UniqueValues => Some(DeferredLookup::UniqueValues(
			UniqueValuesData::from_widget(widget, false),
		)),
		WidgetKind::UniqueValuesEditable => Some(DeferredLookup::UniqueValues(
			UniqueValuesData::from_widget(widget, true),
		)),
		WidgetKind::ValueRelation => Some(DeferredLookup::ValueRelation(
			ValueRelationData::from_widget(widget),
		)),
		WidgetKind::RelationReference => Some(DeferredLookup::RelationReference(
			RelationReferenceData::from_widget(widget),
		)),
		_ => None,
	}
}
