//! Whole-layer form building

use crate::control::ControlDefinition;
use crate::edit_widget::{EditWidget, RendererCategory};
use crate::error::{MappingError, MappingResult};
use crate::field::FieldDescriptor;
use crate::lookup::DeferredLookup;
use crate::mapper::FieldWidgetMapper;
use crate::settings::{MapperSettings, UnsupportedTypePolicy};
use serde::{Deserialize, Serialize};

/// A layer field together with its edit widget configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayerField {
	#[serde(flatten)]
	pub field: FieldDescriptor,
	#[serde(default)]
	pub edit_widget: Option<EditWidget>,
	/// Form label set in the project, overriding the field alias
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub label: Option<String>,
}

impl LayerField {
	pub fn new(field: FieldDescriptor) -> Self {
		Self {
			field,
			edit_widget: None,
			label: None,
		}
	}

	pub fn with_edit_widget(mut self, edit_widget: EditWidget) -> Self {
		self.edit_widget = Some(edit_widget);
		self
	}

	pub fn with_label(mut self, label: impl Into<String>) -> Self {
		self.label = Some(label.into());
		self
	}
}

/// A field left out of the form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedField {
	pub name: String,
	pub declared_type: String,
	pub reason: String,
}

/// Controls of every mappable field of a layer, in field order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LayerForm {
	controls: Vec<ControlDefinition>,
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	skipped: Vec<SkippedField>,
}

impl LayerForm {
	pub fn controls(&self) -> &[ControlDefinition] {
		&self.controls
	}

	pub fn control(&self, name: &str) -> Option<&ControlDefinition> {
		self.controls.iter().find(|control| control.name == name)
	}

	pub fn skipped(&self) -> &[SkippedField] {
		&self.skipped
	}

	/// Controls waiting for the caller to fetch their choices, with what to
	/// fetch
	pub fn deferred_lookups(&self) -> impl Iterator<Item = (&str, &DeferredLookup)> {
		self.controls.iter().filter_map(|control| {
			control
				.lookup
				.as_ref()
				.map(|lookup| (control.name.as_str(), lookup))
		})
	}

	pub fn len(&self) -> usize {
		self.controls.len()
	}

	pub fn is_empty(&self) -> bool {
		self.controls.is_empty()
	}
}

/// Maps every field of a layer with a shared [`FieldWidgetMapper`]
#[derive(Debug, Clone, Default)]
pub struct LayerFormMapper {
	mapper: FieldWidgetMapper,
}

impl LayerFormMapper {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_settings(settings: MapperSettings) -> Self {
		Self {
			mapper: FieldWidgetMapper::with_settings(settings),
		}
	}

	pub fn mapper(&self) -> &FieldWidgetMapper {
		&self.mapper
	}

	/// Build the form of a layer
	///
	/// A field with an unsupported declared type aborts the form or is
	/// skipped, depending on
	/// [`MapperSettings::unsupported_type_policy`].
	///
	/// # Examples
	///
	/// ```
	/// use geoform_widgets::{
	///     EditWidget, FieldDescriptor, LayerField, LayerFormMapper, MapperSettings,
	///     UnsupportedTypePolicy,
	/// };
	///
	/// let fields = [
	///     LayerField::new(FieldDescriptor::new("id", "int4")),
	///     LayerField::new(FieldDescriptor::new("tags", "hstore")),
	///     LayerField::new(FieldDescriptor::new("district", "text"))
	///         .with_edit_widget(EditWidget::widget_v2("UniqueValues")),
	/// ];
	///
	/// assert!(LayerFormMapper::new().map_layer(&fields, &[]).is_err());
	///
	/// let mapper = LayerFormMapper::with_settings(
	///     MapperSettings::new().with_unsupported_type_policy(UnsupportedTypePolicy::Skip),
	/// );
	/// let form = mapper.map_layer(&fields, &[]).unwrap();
	///
	/// assert_eq!(form.len(), 2);
	/// assert_eq!(form.skipped()[0].name, "tags");
	/// assert_eq!(form.deferred_lookups().count(), 1);
	/// ```
	pub fn map_layer(
		&self,
		fields: &[LayerField],
		renderer_categories: &[RendererCategory],
	) -> MappingResult<LayerForm> {
		let policy = self.mapper.settings().unsupported_type_policy;
		let mut form = LayerForm::default();

		for layer_field in fields {
			let field = &layer_field.field;
			let result = self.mapper.construct(
				&field.name,
				layer_field.edit_widget.as_ref(),
				layer_field.label.as_deref(),
				renderer_categories,
				field,
			);
			match result {
				Ok(control) => form.controls.push(control),
				Err(err @ MappingError::UnsupportedType { .. })
					if policy == UnsupportedTypePolicy::Skip =>
				{
					tracing::warn!(
						field = %field.name,
						declared_type = %field.declared_type,
						"Skipping field: {}",
						err
					);
					form.skipped.push(SkippedField {
						name: field.name.clone(),
						declared_type: field.declared_type.clone(),
						reason: err.to_string(),
					});
				}
				Err(err) => return Err(err),
			}
		}

		tracing::debug!(
			controls = form.controls.len(),
			skipped = form.skipped.len(),
			"Layer form built"
		);
		Ok(form)
	}
}
