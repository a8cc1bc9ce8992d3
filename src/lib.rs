//! # Geoform
//!
//! Web form definitions for QGIS layers.
//!
//! Geoform reads the edit widgets configured on the fields of a QGIS layer
//! and turns them into form control definitions: markup, choices, bounds,
//! upload constraints, required and read-only flags. Values held in other
//! layers are not queried; the controls carry a record of what to fetch.
//!
//! ## Feature Flags
//!
//! - `widgets` (default) - Field to form control mapping
//!
//! ## Quick Example
//!
//! ```rust
//! # #[cfg(feature = "widgets")]
//! # {
//! use geoform::prelude::*;
//!
//! let fields = [
//!     LayerField::new(FieldDescriptor::new("id", "int4").with_not_null(true)),
//!     LayerField::new(FieldDescriptor::new("kind", "varchar")).with_edit_widget(
//!         EditWidget::widget_v2("ValueMap")
//!             .with_value_pair("Tree", "t")
//!             .with_value_pair("Bush", "b"),
//!     ),
//!     LayerField::new(FieldDescriptor::new("geom", "point")),
//! ];
//!
//! let form = LayerFormMapper::new().map_layer(&fields, &[]).unwrap();
//!
//! assert_eq!(form.control("id").unwrap().markup(), Markup::Input);
//! assert_eq!(form.control("kind").unwrap().markup(), Markup::Menulist);
//! assert_eq!(form.control("geom").unwrap().markup(), Markup::Hidden);
//! # }
//! ```

#[cfg(feature = "widgets")]
pub mod widgets;

#[cfg(feature = "widgets")]
pub use geoform_widgets::{
	ControlDefinition, EditWidget, FieldDescriptor, FieldWidgetMapper, LayerField, LayerForm,
	LayerFormMapper, MapperSettings, MappingError, MappingResult,
};

/// Commonly used types
pub mod prelude {
	#[cfg(feature = "widgets")]
	pub use geoform_widgets::{
		Attributes, Control, ControlDefinition, Datasource, Datatype, DeferredLookup, EditWidget,
		FieldDataType, FieldDescriptor, FieldWidgetMapper, LayerField, LayerForm, LayerFormMapper,
		MapperSettings, MappingError, MappingResult, Markup, RendererCategory,
		UnsupportedTypePolicy, WidgetKey, WidgetKind,
	};
}
