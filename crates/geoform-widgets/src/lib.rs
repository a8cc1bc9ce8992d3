//! QGIS edit widget to web form control mapping
//!
//! This crate turns the attribute fields of a QGIS layer into form control
//! definitions a web client can render:
//! - Declared type resolution through a fixed cast table
//! - Legacy (`edittype` code) and widgetv2 edit widget descriptors
//! - Markup selection for every catalogued widget kind
//! - Datasources for value maps, classifications and ranges
//! - Upload constraints for photo and external resource widgets
//! - Deferred lookup records for values held in other layers
//! - Whole-layer form building with a configurable unsupported type policy
//!
//! ## Example
//!
//! ```
//! use geoform_widgets::{EditWidget, FieldDescriptor, FieldWidgetMapper, Markup};
//!
//! let mapper = FieldWidgetMapper::new();
//! let widget = EditWidget::legacy(7)
//!     .with_attribute("checked", "t")
//!     .with_attribute("unchecked", "f");
//! let field = FieldDescriptor::new("visited", "bool").with_not_null(true);
//!
//! let control = mapper.construct("visited", Some(&widget), None, &[], &field).unwrap();
//! assert_eq!(control.markup(), Markup::Checkbox);
//! assert!(!control.required);
//! ```

pub mod catalog;
pub mod control;
pub mod datasource;
pub mod edit_widget;
pub mod error;
pub mod field;
pub mod layer_form;
pub mod lookup;
pub mod mapper;
pub mod numeric;
pub mod settings;
pub mod upload;

pub use catalog::{CatalogEntry, Markup, MarkupChoice, RangeStyle, WidgetKey, WidgetKind};
pub use control::{Control, ControlDefinition, Datatype};
pub use datasource::{Choice, Datasource};
pub use edit_widget::{Attributes, EditWidget, FilterFields, RendererCategory, ValuePair, WidgetConfig};
pub use error::{MappingError, MappingResult};
pub use field::{FieldDataType, FieldDescriptor};
pub use layer_form::{LayerField, LayerForm, LayerFormMapper, SkippedField};
pub use lookup::{DeferredLookup, RelationReferenceData, UniqueValuesData, ValueRelationData};
pub use mapper::FieldWidgetMapper;
pub use numeric::NumericValue;
pub use settings::{MapperSettings, UnsupportedTypePolicy};
pub use upload::{CaptureMode, UploadAction, UploadChoice, UploadConstraints};
