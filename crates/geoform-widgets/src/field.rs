//! Layer field descriptors and the declared-type cast table

use crate::error::{MappingError, MappingResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Normalized category of a layer field's declared type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldDataType {
	Integer,
	Float,
	Text,
	Blob,
	Geometry,
	Boolean,
	Date,
	#[serde(rename = "datetime")]
	DateTime,
	Time,
}

// Declared types reported by the data providers, lower-cased.
const CAST_DATA_TYPES: &[(&str, FieldDataType)] = &[
	("float", FieldDataType::Float),
	("real", FieldDataType::Float),
	("double", FieldDataType::Float),
	("double decimal", FieldDataType::Float),
	("numeric", FieldDataType::Float),
	("int", FieldDataType::Integer),
	("integer", FieldDataType::Integer),
	("int4", FieldDataType::Integer),
	("int8", FieldDataType::Integer),
	("bigint", FieldDataType::Integer),
	("smallint", FieldDataType::Integer),
	("text", FieldDataType::Text),
	("string", FieldDataType::Text),
	("varchar", FieldDataType::Text),
	("bpchar", FieldDataType::Text),
	("char", FieldDataType::Text),
	("blob", FieldDataType::Blob),
	("bytea", FieldDataType::Blob),
	("geometry", FieldDataType::Geometry),
	("geometrycollection", FieldDataType::Geometry),
	("point", FieldDataType::Geometry),
	("multipoint", FieldDataType::Geometry),
	("line", FieldDataType::Geometry),
	("linestring", FieldDataType::Geometry),
	("multilinestring", FieldDataType::Geometry),
	("polygon", FieldDataType::Geometry),
	("multipolygon", FieldDataType::Geometry),
	("bool", FieldDataType::Boolean),
	("boolean", FieldDataType::Boolean),
	("date", FieldDataType::Date),
	("datetime", FieldDataType::DateTime),
	("timestamp", FieldDataType::DateTime),
	("time", FieldDataType::Time),
];

impl FieldDataType {
	/// Look up a declared type in the cast table, ignoring case
	///
	/// # Examples
	///
	/// ```
	/// use geoform_widgets::FieldDataType;
	///
	/// assert_eq!(FieldDataType::cast("INT4"), Some(FieldDataType::Integer));
	/// assert_eq!(FieldDataType::cast("timestamp"), Some(FieldDataType::DateTime));
	/// assert_eq!(FieldDataType::cast("hstore"), None);
	/// ```
	pub fn cast(declared_type: &str) -> Option<Self> {
		let declared_type = declared_type.to_lowercase();
		CAST_DATA_TYPES
			.iter()
			.find(|(name, _)| *name == declared_type)
			.map(|(_, data_type)| *data_type)
	}

	/// Every declared type known to the cast table with its category
	pub fn declared_types() -> impl Iterator<Item = (&'static str, FieldDataType)> {
		CAST_DATA_TYPES.iter().copied()
	}

	pub fn is_geometry(self) -> bool {
		self == Self::Geometry
	}

	pub fn as_str(self) -> &'static str {
		match self {
			Self::Integer => "integer",
			Self::Float => "float",
			Self::Text => "text",
			Self::Blob => "blob",
			Self::Geometry => "geometry",
			Self::Boolean => "boolean",
			Self::Date => "date",
			Self::DateTime => "datetime",
			Self::Time => "time",
		}
	}
}

impl fmt::Display for FieldDataType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// A layer field as reported by the schema reflection layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDescriptor {
	pub name: String,
	/// Raw provider type, e.g. `varchar` or `int4`
	#[serde(rename = "type")]
	pub declared_type: String,
	#[serde(default)]
	pub not_null: bool,
	#[serde(default)]
	pub auto_increment: bool,
	#[serde(default)]
	pub alias: Option<String>,
}

impl FieldDescriptor {
	/// Create a nullable, non auto-increment field
	///
	/// # Examples
	///
	/// ```
	/// use geoform_widgets::FieldDescriptor;
	///
	/// let field = FieldDescriptor::new("name", "varchar").with_not_null(true);
	/// assert!(field.is_required());
	/// assert_eq!(field.label(), "name");
	/// ```
	pub fn new(name: impl Into<String>, declared_type: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			declared_type: declared_type.into(),
			not_null: false,
			auto_increment: false,
			alias: None,
		}
	}

	pub fn with_not_null(mut self, not_null: bool) -> Self {
		self.not_null = not_null;
		self
	}

	pub fn with_auto_increment(mut self, auto_increment: bool) -> Self {
		self.auto_increment = auto_increment;
		self
	}

	pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
		self.alias = Some(alias.into());
		self
	}

	/// Resolve the declared type through the cast table
	///
	/// # Examples
	///
	/// ```
	/// use geoform_widgets::{FieldDataType, FieldDescriptor};
	///
	/// let field = FieldDescriptor::new("geom", "MultiPolygon");
	/// assert_eq!(field.data_type().unwrap(), FieldDataType::Geometry);
	///
	/// let field = FieldDescriptor::new("tags", "hstore");
	/// assert!(field.data_type().is_err());
	/// ```
	pub fn data_type(&self) -> MappingResult<FieldDataType> {
		FieldDataType::cast(&self.declared_type)
			.ok_or_else(|| MappingError::unsupported_type(&self.name, &self.declared_type))
	}

	/// Serial columns are filled by the database, so only a plain
	/// `NOT NULL` makes the form control required.
	pub fn is_required(&self) -> bool {
		self.not_null && !self.auto_increment
	}

	/// Alias when one is set, field name otherwise
	pub fn label(&self) -> &str {
		match self.alias.as_deref() {
			Some(alias) if !alias.is_empty() => alias,
			_ => &self.name,
		}
	}
}
