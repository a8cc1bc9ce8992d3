//! Mapper settings
//!
//! Settings can be built in code or loaded from a JSON document; every key is
//! optional and falls back to the default below.

use crate::error::MappingResult;
use crate::upload::PHOTO_MIME_TYPES;
use serde::{Deserialize, Serialize};

/// Label of the single entry an enumeration control is given
pub const DEFAULT_ENUMERATION_PLACEHOLDER: &str = "--qgis edit type not supported yet--";

/// What [`LayerFormMapper`](crate::LayerFormMapper) does with a field whose
/// declared type is not in the cast table
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnsupportedTypePolicy {
	/// Fail the whole form
	#[default]
	Abort,
	/// Leave the field out and report it
	Skip,
}

/// Settings shared by every control built by a mapper
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapperSettings {
	/// Mime types accepted by photo widgets and by document viewers without
	/// a file filter
	#[serde(default = "default_photo_mime_types")]
	pub photo_mime_types: Vec<String>,

	/// Label of the enumeration placeholder entry
	#[serde(default = "default_enumeration_placeholder")]
	pub enumeration_placeholder: String,

	/// Insert a blank entry at the top of required lists
	#[serde(default = "default_true")]
	pub blank_choice_for_required: bool,

	#[serde(default)]
	pub unsupported_type_policy: UnsupportedTypePolicy,
}

impl Default for MapperSettings {
	fn default() -> Self {
		Self {
			photo_mime_types: default_photo_mime_types(),
			enumeration_placeholder: default_enumeration_placeholder(),
			blank_choice_for_required: true,
			unsupported_type_policy: UnsupportedTypePolicy::default(),
		}
	}
}

impl MapperSettings {
	pub fn new() -> Self {
		Self::default()
	}

	/// Load settings from a JSON document
	///
	/// # Examples
	///
	/// ```
	/// use geoform_widgets::{MapperSettings, UnsupportedTypePolicy};
	///
	/// let settings = MapperSettings::from_json(r#"{"unsupported_type_policy": "skip"}"#).unwrap();
	/// assert_eq!(settings.unsupported_type_policy, UnsupportedTypePolicy::Skip);
	/// assert!(settings.blank_choice_for_required);
	///
	/// assert!(MapperSettings::from_json("not json").is_err());
	/// ```
	pub fn from_json(json: &str) -> MappingResult<Self> {
		let settings = serde_json::from_str(json)?;
		Ok(settings)
	}

	pub fn with_photo_mime_types<I, S>(mut self, mime_types: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.photo_mime_types = mime_types.into_iter().map(Into::into).collect();
		self
	}

	pub fn with_enumeration_placeholder(mut self, placeholder: impl Into<String>) -> Self {
		self.enumeration_placeholder = placeholder.into();
		self
	}

	pub fn with_blank_choice_for_required(mut self, enabled: bool) -> Self {
		self.blank_choice_for_required = enabled;
		self
	}

	pub fn with_unsupported_type_policy(mut self, policy: UnsupportedTypePolicy) -> Self {
		self.unsupported_type_policy = policy;
		self
	}
}

fn default_photo_mime_types() -> Vec<String> {
	PHOTO_MIME_TYPES.iter().map(|mime| mime.to_string()).collect()
}

fn default_enumeration_placeholder() -> String {
	DEFAULT_ENUMERATION_PLACEHOLDER.to_string()
}

fn default_true() -> bool {
	true
}
