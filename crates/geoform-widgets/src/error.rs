//! Errors raised while mapping QGIS fields onto form controls

/// Errors returned by [`FieldWidgetMapper`](crate::FieldWidgetMapper) and
/// [`LayerFormMapper`](crate::LayerFormMapper).
///
/// Missing widget attributes are never reported here: they fall back to an
/// empty string or zero so that old project files keep producing the same
/// forms.
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum MappingError {
	#[error("Unsupported data type '{declared_type}' for field {field}")]
	UnsupportedType {
		field: String,
		declared_type: String,
	},
	#[error("Invalid mapper settings: {0}")]
	InvalidSettings(#[from] serde_json::Error),
}

impl MappingError {
	/// Create an `UnsupportedType` error
	///
	/// # Examples
	///
	/// ```
	/// use geoform_widgets::MappingError;
	///
	/// let err = MappingError::unsupported_type("geom", "raster");
	/// assert_eq!(
	///     err.to_string(),
	///     "Unsupported data type 'raster' for field geom"
	/// );
	/// ```
	pub fn unsupported_type(field: impl Into<String>, declared_type: impl Into<String>) -> Self {
		Self::UnsupportedType {
			field: field.into(),
			declared_type: declared_type.into(),
		}
	}
}

pub type MappingResult<T> = Result<T, MappingError>;

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_unsupported_type_fields() {
		let err = MappingError::unsupported_type("area", "hstore");

		assert!(matches!(
			&err,
			MappingError::UnsupportedType { field, declared_type }
				if field == "area" && declared_type == "hstore"
		));
	}

	#[rstest]
	fn test_invalid_settings_from_json_error() {
		let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
		let err: MappingError = json_err.into();

		assert!(err.to_string().starts_with("Invalid mapper settings:"));
	}
}
