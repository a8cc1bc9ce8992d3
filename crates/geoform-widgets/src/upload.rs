//! Upload controls for file name, photo and external resource widgets
//!
//! An upload field is wrapped in a choice control so an existing file can be
//! kept, replaced or deleted when a feature is edited.

use crate::edit_widget::Attributes;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// Image types accepted from a camera or an image-only picker
pub const PHOTO_MIME_TYPES: [&str; 5] = [
	"image/jpg",
	"image/jpeg",
	"image/pjpeg",
	"image/png",
	"image/gif",
];

// `*.ext` tokens of a QFileDialog name filter
static FILTER_EXTENSION: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r"\*(\.\w{3,6})").expect("FILTER_EXTENSION: invalid regex pattern")
});

// Roots under the project media directory that the web client may browse
static MEDIA_ROOT: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r"^(?:\.\./)?media/?").expect("MEDIA_ROOT: invalid regex pattern")
});

/// Split a `QFileDialog` filter such as `"Images (*.png *.jpg);;Docs (*.pdf)"`
/// into distinct extensions, dot included, in order of first appearance
///
/// # Examples
///
/// ```
/// use geoform_widgets::upload::parse_file_filter;
///
/// assert_eq!(
///     parse_file_filter("Images (*.png *.jpg);;All images (*.png *.gif)"),
///     [".png", ".jpg", ".gif"]
/// );
/// assert!(parse_file_filter("All files (*)").is_empty());
/// ```
pub fn parse_file_filter(filter: &str) -> Vec<String> {
	let mut extensions: Vec<String> = Vec::new();
	for group in filter.split(";;") {
		for capture in FILTER_EXTENSION.captures_iter(group) {
			let extension = &capture[1];
			if !extensions.iter().any(|known| known == extension) {
				extensions.push(extension.to_string());
			}
		}
	}
	extensions
}

fn extension_mime_types(extension: &str) -> &'static [&'static str] {
	match extension.to_ascii_lowercase().as_str() {
		".gif" => &["image/gif"],
		".png" => &["image/png"],
		".jpg" | ".jpeg" => &["image/jpg", "image/jpeg", "image/pjpeg"],
		".bm" | ".bmp" => &["image/bmp", "image/x-windows-bmp"],
		".pbm" => &["image/x-portable-bitmap"],
		".pgm" => &["image/x-portable-graymap", "image/x-portable-greymap"],
		".ppm" => &["image/x-portable-pixmap"],
		".xbm" => &["image/xbm", "image/x-xbm", "image/x-xbitmap"],
		".xpm" => &["image/xpm", "image/x-xpixmap"],
		".svg" => &["image/svg+xml"],
		_ => &[],
	}
}

/// Image mime types the document viewer can display for `extensions`;
/// extensions it cannot display are dropped
///
/// # Examples
///
/// ```
/// use geoform_widgets::upload::mime_types_for_extensions;
///
/// let extensions = [".jpeg".to_string(), ".pdf".to_string(), ".jpg".to_string()];
/// assert_eq!(
///     mime_types_for_extensions(&extensions),
///     ["image/jpg", "image/jpeg", "image/pjpeg"]
/// );
/// ```
pub fn mime_types_for_extensions(extensions: &[String]) -> Vec<String> {
	let mut mime_types: Vec<String> = Vec::new();
	for mime_type in extensions
		.iter()
		.flat_map(|extension| extension_mime_types(extension))
	{
		if !mime_types.iter().any(|known| known == mime_type) {
			mime_types.push((*mime_type).to_string());
		}
	}
	mime_types
}

/// Normalized `DefaultRoot`: kept, with a trailing slash, only when it points
/// into the project media directory
///
/// # Examples
///
/// ```
/// use geoform_widgets::upload::media_default_root;
///
/// assert_eq!(media_default_root("media/photos"), "media/photos/");
/// assert_eq!(media_default_root("../media"), "../media/");
/// assert_eq!(media_default_root("/var/www/data"), "");
/// ```
pub fn media_default_root(default_root: &str) -> String {
	if !MEDIA_ROOT.is_match(default_root) {
		return String::new();
	}
	if default_root.ends_with('/') {
		default_root.to_string()
	} else {
		format!("{default_root}/")
	}
}

/// Capture hint for mobile browsers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CaptureMode {
	Camera,
}

/// Restrictions placed on the uploaded file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadConstraints {
	/// Tokens for the HTML `accept` attribute: extensions or mime types
	pub accept: Vec<String>,
	pub mime_types: Vec<String>,
	pub capture: Option<CaptureMode>,
	/// Directory, relative to the project, files are stored in
	pub default_root: String,
}

impl UploadConstraints {
	/// Image-only upload taken from the camera when available
	///
	/// # Examples
	///
	/// ```
	/// use geoform_widgets::upload::{CaptureMode, PHOTO_MIME_TYPES, UploadConstraints};
	///
	/// let photo = UploadConstraints::photo(&PHOTO_MIME_TYPES.map(String::from));
	/// assert_eq!(photo.capture, Some(CaptureMode::Camera));
	/// assert_eq!(
	///     photo.accept_attribute(),
	///     "image/jpg, image/jpeg, image/pjpeg, image/png, image/gif"
	/// );
	/// ```
	pub fn photo(photo_mime_types: &[String]) -> Self {
		Self {
			accept: photo_mime_types.to_vec(),
			mime_types: photo_mime_types.to_vec(),
			capture: Some(CaptureMode::Camera),
			default_root: String::new(),
		}
	}

	/// Constraints of an external resource widget, read from its
	/// `FileWidgetFilter`, `DocumentViewer` and `DefaultRoot` options
	///
	/// # Examples
	///
	/// ```
	/// use geoform_widgets::Attributes;
	/// use geoform_widgets::upload::{PHOTO_MIME_TYPES, UploadConstraints};
	///
	/// let options = Attributes::new()
	///     .with("FileWidgetFilter", "Docs (*.pdf *.odt)")
	///     .with("DefaultRoot", "media/docs");
	/// let upload =
	///     UploadConstraints::external_resource(&options, &PHOTO_MIME_TYPES.map(String::from));
	///
	/// assert_eq!(upload.accept_attribute(), ".pdf, .odt");
	/// assert!(upload.mime_types.is_empty());
	/// assert_eq!(upload.default_root, "media/docs/");
	/// ```
	pub fn external_resource(options: &Attributes, photo_mime_types: &[String]) -> Self {
		let mut upload = Self {
			accept: parse_file_filter(options.string("FileWidgetFilter")),
			..Self::default()
		};

		if options.get("DocumentViewer") == Some("1") {
			if upload.accept.is_empty() {
				upload.accept = photo_mime_types.to_vec();
				upload.mime_types = photo_mime_types.to_vec();
			} else {
				upload.mime_types = mime_types_for_extensions(&upload.accept);
			}
			upload.capture = Some(CaptureMode::Camera);
		}

		upload.default_root = media_default_root(options.string("DefaultRoot"));
		upload
	}

	/// Value of the HTML `accept` attribute
	pub fn accept_attribute(&self) -> String {
		self.accept.join(", ")
	}
}

/// Items of the choice wrapping an upload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UploadAction {
	Keep,
	/// Carries the upload control
	Update,
	Delete,
}

impl UploadAction {
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Keep => "keep",
			Self::Update => "update",
			Self::Delete => "delete",
		}
	}
}

/// Choice control `<field>_choice` wrapping the upload of `<field>`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadChoice {
	pub name: String,
	pub actions: Vec<UploadAction>,
	pub default_action: UploadAction,
	pub upload: UploadConstraints,
}

impl UploadChoice {
	/// # Examples
	///
	/// ```
	/// use geoform_widgets::upload::{UploadAction, UploadChoice, UploadConstraints};
	///
	/// let choice = UploadChoice::new("picture", UploadConstraints::default());
	/// assert_eq!(choice.name, "picture_choice");
	/// assert_eq!(choice.default_action, UploadAction::Keep);
	/// ```
	pub fn new(field_ref: &str, upload: UploadConstraints) -> Self {
		Self {
			name: format!("{field_ref}_choice"),
			actions: vec![UploadAction::Keep, UploadAction::Update, UploadAction::Delete],
			default_action: UploadAction::Keep,
			upload,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	fn photo_types() -> Vec<String> {
		PHOTO_MIME_TYPES.map(String::from).to_vec()
	}

	#[rstest]
	#[case("Images (*.png *.jpg);;Docs (*.pdf)", &[".png", ".jpg", ".pdf"])]
	#[case("*.jpeg", &[".jpeg"])]
	#[case("Short (*.c *.h)", &[])]
	#[case("", &[])]
	#[case("Archives (*.tar.gz)", &[".tar"])]
	fn test_parse_file_filter(#[case] filter: &str, #[case] expected: &[&str]) {
		assert_eq!(parse_file_filter(filter), expected);
	}

	#[rstest]
	fn test_mime_types_drop_unknown_extensions() {
		let extensions = parse_file_filter("Images (*.png *.jpg);;Docs (*.pdf)");
		let mime_types = mime_types_for_extensions(&extensions);

		assert_eq!(
			mime_types,
			["image/png", "image/jpg", "image/jpeg", "image/pjpeg"]
		);
		assert!(!mime_types.iter().any(|m| m.contains("pdf")));
	}

	#[rstest]
	#[case(".BMP", &["image/bmp", "image/x-windows-bmp"])]
	#[case(".pgm", &["image/x-portable-graymap", "image/x-portable-greymap"])]
	#[case(".svg", &["image/svg+xml"])]
	#[case(".tiff", &[])]
	fn test_extension_mime_types(#[case] extension: &str, #[case] expected: &[&str]) {
		assert_eq!(extension_mime_types(extension), expected);
	}

	#[rstest]
	#[case("media", "media/")]
	#[case("media/", "media/")]
	#[case("media/photos", "media/photos/")]
	#[case("../media/docs", "../media/docs/")]
	#[case("mediafiles", "mediafiles/")]
	#[case("/srv/media", "")]
	#[case("../../media", "")]
	#[case("", "")]
	fn test_media_default_root(#[case] raw: &str, #[case] expected: &str) {
		assert_eq!(media_default_root(raw), expected);
	}

	#[rstest]
	fn test_external_resource_document_viewer() {
		let options = Attributes::new()
			.with("FileWidgetFilter", "Images (*.png *.jpg);;Docs (*.pdf)")
			.with("DocumentViewer", "1");
		let upload = UploadConstraints::external_resource(&options, &photo_types());

		assert_eq!(upload.accept, [".png", ".jpg", ".pdf"]);
		assert_eq!(
			upload.mime_types,
			["image/png", "image/jpg", "image/jpeg", "image/pjpeg"]
		);
		assert_eq!(upload.capture, Some(CaptureMode::Camera));
		assert_eq!(upload.default_root, "");
	}

	#[rstest]
	fn test_external_resource_document_viewer_without_filter() {
		let options = Attributes::new().with("DocumentViewer", "1");
		let upload = UploadConstraints::external_resource(&options, &photo_types());

		assert_eq!(upload.accept, photo_types());
		assert_eq!(upload.mime_types, photo_types());
		assert_eq!(upload.capture, Some(CaptureMode::Camera));
	}

	#[rstest]
	fn test_external_resource_without_viewer() {
		let options = Attributes::new().with("DocumentViewer", "0");
		let upload = UploadConstraints::external_resource(&options, &photo_types());

		assert!(upload.accept.is_empty());
		assert!(upload.mime_types.is_empty());
		assert_eq!(upload.capture, None);
	}

	#[rstest]
	fn test_upload_choice_actions() {
		let choice = UploadChoice::new("doc", UploadConstraints::default());

		assert_eq!(
			choice
				.actions
				.iter()
				.map(|action| action.as_str())
				.collect::<Vec<_>>(),
			["keep", "update", "delete"]
		);
	}
}
