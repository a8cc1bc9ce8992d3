//! Catalog of QGIS edit widget kinds and the form markup they map to
//!
//! Legacy type codes and widgetv2 names both resolve to a [`WidgetKind`].
//! The catalog itself is a `match` over that enum and never changes at run
//! time. Kinds with several candidate markups are settled by
//! [`WidgetKind::select_markup`], which reads the flag that decides between
//! them.

use crate::edit_widget::EditWidget;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;

static HOUR_TOKEN: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"(?i)HH").expect("HOUR_TOKEN: invalid regex pattern"));

static YEAR_TOKEN: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"(?i)YY").expect("YEAR_TOKEN: invalid regex pattern"));

/// Identifier of a widget as found in the project file
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WidgetKey {
	/// Legacy `type` code
	Code(i32),
	/// `widgetv2type` name
	Name(String),
}

impl WidgetKey {
	/// Plain single line input, used when a field has no edit widget
	pub const LINE_EDIT: WidgetKey = WidgetKey::Code(0);

	/// # Examples
	///
	/// ```
	/// use geoform_widgets::{RangeStyle, WidgetKey, WidgetKind};
	///
	/// assert_eq!(WidgetKey::Code(5).kind(), WidgetKind::Range(RangeStyle::Legacy));
	/// assert_eq!(
	///     WidgetKey::Name("DialRange".to_string()).kind(),
	///     WidgetKind::Range(RangeStyle::DialRange)
	/// );
	/// assert_eq!(WidgetKey::Code(42).kind(), WidgetKind::Unknown);
	/// ```
	pub fn kind(&self) -> WidgetKind {
		match self {
			Self::Code(code) => WidgetKind::from_code(*code),
			Self::Name(name) => WidgetKind::from_name(name),
		}
	}
}

impl fmt::Display for WidgetKey {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Code(code) => write!(f, "{code}"),
			Self::Name(name) => f.write_str(name),
		}
	}
}

/// How a range widget is presented in QGIS
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RangeStyle {
	/// Legacy code 5
	Legacy,
	/// `Range` and `EditRange`: a spin box
	Edit,
	SliderRange,
	DialRange,
}

/// Edit widget kinds known to the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WidgetKind {
	LineEdit,
	UniqueValues,
	UniqueValuesEditable,
	ValueMap,
	Classification,
	Range(RangeStyle),
	CheckBox,
	FileName,
	Photo,
	Enumeration,
	Immutable,
	Hidden,
	TextEdit,
	Calendar,
	DateTime,
	ValueRelation,
	UuidGenerator,
	WebView,
	Color,
	ExternalResource,
	RelationReference,
	/// Anything else; rendered as a plain input
	Unknown,
}

/// Abstract form control kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Markup {
	Input,
	Menulist,
	Checkboxes,
	Hidden,
	Checkbox,
	Textarea,
	#[serde(rename = "htmleditor")]
	HtmlEditor,
	Date,
	#[serde(rename = "datetime")]
	DateTime,
	Time,
	Upload,
}

impl Markup {
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Input => "input",
			Self::Menulist => "menulist",
			Self::Checkboxes => "checkboxes",
			Self::Hidden => "hidden",
			Self::Checkbox => "checkbox",
			Self::Textarea => "textarea",
			Self::HtmlEditor => "htmleditor",
			Self::Date => "date",
			Self::DateTime => "datetime",
			Self::Time => "time",
			Self::Upload => "upload",
		}
	}
}

impl fmt::Display for Markup {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Markup of a catalog entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkupChoice {
	Single(Markup),
	/// Candidates, in the order QGIS lists them; see [`WidgetKind::select_markup`]
	OneOf(&'static [Markup]),
}

impl MarkupChoice {
	pub fn contains(self, markup: Markup) -> bool {
		match self {
			Self::Single(single) => single == markup,
			Self::OneOf(candidates) => candidates.contains(&markup),
		}
	}
}

/// What the catalog knows about a widget kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogEntry {
	/// Display name, used in logs
	pub name: &'static str,
	pub markup: MarkupChoice,
	pub readonly: bool,
}

impl CatalogEntry {
	const fn new(name: &'static str, markup: MarkupChoice) -> Self {
		Self {
			name,
			markup,
			readonly: false,
		}
	}

	const fn readonly(self) -> Self {
		Self {
			readonly: true,
			..self
		}
	}
}

const LINE_EDIT: CatalogEntry = CatalogEntry::new("Line edit", MarkupChoice::Single(Markup::Input));
const UNIQUE_VALUES: CatalogEntry = CatalogEntry::new(
	"Unique values",
	MarkupChoice::Single(Markup::Menulist),
);
const VALUE_MAP: CatalogEntry = CatalogEntry::new(
	"Value map",
	MarkupChoice::Single(Markup::Menulist),
);
const CLASSIFICATION: CatalogEntry = CatalogEntry::new(
	"Classification",
	MarkupChoice::Single(Markup::Menulist),
);
const RANGE: CatalogEntry = CatalogEntry::new(
	"Range",
	MarkupChoice::OneOf(&[Markup::Input, Markup::Menulist]),
);
const CHECKBOX: CatalogEntry = CatalogEntry::new(
	"Checkbox",
	MarkupChoice::Single(Markup::Checkbox),
);
const FILE_NAME: CatalogEntry = CatalogEntry::new(
	"File name",
	MarkupChoice::Single(Markup::Upload),
);
const ENUMERATION: CatalogEntry = CatalogEntry::new(
	"Enumeration",
	MarkupChoice::Single(Markup::Menulist),
);
const IMMUTABLE: CatalogEntry =
	CatalogEntry::new("Immutable", MarkupChoice::Single(Markup::Input)).readonly();
const HIDDEN: CatalogEntry = CatalogEntry::new("Hidden", MarkupChoice::Single(Markup::Hidden));
const TEXT_EDIT: CatalogEntry = CatalogEntry::new(
	"Text edit",
	MarkupChoice::OneOf(&[Markup::Textarea, Markup::HtmlEditor]),
);
const CALENDAR: CatalogEntry = CatalogEntry::new("Calendar", MarkupChoice::Single(Markup::Date));
const DATE_TIME: CatalogEntry = CatalogEntry::new(
	"Date/Time",
	MarkupChoice::OneOf(&[Markup::Date, Markup::DateTime, Markup::Time]),
);
const VALUE_RELATION: CatalogEntry = CatalogEntry::new(
	"Value relation",
	MarkupChoice::OneOf(&[Markup::Menulist, Markup::Checkboxes]),
);
const UUID_GENERATOR: CatalogEntry = CatalogEntry::new(
	"UUID generator",
	MarkupChoice::Single(Markup::Input),
)
.readonly();
const EXTERNAL_RESOURCE: CatalogEntry = CatalogEntry::new(
	"External Resource",
	MarkupChoice::Single(Markup::Upload),
);
const RELATION_REFERENCE: CatalogEntry = CatalogEntry::new(
	"Relation reference",
	MarkupChoice::Single(Markup::Menulist),
);

impl WidgetKind {
	/// Resolve a legacy `type` code
	pub fn from_code(code: i32) -> Self {
		match code {
			0 => Self::LineEdit,
			2 => Self::UniqueValues,
			3 => Self::ValueMap,
			4 => Self::Classification,
			5 => Self::Range(RangeStyle::Legacy),
			7 => Self::CheckBox,
			8 => Self::FileName,
			-1 => Self::Enumeration,
			10 => Self::Immutable,
			11 => Self::Hidden,
			12 => Self::TextEdit,
			13 => Self::Calendar,
			15 => Self::ValueRelation,
			16 => Self::UuidGenerator,
			17 => Self::ExternalResource,
			18 => Self::RelationReference,
			_ => Self::Unknown,
		}
	}

	/// Resolve a `widgetv2type` name
	pub fn from_name(name: &str) -> Self {
		match name {
			"LineEdit" => Self::LineEdit,
			"UniqueValues" => Self::UniqueValues,
			"UniqueValuesEditable" => Self::UniqueValuesEditable,
			"ValueMap" => Self::ValueMap,
			"Classification" => Self::Classification,
			"Range" | "EditRange" => Self::Range(RangeStyle::Edit),
			"SliderRange" => Self::Range(RangeStyle::SliderRange),
			"DialRange" => Self::Range(RangeStyle::DialRange),
			"CheckBox" => Self::CheckBox,
			"FileName" => Self::FileName,
			"Photo" => Self::Photo,
			"Enumeration" => Self::Enumeration,
			"Immutable" => Self::Immutable,
			"Hidden" => Self::Hidden,
			"TextEdit" => Self::TextEdit,
			"Calendar" => Self::Calendar,
			"DateTime" => Self::DateTime,
			"ValueRelation" => Self::ValueRelation,
			"UuidGenerator" => Self::UuidGenerator,
			"WebView" => Self::WebView,
			"Color" => Self::Color,
			"ExternalResource" => Self::ExternalResource,
			"RelationReference" => Self::RelationReference,
			_ => Self::Unknown,
		}
	}

	/// Catalog entry for this kind
	///
	/// # Examples
	///
	/// ```
	/// use geoform_widgets::{Markup, MarkupChoice, WidgetKind};
	///
	/// let entry = WidgetKind::UuidGenerator.catalog_entry();
	/// assert!(entry.readonly);
	/// assert_eq!(entry.markup, MarkupChoice::Single(Markup::Input));
	/// ```
	pub fn catalog_entry(self) -> CatalogEntry {
		match self {
			Self::LineEdit | Self::WebView | Self::Color | Self::Unknown => LINE_EDIT,
			Self::UniqueValues | Self::UniqueValuesEditable => UNIQUE_VALUES,
			Self::ValueMap => VALUE_MAP,
			Self::Classification => CLASSIFICATION,
			Self::Range(_) => RANGE,
			Self::CheckBox => CHECKBOX,
			Self::FileName | Self::Photo => FILE_NAME,
			Self::Enumeration => ENUMERATION,
			Self::Immutable => IMMUTABLE,
			Self::Hidden => HIDDEN,
			Self::TextEdit => TEXT_EDIT,
			Self::Calendar => CALENDAR,
			Self::DateTime => DATE_TIME,
			Self::ValueRelation => VALUE_RELATION,
			Self::UuidGenerator => UUID_GENERATOR,
			Self::ExternalResource => EXTERNAL_RESOURCE,
			Self::RelationReference => RELATION_REFERENCE,
		}
	}

	/// Pick the markup for this kind, reading the widget options that decide
	/// between ambiguous candidates
	///
	/// # Examples
	///
	/// ```
	/// use geoform_widgets::{EditWidget, Markup, WidgetKind};
	///
	/// let widget = EditWidget::widget_v2("TextEdit").with_config_attribute("UseHtml", "1");
	/// assert_eq!(WidgetKind::TextEdit.select_markup(Some(&widget)), Markup::HtmlEditor);
	/// assert_eq!(WidgetKind::LineEdit.select_markup(None), Markup::Input);
	/// ```
	pub fn select_markup(self, widget: Option<&EditWidget>) -> Markup {
		let option = |legacy: &str, v2: &str| widget.map_or("", |w| w.option(legacy, v2));

		let markup = match self.catalog_entry().markup {
			MarkupChoice::Single(markup) => markup,
			MarkupChoice::OneOf(_) => match self {
				Self::TextEdit => text_edit_markup(option("UseHtml", "UseHtml")),
				Self::Range(style) => range_markup(style),
				Self::ValueRelation => value_relation_markup(option("allowMulti", "AllowMulti")),
				Self::DateTime => date_time_markup(option("display_format", "display_format")),
				_ => Markup::Input,
			},
		};
		debug_assert!(self.catalog_entry().markup.contains(markup));
		markup
	}

	/// Kinds whose choices are looked up later by the caller instead of being
	/// listed in the datasource
	pub fn is_deferred(self) -> bool {
		matches!(
			self,
			Self::UniqueValues
				| Self::UniqueValuesEditable
				| Self::ValueRelation
				| Self::RelationReference
		)
	}
}

fn is_set(flag: &str) -> bool {
	crate::numeric::parse_integer(flag) != 0
}

fn text_edit_markup(use_html: &str) -> Markup {
	if is_set(use_html) {
		Markup::HtmlEditor
	} else {
		Markup::Textarea
	}
}

fn range_markup(style: RangeStyle) -> Markup {
	match style {
		RangeStyle::Legacy | RangeStyle::Edit => Markup::Input,
		RangeStyle::SliderRange | RangeStyle::DialRange => Markup::Menulist,
	}
}

fn value_relation_markup(allow_multi: &str) -> Markup {
	if is_set(allow_multi) {
		Markup::Checkboxes
	} else {
		Markup::Menulist
	}
}

fn date_time_markup(display_format: &str) -> Markup {
	match (
		HOUR_TOKEN.is_match(display_format),
		YEAR_TOKEN.is_match(display_format),
	) {
		(true, false) => Markup::Time,
		(true, true) => Markup::DateTime,
		(false, _) => Markup::Date,
	}
}
