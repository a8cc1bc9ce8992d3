//! Edit widget mapping module.
//!
//! This module provides access to the field to form control mapper, the
//! widget catalog and the control definitions it produces.
//!
//! # Examples
//!
//! ```rust,no_run
//! # #[cfg(feature = "widgets")]
//! use geoform::widgets::catalog::{WidgetKey, WidgetKind};
//! # #[cfg(feature = "widgets")]
//! use geoform::widgets::datasource::range_datasource;
//! ```

#[cfg(feature = "widgets")]
pub use geoform_widgets::*;
