//! Fluent builder for web application manifests.
//!
//! A [`Manifest`] collects members through chained setters, owns its
//! [`Icon`] and [`RelatedApplication`] entries, and renders to JSON whose key
//! order follows the order in which members were first set. Only `display`,
//! `orientation` and `dir` are validated; everything else is trusted as given.

pub mod encode;
pub mod icon;
pub mod manifest;
pub mod related;
pub mod types;

pub use encode::JsonStyle;
pub use icon::{Icon, SizeToken, Sizes};
pub use manifest::{FieldValue, Manifest, ManifestError};
pub use related::RelatedApplication;
pub use types::{DisplayMode, Orientation, TextDirection};
