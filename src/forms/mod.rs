//! # Typed Form Bundles
//!
//! Statically-typed request structures for the composite editors, replacing
//! the string-prefixed dynamic field sets of classic admin forms. Each
//! repeating group is an ordered list of row records carrying an explicit
//! deletion flag; validation is all-or-nothing and reports errors per field
//! per sub-form.

use std::collections::BTreeMap;

use serde::Serialize;

pub mod house;
pub mod user;

pub use house::{
    BundleErrors, FloorRow, HouseBundle, HouseBundlePayload, HouseFields, ImageUpload,
    MAX_GALLERY_IMAGES, SectionRow, StaffRow, validate_bundle,
};
pub use user::{UserCreateForm, UserUpdateForm, ValidatedUserCreate, ValidatedUserUpdate};

/// Field name → error messages for one sub-form.
pub type FieldErrors = BTreeMap<String, Vec<String>>;

/// Errors attached to one row of a repeating group, keyed by its submitted
/// position so the client can highlight the offending row.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RowErrors {
    pub index: usize,
    pub errors: FieldErrors,
}

pub(crate) fn push_error(errors: &mut FieldErrors, field: &str, message: impl Into<String>) {
    errors.entry(field.to_string()).or_default().push(message.into());
}
