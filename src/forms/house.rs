//! Composite bundle for the house aggregate editor.
//!
//! One submission carries the house scalar fields, up to five gallery
//! uploads, and the section/floor/staff row lists. Validation either
//! materializes the whole bundle (rows flagged for deletion dropped first)
//! or rejects the submission with per-sub-form field errors; the writer
//! never runs on a partially valid bundle.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

use super::{FieldErrors, RowErrors, push_error};
use crate::storage::image_extension;

/// Maximum number of gallery images per house.
pub const MAX_GALLERY_IMAGES: usize = 5;

const MAX_NAME_LEN: usize = 255;

/// Scalar fields of the house itself.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HouseFields {
    pub name: String,
    pub address: String,
}

/// One row of the section list.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SectionRow {
    pub name: String,
    /// Marked rows are dropped before validation and never persisted.
    #[serde(default)]
    pub delete: bool,
}

/// One row of the floor-number list.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct FloorRow {
    pub number: i32,
    #[serde(default)]
    pub delete: bool,
}

/// One row of the staff assignment list.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct StaffRow {
    pub user_id: i32,
    #[serde(default)]
    pub delete: bool,
}

/// The JSON part of a house create/edit submission (files travel as
/// separate multipart parts).
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HouseBundlePayload {
    pub house: HouseFields,
    #[serde(default)]
    pub sections: Vec<SectionRow>,
    #[serde(default)]
    pub floors: Vec<FloorRow>,
    #[serde(default)]
    pub staff: Vec<StaffRow>,
}

/// One uploaded gallery file, captured from its multipart part.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// A fully validated bundle, ready for the aggregate writer. Deleted rows
/// are gone and the remaining rows are materialized as plain values.
#[derive(Debug, Clone)]
pub struct HouseBundle {
    pub name: String,
    pub address: String,
    pub images: Vec<ImageUpload>,
    pub section_names: Vec<String>,
    pub floor_numbers: Vec<i32>,
    pub staff_ids: Vec<i32>,
}

/// Per-sub-form validation failures for one submission.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct BundleErrors {
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub house: FieldErrors,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub images: Vec<RowErrors>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub sections: Vec<RowErrors>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub staff: Vec<RowErrors>,
}

impl BundleErrors {
    pub fn is_empty(&self) -> bool {
        self.house.is_empty()
            && self.images.is_empty()
            && self.sections.is_empty()
            && self.staff.is_empty()
    }

    pub fn to_details(&self) -> serde_json::Value {
        json!(self)
    }
}

/// Validates a submitted payload plus its uploads against the set of known
/// staff user ids. All-or-nothing: any failure rejects the whole bundle.
///
/// No cross-field consistency is enforced between sections and floors; an
/// empty section list with floor numbers (or the reverse) is valid, the
/// cross product is simply empty.
pub fn validate_bundle(
    payload: HouseBundlePayload,
    images: Vec<ImageUpload>,
    known_staff_ids: &BTreeSet<i32>,
) -> Result<HouseBundle, BundleErrors> {
    let mut errors = BundleErrors::default();

    let name = payload.house.name.trim().to_string();
    let address = payload.house.address.trim().to_string();
    if name.is_empty() {
        push_error(&mut errors.house, "name", "Name must not be empty");
    } else if name.len() > MAX_NAME_LEN {
        push_error(&mut errors.house, "name", "Name must not exceed 255 characters");
    }
    if address.is_empty() {
        push_error(&mut errors.house, "address", "Address must not be empty");
    } else if address.len() > MAX_NAME_LEN {
        push_error(
            &mut errors.house,
            "address",
            "Address must not exceed 255 characters",
        );
    }

    if images.len() > MAX_GALLERY_IMAGES {
        errors.images.push(RowErrors {
            index: MAX_GALLERY_IMAGES,
            errors: single_error("file", "At most 5 gallery images are allowed"),
        });
    }
    for (index, upload) in images.iter().enumerate().take(MAX_GALLERY_IMAGES) {
        let mut row = FieldErrors::new();
        if image_extension(&upload.file_name).is_none() {
            push_error(
                &mut row,
                "file",
                format!("Unsupported image type: {}", upload.file_name),
            );
        }
        if upload.bytes.is_empty() {
            push_error(&mut row, "file", "Uploaded file is empty");
        }
        if !row.is_empty() {
            errors.images.push(RowErrors { index, errors: row });
        }
    }

    // Rows flagged for deletion are excluded before any checks run.
    let mut section_names = Vec::new();
    for (index, row) in payload.sections.into_iter().enumerate() {
        if row.delete {
            continue;
        }
        let section_name = row.name.trim().to_string();
        if section_name.is_empty() {
            errors.sections.push(RowErrors {
                index,
                errors: single_error("name", "Section name must not be empty"),
            });
        } else if section_name.len() > MAX_NAME_LEN {
            errors.sections.push(RowErrors {
                index,
                errors: single_error("name", "Section name must not exceed 255 characters"),
            });
        } else {
            section_names.push(section_name);
        }
    }

    let floor_numbers: Vec<i32> = payload
        .floors
        .into_iter()
        .filter(|row| !row.delete)
        .map(|row| row.number)
        .collect();

    let mut staff_ids = Vec::new();
    let mut seen = BTreeSet::new();
    for (index, row) in payload.staff.into_iter().enumerate() {
        if row.delete {
            continue;
        }
        if !known_staff_ids.contains(&row.user_id) {
            errors.staff.push(RowErrors {
                index,
                errors: single_error("user_id", format!("Unknown staff user {}", row.user_id)),
            });
            continue;
        }
        // Duplicate assignments collapse into the set.
        if seen.insert(row.user_id) {
            staff_ids.push(row.user_id);
        }
    }

    if !errors.is_empty() {
        return Err(errors);
    }

    Ok(HouseBundle {
        name,
        address,
        images,
        section_names,
        floor_numbers,
        staff_ids,
    })
}

fn single_error(field: &str, message: impl Into<String>) -> FieldErrors {
    let mut errors = FieldErrors::new();
    push_error(&mut errors, field, message);
    errors
}
