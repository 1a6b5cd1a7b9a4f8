//! Create-post draft state and its local validation.
//!
//! DESIGN
//! ======
//! The only local precondition is that an image is selected. Everything else
//! (caption length, category membership, ownership) is the backend's call.

#[cfg(test)]
#[path = "compose_test.rs"]
mod compose_test;

use uuid::Uuid;

use crate::error::AppError;

/// Categories offered by the create form, in display order.
pub const CATEGORIES: [&str; 10] = [
    "Photography",
    "Art",
    "Nature",
    "Technology",
    "Travel",
    "Food",
    "Fashion",
    "Sports",
    "Music",
    "Other",
];

pub const MISSING_IMAGE_MESSAGE: &str = "Please select an image";

const FALLBACK_CONTENT_TYPE: &str = "application/octet-stream";

/// An image read from the file picker.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectedImage {
    pub name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl SelectedImage {
    pub fn new(name: String, content_type: String, bytes: Vec<u8>) -> Self {
        let content_type = if content_type.is_empty() { FALLBACK_CONTENT_TYPE.to_owned() } else { content_type };
        Self { name, content_type, bytes }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PostDraft {
    pub caption: String,
    pub category: String,
    pub image: Option<SelectedImage>,
}

impl Default for PostDraft {
    fn default() -> Self {
        Self { caption: String::new(), category: CATEGORIES[0].to_owned(), image: None }
    }
}

/// A draft that passed local validation.
#[derive(Debug)]
pub struct ReadyDraft<'a> {
    pub caption: &'a str,
    pub category: &'a str,
    pub image: &'a SelectedImage,
}

impl PostDraft {
    /// Check the draft can be submitted.
    ///
    /// # Errors
    ///
    /// [`AppError::Validation`] when no image has been selected.
    pub fn validate(&self) -> Result<ReadyDraft<'_>, AppError> {
        let image = self
            .image
            .as_ref()
            .ok_or_else(|| AppError::validation(MISSING_IMAGE_MESSAGE))?;
        Ok(ReadyDraft { caption: &self.caption, category: &self.category, image })
    }
}

/// Storage key for an uploaded image: a random UUID plus the file's extension.
pub fn object_key(file_name: &str) -> String {
    format!("{}.{}", Uuid::new_v4(), extension(file_name))
}

/// Text after the last `.`, or the whole name when there is none.
fn extension(file_name: &str) -> &str {
    file_name.rsplit('.').next().unwrap_or(file_name)
}

/// The image slot of the create form.
///
/// Each file pick starts a read and gets a ticket. Only the latest ticket may
/// fill the slot, so a slow read of an earlier file cannot overwrite a newer
/// pick. The slot is empty while that read is pending.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ImagePick {
    ticket: u64,
    reading: bool,
    image: Option<SelectedImage>,
}

impl ImagePick {
    /// Start reading a newly picked file, dropping any earlier image.
    pub fn begin(&mut self) -> u64 {
        self.ticket += 1;
        self.reading = true;
        self.image = None;
        self.ticket
    }

    /// Settle the read for `ticket`. Returns false for a superseded read,
    /// which leaves the slot untouched.
    pub fn finish(&mut self, ticket: u64, image: Option<SelectedImage>) -> bool {
        if ticket != self.ticket {
            return false;
        }
        self.reading = false;
        self.image = image;
        true
    }

    pub fn is_reading(&self) -> bool {
        self.reading
    }

    pub fn image(&self) -> Option<&SelectedImage> {
        self.image.as_ref()
    }
}
