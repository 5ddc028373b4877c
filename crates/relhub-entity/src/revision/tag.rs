//! Validated revision tags.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use relhub_core::AppError;
use relhub_core::error::ErrorKind;

/// Maximum encoded length of a tag, in bytes.
pub const MAX_TAG_BYTES: usize = 256;

/// Reasons a raw tag value is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TagError {
    /// The tag contains a character outside `[A-Za-z0-9+_.-]`.
    #[error("Tag must contain only letters, numbers, plus, underscore, dot, or hyphen")]
    Format {
        /// The first offending character.
        invalid: char,
    },

    /// The tag is longer than [`MAX_TAG_BYTES`].
    #[error("Tag must be at most {max} bytes, got {bytes}")]
    Length {
        /// Encoded length of the rejected tag.
        bytes: usize,
        /// The configured maximum.
        max: usize,
    },
}

impl From<TagError> for AppError {
    fn from(err: TagError) -> Self {
        AppError::with_source(ErrorKind::Validation, err.to_string(), err)
    }
}

/// A non-empty tag that passed validation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RevisionTag(String);

impl RevisionTag {
    /// Validate a raw, user-supplied tag.
    ///
    /// Surrounding whitespace is trimmed first. An empty result means
    /// "clear the tag" and yields `Ok(None)`.
    pub fn parse(raw: &str) -> Result<Option<Self>, TagError> {
        let value = raw.trim();
        if value.is_empty() {
            return Ok(None);
        }

        if let Some(invalid) = value.chars().find(|c| !is_tag_char(*c)) {
            return Err(TagError::Format { invalid });
        }

        let bytes = value.len();
        if bytes > MAX_TAG_BYTES {
            return Err(TagError::Length {
                bytes,
                max: MAX_TAG_BYTES,
            });
        }

        Ok(Some(Self(value.to_string())))
    }

    /// Borrow the tag text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RevisionTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn is_tag_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '+' | '_' | '.' | '-')
}
