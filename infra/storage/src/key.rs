use crate::engine::TMP_MARKER;
use crate::error::StorageError;
use std::fmt;

const MAX_KEY_LEN: usize = 128;

/// A validated blob name.
///
/// Keys map one-to-one onto file names directly under the storage root, so they
/// are restricted to ASCII alphanumerics, `-`, `_` and `.`, must not start with a
/// dot, and cannot contain path separators.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BlobKey(String);

impl BlobKey {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<&str> for BlobKey {
    type Error = StorageError;

    fn try_from(value: &str) -> Result<Self, StorageError> {
        if value.is_empty() {
            return Err(StorageError::InvalidKey {
                message: "EMPTY".into(),
                context: Some("Blob key cannot be empty".into()),
            });
        }

        if value.len() > MAX_KEY_LEN {
            return Err(StorageError::InvalidKey {
                message: format!("{} bytes", value.len()).into(),
                context: Some("Blob key is too long".into()),
            });
        }

        if value.starts_with('.') {
            return Err(StorageError::InvalidKey {
                message: value.to_owned().into(),
                context: Some("Blob key cannot start with a dot".into()),
            });
        }

        if !value.chars().all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.')) {
            return Err(StorageError::InvalidKey {
                message: value.to_owned().into(),
                context: Some("Blob key contains illegal characters".into()),
            });
        }

        if value.contains(TMP_MARKER) {
            return Err(StorageError::InvalidKey {
                message: value.to_owned().into(),
                context: Some("Blob key collides with the temporary file marker".into()),
            });
        }

        Ok(Self(value.to_owned()))
    }
}

impl TryFrom<String> for BlobKey {
    type Error = StorageError;

    fn try_from(value: String) -> Result<Self, StorageError> {
        Self::try_from(value.as_str())
    }
}

impl TryFrom<&String> for BlobKey {
    type Error = StorageError;

    fn try_from(value: &String) -> Result<Self, StorageError> {
        Self::try_from(value.as_str())
    }
}

impl AsRef<str> for BlobKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BlobKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
