use std::borrow::Cow;

use thiserror::Error;

use crate::registry::Parent;

/// An error raised while decoding, validating or encoding an extension.
#[derive(Error, Debug)]
pub enum Error {
    #[error("{extension} parsing failed: {source}")]
    Parse {
        extension: Cow<'static, str>,
        source: serde_json::Error,
    },
    #[error("{extension} validation failed: {source}")]
    Validation {
        extension: Cow<'static, str>,
        source: ValidationError,
    },
    #[error("{extension} encoding failed: {source}")]
    Encode {
        extension: Cow<'static, str>,
        source: serde_json::Error,
    },
    #[error("no decoder registered for {name} on {parent}")]
    UnknownExtension {
        name: String,
        parent: Parent,
    },
}

impl Error {
    /// The extension the error was raised for.
    pub fn extension(&self) -> &str {
        match self {
            Error::Parse { extension, .. }
            | Error::Validation { extension, .. }
            | Error::Encode { extension, .. } => extension.as_ref(),
            Error::UnknownExtension { name, .. } => name.as_str(),
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Error::Validation { .. })
    }
}

/// A structural constraint violated by well-formed JSON.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{field}: {message}")]
pub struct ValidationError {
    pub field: Cow<'static, str>,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: impl Into<Cow<'static, str>>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Fails with a range error unless `min <= value <= max`.
pub(crate) fn check_range(
    field: &'static str,
    value: f32,
    min: f32,
    max: f32,
) -> Result<(), ValidationError> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(ValidationError::new(field, format!("{value} is outside [{min}, {max}]")))
    }
}

/// JSON numbers past the `f32` range parse as infinity, which cannot be
/// rendered back.
pub(crate) fn check_finite(field: &'static str, value: f32) -> Result<(), ValidationError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ValidationError::new(field, format!("{value} is not a finite number")))
    }
}

pub(crate) fn check_non_negative(field: &'static str, value: f32) -> Result<(), ValidationError> {
    check_finite(field, value)?;
    if value >= 0.0 {
        Ok(())
    } else {
        Err(ValidationError::new(field, format!("{value} must not be negative")))
    }
}
