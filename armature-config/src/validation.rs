// Configuration validation

use crate::{ConfigError, Result};

/// Trait for validating configuration
pub trait Validate {
    fn validate(&self) -> Result<()>;
}

/// Configuration validator with rules
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate that a value is not empty
    pub fn not_empty(value: &str, field: &str) -> Result<()> {
        if value.trim().is_empty() {
            return Err(ConfigError::ValidationError(format!(
                "{} cannot be empty",
                field
            )));
        }
        Ok(())
    }

    /// Validate that a list has at least one entry
    pub fn non_empty_list<T>(values: &[T], field: &str) -> Result<()> {
        if values.is_empty() {
            return Err(ConfigError::ValidationError(format!(
                "{} must contain at least one entry",
                field
            )));
        }
        Ok(())
    }

    /// Validate that no entry of a list is blank
    pub fn no_blank_entries<'a>(
        values: impl IntoIterator<Item = &'a str>,
        field: &str,
    ) -> Result<()> {
        for value in values {
            if value.trim().is_empty() {
                return Err(ConfigError::ValidationError(format!(
                    "{} cannot contain blank entries",
                    field
                )));
            }
        }
        Ok(())
    }

    /// Validate that a path segment name holds no slash
    pub fn is_segment(value: &str, field: &str) -> Result<()> {
        if value.contains('/') {
            return Err(ConfigError::ValidationError(format!(
                "{} must be a single path segment",
                field
            )));
        }
        Ok(())
    }
}
