//! Required-field validation for the invocation builder
//!
//! Each failure is a distinct variant with a field-specific message so a
//! host build can surface exactly what is missing. These are the only
//! failure modes of the builder; malformed paths are left for ILMerge
//! itself to report when it is actually launched.

use serde::{Deserialize, Serialize};

use crate::config::MergeConfig;

const INPUT_ASSEMBLIES_EXPECTATIONS: &str = "The input_assemblies option is required and must \
     list the path and file name of each assembly to be merged. The first entry is the primary \
     assembly.";

const OUTPUT_FILE_EXPECTATIONS: &str = "The output_file option is required and must be set to \
     a valid file name (optionally with a path) for the assembly produced by ILMerge.";

/// Validation failure returned instead of an argument sequence
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[serde(tag = "type")]
pub enum ValidationError {
    /// input_assemblies was never set
    #[error("The input_assemblies option is not set. {INPUT_ASSEMBLIES_EXPECTATIONS}")]
    InputAssembliesUnset,

    /// input_assemblies was set to an empty list
    #[error("The input_assemblies option is an empty list. {INPUT_ASSEMBLIES_EXPECTATIONS}")]
    InputAssembliesEmpty,

    /// output_file was never set
    #[error("The output_file option is not set. {OUTPUT_FILE_EXPECTATIONS}")]
    OutputFileUnset,

    /// output_file is the empty string
    #[error("The output_file option is empty. {OUTPUT_FILE_EXPECTATIONS}")]
    OutputFileEmpty,

    /// output_file contains only whitespace
    #[error("The output_file option contains only white space characters. {OUTPUT_FILE_EXPECTATIONS}")]
    OutputFileBlank,
}

impl ValidationError {
    /// Machine-readable failure code
    pub fn code(&self) -> &'static str {
        match self {
            ValidationError::InputAssembliesUnset => "INPUT_ASSEMBLIES_UNSET",
            ValidationError::InputAssembliesEmpty => "INPUT_ASSEMBLIES_EMPTY",
            ValidationError::OutputFileUnset => "OUTPUT_FILE_UNSET",
            ValidationError::OutputFileEmpty => "OUTPUT_FILE_EMPTY",
            ValidationError::OutputFileBlank => "OUTPUT_FILE_BLANK",
        }
    }
}

/// Check the required fields of a merge configuration
///
/// Input assemblies are checked before the output file, and the first
/// failing condition wins; each condition stays independently reachable.
pub fn validate(config: &MergeConfig) -> Result<(), ValidationError> {
    match &config.input_assemblies {
        None => return Err(ValidationError::InputAssembliesUnset),
        Some(list) if list.is_empty() => return Err(ValidationError::InputAssembliesEmpty),
        Some(_) => {}
    }

    match &config.output_file {
        None => Err(ValidationError::OutputFileUnset),
        Some(s) if s.is_empty() => Err(ValidationError::OutputFileEmpty),
        Some(s) if s.trim().is_empty() => Err(ValidationError::OutputFileBlank),
        Some(_) => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_config() -> MergeConfig {
        MergeConfig {
            input_assemblies: Some(vec!["A.dll".to_string()]),
            output_file: Some("Out.dll".to_string()),
            ..MergeConfig::default()
        }
    }

    #[test]
    fn test_valid_config_passes() {
        assert_eq!(validate(&valid_config()), Ok(()));
    }

    #[test]
    fn test_unset_inputs_distinct_from_empty() {
        let mut config = valid_config();
        config.input_assemblies = None;
        let unset = validate(&config).unwrap_err();
        assert_eq!(unset, ValidationError::InputAssembliesUnset);

        config.input_assemblies = Some(vec![]);
        let empty = validate(&config).unwrap_err();
        assert_eq!(empty, ValidationError::InputAssembliesEmpty);

        assert_ne!(unset.to_string(), empty.to_string());
    }

    #[test]
    fn test_output_file_conditions_distinct() {
        let mut config = valid_config();

        config.output_file = None;
        assert_eq!(validate(&config), Err(ValidationError::OutputFileUnset));

        config.output_file = Some(String::new());
        assert_eq!(validate(&config), Err(ValidationError::OutputFileEmpty));

        config.output_file = Some("   \t ".to_string());
        assert_eq!(validate(&config), Err(ValidationError::OutputFileBlank));
    }

    #[test]
    fn test_inputs_checked_before_output() {
        let config = MergeConfig::default();
        assert_eq!(
            validate(&config),
            Err(ValidationError::InputAssembliesUnset)
        );
    }

    #[test]
    fn test_messages_name_the_field() {
        assert!(ValidationError::OutputFileBlank
            .to_string()
            .contains("white space"));
        assert!(ValidationError::InputAssembliesUnset
            .to_string()
            .contains("input_assemblies"));
    }

    #[test]
    fn test_codes() {
        assert_eq!(
            ValidationError::InputAssembliesEmpty.code(),
            "INPUT_ASSEMBLIES_EMPTY"
        );
        assert_eq!(ValidationError::OutputFileBlank.code(), "OUTPUT_FILE_BLANK");
    }
}
