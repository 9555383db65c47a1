//! Invocation builder - deterministic ILMerge argument assembly
//!
//! Turns a validated `MergeConfig` into the exact ordered argument
//! sequence ILMerge.exe expects. The order is the external tool's fixed
//! contract, not a style choice: ILMerge treats trailing bare tokens as
//! positional input assemblies, so every switch must come first and the
//! assembly list last.

mod record;
mod validate;

pub use record::InvocationRecord;
pub use validate::{validate, ValidationError};

use crate::config::{MergeConfig, DEFAULT_FILE_ALIGNMENT};

/// Build the ILMerge argument sequence for a merge configuration
///
/// This is a pure function: (config) -> argv. It touches no files,
/// spawns nothing, and returns byte-identical output for identical
/// input. The only failures are the required-field checks in
/// [`validate`]; everything else is emitted as-is and left for ILMerge
/// to judge.
pub fn build_args(config: &MergeConfig) -> Result<Vec<String>, ValidationError> {
    validate::validate(config)?;

    let mut args = Vec::new();

    // Named duplicate types win over the blanket flag; the bare switch is
    // only emitted when no names are given.
    if !config.duplicate_type_names.is_empty() {
        for type_name in &config.duplicate_type_names {
            args.push(format!("/allowDup:{}", type_name.trim()));
        }
    } else if config.allow_duplicate_type_names {
        args.push("/allowDup".to_string());
    }

    if config.allow_multiple_assembly_level_attributes {
        args.push("/allowMultiple".to_string());
    }

    if config.allow_wildcards {
        args.push("/wildcards".to_string());
    }

    if config.allow_zero_pe_kind {
        args.push("/zeroPeKind".to_string());
    }

    if let Some(attribute_file) = non_blank(&config.attribute_file) {
        args.push(format!("/attr:\"{}\"", attribute_file));
    }

    if config.closed {
        args.push("/closed".to_string());
    }

    if config.copy_attributes {
        args.push("/copyattrs".to_string());
    }

    // Debug info is ILMerge's default; only its absence is spelled out.
    if !config.debug_info {
        args.push("/ndebug".to_string());
    }

    if config.delay_sign {
        args.push("/delaysign".to_string());
    }

    if config.file_alignment != DEFAULT_FILE_ALIGNMENT {
        args.push(format!("/align:{}", config.file_alignment));
    }

    if config.internalize {
        match non_blank(&config.exclude_file) {
            Some(exclude_file) => args.push(format!("/internalize:\"{}\"", exclude_file)),
            None => args.push("/internalize".to_string()),
        }
    }

    if let Some(key_file) = non_blank(&config.key_file) {
        args.push(format!("/keyfile:\"{}\"", key_file));
    }

    if let Some(log_file) = non_blank(&config.log_file) {
        args.push(format!("/log:\"{}\"", log_file));
    }

    // Public key tokens are ILMerge's default; only the full-key mode is
    // spelled out.
    if !config.public_key_tokens {
        args.push("/useFullPublicKeyForReferences".to_string());
    }

    for directory in &config.search_directories {
        args.push(format!("/lib:\"{}\"", directory.trim()));
    }

    // Version and directory only mean anything together.
    if let (Some(version), Some(directory)) = (
        non_blank(&config.target_platform_version),
        non_blank(&config.target_platform_directory),
    ) {
        args.push(format!(
            "/targetplatform:{},\"{}\"",
            version.to_lowercase(),
            directory
        ));
    }

    if let Some(target_type) = non_blank(&config.target_type) {
        args.push(format!("/target:{}", target_type.to_lowercase()));
    }

    if config.union_merge {
        args.push("/union".to_string());
    }

    if config.xml_documentation {
        args.push("/xmldocs".to_string());
    }

    if let Some(version) = non_blank(&config.version) {
        args.push(format!("/ver:{}", version));
    }

    // Output file comes after every other switch and before the inputs.
    // Guaranteed present by validate().
    if let Some(ref output_file) = config.output_file {
        args.push(format!("/out:\"{}\"", output_file));
    }

    // Input assemblies are positional and must stay last, in list order.
    if let Some(ref input_assemblies) = config.input_assemblies {
        for assembly in input_assemblies {
            args.push(format!("\"{}\"", assembly));
        }
    }

    Ok(args)
}

/// Trimmed value of an optional string field, or None when unset/blank
fn non_blank(field: &Option<String>) -> Option<&str> {
    field
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
}
