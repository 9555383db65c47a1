//! Merge configuration (.ilmerge.toml)
//!
//! Defines the option set handed to the invocation builder. One
//! `MergeConfig` is constructed per merge request, either directly by a
//! host integration or by loading a repo-level TOML file, and is never
//! mutated by the core itself.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fs;
use std::io;
use std::path::Path;

/// Default file alignment for the target assembly.
pub const DEFAULT_FILE_ALIGNMENT: u32 = 512;

/// Target assembly kinds accepted by `/target:`.
const VALID_TARGET_TYPES: &[&str] = &["library", "exe", "winexe"];

/// Error types for config operations
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// Provenance of a loaded configuration file
///
/// Records where a config came from so an invocation record can point
/// back at the exact bytes that produced it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigSource {
    /// File path (None when the config was built in memory)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    /// SHA-256 digest of the raw file bytes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub digest: Option<String>,
}

/// The full ILMerge option set for one merge request
///
/// Field semantics and defaults follow the ILMerge command-line contract.
/// Every field maps to at most one switch; the builder decides which
/// switches are emitted and in what order. Required fields
/// (`input_assemblies`, `output_file`) are checked by the builder, not
/// here, so that a partially-populated config can still be layered with
/// CLI overrides before validation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MergeConfig {
    /// Allow duplicate public type names to be renamed.
    /// Ignored whenever `duplicate_type_names` is non-empty.
    pub allow_duplicate_type_names: bool,

    /// Copy same-typed assembly-level attributes when the attribute type
    /// declares AllowMultiple. Only meaningful with `copy_attributes`.
    pub allow_multiple_assembly_level_attributes: bool,

    /// Expand wildcards in input file names.
    pub allow_wildcards: bool,

    /// Treat assemblies with a zero PeKind flag as ILonly.
    pub allow_zero_pe_kind: bool,

    /// Path to an attribute assembly supplying assembly-level attributes
    /// and Win32 resources for the target.
    pub attribute_file: Option<String>,

    /// Merge the transitive closure of the input assemblies.
    pub closed: bool,

    /// Copy assembly-level attributes from each input assembly.
    pub copy_attributes: bool,

    /// Produce a .pdb for the target assembly (default true). When false
    /// the builder emits `/ndebug`.
    pub debug_info: bool,

    /// Delay-sign the target assembly; only useful with `key_file`.
    pub delay_sign: bool,

    /// Type names allowed to be duplicated, one `/allowDup:<name>` each.
    pub duplicate_type_names: Vec<String>,

    /// Exclusion-pattern file for `internalize`; ignored when
    /// `internalize` is false.
    pub exclude_file: Option<String>,

    /// File alignment for the target assembly (default 512). ILMerge
    /// expects a power of two >= 512; rounding is the caller's
    /// responsibility and is not enforced here.
    pub file_alignment: u32,

    /// Paths of the assemblies to merge. The first entry is the primary
    /// assembly. None means never set, which validates differently from
    /// an explicitly empty list.
    pub input_assemblies: Option<Vec<String>>,

    /// Make non-exempt types from non-primary assemblies non-public.
    pub internalize: bool,

    /// Path to a .snk file used to strong-name the target assembly.
    pub key_file: Option<String>,

    /// Path that ILMerge log messages are written to.
    pub log_file: Option<String>,

    /// Path and file name of the merged target assembly. Required.
    pub output_file: Option<String>,

    /// Use public key tokens for external references (default true). When
    /// false the builder emits `/useFullPublicKeyForReferences`.
    pub public_key_tokens: bool,

    /// Directories searched for input assemblies, one `/lib:` each.
    pub search_directories: Vec<String>,

    /// Directory containing mscorlib.dll for the target framework.
    /// Emitted only together with `target_platform_version`.
    pub target_platform_directory: Option<String>,

    /// Target framework version ("v1", "v1.1", "v2", "v4").
    /// Emitted only together with `target_platform_directory`.
    pub target_platform_version: Option<String>,

    /// Target assembly kind: "library", "exe" or "winexe". Empty means
    /// same kind as the primary assembly.
    pub target_type: Option<String>,

    /// Merge same-named types into a single union type.
    pub union_merge: bool,

    /// Version stamped on the target assembly, e.g. "6.2.1.3".
    pub version: Option<String>,

    /// Merge XML documentation files into one for the target assembly.
    pub xml_documentation: bool,
}

impl Default for MergeConfig {
    fn default() -> Self {
        Self {
            allow_duplicate_type_names: false,
            allow_multiple_assembly_level_attributes: false,
            allow_wildcards: false,
            allow_zero_pe_kind: false,
            attribute_file: None,
            closed: false,
            copy_attributes: false,
            debug_info: true,
            delay_sign: false,
            duplicate_type_names: Vec::new(),
            exclude_file: None,
            file_alignment: DEFAULT_FILE_ALIGNMENT,
            input_assemblies: None,
            internalize: false,
            key_file: None,
            log_file: None,
            output_file: None,
            public_key_tokens: true,
            search_directories: Vec::new(),
            target_platform_directory: None,
            target_platform_version: None,
            target_type: None,
            union_merge: false,
            version: None,
            xml_documentation: false,
        }
    }
}

impl MergeConfig {
    /// Load and parse config from a TOML file, recording provenance
    pub fn from_file(path: &Path) -> Result<(Self, ConfigSource), ConfigError> {
        let bytes = fs::read(path)?;

        let mut hasher = Sha256::new();
        hasher.update(&bytes);
        let digest = hex::encode(hasher.finalize());

        let contents = String::from_utf8(bytes).map_err(|e| {
            ConfigError::Validation(format!("Config file is not valid UTF-8: {}", e))
        })?;

        let config = Self::from_toml_str(&contents)?;
        let source = ConfigSource {
            path: Some(path.to_string_lossy().to_string()),
            digest: Some(digest),
        };
        Ok((config, source))
    }

    /// Parse config from a TOML string
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: MergeConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate file-level configuration values
    ///
    /// Required-field checks (inputs, output) belong to the invocation
    /// builder; this only rejects values no ILMerge invocation could
    /// ever accept.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(ref target_type) = self.target_type {
            let normalized = target_type.trim().to_lowercase();
            if !normalized.is_empty() && !VALID_TARGET_TYPES.contains(&normalized.as_str()) {
                return Err(ConfigError::Validation(format!(
                    "Invalid target_type '{}': must be one of {}",
                    target_type,
                    VALID_TARGET_TYPES.join(", ")
                )));
            }
        }

        // One of the pair without the other can never be emitted; catch
        // the mistake at load time instead of silently dropping it.
        let has_version = self
            .target_platform_version
            .as_deref()
            .is_some_and(|v| !v.trim().is_empty());
        let has_directory = self
            .target_platform_directory
            .as_deref()
            .is_some_and(|d| !d.trim().is_empty());
        if has_version != has_directory {
            return Err(ConfigError::Validation(
                "target_platform_version and target_platform_directory must be set together"
                    .to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults() {
        let config = MergeConfig::default();
        assert!(config.debug_info);
        assert!(config.public_key_tokens);
        assert_eq!(config.file_alignment, DEFAULT_FILE_ALIGNMENT);
        assert!(!config.internalize);
        assert!(config.input_assemblies.is_none());
        assert!(config.output_file.is_none());
    }

    #[test]
    fn test_parse_minimal_toml() {
        let config = MergeConfig::from_toml_str(
            r#"
            output_file = "Merged.dll"
            input_assemblies = ["A.dll", "B.dll"]
            "#,
        )
        .unwrap();

        assert_eq!(config.output_file.as_deref(), Some("Merged.dll"));
        assert_eq!(
            config.input_assemblies,
            Some(vec!["A.dll".to_string(), "B.dll".to_string()])
        );
        // Everything else stays at its default.
        assert!(config.debug_info);
        assert_eq!(config.file_alignment, 512);
    }

    #[test]
    fn test_parse_full_toml() {
        let config = MergeConfig::from_toml_str(
            r#"
            output_file = "Merged.exe"
            input_assemblies = ["App.exe", "Lib.dll"]
            target_type = "exe"
            internalize = true
            exclude_file = "internalize.txt"
            key_file = "sign.snk"
            delay_sign = true
            search_directories = ["lib", "packages"]
            duplicate_type_names = ["Foo.Bar"]
            file_alignment = 1024
            debug_info = false
            "#,
        )
        .unwrap();

        assert_eq!(config.target_type.as_deref(), Some("exe"));
        assert!(config.internalize);
        assert!(config.delay_sign);
        assert_eq!(config.search_directories.len(), 2);
        assert_eq!(config.file_alignment, 1024);
        assert!(!config.debug_info);
    }

    #[test]
    fn test_reject_unknown_key() {
        let result = MergeConfig::from_toml_str("unknown_option = true");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_reject_invalid_target_type() {
        let result = MergeConfig::from_toml_str(r#"target_type = "dll""#);
        let err = result.unwrap_err();
        assert!(err.to_string().contains("target_type"));
    }

    #[test]
    fn test_target_type_case_insensitive() {
        let config = MergeConfig::from_toml_str(r#"target_type = "WinExe""#).unwrap();
        assert_eq!(config.target_type.as_deref(), Some("WinExe"));
    }

    #[test]
    fn test_reject_lone_target_platform_version() {
        let result = MergeConfig::from_toml_str(r#"target_platform_version = "v4""#);
        let err = result.unwrap_err();
        assert!(err.to_string().contains("target_platform"));
    }

    #[test]
    fn test_load_from_file_records_digest() {
        let mut temp = NamedTempFile::new().unwrap();
        writeln!(temp, r#"output_file = "Out.dll""#).unwrap();
        writeln!(temp, r#"input_assemblies = ["A.dll"]"#).unwrap();

        let (config, source) = MergeConfig::from_file(temp.path()).unwrap();

        assert_eq!(config.output_file.as_deref(), Some("Out.dll"));
        assert_eq!(source.path.as_deref(), Some(temp.path().to_str().unwrap()));
        // SHA-256 hex digest of the raw bytes
        assert_eq!(source.digest.as_ref().unwrap().len(), 64);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = MergeConfig::from_file(Path::new("/nonexistent/.ilmerge.toml"));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }
}
