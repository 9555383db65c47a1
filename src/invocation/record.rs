//! Invocation record for built ILMerge command lines
//!
//! When the builder accepts a configuration, the CLI can emit a
//! structured JSON record of the resulting invocation for auditing and
//! for whatever layer actually launches the process.

use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::Path;

use crate::config::ConfigSource;
use crate::toolpath::ToolLocation;

/// Structured record of a built ILMerge invocation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvocationRecord {
    /// Resolved location of the ILMerge executable
    pub tool: ToolLocation,

    /// The argument sequence, in the exact order ILMerge expects
    pub args: Vec<String>,

    /// Provenance of the configuration that produced the args
    pub config_source: ConfigSource,
}

impl InvocationRecord {
    /// Create a new invocation record
    pub fn new(tool: ToolLocation, args: Vec<String>, config_source: ConfigSource) -> Self {
        Self {
            tool,
            args,
            config_source,
        }
    }

    /// Render the full command line: tool path followed by the args
    ///
    /// Path-valued args already carry their quotes; joining with single
    /// spaces reproduces the literal ILMerge command line.
    pub fn command_line(&self) -> String {
        let tool = self.tool.full_path();
        let mut line = tool.to_string_lossy().to_string();
        for arg in &self.args {
            line.push(' ');
            line.push_str(arg);
        }
        line
    }

    /// Serialize to JSON string with pretty formatting
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Serialize to compact JSON string (no whitespace)
    pub fn to_json_compact(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Write invocation.json to a specific file path
    pub fn write_to_file(&self, path: &Path) -> io::Result<()> {
        let json = self.to_json().map_err(|e| {
            io::Error::new(
                io::ErrorKind::InvalidData,
                format!("JSON serialization failed: {}", e),
            )
        })?;

        fs::write(path, json)
    }
}
