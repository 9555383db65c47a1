//! ILMerge Lane - build-integration adapter for ILMerge
//!
//! This crate turns a declarative merge configuration into the exact
//! command-line invocation of the external ILMerge executable. It
//! validates required inputs, assembles the order-sensitive argument
//! sequence, and resolves an ambiguous tool-location string into a
//! (search directory, executable name) pair. Launching the process and
//! interpreting its output belong to the host integration, not here.

pub mod config;
pub mod invocation;
pub mod toolpath;

pub use config::{ConfigError, ConfigSource, MergeConfig};
pub use invocation::{build_args, InvocationRecord, ValidationError};
pub use toolpath::{ToolLocation, DEFAULT_TOOL_EXE};
