//! Compiler invocation module.
//!
//! This module builds and executes single, synchronous `protoc` invocations.
//! Each invocation passes a primary search root derived from the input files,
//! any auxiliary search roots, exactly one plugin directive, and the input
//! file paths. protoc's import resolution is sensitive to argument order, so
//! the argument vector is built by [`build_args`] and tested as a unit.
//!
//! The invoker never reads protoc's outputs; generated files and descriptor
//! artifacts are consumed by the caller through the filesystem.

mod directive;

use crate::error::{Error, Result};
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::{debug, trace};

pub use directive::{Directive, DESCRIPTOR_PLUGIN, SOURCE_PLUGIN, WELL_KNOWN_REMAPPINGS};

/// Name of the compiler executable, resolved through PATH by default
const COMPILER: &str = "protoc";

/// Fixed segment joined onto each auxiliary search root
const SEARCH_ROOT_SEGMENT: &str = "src";

/// Configuration for the protoc invoker
#[derive(Debug, Clone, Default)]
pub struct ProtocConfig {
    /// Explicit path to the protoc executable; PATH lookup when unset
    pub protoc_path: Option<PathBuf>,
}

impl ProtocConfig {
    /// Creates a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets an explicit protoc executable path
    pub fn protoc_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.protoc_path = Some(path.into());
        self
    }
}

/// Executes the external protoc compiler
#[derive(Debug, Clone, Default)]
pub struct Protoc {
    config: ProtocConfig,
}

impl Protoc {
    /// Creates a new invoker with default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new invoker with custom configuration
    pub fn with_config(config: ProtocConfig) -> Self {
        Self { config }
    }

    /// Runs protoc once over `proto_paths` with the given plugin directive.
    ///
    /// Blocks until the process exits. Standard output and standard error are
    /// captured and combined; on a non-zero exit they are returned inside
    /// [`Error::CompilerExecution`] together with the full argument vector.
    /// On success nothing is returned: protoc's results are files on disk.
    ///
    /// `proto_paths` must be non-empty and share a common parent directory,
    /// which becomes the primary search root.
    ///
    /// # Panics
    ///
    /// Panics if `proto_paths` is empty.
    pub fn invoke(
        &self,
        proto_paths: &[PathBuf],
        search_roots: &[PathBuf],
        directive: &Directive,
    ) -> Result<()> {
        let args = build_args(proto_paths, search_roots, directive);
        let program = self
            .config
            .protoc_path
            .as_deref()
            .unwrap_or(Path::new(COMPILER));

        debug!("invoking {} with {} input file(s)", COMPILER, proto_paths.len());
        trace!(?args, "protoc argument vector");

        let output = Command::new(program)
            .args(&args)
            .output()
            .map_err(|source| Error::CompilerSpawn { source })?;

        if !output.status.success() {
            let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
            combined.push_str(&String::from_utf8_lossy(&output.stderr));

            let mut full_args = vec![program.display().to_string()];
            full_args.extend(args);
            return Err(Error::compiler_execution(combined, full_args));
        }

        Ok(())
    }
}

/// Builds the protoc argument vector.
///
/// Order is load-bearing: the primary search root (the directory containing
/// the first input file) comes first, then one `-I<root>/src` per auxiliary
/// search root in their given order, then the plugin directive, then every
/// input file path in its given order.
pub fn build_args(
    proto_paths: &[PathBuf],
    search_roots: &[PathBuf],
    directive: &Directive,
) -> Vec<String> {
    let primary = proto_paths[0]
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    let mut args = Vec::with_capacity(2 + search_roots.len() + proto_paths.len());
    args.push(format!("--proto_path={}", primary.display()));

    for root in search_roots {
        args.push(format!("-I{}", root.join(SEARCH_ROOT_SEGMENT).display()));
    }

    args.push(directive.as_argument().to_string());

    for path in proto_paths {
        args.push(path.display().to_string());
    }

    args
}
