//! Code generation orchestration.
//!
//! This module drives protoc's two output plugins:
//!
//! - [`BindingGenerator`] materializes generated source bindings (with gRPC
//!   stubs) into a caller-supplied directory.
//! - [`DescriptorExtractor`] captures the compiler's view of the input files
//!   as a decoded [`CodeGeneratorRequest`], by pointing the
//!   descriptor-emission plugin at a scratch directory and reading back the
//!   single artifact it leaves there.
//!
//! Both run protoc exactly once, synchronously. The scratch directory used
//! by extraction is uniquely named per call and removed on every exit path,
//! success or failure.
//!
//! ## Extensibility
//!
//! The [`ArtifactPolicy`] trait controls how the output artifact is picked
//! out of the scratch directory; [`FirstFile`] is the default.

mod artifact;

use crate::error::{Error, Result};
use crate::invoke::{Directive, Protoc, DESCRIPTOR_PLUGIN, SOURCE_PLUGIN};
use prost::Message;
use prost_types::compiler::CodeGeneratorRequest;
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

pub use artifact::{ArtifactPolicy, FirstFile};

/// Prefix for scratch output directory names
const SCRATCH_PREFIX: &str = "girder-";

/// Extracts a decoded [`CodeGeneratorRequest`] for a set of proto files
pub struct DescriptorExtractor {
    protoc: Protoc,
    policy: Box<dyn ArtifactPolicy>,
}

impl Default for DescriptorExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl DescriptorExtractor {
    /// Creates an extractor with a default invoker and the [`FirstFile`] policy
    pub fn new() -> Self {
        Self::with_protoc(Protoc::new())
    }

    /// Creates an extractor around a configured invoker
    pub fn with_protoc(protoc: Protoc) -> Self {
        Self {
            protoc,
            policy: Box::new(FirstFile),
        }
    }

    /// Replaces the artifact selection policy
    pub fn artifact_policy(mut self, policy: impl ArtifactPolicy + 'static) -> Self {
        self.policy = Box::new(policy);
        self
    }

    /// Runs protoc with the descriptor-emission plugin and decodes its output.
    ///
    /// The plugin must be resolvable on PATH before anything is spawned. The
    /// emitted artifact is read from a scratch directory that exists only for
    /// the duration of this call.
    pub fn extract(
        &self,
        proto_paths: &[PathBuf],
        search_roots: &[PathBuf],
    ) -> Result<CodeGeneratorRequest> {
        which::which(DESCRIPTOR_PLUGIN)
            .map_err(|e| Error::tool_not_found(DESCRIPTOR_PLUGIN, e))?;

        // Dropped on every exit path below, which removes the directory.
        let scratch = tempfile::Builder::new()
            .prefix(SCRATCH_PREFIX)
            .tempdir()
            .map_err(|source| Error::ScratchDir { source })?;
        debug!("scratch directory at {}", scratch.path().display());

        let directive = Directive::descriptor_emission(scratch.path());
        self.protoc.invoke(proto_paths, search_roots, &directive)?;

        let artifact = self.policy.select(scratch.path())?;
        trace!("reading descriptor artifact {}", artifact.display());
        let bytes = std::fs::read(&artifact).map_err(|e| Error::file_read(&artifact, e))?;

        let request = CodeGeneratorRequest::decode(bytes.as_slice())?;
        debug!(
            "decoded code generator request covering {} proto file(s)",
            request.proto_file.len()
        );
        Ok(request)
    }
}

/// Generates source bindings for a set of proto files
#[derive(Debug, Clone, Default)]
pub struct BindingGenerator {
    protoc: Protoc,
}

impl BindingGenerator {
    /// Creates a generator with a default invoker
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a generator around a configured invoker
    pub fn with_protoc(protoc: Protoc) -> Self {
        Self { protoc }
    }

    /// Runs protoc with the source-emission plugin, writing bindings under
    /// `out_dir`.
    ///
    /// Nothing is read back; success is defined by the compiler's exit
    /// status and its side effects on disk. Concurrent calls against the
    /// same `out_dir` may race on file writes.
    pub fn generate(
        &self,
        proto_paths: &[PathBuf],
        search_roots: &[PathBuf],
        out_dir: &Path,
    ) -> Result<()> {
        which::which(SOURCE_PLUGIN).map_err(|e| Error::tool_not_found(SOURCE_PLUGIN, e))?;

        let directive = Directive::source_emission(out_dir);
        self.protoc.invoke(proto_paths, search_roots, &directive)?;
        debug!("generated bindings under {}", out_dir.display());
        Ok(())
    }
}

/// Extracts a code generator request using default configuration.
///
/// This is a convenience function wrapping [`DescriptorExtractor`].
pub fn extract_request(
    proto_paths: &[PathBuf],
    search_roots: &[PathBuf],
) -> Result<CodeGeneratorRequest> {
    DescriptorExtractor::new().extract(proto_paths, search_roots)
}

/// Generates source bindings using default configuration.
///
/// This is a convenience function wrapping [`BindingGenerator`].
pub fn generate_bindings(
    proto_paths: &[PathBuf],
    search_roots: &[PathBuf],
    out_dir: &Path,
) -> Result<()> {
    BindingGenerator::new().generate(proto_paths, search_roots, out_dir)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_descriptor_plugin_aborts_before_spawn() {
        // Skip when a real plugin is installed; the stub-driven integration
        // tests cover the resolvable case.
        if which::which(DESCRIPTOR_PLUGIN).is_ok() {
            eprintln!("{DESCRIPTOR_PLUGIN} is on PATH; skipping");
            return;
        }

        let err = DescriptorExtractor::new()
            .extract(&[PathBuf::from("/protos/svc.proto")], &[])
            .unwrap_err();
        assert!(matches!(err, Error::ToolNotFound { .. }));
        assert!(err.to_string().contains(DESCRIPTOR_PLUGIN));
    }

    #[test]
    fn test_missing_source_plugin_aborts_before_spawn() {
        if which::which(SOURCE_PLUGIN).is_ok() {
            eprintln!("{SOURCE_PLUGIN} is on PATH; skipping");
            return;
        }

        let err = BindingGenerator::new()
            .generate(&[PathBuf::from("/protos/svc.proto")], &[], Path::new("/tmp/out"))
            .unwrap_err();
        assert!(matches!(err, Error::ToolNotFound { .. }));
        assert!(err.to_string().contains(SOURCE_PLUGIN));
    }
}
