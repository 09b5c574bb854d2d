//! Error types for the girder-core library.
//!
//! This module provides comprehensive error handling using the `thiserror` crate,
//! with detailed error variants for each way a protoc run can go wrong.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for girder operations
pub type Result<T> = std::result::Result<T, Error>;

/// Comprehensive error type for all girder operations
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// A required external executable could not be resolved on the search path
    #[error("cannot find '{tool}' on PATH: {source}")]
    ToolNotFound {
        /// Name of the executable that was looked up
        tool: String,
        /// Underlying lookup error
        #[source]
        source: which::Error,
    },

    /// The compiler process exited with a non-zero status
    #[error("protoc exec failed.\nprotoc output:\n\n{output}\nprotoc arguments:\n\n{args:?}")]
    CompilerExecution {
        /// Combined standard output and standard error of the compiler
        output: String,
        /// Full argument vector the compiler was invoked with
        args: Vec<String>,
    },

    /// The compiler process could not be started at all
    #[error("failed to spawn protoc: {source}")]
    CompilerSpawn {
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Failed to create the scratch output directory
    #[error("cannot create scratch directory: {source}")]
    ScratchDir {
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Failed to read a file or directory listing
    #[error("failed to read '{path}': {source}")]
    FileRead {
        /// Path that failed to read
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The scratch directory contained no output file after a successful compiler run
    #[error("no protoc output file found in: {path}")]
    NoOutputArtifact {
        /// The scratch directory that was scanned
        path: PathBuf,
    },

    /// The captured artifact did not decode as a code generator request
    #[error("cannot decode protoc output as a code generator request: {0}")]
    DescriptorDecode(#[from] prost::DecodeError),

    /// No file among the request's entries declares a service
    #[error("passed proto files contain no service")]
    NoServiceDeclared,

    /// The identified service file could not be opened
    #[error("cannot open service file '{path}': {source}")]
    ServiceFileOpen {
        /// The path that was attempted
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// Creates a new tool lookup error
    pub fn tool_not_found(tool: impl Into<String>, source: which::Error) -> Self {
        Self::ToolNotFound {
            tool: tool.into(),
            source,
        }
    }

    /// Creates a new compiler execution error
    pub fn compiler_execution(output: impl Into<String>, args: Vec<String>) -> Self {
        Self::CompilerExecution {
            output: output.into(),
            args,
        }
    }

    /// Creates a new file read error
    pub fn file_read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::FileRead {
            path: path.into(),
            source,
        }
    }

    /// Creates a new missing-artifact error
    pub fn no_output_artifact(path: impl Into<PathBuf>) -> Self {
        Self::NoOutputArtifact { path: path.into() }
    }

    /// Creates a new service file open error
    pub fn service_file_open(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::ServiceFileOpen {
            path: path.into(),
            source,
        }
    }
}
