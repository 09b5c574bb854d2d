//! # girder-core
//!
//! A library for orchestrating the Protocol Buffer compiler and its
//! code-generation plugins, requiring only paths to files on disk.
//!
//! This crate provides the core functionality for:
//! - Building and executing protoc invocations with correct argument order
//! - Generating source bindings (with gRPC stubs) for a set of `.proto` files
//! - Extracting the compiler's decoded `CodeGeneratorRequest` for those files
//! - Locating the input file that declares a gRPC service
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - [`invoke`]: protoc invocation and plugin directive construction
//! - [`codegen`]: binding generation and descriptor extraction
//! - [`locate`]: service file location
//! - [`error`]: error types and handling
//!
//! ## Example
//!
//! ```no_run
//! use girder_core::{extract_request, find_service_file, generate_bindings};
//! use std::path::{Path, PathBuf};
//!
//! let protos = vec![PathBuf::from("protos/greeter.proto")];
//! let roots: Vec<PathBuf> = vec![];
//!
//! // Materialize generated bindings on disk.
//! generate_bindings(&protos, &roots, Path::new("gen"))?;
//!
//! // Ask the compiler what it sees in the same files.
//! let request = extract_request(&protos, &roots)?;
//!
//! // Open the file declaring the gRPC service.
//! let svc = find_service_file(&request, Path::new("protos"))?;
//! # let _ = svc;
//! # Ok::<(), girder_core::Error>(())
//! ```
//!
//! ## External tools
//!
//! Three executables must be resolvable by name at call time: `protoc`
//! itself, the source-emission plugin, and the descriptor-emission plugin.
//! The plugins are checked explicitly before any process is spawned; a
//! missing compiler surfaces as a spawn failure.
//!
//! ## Extensibility
//!
//! The library provides a trait for customization:
//!
//! - [`ArtifactPolicy`]: customize how the descriptor artifact is picked out
//!   of the plugin's output directory
//!

#![deny(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, unreachable_pub)]

pub mod codegen;
pub mod error;
pub mod invoke;
pub mod locate;

// Re-export primary types for convenience
pub use codegen::{
    extract_request, generate_bindings, ArtifactPolicy, BindingGenerator, DescriptorExtractor,
    FirstFile,
};
pub use error::{Error, Result};
pub use invoke::{Directive, Protoc, ProtocConfig};
pub use locate::{find_service_file, service_file_name};

/// Crate version for programmatic access
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
