//! Service file location.
//!
//! Given a decoded code generator request, this module finds the proto file
//! that declares a gRPC service and opens it from disk for the caller.

use crate::error::{Error, Result};
use prost_types::compiler::CodeGeneratorRequest;
use std::fs::File;
use std::path::Path;
use tracing::trace;

/// Returns the name of the proto file within `request` whose descriptor
/// declares a service.
///
/// Entries are scanned in request order and the last file with a non-empty
/// service list wins; when several input files declare services, the later
/// one shadows the earlier. Fails with [`Error::NoServiceDeclared`] when no
/// entry qualifies.
pub fn service_file_name(request: &CodeGeneratorRequest) -> Result<&str> {
    let mut svc_file_name = None;
    for file in &request.proto_file {
        if !file.service.is_empty() {
            trace!("{} declares {} service(s)", file.name(), file.service.len());
            svc_file_name = Some(file.name());
        }
    }

    svc_file_name.ok_or(Error::NoServiceDeclared)
}

/// Opens the proto file within `proto_dir` whose descriptor declares a
/// service.
///
/// The file is selected by [`service_file_name`] and opened read-only.
/// Fails with [`Error::ServiceFileOpen`] carrying the attempted path when
/// the name cannot be opened under `proto_dir`. Ownership of the returned
/// handle passes to the caller.
pub fn find_service_file(request: &CodeGeneratorRequest, proto_dir: &Path) -> Result<File> {
    let name = service_file_name(request)?;
    let path = proto_dir.join(name);
    File::open(&path).map_err(|e| Error::service_file_open(path, e))
}
