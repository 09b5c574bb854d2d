//! Plugin directive construction.
//!
//! A directive is the single `--<plugin>_out=...` argument that tells protoc
//! which output plugin to run and with what parameters. The two forms girder
//! produces are kept here as data so the grammar can be tested independently
//! of process invocation.

use std::path::Path;

/// Executable name of the source-emission plugin
pub const SOURCE_PLUGIN: &str = "protoc-gen-gogofaster";

/// Executable name of the descriptor-emission plugin
pub const DESCRIPTOR_PLUGIN: &str = "protoc-gen-girder-ast";

/// Import remappings for the well-known types.
///
/// protoc resolves the well-known `.proto` files itself, but the generated
/// code must import them from their canonical host-ecosystem package. Each
/// entry becomes an `M<proto>=<import>` parameter in the source-emission
/// directive.
pub const WELL_KNOWN_REMAPPINGS: &[(&str, &str)] = &[
    ("google/protobuf/any.proto", "github.com/gogo/protobuf/types"),
    ("google/protobuf/duration.proto", "github.com/gogo/protobuf/types"),
    ("google/protobuf/struct.proto", "github.com/gogo/protobuf/types"),
    ("google/protobuf/timestamp.proto", "github.com/gogo/protobuf/types"),
    ("google/protobuf/wrappers.proto", "github.com/gogo/protobuf/types"),
];

/// A rendered plugin directive plus the plugin executable it requires.
///
/// Directives are built once per invocation and never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directive {
    argument: String,
    plugin: &'static str,
}

impl Directive {
    /// Builds the source-emission directive.
    ///
    /// Selects the source-emission plugin, applies the well-known-type import
    /// remappings, enables the bundled gRPC stub emission, and directs output
    /// into `out_dir`.
    pub fn source_emission(out_dir: &Path) -> Self {
        let mut argument = format!("--{}_out=", plugin_stem(SOURCE_PLUGIN));
        for (proto, import) in WELL_KNOWN_REMAPPINGS {
            argument.push('M');
            argument.push_str(proto);
            argument.push('=');
            argument.push_str(import);
            argument.push(',');
        }
        argument.push_str("plugins=grpc:");
        argument.push_str(&out_dir.display().to_string());

        Self {
            argument,
            plugin: SOURCE_PLUGIN,
        }
    }

    /// Builds the descriptor-emission directive, directing the serialized
    /// code generator request into `scratch_dir`.
    pub fn descriptor_emission(scratch_dir: &Path) -> Self {
        Self {
            argument: format!(
                "--{}_out={}",
                plugin_stem(DESCRIPTOR_PLUGIN),
                scratch_dir.display()
            ),
            plugin: DESCRIPTOR_PLUGIN,
        }
    }

    /// The directive as a single protoc argument
    pub fn as_argument(&self) -> &str {
        &self.argument
    }

    /// Name of the plugin executable this directive requires on PATH
    pub fn required_plugin(&self) -> &'static str {
        self.plugin
    }
}

/// Strips the conventional `protoc-gen-` prefix to get the name protoc uses
/// in `--<name>_out` arguments.
fn plugin_stem(plugin: &str) -> &str {
    plugin.strip_prefix("protoc-gen-").unwrap_or(plugin)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::path::PathBuf;

    #[test]
    fn test_source_emission_grammar() {
        let directive = Directive::source_emission(&PathBuf::from("/out/pb"));
        assert_eq!(
            directive.as_argument(),
            "--gogofaster_out=\
             Mgoogle/protobuf/any.proto=github.com/gogo/protobuf/types,\
             Mgoogle/protobuf/duration.proto=github.com/gogo/protobuf/types,\
             Mgoogle/protobuf/struct.proto=github.com/gogo/protobuf/types,\
             Mgoogle/protobuf/timestamp.proto=github.com/gogo/protobuf/types,\
             Mgoogle/protobuf/wrappers.proto=github.com/gogo/protobuf/types,\
             plugins=grpc:/out/pb"
        );
        assert_eq!(directive.required_plugin(), "protoc-gen-gogofaster");
    }

    #[test]
    fn test_descriptor_emission_grammar() {
        let directive = Directive::descriptor_emission(&PathBuf::from("/tmp/girder-abc"));
        assert_eq!(directive.as_argument(), "--girder-ast_out=/tmp/girder-abc");
        assert_eq!(directive.required_plugin(), "protoc-gen-girder-ast");
    }

    #[test]
    fn test_remappings_cover_well_known_types() {
        let protos: Vec<&str> = WELL_KNOWN_REMAPPINGS.iter().map(|(p, _)| *p).collect();
        assert_eq!(
            protos,
            vec![
                "google/protobuf/any.proto",
                "google/protobuf/duration.proto",
                "google/protobuf/struct.proto",
                "google/protobuf/timestamp.proto",
                "google/protobuf/wrappers.proto",
            ]
        );
        assert!(WELL_KNOWN_REMAPPINGS
            .iter()
            .all(|(_, import)| *import == "github.com/gogo/protobuf/types"));
    }
}
