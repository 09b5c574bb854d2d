//! girder - Generate gRPC bindings and service scaffolding by driving protoc
//!
//! This tool runs the Protocol Buffer compiler over a set of definition
//! files, materializes generated bindings, and reports which input file
//! declares the gRPC service.

use anyhow::{bail, Context, Result};
use clap::{Args, Parser};
use girder_core::{
    find_service_file, service_file_name, BindingGenerator, DescriptorExtractor, Protoc,
    ProtocConfig,
};
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::{debug, info, Level};
use tracing_subscriber::EnvFilter;
use walkdir::WalkDir;

/// Generate gRPC bindings and service scaffolding by driving protoc
#[derive(Parser, Debug)]
#[command(name = "girder")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(flatten)]
    input: InputMode,

    /// Output directory for generated bindings
    #[arg(short, long, default_value = ".")]
    out: PathBuf,

    /// Workspace roots searched for imports (each is joined with /src)
    #[arg(short = 'I', long = "search-root")]
    search_roots: Vec<PathBuf>,

    /// Explicit path to the protoc executable (PATH lookup by default)
    #[arg(long)]
    protoc: Option<PathBuf>,

    /// Skip binding generation; only report the service definition file
    #[arg(long)]
    no_bindings: bool,

    /// Print the contents of the service definition file to stdout
    #[arg(long)]
    print_svc: bool,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
struct InputMode {
    /// Explicit .proto files to compile
    #[arg(short, long, num_args = 1..)]
    file: Option<Vec<PathBuf>>,

    /// Directory to scan recursively for .proto files
    #[arg(short, long)]
    directory: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.into()))
        .with_target(false)
        .init();

    let protos = collect_inputs(&cli.input)?;
    debug!("compiling {} proto file(s)", protos.len());

    let proto_dir = protos[0]
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));

    let mut config = ProtocConfig::new();
    if let Some(ref path) = cli.protoc {
        config = config.protoc_path(path);
    }
    let protoc = Protoc::with_config(config);

    if !cli.no_bindings {
        fs::create_dir_all(&cli.out)
            .with_context(|| format!("Failed to create output directory: {}", cli.out.display()))?;

        BindingGenerator::with_protoc(protoc.clone())
            .generate(&protos, &cli.search_roots, &cli.out)
            .context("Failed to generate bindings")?;
        info!("Bindings written to {}", cli.out.display());
    }

    let request = DescriptorExtractor::with_protoc(protoc)
        .extract(&protos, &cli.search_roots)
        .context("Failed to extract definitions from protoc")?;

    let svc_name = service_file_name(&request)
        .context("Failed to locate a service definition")?;
    info!("Service declared in {}", svc_name);

    if cli.print_svc {
        let mut svc_file = find_service_file(&request, &proto_dir)
            .context("Failed to open the service definition")?;
        let mut contents = String::new();
        svc_file
            .read_to_string(&mut contents)
            .with_context(|| format!("Failed to read service file: {}", svc_name))?;
        print!("{contents}");
    } else {
        println!("{}", proto_dir.join(svc_name).display());
    }

    Ok(())
}

/// Resolve the input mode to a concrete, ordered list of proto files
fn collect_inputs(input: &InputMode) -> Result<Vec<PathBuf>> {
    if let Some(ref files) = input.file {
        for file in files {
            if !file.is_file() {
                bail!("Input file does not exist: {}", file.display());
            }
        }
        return Ok(files.clone());
    }

    let directory = input
        .directory
        .as_ref()
        .expect("clap guarantees one input mode");
    if !directory.is_dir() {
        bail!("Path is not a directory: {}", directory.display());
    }

    info!("Scanning directory: {}", directory.display());

    let mut protos: Vec<PathBuf> = WalkDir::new(directory)
        .follow_links(false)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.path().is_file())
        .filter(|e| e.path().extension().is_some_and(|ext| ext == "proto"))
        .map(|e| e.into_path())
        .collect();
    protos.sort();

    if protos.is_empty() {
        bail!("No .proto files found in: {}", directory.display());
    }

    Ok(protos)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collect_explicit_files_preserves_order() {
        let dir = tempfile::tempdir().unwrap();
        let b = dir.path().join("b.proto");
        let a = dir.path().join("a.proto");
        fs::write(&b, "").unwrap();
        fs::write(&a, "").unwrap();

        let input = InputMode {
            file: Some(vec![b.clone(), a.clone()]),
            directory: None,
        };
        assert_eq!(collect_inputs(&input).unwrap(), vec![b, a]);
    }

    #[test]
    fn test_collect_directory_sorts_and_filters() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("z.proto"), "").unwrap();
        fs::write(dir.path().join("a.proto"), "").unwrap();
        fs::write(dir.path().join("notes.txt"), "").unwrap();

        let input = InputMode {
            file: None,
            directory: Some(dir.path().to_path_buf()),
        };
        let protos = collect_inputs(&input).unwrap();
        assert_eq!(
            protos,
            vec![dir.path().join("a.proto"), dir.path().join("z.proto")]
        );
    }

    #[test]
    fn test_collect_missing_file_fails() {
        let input = InputMode {
            file: Some(vec![PathBuf::from("/nonexistent/x.proto")]),
            directory: None,
        };
        assert!(collect_inputs(&input).is_err());
    }
}
