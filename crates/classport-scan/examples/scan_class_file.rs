//! Scans a compiled class for its embedded Classport provenance, the way the
//! agent does on a method's first entry, and prints the typed result.
//!
//! The constant pool is located with [`ClassFile`], handed to an [`Agent`]
//! that logs through `tracing`, and the extracted pairs are read back as a
//! [`ProvenanceInfo`].
//!
//! Run with
//!
//! ```bash
//! RUST_LOG=classport_scan=debug \
//!   cargo run -p classport-scan --example scan_class_file -- path/to/Foo.class
//! ```

use std::{env, fs, path::Path, process::ExitCode};

use classport_scan::{Agent, ClassFile, ProvenanceInfo, ScanRequest, TracingSink};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_target(false)
        .init();

    let Some(path) = env::args().nth(1) else {
        eprintln!("usage: scan_class_file <file.class> [annotation-jar]");
        return ExitCode::FAILURE;
    };
    // The jar is only checked for presence; any placeholder works here.
    let jar = env::args().nth(2).unwrap_or_else(|| "classport-commons.jar".into());

    let bytes = match fs::read(&path) {
        Ok(bytes) => bytes,
        Err(err) => {
            eprintln!("{path}: {err}");
            return ExitCode::FAILURE;
        }
    };
    let class = match ClassFile::parse(&bytes) {
        Ok(class) => class,
        Err(err) => {
            eprintln!("{path}: {err}");
            return ExitCode::FAILURE;
        }
    };
    tracing::debug!(
        major = class.major_version,
        entries = class.pool_count,
        pool_bytes = class.constant_pool().len(),
        "located constant pool"
    );

    let stem = Path::new(&path)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let signature = format!("L{stem};");

    let mut agent = match Agent::initialize(Some(&jar), TracingSink) {
        Ok(agent) => agent,
        Err(err) => {
            eprintln!("{err}");
            return ExitCode::FAILURE;
        }
    };
    let Some(record) = agent.on_method_entry(Ok(ScanRequest::new(
        class.constant_pool(),
        signature.as_str(),
        "<clinit>",
    ))) else {
        println!("{path}: no provenance annotation");
        return ExitCode::SUCCESS;
    };

    match ProvenanceInfo::from_record(&record) {
        Ok(info) => {
            println!("id:       {}", info.id);
            println!("group:    {}", info.group);
            println!("artefact: {}", info.artefact);
            println!("version:  {}", info.version);
            if let Some(source) = &info.source_project_id {
                println!("source:   {source}");
            }
            for child in &info.child_ids {
                println!("child:    {child}");
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("{path}: {err}");
            ExitCode::FAILURE
        }
    }
}
