//! Single-pass constant-pool scanner for Classport provenance annotations.
//!
//! A build tool embeds provenance metadata (artefact coordinates, version,
//! dependency ids) into compiled classes as a custom annotation. When a
//! method of such a class first runs, the host hands its declaring class's
//! raw constant pool to [`scan`], which walks the tagged records once and
//! folds the annotation's text records into key/value pairs.
//!
//! ```rust
//! use classport_scan::{PoolWriter, RecordingSink, ScanOptions, ScanRequest, scan};
//!
//! let options = ScanOptions::default();
//! let mut pool = PoolWriter::new();
//! pool.utf8(&options.annotation_descriptor)?
//!     .utf8("groupId")?
//!     .utf8("org.example")?
//!     .utf8("RuntimeVisibleAnnotations")?;
//!
//! let mut sink = RecordingSink::new();
//! let request = ScanRequest::new(pool.as_bytes(), "Lcom/example/Foo;", "run");
//! let record = scan(&request, &options, &mut sink)?.expect("annotated");
//! assert_eq!(record.get("groupId").unwrap(), "org.example");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![allow(missing_docs)]

mod cursor;

mod agent;
mod class_file;
mod config;
mod error;
mod extractor;
mod guard;
mod options;
mod pool_writer;
mod provenance;
mod record;
mod scanner;
mod sink;
mod tag;

#[cfg(test)]
mod tests;

pub use agent::{Agent, ReflectiveLookup};
pub use class_file::{CLASS_MAGIC, ClassFile};
pub use config::AgentConfig;
pub use error::{
    ClassFileError, ConfigError, EncodeError, LookupError, ProvenanceError, ScanError, ScanFailure,
};
pub use extractor::{AnnotationExtractor, Observation};
pub use guard::{EventGate, HookSuspension, with_hook_suspended};
pub use options::{
    DEFAULT_ANNOTATION_DESCRIPTOR, DEFAULT_ATTRIBUTE_MARKER, DEFAULT_RESERVED_KEY,
    ReservedKeyPolicy, ScanOptions,
};
pub use pool_writer::PoolWriter;
pub use provenance::ProvenanceInfo;
pub use record::AnnotationRecord;
pub use scanner::{PoolRecord, PoolScanner, ScanRequest, scan};
pub use sink::{DiagnosticSink, RecordingSink, SinkEvent, TracingSink};
pub use tag::{PayloadWidth, PoolTag};
