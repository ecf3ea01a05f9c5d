use bstr::BString;
use thiserror::Error;

use crate::{record::AnnotationRecord, tag::PoolTag};

/// Fatal problems found while walking a constant-pool buffer.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ScanError {
    /// A record's payload would extend past the scan extent.
    #[error(
        "{tag} record at offset {offset} needs {needed} payload bytes but only {remaining} remain"
    )]
    Truncated {
        offset: usize,
        tag: PoolTag,
        needed: usize,
        remaining: usize,
    },
}

/// A scan call that stopped at a [`ScanError`].
///
/// `decoded` keeps every pair completed before the failure so callers can
/// still inspect them; the final record was never delivered as a success.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{error}")]
pub struct ScanFailure {
    #[source]
    pub error: ScanError,
    pub decoded: AnnotationRecord,
}

/// Startup configuration problems. These are fatal to agent initialization.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("no annotation jar path was supplied in the agent options")]
    MissingAnnotationJar,
}

/// A runtime lookup the host performs before it can hand over a scan request.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LookupError {
    #[error("declaring class of method could not be resolved")]
    DeclaringClass,
    #[error("class signature unavailable")]
    ClassSignature,
    #[error("method name unavailable")]
    MethodName,
    #[error("constant pool unavailable (host error {0})")]
    ConstantPool(i32),
    #[error("annotation type `{0}` is not loadable")]
    AnnotationType(BString),
    #[error("annotation member `{0}` not found")]
    AnnotationMember(BString),
}

/// Problems locating the constant pool inside a class file.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ClassFileError {
    #[error("not a class file (magic {0:#010x})")]
    BadMagic(u32),
    #[error("class file ends inside its header")]
    UnexpectedEof,
    #[error("constant pool entry {index} has unknown tag {tag}; its size cannot be determined")]
    UnknownTag { index: u16, tag: u8 },
    #[error("constant pool entry {index} is malformed: {source}")]
    Pool {
        index: u16,
        #[source]
        source: ScanError,
    },
}

/// Fields missing when reading a provenance annotation into typed form.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProvenanceError {
    #[error(
        "missing annotation value `{0}`; the class may need to be re-embedded with the current tool version"
    )]
    MissingField(&'static str),
}

/// Values that cannot be encoded as constant-pool records.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EncodeError {
    #[error("text of {0} bytes exceeds the 65535-byte UTF-8 record limit")]
    TextTooLong(usize),
    #[error("constant pool would exceed 65535 entries")]
    TooManyEntries,
}
