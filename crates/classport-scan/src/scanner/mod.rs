//! Scanner: single forward pass over a constant-pool byte buffer.
//!
//! What it does
//! - Reads one tag byte at the cursor, looks up the payload width implied by
//!   the tag, and steps over `1 + width` bytes. Records are yielded as
//!   [`PoolRecord`] views borrowing the caller's buffer; nothing is copied.
//! - UTF-8 records are sized from their big-endian `u16` length prefix. Their
//!   text is handed out as raw bytes (`&BStr`), never validated as modified
//!   UTF-8.
//! - Unknown tags advance past the tag byte only. The format is assumed to
//!   grow by appending tags, so the scanner keeps going instead of giving up.
//!
//! Bounds
//! - The extent scanned is `min(bound, buffer.len())`, in bytes. A record
//!   whose payload would cross that extent yields [`ScanError::Truncated`]
//!   and ends the iteration. No read ever goes past the extent.
//!
//! Invariants
//! - The cursor only moves forward, by exactly the encoded size of each
//!   record. No record is visited twice.
//! - After an error the scanner is fused and yields `None`.
//!
//! [`scan`] layers the [`AnnotationExtractor`] over the record stream and
//! reports to a [`DiagnosticSink`].

use bstr::{BStr, ByteSlice};

use crate::{
    cursor::Cursor,
    error::{ScanError, ScanFailure},
    extractor::{AnnotationExtractor, Observation},
    options::ScanOptions,
    record::AnnotationRecord,
    sink::DiagnosticSink,
    tag::{PayloadWidth, PoolTag},
};


/// One record, as found at `offset` in the scanned buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolRecord<'a> {
    pub tag: PoolTag,
    pub offset: usize,
    /// Bytes after the tag byte. For UTF-8 records this includes the length
    /// prefix.
    pub payload: &'a [u8],
}

impl<'a> PoolRecord<'a> {
    /// Total encoded size, tag byte included.
    #[must_use]
    pub fn encoded_len(&self) -> usize {
        1 + self.payload.len()
    }

    /// Text of a UTF-8 record; `None` for every other tag.
    #[must_use]
    pub fn text(&self) -> Option<&'a BStr> {
        match self.tag {
            PoolTag::Utf8 => self.payload.get(2..).map(|t| t.as_bstr()),
            _ => None,
        }
    }
}

/// Iterator over the records of a constant-pool buffer.
#[derive(Debug, Clone)]
pub struct PoolScanner<'a> {
    cursor: Cursor<'a>,
    failed: bool,
}

impl<'a> PoolScanner<'a> {
    /// Scans `buffer` up to `bound` bytes.
    #[must_use]
    pub fn new(buffer: &'a [u8], bound: usize) -> Self {
        let extent = bound.min(buffer.len());
        Self {
            cursor: Cursor::new(&buffer[..extent]),
            failed: false,
        }
    }

    /// Offset of the next tag byte.
    #[must_use]
    pub fn position(&self) -> usize {
        self.cursor.position()
    }

    fn payload_len(&self, tag: PoolTag) -> usize {
        match tag.width() {
            PayloadWidth::Fixed(n) => n,
            // A missing prefix is reported as needing the prefix itself.
            PayloadWidth::LengthPrefixed => self
                .cursor
                .peek_at(0, 2)
                .map_or(2, |p| 2 + usize::from(u16::from_be_bytes([p[0], p[1]]))),
        }
    }
}

impl<'a> Iterator for PoolScanner<'a> {
    type Item = Result<PoolRecord<'a>, ScanError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        let offset = self.cursor.position();
        let tag = PoolTag::from_byte(self.cursor.read_u8()?);
        let needed = self.payload_len(tag);
        if let Some(payload) = self.cursor.take(needed) {
            Some(Ok(PoolRecord {
                tag,
                offset,
                payload,
            }))
        } else {
            self.failed = true;
            Some(Err(ScanError::Truncated {
                offset,
                tag,
                needed,
                remaining: self.cursor.remaining(),
            }))
        }
    }
}

impl core::iter::FusedIterator for PoolScanner<'_> {}

/// One scan request from the instrumentation hook.
#[derive(Debug, Clone, Copy)]
pub struct ScanRequest<'a> {
    /// Raw constant-pool bytes, owned by the host.
    pub buffer: &'a [u8],
    /// Byte extent the host declares valid.
    pub bound: usize,
    pub class_signature: &'a BStr,
    pub method_name: &'a BStr,
}

impl<'a> ScanRequest<'a> {
    /// A request covering the whole buffer.
    pub fn new<C, M>(buffer: &'a [u8], class_signature: &'a C, method_name: &'a M) -> Self
    where
        C: AsRef<[u8]> + ?Sized,
        M: AsRef<[u8]> + ?Sized,
    {
        Self {
            buffer,
            bound: buffer.len(),
            class_signature: class_signature.as_ref().as_bstr(),
            method_name: method_name.as_ref().as_bstr(),
        }
    }

    #[must_use]
    pub fn with_bound(mut self, bound: usize) -> Self {
        self.bound = bound;
        self
    }
}

/// Walks one constant pool and extracts the provenance annotation's pairs.
///
/// Returns `Ok(None)` when the annotation descriptor never appears. Pairs are
/// delivered to `sink` as they complete; the returned record holds the same
/// pairs in order.
///
/// # Errors
///
/// A record running past the bound aborts the call with a [`ScanFailure`]
/// that keeps the pairs decoded before the failure.
pub fn scan<S: DiagnosticSink + ?Sized>(
    request: &ScanRequest<'_>,
    options: &ScanOptions,
    sink: &mut S,
) -> Result<Option<AnnotationRecord>, ScanFailure> {
    if request.bound > request.buffer.len() {
        tracing::debug!(
            bound = request.bound,
            len = request.buffer.len(),
            "scan bound exceeds buffer; clamping"
        );
    }

    let class = request.class_signature;
    let method = request.method_name;
    let mut record = AnnotationRecord::new(class, method);
    let mut extractor = AnnotationExtractor::new(options);
    let mut found = false;
    let mut records = 0usize;

    for item in PoolScanner::new(request.buffer, request.bound) {
        let rec = match item {
            Ok(rec) => rec,
            Err(error) => {
                sink.scan_failed(class, method, &error);
                return Err(ScanFailure {
                    error,
                    decoded: record,
                });
            }
        };
        records += 1;
        match rec.tag {
            PoolTag::Utf8 => {
                let Some(text) = rec.text() else { continue };
                match extractor.observe(text) {
                    Observation::Opened => {
                        found = true;
                        sink.annotation_found(class, method, text);
                    }
                    Observation::PendingKey => record.text_run.push(text.to_owned()),
                    Observation::Pair(key, value) => {
                        sink.pair(class, method, key.as_bstr(), value.as_bstr());
                        record.text_run.push(value.clone());
                        record.pairs.push((key, value));
                    }
                    _ => {}
                }
            }
            PoolTag::Unknown(tag) => {
                tracing::warn!(tag, offset = rec.offset, "unknown constant pool type");
                sink.unknown_tag(tag, rec.offset);
            }
            _ => {}
        }
    }

    tracing::debug!(
        class = %class,
        method = %method,
        records,
        pairs = record.pairs.len(),
        "constant pool scanned"
    );
    Ok(found.then_some(record))
}
