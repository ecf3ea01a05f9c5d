//! Diagnostic output for scan results.
//!
//! The scanner streams what it finds into a [`DiagnosticSink`] as it goes:
//! the annotation header as soon as the descriptor shows up, then one call
//! per completed pair. Nothing is batched.

use core::fmt::Write as _;

use bstr::{BStr, BString, ByteSlice};

use crate::error::{LookupError, ScanError};

/// Receives scan output, tagged with the originating class and method.
pub trait DiagnosticSink {
    /// The annotation descriptor was found.
    fn annotation_found(&mut self, class_signature: &BStr, method_name: &BStr, descriptor: &BStr);

    /// A key/value pair was completed.
    fn pair(&mut self, class_signature: &BStr, method_name: &BStr, key: &BStr, value: &BStr);

    /// A record carried a tag the scanner cannot size.
    fn unknown_tag(&mut self, _tag: u8, _offset: usize) {}

    /// The scan stopped early. Pairs already delivered belong to an
    /// incomplete record.
    fn scan_failed(&mut self, _class_signature: &BStr, _method_name: &BStr, _error: &ScanError) {}

    /// The host could not produce a scan request.
    fn lookup_failed(&mut self, _error: &LookupError) {}
}

impl<S: DiagnosticSink + ?Sized> DiagnosticSink for &mut S {
    fn annotation_found(&mut self, class_signature: &BStr, method_name: &BStr, descriptor: &BStr) {
        (**self).annotation_found(class_signature, method_name, descriptor);
    }

    fn pair(&mut self, class_signature: &BStr, method_name: &BStr, key: &BStr, value: &BStr) {
        (**self).pair(class_signature, method_name, key, value);
    }

    fn unknown_tag(&mut self, tag: u8, offset: usize) {
        (**self).unknown_tag(tag, offset);
    }

    fn scan_failed(&mut self, class_signature: &BStr, method_name: &BStr, error: &ScanError) {
        (**self).scan_failed(class_signature, method_name, error);
    }

    fn lookup_failed(&mut self, error: &LookupError) {
        (**self).lookup_failed(error);
    }
}

/// Logs every event through `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn annotation_found(&mut self, class_signature: &BStr, method_name: &BStr, descriptor: &BStr) {
        tracing::info!(
            class = %class_signature,
            method = %method_name,
            annotation = %descriptor,
            "found custom annotation"
        );
    }

    fn pair(&mut self, class_signature: &BStr, method_name: &BStr, key: &BStr, value: &BStr) {
        tracing::info!(
            class = %class_signature,
            method = %method_name,
            "{key}: {value}"
        );
    }

    fn scan_failed(&mut self, class_signature: &BStr, method_name: &BStr, error: &ScanError) {
        tracing::error!(
            class = %class_signature,
            method = %method_name,
            %error,
            "constant pool scan aborted"
        );
    }

    fn lookup_failed(&mut self, error: &LookupError) {
        tracing::error!(%error, "method entry lookup failed");
    }
}

/// One event captured by [`RecordingSink`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SinkEvent {
    AnnotationFound {
        class_signature: BString,
        method_name: BString,
        descriptor: BString,
    },
    Pair {
        class_signature: BString,
        method_name: BString,
        key: BString,
        value: BString,
    },
    UnknownTag {
        tag: u8,
        offset: usize,
    },
    ScanFailed {
        class_signature: BString,
        method_name: BString,
        error: ScanError,
    },
    LookupFailed(LookupError),
}

/// Keeps every event in order.
#[derive(Debug, Default, Clone)]
pub struct RecordingSink {
    pub events: Vec<SinkEvent>,
}

impl RecordingSink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All pairs seen so far, across scans.
    pub fn pairs(&self) -> impl Iterator<Item = (&BStr, &BStr)> {
        self.events.iter().filter_map(|e| match e {
            SinkEvent::Pair { key, value, .. } => Some((key.as_bstr(), value.as_bstr())),
            _ => None,
        })
    }

    /// Renders the events as the agent's console report.
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = String::new();
        for event in &self.events {
            // Writing into a String cannot fail.
            let _ = match event {
                SinkEvent::AnnotationFound {
                    class_signature,
                    method_name,
                    descriptor,
                } => writeln!(
                    out,
                    "--------------------\nFound custom annotation: {descriptor}\nClass: {class_signature}\nMethod: {method_name}"
                ),
                SinkEvent::Pair { key, value, .. } => writeln!(out, "{key}: {value}"),
                SinkEvent::UnknownTag { tag, offset } => {
                    writeln!(out, "Unknown constant pool type '{tag}' at offset {offset}")
                }
                SinkEvent::ScanFailed { error, .. } => writeln!(out, "Scan failed: {error}"),
                SinkEvent::LookupFailed(error) => writeln!(out, "Lookup failed: {error}"),
            };
        }
        out
    }
}

impl DiagnosticSink for RecordingSink {
    fn annotation_found(&mut self, class_signature: &BStr, method_name: &BStr, descriptor: &BStr) {
        self.events.push(SinkEvent::AnnotationFound {
            class_signature: class_signature.to_owned(),
            method_name: method_name.to_owned(),
            descriptor: descriptor.to_owned(),
        });
    }

    fn pair(&mut self, class_signature: &BStr, method_name: &BStr, key: &BStr, value: &BStr) {
        self.events.push(SinkEvent::Pair {
            class_signature: class_signature.to_owned(),
            method_name: method_name.to_owned(),
            key: key.to_owned(),
            value: value.to_owned(),
        });
    }

    fn unknown_tag(&mut self, tag: u8, offset: usize) {
        self.events.push(SinkEvent::UnknownTag { tag, offset });
    }

    fn scan_failed(&mut self, class_signature: &BStr, method_name: &BStr, error: &ScanError) {
        self.events.push(SinkEvent::ScanFailed {
            class_signature: class_signature.to_owned(),
            method_name: method_name.to_owned(),
            error: error.clone(),
        });
    }

    fn lookup_failed(&mut self, error: &LookupError) {
        self.events.push(SinkEvent::LookupFailed(error.clone()));
    }
}
