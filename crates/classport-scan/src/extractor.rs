//! Annotation extractor: the state machine layered over decoded UTF-8 records.
//!
//! The constant pool stores the annotation descriptor followed by a flat run
//! of member names and text values, with no nesting markers. Pair boundaries
//! are therefore inferred by counting text records two at a time after the
//! descriptor, until the attribute-list marker shows up.
//!
//! States
//! - `Idle`: text is ignored until the descriptor is seen.
//! - `Capturing`: text alternates between key and value. Reserved keys are
//!   dropped without taking a slot in the alternation; under
//!   [`ReservedKeyPolicy::SkipKeyAndValue`] the text right after a reserved
//!   key in key position is dropped as well.
//!
//! Marker checks come first, in the order descriptor then attribute marker,
//! so a marker is never swallowed as a key, value or skipped value.

use bstr::{BStr, BString, ByteSlice};

use crate::options::{ReservedKeyPolicy, ScanOptions};

/// What the extractor did with one text value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Observation {
    /// Not capturing and not a marker.
    Ignored,
    /// The annotation descriptor; capturing (re)starts.
    Opened,
    /// The attribute-list marker; capturing stops.
    Closed,
    /// A reserved key seen while capturing.
    Reserved,
    /// The value that belonged to a reserved key.
    SkippedValue,
    /// Held as the key of the next pair.
    PendingKey,
    /// A completed `(key, value)` pair.
    Pair(BString, BString),
}

/// Per-scan extraction state. Starts `Idle` with no pending key.
#[derive(Debug)]
pub struct AnnotationExtractor<'o> {
    options: &'o ScanOptions,
    capturing: bool,
    pending_key: Option<BString>,
    skip_value: bool,
}

impl<'o> AnnotationExtractor<'o> {
    #[must_use]
    pub fn new(options: &'o ScanOptions) -> Self {
        Self {
            options,
            capturing: false,
            pending_key: None,
            skip_value: false,
        }
    }

    #[must_use]
    pub fn is_capturing(&self) -> bool {
        self.capturing
    }

    #[must_use]
    pub fn pending_key(&self) -> Option<&BStr> {
        self.pending_key.as_ref().map(|k| k.as_bstr())
    }

    /// Feeds one decoded text value.
    pub fn observe(&mut self, text: &BStr) -> Observation {
        if text == self.options.annotation_descriptor.as_bstr() {
            self.capturing = true;
            self.reset_pairing();
            return Observation::Opened;
        }
        if text == self.options.attribute_marker.as_bstr() {
            self.capturing = false;
            self.reset_pairing();
            return Observation::Closed;
        }
        if !self.capturing {
            return Observation::Ignored;
        }
        if self.options.is_reserved(text) {
            // Only a reserved key in key position owns the following value.
            if self.pending_key.is_none()
                && self.options.reserved_key_policy == ReservedKeyPolicy::SkipKeyAndValue
            {
                self.skip_value = true;
            }
            return Observation::Reserved;
        }
        if self.skip_value {
            self.skip_value = false;
            return Observation::SkippedValue;
        }
        match self.pending_key.take() {
            Some(key) => Observation::Pair(key, text.to_owned()),
            None => {
                self.pending_key = Some(text.to_owned());
                Observation::PendingKey
            }
        }
    }

    fn reset_pairing(&mut self) {
        self.pending_key = None;
        self.skip_value = false;
    }
}
