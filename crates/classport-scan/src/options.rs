use bstr::{BStr, BString, ByteSlice};

/// Type descriptor of the provenance annotation the build tool embeds.
pub const DEFAULT_ANNOTATION_DESCRIPTOR: &str =
    "Lio/github/chains_project/classport/commons/ClassportInfo;";

/// Attribute name that follows the annotation's text run in the pool.
pub const DEFAULT_ATTRIBUTE_MARKER: &str = "RuntimeVisibleAnnotations";

/// Annotation member whose value is an Integer record, not text.
pub const DEFAULT_RESERVED_KEY: &str = "isDirectDependency";

/// Configuration for the annotation extractor.
///
/// These options name the two sentinel texts and the keys that carry no
/// text value. Everything else about the scan is fixed by the constant-pool
/// format.
///
/// # Default
///
/// The defaults match the Classport build tool's annotation layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanOptions {
    /// Descriptor that switches the extractor into capturing mode.
    ///
    /// # Default
    ///
    /// [`DEFAULT_ANNOTATION_DESCRIPTOR`]
    pub annotation_descriptor: BString,

    /// Text that ends the capturing run.
    ///
    /// # Default
    ///
    /// [`DEFAULT_ATTRIBUTE_MARKER`]
    pub attribute_marker: BString,

    /// Keys skipped while capturing. They are never paired.
    ///
    /// # Default
    ///
    /// `[`[`DEFAULT_RESERVED_KEY`]`]`
    pub reserved_keys: Vec<BString>,

    /// What happens to the text that follows a reserved key.
    ///
    /// # Default
    ///
    /// [`ReservedKeyPolicy::SkipKeyAndValue`]
    pub reserved_key_policy: ReservedKeyPolicy,
}

/// Handling of reserved keys seen while capturing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReservedKeyPolicy {
    /// Drop the reserved key and the next text value, so a text value stored
    /// for the reserved member never becomes a key. Markers are still honored.
    #[default]
    SkipKeyAndValue,
    /// Drop only the reserved key; the next text value is treated as a key.
    SkipKey,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            annotation_descriptor: DEFAULT_ANNOTATION_DESCRIPTOR.into(),
            attribute_marker: DEFAULT_ATTRIBUTE_MARKER.into(),
            reserved_keys: vec![DEFAULT_RESERVED_KEY.into()],
            reserved_key_policy: ReservedKeyPolicy::default(),
        }
    }
}

impl ScanOptions {
    /// Replaces the annotation descriptor, keeping the other defaults.
    #[must_use]
    pub fn with_descriptor(mut self, descriptor: impl Into<BString>) -> Self {
        self.annotation_descriptor = descriptor.into();
        self
    }

    #[must_use]
    pub fn is_reserved(&self, text: &BStr) -> bool {
        self.reserved_keys.iter().any(|k| k.as_bstr() == text)
    }
}
