use bstr::{BStr, BString, ByteSlice};

/// Pairs extracted from one scan call, tagged with the class and method that
/// triggered it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct AnnotationRecord {
    /// Signature of the declaring class, e.g. `Lcom/example/Foo;`.
    pub class_signature: BString,
    /// Name of the method whose entry triggered the scan.
    pub method_name: BString,
    /// Captured text folded two at a time, in pool order.
    pub pairs: Vec<(BString, BString)>,
    /// Every captured text value in pool order, reserved keys and their
    /// skipped values excluded.
    ///
    /// Array members write one text per element, so a run with a multi-valued
    /// member does not alternate cleanly. This keeps what `pairs` loses,
    /// including a trailing key that never got a value.
    pub text_run: Vec<BString>,
}

impl AnnotationRecord {
    #[must_use]
    pub fn new(class_signature: impl Into<BString>, method_name: impl Into<BString>) -> Self {
        Self {
            class_signature: class_signature.into(),
            method_name: method_name.into(),
            pairs: Vec::new(),
            text_run: Vec::new(),
        }
    }

    /// Appends a pair and its two texts.
    pub fn push_pair(&mut self, key: impl Into<BString>, value: impl Into<BString>) {
        let (key, value) = (key.into(), value.into());
        self.text_run.push(key.clone());
        self.text_run.push(value.clone());
        self.pairs.push((key, value));
    }

    /// First value stored under `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&BStr> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_bstr())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}
