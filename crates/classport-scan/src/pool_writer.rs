//! Encodes constant-pool records in class-file wire format.
//!
//! Used to build the provenance entries the build tool appends to a class's
//! constant pool, and to assemble pools for tests and benchmarks.

use bstr::{BStr, ByteSlice};

use crate::{error::EncodeError, options::ScanOptions, provenance::ProvenanceInfo, tag::PoolTag};

/// Appends records to an in-memory pool.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PoolWriter {
    bytes: Vec<u8>,
    slots: u16,
}

impl PoolWriter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Encoded bytes so far.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    /// Index slots used so far. Long and Double records count twice.
    #[must_use]
    pub fn slot_count(&self) -> u16 {
        self.slots
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    fn record(&mut self, tag: PoolTag, payload: &[u8]) -> Result<&mut Self, EncodeError> {
        self.slots = self
            .slots
            .checked_add(tag.slots())
            .ok_or(EncodeError::TooManyEntries)?;
        self.bytes.push(tag.to_byte());
        self.bytes.extend_from_slice(payload);
        Ok(self)
    }

    /// # Errors
    ///
    /// Text longer than `u16::MAX` bytes has no encoding.
    pub fn utf8(&mut self, text: impl AsRef<[u8]>) -> Result<&mut Self, EncodeError> {
        let text = text.as_ref();
        let len = u16::try_from(text.len()).map_err(|_| EncodeError::TextTooLong(text.len()))?;
        let mut payload = Vec::with_capacity(2 + text.len());
        payload.extend_from_slice(&len.to_be_bytes());
        payload.extend_from_slice(text);
        self.record(PoolTag::Utf8, &payload)
    }

    /// # Errors
    ///
    /// Fails once the pool is full.
    pub fn integer(&mut self, value: i32) -> Result<&mut Self, EncodeError> {
        self.record(PoolTag::Integer, &value.to_be_bytes())
    }

    /// # Errors
    ///
    /// Fails once the pool is full.
    pub fn float(&mut self, value: f32) -> Result<&mut Self, EncodeError> {
        self.record(PoolTag::Float, &value.to_bits().to_be_bytes())
    }

    /// # Errors
    ///
    /// Fails once the pool is full.
    pub fn long(&mut self, value: i64) -> Result<&mut Self, EncodeError> {
        self.record(PoolTag::Long, &value.to_be_bytes())
    }

    /// # Errors
    ///
    /// Fails once the pool is full.
    pub fn double(&mut self, value: f64) -> Result<&mut Self, EncodeError> {
        self.record(PoolTag::Double, &value.to_bits().to_be_bytes())
    }

    /// Writes a record whose payload is a single pool index: Class, String,
    /// MethodType, Module or Package.
    ///
    /// # Errors
    ///
    /// Fails once the pool is full.
    pub fn index_ref(&mut self, tag: PoolTag, index: u16) -> Result<&mut Self, EncodeError> {
        debug_assert_eq!(tag.width(), crate::tag::PayloadWidth::Fixed(2));
        self.record(tag, &index.to_be_bytes())
    }

    /// Writes a record whose payload is two pool indices: Fieldref,
    /// Methodref, InterfaceMethodref, NameAndType or InvokeDynamic.
    ///
    /// # Errors
    ///
    /// Fails once the pool is full.
    pub fn pair_ref(
        &mut self,
        tag: PoolTag,
        first: u16,
        second: u16,
    ) -> Result<&mut Self, EncodeError> {
        debug_assert_eq!(tag.width(), crate::tag::PayloadWidth::Fixed(4));
        let [a, b] = first.to_be_bytes();
        let [c, d] = second.to_be_bytes();
        self.record(tag, &[a, b, c, d])
    }

    /// # Errors
    ///
    /// Fails once the pool is full.
    pub fn method_handle(&mut self, kind: u8, index: u16) -> Result<&mut Self, EncodeError> {
        let [a, b] = index.to_be_bytes();
        self.record(PoolTag::MethodHandle, &[kind, a, b])
    }

    /// Writes an arbitrary tag byte followed by `payload`, for tags the
    /// scanner does not know.
    ///
    /// # Errors
    ///
    /// Fails once the pool is full.
    pub fn raw(&mut self, tag: u8, payload: &[u8]) -> Result<&mut Self, EncodeError> {
        self.record(PoolTag::from_byte(tag), payload)
    }

    /// Appends the provenance entries in the order the build tool injects
    /// them: the descriptor, one key/value text pair per field, then the
    /// reserved flag key followed by its Integer value.
    ///
    /// `childIds` is written as its key followed by one text per child, so
    /// the run only alternates cleanly with exactly one child; read it back
    /// with [`ProvenanceInfo::from_record`].
    ///
    /// # Errors
    ///
    /// Fails if a value is too long for a UTF-8 record.
    pub fn provenance_entries(
        &mut self,
        info: &ProvenanceInfo,
        is_direct_dependency: bool,
        options: &ScanOptions,
    ) -> Result<&mut Self, EncodeError> {
        self.utf8(&options.annotation_descriptor)?;
        self.text_pair("group", info.group.as_bstr())?;
        self.text_pair("version", info.version.as_bstr())?;
        self.text_pair("id", info.id.as_bstr())?;
        if let Some(source) = &info.source_project_id {
            self.text_pair("sourceProjectId", source.as_bstr())?;
        }
        self.utf8("childIds")?;
        for child in &info.child_ids {
            self.utf8(child)?;
        }
        self.text_pair("artefact", info.artefact.as_bstr())?;
        match options.reserved_keys.first() {
            Some(flag) => {
                self.utf8(flag)?;
                self.integer(i32::from(is_direct_dependency))
            }
            None => Ok(self),
        }
    }

    fn text_pair(&mut self, key: &str, value: &BStr) -> Result<&mut Self, EncodeError> {
        self.utf8(key)?.utf8(value)
    }
}
