//! Locates the constant pool inside a class file.
//!
//! Only the fixed header is read: magic, minor and major version, and the
//! pool's slot count. The pool is then walked with the same width table the
//! scanner uses until the count is exhausted, which gives its byte extent.
//! Sections after the pool are never looked at.

use crate::{cursor::Cursor, error::ClassFileError, scanner::PoolScanner, tag::PoolTag};

pub const CLASS_MAGIC: u32 = 0xCAFE_BABE;

/// Header fields and the constant-pool slice of a class file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassFile<'a> {
    pub minor_version: u16,
    pub major_version: u16,
    /// `constant_pool_count` as stored: one more than the highest index.
    pub pool_count: u16,
    /// Byte offset of the first pool record in the file.
    pub pool_offset: usize,
    pool: &'a [u8],
}

impl<'a> ClassFile<'a> {
    /// # Errors
    ///
    /// Fails on a bad magic number, a truncated header, a truncated pool
    /// record, or a tag whose size is unknown.
    pub fn parse(bytes: &'a [u8]) -> Result<Self, ClassFileError> {
        let mut header = Cursor::new(bytes);
        let magic = header.read_u32().ok_or(ClassFileError::UnexpectedEof)?;
        if magic != CLASS_MAGIC {
            return Err(ClassFileError::BadMagic(magic));
        }
        let minor_version = header.read_u16().ok_or(ClassFileError::UnexpectedEof)?;
        let major_version = header.read_u16().ok_or(ClassFileError::UnexpectedEof)?;
        let pool_count = header.read_u16().ok_or(ClassFileError::UnexpectedEof)?;
        let pool_offset = header.position();
        let body = header.rest();

        let mut records = PoolScanner::new(body, body.len());
        let mut index = 1u16;
        while index < pool_count {
            let rec = match records.next() {
                Some(Ok(rec)) => rec,
                Some(Err(source)) => return Err(ClassFileError::Pool { index, source }),
                None => return Err(ClassFileError::UnexpectedEof),
            };
            if let PoolTag::Unknown(tag) = rec.tag {
                return Err(ClassFileError::UnknownTag { index, tag });
            }
            index = index.saturating_add(rec.tag.slots());
        }

        Ok(Self {
            minor_version,
            major_version,
            pool_count,
            pool_offset,
            pool: &body[..records.position()],
        })
    }

    /// Raw bytes of every pool record, ready for the scanner.
    #[must_use]
    pub fn constant_pool(&self) -> &'a [u8] {
        self.pool
    }
}
