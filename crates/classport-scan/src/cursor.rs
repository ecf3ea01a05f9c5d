//! Forward-only, bounds-checked reader over a borrowed byte slice.
//!
//! Every read checks the remaining length first; a read that does not fit
//! returns `None` and leaves the position untouched.

#[derive(Debug, Clone)]
pub(crate) struct Cursor<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub(crate) fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    #[inline]
    pub(crate) fn position(&self) -> usize {
        self.pos
    }

    #[inline]
    pub(crate) fn remaining(&self) -> usize {
        self.bytes.len() - self.pos
    }

    /// Looks at `len` bytes starting `skip` bytes ahead without consuming.
    #[inline]
    pub(crate) fn peek_at(&self, skip: usize, len: usize) -> Option<&'a [u8]> {
        let start = self.pos.checked_add(skip)?;
        let end = start.checked_add(len)?;
        self.bytes.get(start..end)
    }

    #[inline]
    pub(crate) fn read_u8(&mut self) -> Option<u8> {
        let b = *self.bytes.get(self.pos)?;
        self.pos += 1;
        Some(b)
    }

    #[inline]
    pub(crate) fn read_u16(&mut self) -> Option<u16> {
        let b = self.peek_at(0, 2)?;
        let v = u16::from_be_bytes([b[0], b[1]]);
        self.pos += 2;
        Some(v)
    }

    #[inline]
    pub(crate) fn read_u32(&mut self) -> Option<u32> {
        let b = self.peek_at(0, 4)?;
        let v = u32::from_be_bytes([b[0], b[1], b[2], b[3]]);
        self.pos += 4;
        Some(v)
    }

    #[inline]
    pub(crate) fn take(&mut self, len: usize) -> Option<&'a [u8]> {
        let b = self.peek_at(0, len)?;
        self.pos += len;
        Some(b)
    }

    /// Everything from the current position to the end, without consuming.
    #[inline]
    pub(crate) fn rest(&self) -> &'a [u8] {
        &self.bytes[self.pos..]
    }
}
