//! Positioned byte reading over any `Read` source.

use std::io::{self, Read, Seek, SeekFrom};

use byteorder::ReadBytesExt;

use super::types::error::{DbfError, Result};

/// A forward reader that tracks its absolute offset and can look one byte ahead.
///
/// The look-ahead byte is buffered, so peeking never needs `Seek`.
#[derive(Debug)]
pub struct ByteCursor<R> {
    inner: R,
    offset: u64,
    peeked: Option<u8>,
}

impl<R: Read> ByteCursor<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            offset: 0,
            peeked: None,
        }
    }

    /// Current absolute offset, counting bytes handed out (not bytes buffered).
    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// Reads exactly `n` bytes.
    ///
    /// Fails with [`DbfError::UnexpectedEof`] if the source runs dry; the
    /// offset is left where the read started in that case.
    pub fn read_exact(&mut self, n: usize) -> Result<Vec<u8>> {
        let mut buf = vec![0u8; n];
        self.read_into(&mut buf)?;
        Ok(buf)
    }

    /// Fills `buf` completely, see [`read_exact`](Self::read_exact).
    pub fn read_into(&mut self, buf: &mut [u8]) -> Result<()> {
        if buf.is_empty() {
            return Ok(());
        }
        let mut filled = 0;
        if let Some(byte) = self.peeked.take() {
            buf[0] = byte;
            filled = 1;
        }
        let read = read_fully(&mut self.inner, &mut buf[filled..])?;
        if filled + read < buf.len() {
            return Err(DbfError::UnexpectedEof {
                offset: self.offset,
                wanted: buf.len(),
            });
        }
        self.offset += buf.len() as u64;
        Ok(())
    }

    /// Reads exactly `buf.len()` bytes, or fewer only at end of input, and
    /// reports how many were obtained. The offset advances by that amount.
    pub fn read_available(&mut self, buf: &mut [u8]) -> Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }
        let mut filled = 0;
        if let Some(byte) = self.peeked.take() {
            buf[0] = byte;
            filled = 1;
        }
        filled += read_fully(&mut self.inner, &mut buf[filled..])?;
        self.offset += filled as u64;
        Ok(filled)
    }

    /// Reads a single byte.
    pub fn read_byte(&mut self) -> Result<u8> {
        if let Some(byte) = self.peeked.take() {
            self.offset += 1;
            return Ok(byte);
        }
        match self.inner.read_u8() {
            Ok(byte) => {
                self.offset += 1;
                Ok(byte)
            }
            Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => Err(DbfError::UnexpectedEof {
                offset: self.offset,
                wanted: 1,
            }),
            Err(e) => Err(e.into()),
        }
    }

    /// Looks at the next byte without consuming it; `None` at end of input.
    pub fn try_peek_byte(&mut self) -> Result<Option<u8>> {
        if let Some(byte) = self.peeked {
            return Ok(Some(byte));
        }
        let mut one = [0u8; 1];
        if read_fully(&mut self.inner, &mut one)? == 0 {
            return Ok(None);
        }
        self.peeked = Some(one[0]);
        Ok(self.peeked)
    }

    /// Looks at the next byte without consuming it.
    pub fn peek_byte(&mut self) -> Result<u8> {
        self.try_peek_byte()?.ok_or(DbfError::UnexpectedEof {
            offset: self.offset,
            wanted: 1,
        })
    }

    /// Gives back the underlying source. A buffered peek byte is lost.
    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R: Read + Seek> ByteCursor<R> {
    /// Repositions the cursor. `Current` is relative to [`offset`](Self::offset),
    /// so a pending peek byte is accounted for.
    pub fn seek(&mut self, pos: SeekFrom) -> Result<u64> {
        let pos = match (pos, self.peeked.take()) {
            (SeekFrom::Current(delta), Some(_)) => SeekFrom::Current(delta - 1),
            (pos, _) => pos,
        };
        self.offset = self.inner.seek(pos)?;
        Ok(self.offset)
    }
}

/// Loops over `read` until `buf` is full or the source reports end of input.
fn read_fully<R: Read>(reader: &mut R, buf: &mut [u8]) -> Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        }
    }
    Ok(filled)
}
