use super::consts::RECORD_SIZE;
use super::decode::DecodeError;
use super::raw::RawRecord;
use std::io::{ErrorKind, Read};

/// Pulls fixed size entries from a byte source until it runs dry.
pub struct RecordReader<R: Read> {
    reader: R,
    offset: u64,
}

impl<R: Read> RecordReader<R> {
    pub fn new(inner: R) -> Self {
        Self {
            reader: inner,
            offset: 0,
        }
    }

    /// Reads the next entry. `Ok(None)` marks a clean end of stream, a
    /// partial trailing entry is reported as
    /// [`DecodeError::TruncatedRecord`].
    pub fn read_record(&mut self) -> Result<Option<RawRecord>, DecodeError> {
        let mut buf = [0u8; RECORD_SIZE];
        let mut filled = 0;

        while filled < RECORD_SIZE {
            match self.reader.read(&mut buf[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) => return Err(err.into()),
            }
        }

        match filled {
            0 => Ok(None),
            RECORD_SIZE => {
                self.offset += RECORD_SIZE as u64;
                Ok(Some(RawRecord::new(buf)))
            }
            len => Err(DecodeError::TruncatedRecord {
                offset: self.offset,
                len,
            }),
        }
    }

    /// Byte offset of the next entry.
    pub fn offset(&self) -> u64 {
        self.offset
    }
}
