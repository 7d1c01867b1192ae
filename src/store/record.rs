//! On-disk record format
//!
//! Each log entry is one book mutation:
//!
//! ```text
//! +------------------+
//! | Record Length    | (u32 LE, includes this field and the checksum)
//! +------------------+
//! | Book ID          | (u64 LE)
//! +------------------+
//! | Tombstone Flag   | (u8: 0 = live, 1 = deleted)
//! +------------------+
//! | Title            | (length-prefixed string, empty for tombstones)
//! +------------------+
//! | Author           | (length-prefixed string, empty for tombstones)
//! +------------------+
//! | Year             | (u8 presence flag, then i32 LE when present)
//! +------------------+
//! | Checksum         | (u32 LE, CRC32 over everything above)
//! +------------------+
//! ```
//!
//! Latest record for an id wins during replay; a tombstone removes the id.

use std::io::{self, Read};

use crate::model::Book;

use super::checksum::compute_checksum;

// len + id + tombstone + two string prefixes + year flag + checksum
const MIN_RECORD_SIZE: usize = 4 + 8 + 1 + 4 + 4 + 1 + 4;

/// One serialized book mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookRecord {
    pub id: u64,
    pub is_tombstone: bool,
    pub title: String,
    pub author: String,
    pub year: Option<i32>,
}

impl BookRecord {
    /// Record for a live book (create or update).
    pub fn live(book: &Book) -> Self {
        Self {
            id: book.id,
            is_tombstone: false,
            title: book.title.clone(),
            author: book.author.clone(),
            year: book.year,
        }
    }

    /// Tombstone record marking the id as deleted.
    pub fn tombstone(id: u64) -> Self {
        Self {
            id,
            is_tombstone: true,
            title: String::new(),
            author: String::new(),
            year: None,
        }
    }

    /// Converts a live record back into the book it describes.
    pub fn into_book(self) -> Book {
        Book {
            id: self.id,
            title: self.title,
            author: self.author,
            year: self.year,
        }
    }

    fn serialize_body(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(32 + self.title.len() + self.author.len());

        buf.extend_from_slice(&self.id.to_le_bytes());
        buf.push(u8::from(self.is_tombstone));

        buf.extend_from_slice(&(self.title.len() as u32).to_le_bytes());
        buf.extend_from_slice(self.title.as_bytes());

        buf.extend_from_slice(&(self.author.len() as u32).to_le_bytes());
        buf.extend_from_slice(self.author.as_bytes());

        match self.year {
            Some(year) => {
                buf.push(1);
                buf.extend_from_slice(&year.to_le_bytes());
            }
            None => buf.push(0),
        }

        buf
    }

    /// Serializes the complete record, checksum included.
    ///
    /// Serialization is deterministic.
    pub fn serialize(&self) -> Vec<u8> {
        let body = self.serialize_body();
        let record_length = (4 + body.len() + 4) as u32;

        // Checksum covers the length prefix and the body.
        let mut framed = Vec::with_capacity(record_length as usize);
        framed.extend_from_slice(&record_length.to_le_bytes());
        framed.extend_from_slice(&body);
        let checksum = compute_checksum(&framed);

        framed.extend_from_slice(&checksum.to_le_bytes());
        framed
    }

    /// Deserializes one record from the front of `data`, verifying its
    /// checksum. Returns the record and the number of bytes consumed.
    pub fn deserialize(data: &[u8]) -> io::Result<(Self, usize)> {
        if data.len() < MIN_RECORD_SIZE {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "record too short",
            ));
        }

        let record_length = u32::from_le_bytes([data[0], data[1], data[2], data[3]]) as usize;
        if record_length < MIN_RECORD_SIZE {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("invalid record length: {}", record_length),
            ));
        }
        if data.len() < record_length {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                format!(
                    "record truncated: expected {} bytes, got {}",
                    record_length,
                    data.len()
                ),
            ));
        }

        let checksum_offset = record_length - 4;
        let stored_checksum = u32::from_le_bytes([
            data[checksum_offset],
            data[checksum_offset + 1],
            data[checksum_offset + 2],
            data[checksum_offset + 3],
        ]);
        let computed = compute_checksum(&data[..checksum_offset]);
        if computed != stored_checksum {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!(
                    "checksum mismatch: computed {:08x}, stored {:08x}",
                    computed, stored_checksum
                ),
            ));
        }

        let mut cursor = io::Cursor::new(&data[4..checksum_offset]);

        let mut id_buf = [0u8; 8];
        cursor.read_exact(&mut id_buf)?;
        let id = u64::from_le_bytes(id_buf);

        let mut flag = [0u8; 1];
        cursor.read_exact(&mut flag)?;
        let is_tombstone = flag[0] != 0;

        let title = read_string(&mut cursor)?;
        let author = read_string(&mut cursor)?;

        cursor.read_exact(&mut flag)?;
        let year = if flag[0] != 0 {
            let mut year_buf = [0u8; 4];
            cursor.read_exact(&mut year_buf)?;
            Some(i32::from_le_bytes(year_buf))
        } else {
            None
        };

        Ok((
            Self {
                id,
                is_tombstone,
                title,
                author,
                year,
            },
            record_length,
        ))
    }
}

fn read_string<R: Read>(reader: &mut R) -> io::Result<String> {
    let mut len_buf = [0u8; 4];
    reader.read_exact(&mut len_buf)?;
    let len = u32::from_le_bytes(len_buf) as usize;

    let mut buf = vec![0u8; len];
    reader.read_exact(&mut buf)?;

    String::from_utf8(buf)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, format!("invalid UTF-8: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_book() -> Book {
        Book {
            id: 3,
            title: "War and Peace".to_string(),
            author: "Leo Tolstoy".to_string(),
            year: Some(1869),
        }
    }

    #[test]
    fn test_live_record_roundtrip() {
        let record = BookRecord::live(&sample_book());
        let bytes = record.serialize();
        let (parsed, consumed) = BookRecord::deserialize(&bytes).unwrap();

        assert_eq!(parsed, record);
        assert_eq!(consumed, bytes.len());
    }

    #[test]
    fn test_record_without_year_roundtrip() {
        let mut book = sample_book();
        book.year = None;
        let record = BookRecord::live(&book);

        let (parsed, _) = BookRecord::deserialize(&record.serialize()).unwrap();
        assert_eq!(parsed.year, None);
    }

    #[test]
    fn test_tombstone_roundtrip() {
        let record = BookRecord::tombstone(9);
        let (parsed, _) = BookRecord::deserialize(&record.serialize()).unwrap();

        assert!(parsed.is_tombstone);
        assert_eq!(parsed.id, 9);
        assert!(parsed.title.is_empty());
    }

    #[test]
    fn test_checksum_detects_corruption() {
        let mut bytes = BookRecord::live(&sample_book()).serialize();
        let mid = bytes.len() / 2;
        bytes[mid] ^= 0xFF;

        let err = BookRecord::deserialize(&bytes).unwrap_err();
        assert!(err.to_string().contains("checksum mismatch"));
    }

    #[test]
    fn test_truncated_record_rejected() {
        let bytes = BookRecord::live(&sample_book()).serialize();
        let err = BookRecord::deserialize(&bytes[..bytes.len() - 3]).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
    }

    #[test]
    fn test_deterministic_serialization() {
        let record = BookRecord::live(&sample_book());
        assert_eq!(record.serialize(), record.serialize());
    }

    #[test]
    fn test_into_book() {
        let record = BookRecord::live(&sample_book());
        assert_eq!(record.into_book(), sample_book());
    }
}
