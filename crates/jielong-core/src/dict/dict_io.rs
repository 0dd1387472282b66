use std::fs::{self, File};
use std::io;
use std::path::Path;

use memmap2::Mmap;
use tracing::{debug, debug_span};

use super::{Dictionary, IdiomEntry, LoadError};

pub(crate) const MAGIC: &[u8; 4] = b"JLDX";
pub(crate) const VERSION: u8 = 1;
// magic + version + reserved(3) + body_len + crc32 = 16
pub(crate) const HEADER_SIZE: usize = 4 + 1 + 3 + 4 + 4;

fn read_u32_le(data: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes([
        data[offset],
        data[offset + 1],
        data[offset + 2],
        data[offset + 3],
    ])
}

/// True when `data` starts with the compiled-dictionary magic.
pub fn is_compiled(data: &[u8]) -> bool {
    data.starts_with(MAGIC)
}

impl Dictionary {
    /// Serialize to the compiled `JLDX` format.
    pub fn to_bytes(&self) -> Result<Vec<u8>, LoadError> {
        let body = bincode::serialize(&self.entries).map_err(LoadError::Serialize)?;
        let body_len: u32 = body.len().try_into().map_err(|_| LoadError::InvalidRecord {
            index: self.entries.len(),
            reason: "dictionary body exceeds u32::MAX bytes".to_string(),
        })?;
        let checksum = crc32fast::hash(&body);

        let mut buf = Vec::with_capacity(HEADER_SIZE + body.len());
        buf.extend_from_slice(MAGIC);
        buf.push(VERSION);
        buf.extend_from_slice(&[0u8; 3]); // reserved
        buf.extend_from_slice(&body_len.to_le_bytes());
        buf.extend_from_slice(&checksum.to_le_bytes());
        buf.extend_from_slice(&body);
        Ok(buf)
    }

    /// Deserialize from the compiled `JLDX` format.
    pub fn from_bytes(data: &[u8]) -> Result<Self, LoadError> {
        if data.len() < 5 {
            return Err(LoadError::InvalidHeader);
        }
        if &data[..4] != MAGIC {
            return Err(LoadError::InvalidMagic);
        }
        if data[4] != VERSION {
            return Err(LoadError::UnsupportedVersion(data[4]));
        }
        if data.len() < HEADER_SIZE {
            return Err(LoadError::InvalidHeader);
        }

        let body_len = read_u32_le(data, 8) as usize;
        let expected = read_u32_le(data, 12);
        if data.len() < HEADER_SIZE + body_len {
            return Err(LoadError::InvalidHeader);
        }

        let body = &data[HEADER_SIZE..HEADER_SIZE + body_len];
        let actual = crc32fast::hash(body);
        if actual != expected {
            return Err(LoadError::ChecksumMismatch { expected, actual });
        }

        let entries: Vec<IdiomEntry> =
            bincode::deserialize(body).map_err(LoadError::Deserialize)?;
        Self::from_entries(entries)
    }

    /// Open a dataset file, compiled or text, detected by magic bytes.
    ///
    /// The file is memory-mapped read-only; the mapping is dropped once the
    /// entries have been copied out.
    pub fn open(path: &Path) -> Result<Self, LoadError> {
        let _span = debug_span!("dictionary_open", path = %path.display()).entered();
        let file = File::open(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => LoadError::NotFound(path.to_path_buf()),
            _ => LoadError::Io(e),
        })?;
        if file.metadata()?.len() == 0 {
            return Err(LoadError::Empty);
        }
        // SAFETY: The file is opened read-only and the mapping is immutable.
        // The Mmap is dropped before this function returns.
        let mmap = unsafe { Mmap::map(&file)? };

        let dict = if is_compiled(&mmap) {
            debug!("compiled dictionary");
            Self::from_bytes(&mmap)?
        } else {
            debug!("text dictionary");
            let text = std::str::from_utf8(&mmap).map_err(|_| LoadError::InvalidUtf8)?;
            Self::from_text(text)?
        };
        debug!(idiom_count = dict.len());
        Ok(dict)
    }

    /// Atomic write: write to .tmp then rename.
    pub fn save(&self, path: &Path) -> Result<(), LoadError> {
        let bytes = self.to_bytes()?;
        let tmp = path.with_extension("tmp");
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(&tmp, &bytes)?;
        fs::rename(&tmp, path)?;
        Ok(())
    }
}
