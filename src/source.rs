//! Loading `.dat` files from disk.
//!
//! Files are memory-mapped read-only. Gzip-compressed files are inflated
//! into memory; the decoder only ever sees raw protobuf bytes.

use flate2::read::GzDecoder;
use log::debug;
use memmap2::Mmap;
use serde::Serialize;
use std::fs::{File, Metadata};
use std::io::{self, Read};
use std::path::Path;
use std::time::UNIX_EPOCH;

use crate::Result;

/// Gzip member header magic.
const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Upper bound on the inflated size of a gzip-compressed file.
const MAX_INFLATED_SIZE: u64 = 512 * 1024 * 1024;

/// Size and modification time of the file on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct FileMeta {
    /// Size in bytes as stored (compressed size for gzip files)
    pub size: u64,
    /// Last modification time, seconds since the Unix epoch
    pub mtime: i64,
}

impl FileMeta {
    pub fn from_metadata(meta: &Metadata) -> Self {
        let mtime = meta
            .modified()
            .ok()
            .and_then(|t| t.duration_since(UNIX_EPOCH).ok())
            .map(|d| d.as_secs() as i64)
            .unwrap_or_default();
        Self {
            size: meta.len(),
            mtime,
        }
    }
}

/// Buffer and facts handed to the decoder for one request.
#[derive(Debug, Clone, Copy)]
pub struct DatInput<'a> {
    /// Path as given by the caller, echoed in results
    pub path: &'a str,
    pub bytes: &'a [u8],
    pub meta: FileMeta,
}

enum Buffer {
    Mapped(Mmap),
    Owned(Vec<u8>),
}

/// An opened `.dat` file.
pub struct DatSource {
    path: String,
    meta: FileMeta,
    buffer: Buffer,
}

impl DatSource {
    /// Open a file, stat it and map its contents.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let meta = FileMeta::from_metadata(&file.metadata()?);

        // Zero-length files cannot be mapped on every platform.
        let buffer = if meta.size == 0 {
            Buffer::Owned(Vec::new())
        } else {
            let mmap = unsafe { Mmap::map(&file)? };
            if mmap.starts_with(&GZIP_MAGIC) {
                Buffer::Owned(inflate(&mmap, MAX_INFLATED_SIZE)?)
            } else {
                Buffer::Mapped(mmap)
            }
        };

        let source = Self {
            path: path.display().to_string(),
            meta,
            buffer,
        };
        debug!(
            "opened {} ({} bytes on disk, {} bytes decoded input)",
            source.path,
            meta.size,
            source.bytes().len()
        );
        Ok(source)
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn meta(&self) -> FileMeta {
        self.meta
    }

    /// Raw protobuf bytes.
    pub fn bytes(&self) -> &[u8] {
        match &self.buffer {
            Buffer::Mapped(mmap) => &mmap[..],
            Buffer::Owned(data) => data.as_slice(),
        }
    }

    pub fn input(&self) -> DatInput<'_> {
        DatInput {
            path: &self.path,
            bytes: self.bytes(),
            meta: self.meta,
        }
    }
}

fn inflate(compressed: &[u8], max_size: u64) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    GzDecoder::new(compressed)
        .take(max_size.saturating_add(1))
        .read_to_end(&mut out)?;
    if out.len() as u64 > max_size {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!("gzip payload exceeds {} bytes", max_size),
        )
        .into());
    }
    Ok(out)
}
