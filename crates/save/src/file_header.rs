// ---------------------------------------------------------------------------
// file_header – Save envelope with magic bytes, version, and checksum
// ---------------------------------------------------------------------------
//
// Header format (24 bytes, fixed-size, little-endian):
//   [0..4]   Magic bytes: "TILE"
//   [4..8]   Header format version (u32)
//   [8..12]  Flags (u32: bit 0 = LZ4 compressed)
//   [12..16] Uncompressed payload size (u32)
//   [16..20] Stored payload size (u32)
//   [20..24] xxHash32 checksum of the stored payload
//
// On save: JSON bytes -> LZ4 -> prepend header (checksum of compressed bytes)
// On load: check magic -> validate sizes and checksum -> decompress

use xxhash_rust::xxh32::xxh32;

use crate::save_error::SaveError;

pub const MAGIC: [u8; 4] = *b"TILE";

pub const HEADER_SIZE: usize = 24;

/// Tracks the header layout itself, not the city schema inside the payload.
pub const HEADER_FORMAT_VERSION: u32 = 1;

pub const FLAG_COMPRESSED: u32 = 1 << 0;

const XXHASH_SEED: u32 = 0;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileHeader {
    pub format_version: u32,
    pub flags: u32,
    pub uncompressed_size: u32,
    pub payload_size: u32,
    pub checksum: u32,
}

impl FileHeader {
    pub fn is_compressed(&self) -> bool {
        self.flags & FLAG_COMPRESSED != 0
    }

    fn to_bytes(&self) -> [u8; HEADER_SIZE] {
        let mut out = [0u8; HEADER_SIZE];
        out[0..4].copy_from_slice(&MAGIC);
        out[4..8].copy_from_slice(&self.format_version.to_le_bytes());
        out[8..12].copy_from_slice(&self.flags.to_le_bytes());
        out[12..16].copy_from_slice(&self.uncompressed_size.to_le_bytes());
        out[16..20].copy_from_slice(&self.payload_size.to_le_bytes());
        out[20..24].copy_from_slice(&self.checksum.to_le_bytes());
        out
    }
}

fn read_u32(bytes: &[u8], at: usize) -> u32 {
    u32::from_le_bytes([bytes[at], bytes[at + 1], bytes[at + 2], bytes[at + 3]])
}

fn size_u32(len: usize) -> Result<u32, SaveError> {
    u32::try_from(len).map_err(|_| SaveError::Encode(format!("payload of {len} bytes is too large")))
}

/// Compresses `data` and prepends a header.
pub fn wrap_compressed(data: &[u8]) -> Result<Vec<u8>, SaveError> {
    let payload = lz4_flex::compress_prepend_size(data);
    let header = FileHeader {
        format_version: HEADER_FORMAT_VERSION,
        flags: FLAG_COMPRESSED,
        uncompressed_size: size_u32(data.len())?,
        payload_size: size_u32(payload.len())?,
        checksum: xxh32(&payload, XXHASH_SEED),
    };
    let mut out = Vec::with_capacity(HEADER_SIZE + payload.len());
    out.extend_from_slice(&header.to_bytes());
    out.extend_from_slice(&payload);
    Ok(out)
}

/// Parses and validates the header. Returns it with the stored payload.
pub fn unwrap_header(bytes: &[u8]) -> Result<(FileHeader, &[u8]), SaveError> {
    if bytes.len() < HEADER_SIZE {
        return Err(SaveError::Corrupt(format!(
            "save is {} bytes, shorter than its {HEADER_SIZE}-byte header",
            bytes.len()
        )));
    }
    if bytes[..4] != MAGIC {
        return Err(SaveError::Corrupt("missing TILE magic bytes".to_string()));
    }
    let header = FileHeader {
        format_version: read_u32(bytes, 4),
        flags: read_u32(bytes, 8),
        uncompressed_size: read_u32(bytes, 12),
        payload_size: read_u32(bytes, 16),
        checksum: read_u32(bytes, 20),
    };
    if header.format_version > HEADER_FORMAT_VERSION {
        return Err(SaveError::VersionMismatch {
            expected_max: HEADER_FORMAT_VERSION,
            found: header.format_version,
        });
    }

    let payload = &bytes[HEADER_SIZE..];
    if payload.len() != header.payload_size as usize {
        return Err(SaveError::Corrupt(format!(
            "payload is {} bytes, header says {}",
            payload.len(),
            header.payload_size
        )));
    }
    let computed = xxh32(payload, XXHASH_SEED);
    if computed != header.checksum {
        return Err(SaveError::Corrupt(format!(
            "checksum mismatch (expected {:#010X}, got {:#010X})",
            header.checksum, computed
        )));
    }
    Ok((header, payload))
}

/// Validates the envelope and returns the original (decompressed) bytes.
pub fn unwrap_payload(bytes: &[u8]) -> Result<Vec<u8>, SaveError> {
    let (header, payload) = unwrap_header(bytes)?;
    let data = if header.is_compressed() {
        lz4_flex::decompress_size_prepended(payload)
            .map_err(|e| SaveError::Decode(format!("LZ4: {e}")))?
    } else {
        payload.to_vec()
    };
    if data.len() != header.uncompressed_size as usize {
        return Err(SaveError::Corrupt(format!(
            "decompressed {} bytes, header says {}",
            data.len(),
            header.uncompressed_size
        )));
    }
    Ok(data)
}
