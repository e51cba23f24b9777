//! Canvas persistence record encode/decode
//!
//! The record is a little-endian header followed by the compressed RGBA8
//! payload:
//!
//! ```text
//! width (i32) | height (i32) | format (u8) | filter (u8) |
//! payload_len (u32) | payload (payload_len bytes)
//! ```
//!
//! `load` keeps the payload compressed; the pixels are unpacked at most once
//! per deserialization cycle, on first touch, so opening an animation does
//! not decompress every frame up front.

use thiserror::Error;
use tracing::{debug, warn};

use super::{PixelCanvas, PixelStore};
use crate::codec::{self, CodecError};
use crate::types::{FilterMode, PixelFormat, WrapAxes};

/// Fixed header size of a canvas record, in bytes.
const HEADER_LEN: usize = 14;

/// Errors from encoding or decoding a canvas persistence record.
#[derive(Debug, Error)]
pub enum PersistError {
    #[error("record truncated: need {need} bytes, have {have}")]
    Truncated { need: usize, have: usize },
    #[error("unknown pixel format tag: {0}")]
    UnknownFormat(u8),
    #[error("unknown filter mode tag: {0}")]
    UnknownFilter(u8),
    #[error(transparent)]
    Codec(#[from] CodecError),
}

impl PixelCanvas {
    /// Encode this canvas into a persistence record.
    ///
    /// A canvas never touched since [`PixelCanvas::load`] still holds its
    /// compressed payload, which is reused as-is instead of being
    /// decompressed and recompressed.
    pub fn save(&self) -> Result<Vec<u8>, PersistError> {
        let payload = match &self.store {
            PixelStore::Compressed(bytes) => bytes.clone(),
            PixelStore::Live(pixels) => codec::compress(bytemuck::cast_slice(pixels))?,
        };

        let mut out = Vec::with_capacity(HEADER_LEN + payload.len());
        out.extend_from_slice(&(self.width as i32).to_le_bytes());
        out.extend_from_slice(&(self.height as i32).to_le_bytes());
        out.push(self.format as u8);
        out.push(self.filter as u8);
        out.extend_from_slice(&(payload.len() as u32).to_le_bytes());
        out.extend_from_slice(&payload);
        Ok(out)
    }

    /// Decode a persistence record.
    ///
    /// The payload is stored compressed and unpacked lazily. A record
    /// carrying invalid dimensions degrades to the 1x1 placeholder, matching
    /// [`PixelCanvas::new`].
    pub fn load(bytes: &[u8]) -> Result<PixelCanvas, PersistError> {
        if bytes.len() < HEADER_LEN {
            return Err(PersistError::Truncated {
                need: HEADER_LEN,
                have: bytes.len(),
            });
        }

        let width = i32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
        let height = i32::from_le_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]);
        let format = PixelFormat::from_tag(bytes[8]).ok_or(PersistError::UnknownFormat(bytes[8]))?;
        let filter = FilterMode::from_tag(bytes[9]).ok_or(PersistError::UnknownFilter(bytes[9]))?;
        let payload_len =
            u32::from_le_bytes([bytes[10], bytes[11], bytes[12], bytes[13]]) as usize;

        let need = HEADER_LEN + payload_len;
        if bytes.len() < need {
            return Err(PersistError::Truncated {
                need,
                have: bytes.len(),
            });
        }

        if width <= 0 || height <= 0 {
            warn!(
                "canvas record with invalid dimensions {}x{}, degrading to placeholder",
                width, height
            );
            return Ok(PixelCanvas::new(width, height, format, filter));
        }

        Ok(PixelCanvas {
            width: width as u32,
            height: height as u32,
            format,
            filter,
            wrap: WrapAxes::NONE,
            store: PixelStore::Compressed(bytes[HEADER_LEN..need].to_vec()),
            valid: true,
            dirty: None,
            revision: 0,
        })
    }

    /// True once the live pixel buffer is authoritative.
    pub fn is_decompressed(&self) -> bool {
        matches!(self.store, PixelStore::Live(_))
    }

    /// Unpack the compressed payload into live pixels. Idempotent; called
    /// automatically by every mutating access path.
    ///
    /// A corrupt or mis-sized payload degrades the canvas to an invalid
    /// transparent buffer rather than failing the caller: a bad frame must
    /// never abort edits to its neighbors.
    pub fn ensure_decompressed(&mut self) {
        let PixelStore::Compressed(bytes) = &self.store else {
            return;
        };
        let packed_len = bytes.len();
        let expected = self.area() * self.format.bytes_per_pixel();
        match codec::decompress(bytes) {
            Ok(raw) if raw.len() == expected => {
                debug!(
                    "decompressed {}x{} canvas ({} -> {} bytes)",
                    self.width,
                    self.height,
                    packed_len,
                    raw.len()
                );
                self.store = PixelStore::Live(bytemuck::cast_slice(&raw).to_vec());
            }
            Ok(raw) => {
                warn!(
                    "canvas payload decompressed to {} bytes, expected {}; degrading",
                    raw.len(),
                    expected
                );
                self.degrade();
            }
            Err(err) => {
                warn!("canvas payload failed to decompress: {err}; degrading");
                self.degrade();
            }
        }
    }
}
