//! Reference decoders
//!
//! Encoder output is checked by decoding it with third-party decoders
//! rather than by re-reading it with the code under test: `weezl` for raw
//! LZW streams and the `gif` crate for complete files. Fields a decoder
//! reinterprets are read straight from the block structure instead.

use crate::error::{TestError, TestResult};
use gif::{ColorOutput, DecodeOptions};
use std::io::Cursor;

/// Decode a GIF-flavoured (LSB-first) LZW code stream.
///
/// The stream must end with an end-of-information code.
pub fn decode_lzw(min_code_size: u8, data: &[u8]) -> TestResult<Vec<u8>> {
    weezl::decode::Decoder::new(weezl::BitOrder::Lsb, min_code_size)
        .decode(data)
        .map_err(|e| TestError::Decode {
            message: format!("LZW: {:?}", e),
        })
}

/// One decoded frame, palette indices unexpanded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedFrame {
    pub left: u16,
    pub top: u16,
    pub width: u16,
    pub height: u16,
    /// Delay in hundredths of a second
    pub delay: u16,
    /// Disposal method as the `gif` crate reads it (bits 2..=4 of the
    /// graphics control packed field)
    pub dispose: u8,
    /// Local color table as packed RGB triples
    pub palette: Vec<u8>,
    /// Palette index per pixel, row-major
    pub indices: Vec<u8>,
}

impl DecodedFrame {
    /// RGB value of pixel `i`, looked up in the local color table.
    pub fn rgb_at(&self, i: usize) -> Option<(u8, u8, u8)> {
        let index = *self.indices.get(i)? as usize * 3;
        let rgb = self.palette.get(index..index + 3)?;
        Some((rgb[0], rgb[1], rgb[2]))
    }

    /// Packed `0xRRGGBB` value of every pixel.
    pub fn rgb_pixels(&self) -> Vec<u32> {
        (0..self.indices.len())
            .filter_map(|i| self.rgb_at(i))
            .map(|(r, g, b)| ((r as u32) << 16) | ((g as u32) << 8) | b as u32)
            .collect()
    }

    /// Number of distinct palette indices in use.
    pub fn used_indices(&self) -> usize {
        let mut seen = [false; 256];
        for &i in &self.indices {
            seen[i as usize] = true;
        }
        seen.iter().filter(|&&s| s).count()
    }
}

/// A decoded GIF file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedGif {
    pub width: u16,
    pub height: u16,
    pub frames: Vec<DecodedFrame>,
}

/// Decode a complete GIF file with the `gif` crate.
pub fn decode_gif(data: &[u8]) -> TestResult<DecodedGif> {
    let mut options = DecodeOptions::new();
    options.set_color_output(ColorOutput::Indexed);

    let mut decoder = options
        .read_info(Cursor::new(data))
        .map_err(|e| TestError::Decode {
            message: format!("GIF header: {}", e),
        })?;

    let width = decoder.width();
    let height = decoder.height();
    let global = decoder.global_palette().map(<[u8]>::to_vec);

    let mut frames = Vec::new();
    while let Some(frame) = decoder.read_next_frame().map_err(|e| TestError::Decode {
        message: format!("GIF frame {}: {}", frames.len(), e),
    })? {
        let palette = frame
            .palette
            .clone()
            .or_else(|| global.clone())
            .unwrap_or_default();
        frames.push(DecodedFrame {
            left: frame.left,
            top: frame.top,
            width: frame.width,
            height: frame.height,
            delay: frame.delay,
            dispose: frame.dispose as u8,
            palette,
            indices: frame.buffer.to_vec(),
        });
    }

    Ok(DecodedGif {
        width,
        height,
        frames,
    })
}

fn malformed(at: usize) -> TestError {
    TestError::Decode {
        message: format!("GIF block structure broken at byte {at}"),
    }
}

fn byte_at(data: &[u8], at: usize) -> TestResult<u8> {
    data.get(at).copied().ok_or_else(|| malformed(at))
}

/// Position just past a run of data sub-blocks starting at `pos`.
fn skip_sub_blocks(data: &[u8], mut pos: usize) -> TestResult<usize> {
    loop {
        let len = byte_at(data, pos)? as usize;
        pos += 1 + len;
        if len == 0 {
            return Ok(pos);
        }
    }
}

/// Packed field byte of every graphics control extension, in file order.
///
/// Walks the block structure without decoding any image data, so the bits
/// come back exactly as they were written.
pub fn graphics_control_fields(data: &[u8]) -> TestResult<Vec<u8>> {
    if !data.starts_with(b"GIF89a") {
        return Err(malformed(0));
    }
    let screen_flags = byte_at(data, 10)?;
    let mut pos = 13;
    if screen_flags & 0x80 != 0 {
        pos += 3 << ((screen_flags & 0x07) + 1);
    }

    let mut fields = Vec::new();
    loop {
        match byte_at(data, pos)? {
            // extension: introducer, label, sub-blocks
            0x21 => {
                if byte_at(data, pos + 1)? == 0xF9 {
                    fields.push(byte_at(data, pos + 3)?);
                }
                pos = skip_sub_blocks(data, pos + 2)?;
            }
            // image: descriptor, optional table, code size, sub-blocks
            0x2C => {
                let flags = byte_at(data, pos + 9)?;
                pos += 10;
                if flags & 0x80 != 0 {
                    pos += 3 << ((flags & 0x07) + 1);
                }
                pos = skip_sub_blocks(data, pos + 1)?;
            }
            0x3B => return Ok(fields),
            _ => return Err(malformed(pos)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_graphics_control_fields() {
        let mut data = b"GIF89a".to_vec();
        data.extend_from_slice(&[1, 0, 1, 0, 0x10, 0, 0]);
        data.extend_from_slice(&[0x21, 0xF9, 4, 0x18, 5, 0, 0, 0]);
        data.extend_from_slice(&[0x2C, 0, 0, 0, 0, 1, 0, 1, 0, 0x80, 0, 0, 0, 9, 9, 9]);
        data.extend_from_slice(&[2, 2, 0x44, 0x01, 0]);
        data.push(0x3B);
        assert_eq!(graphics_control_fields(&data).unwrap(), vec![0x18]);

        data.truncate(data.len() - 3);
        assert!(graphics_control_fields(&data).is_err());
    }
}
