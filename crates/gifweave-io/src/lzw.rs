//! GIF-flavoured LZW compression
//!
//! The code table starts each epoch with one code per palette index
//! (`0..2^min_code_size`), then CLEAR and END-OF-INFORMATION. Codes are
//! written with `min_code_size + 1` bits at first, one more bit each time
//! the next code to be assigned reaches `2^code_size`. Once 4096 codes
//! exist no more are added: a CLEAR code is written and the table starts
//! over.
//!
//! Codes are packed least significant bit first. The caller chunks the
//! packed bytes into data sub-blocks.

use crate::{IoError, IoResult};
use std::collections::HashMap;

/// Largest code width the format allows
pub const MAX_CODE_SIZE: u8 = 12;

/// Number of codes at which the table is cleared
const MAX_CODE_TABLE_SIZE: usize = 1 << MAX_CODE_SIZE;

/// Minimum code size the format allows
const MIN_CODE_SIZE_FLOOR: u8 = 2;

/// LZW encoder for one color table size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LzwEncoder {
    minimum_code_size: u8,
}

impl LzwEncoder {
    /// Create an encoder for a padded color table of `color_table_size`
    /// entries.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::InvalidArgument`] unless the size is a power of two
    /// between 1 and 256.
    pub fn new(color_table_size: usize) -> IoResult<Self> {
        if !color_table_size.is_power_of_two() || color_table_size > 256 {
            return Err(IoError::InvalidArgument(format!(
                "color table size must be a power of two up to 256, got {}",
                color_table_size
            )));
        }
        let mut minimum_code_size = MIN_CODE_SIZE_FLOOR;
        while color_table_size > 1 << minimum_code_size {
            minimum_code_size += 1;
        }
        Ok(Self { minimum_code_size })
    }

    /// The code size written at the start of the image data block.
    pub fn minimum_code_size(&self) -> u8 {
        self.minimum_code_size
    }

    /// Compress a sequence of palette indices.
    ///
    /// Every index must be below the color table size the encoder was built
    /// for. Each call starts from a fresh code table.
    pub fn encode(&self, indices: &[usize]) -> Vec<u8> {
        let mut state = EncoderState::new(self.minimum_code_size);
        let mut writer = BitWriter::with_capacity(indices.len() / 2 + 4);

        writer.write(state.clear_code, state.code_size);
        let mut prefix: Option<usize> = None;
        for &index in indices {
            debug_assert!(index < state.clear_code, "palette index {index} out of range");
            let Some(current) = prefix else {
                prefix = Some(index);
                continue;
            };
            if let Some(&code) = state.table.get(&(current, index)) {
                prefix = Some(code);
                continue;
            }

            writer.write(current, state.code_size);
            if state.next_code == MAX_CODE_TABLE_SIZE {
                writer.write(state.clear_code, state.code_size);
                state.reset();
            } else {
                state.add(current, index);
            }
            prefix = Some(index);
        }

        if let Some(current) = prefix {
            writer.write(current, state.code_size);
        }
        writer.write(state.clear_code + 1, state.code_size);
        writer.finish()
    }
}

/// Code table and code width of one encoding pass
struct EncoderState {
    minimum_code_size: u8,
    clear_code: usize,
    /// `(prefix code, next index)` to the code of the extended sequence
    table: HashMap<(usize, usize), usize>,
    next_code: usize,
    code_size: u8,
}

impl EncoderState {
    fn new(minimum_code_size: u8) -> Self {
        let clear_code = 1 << minimum_code_size;
        Self {
            minimum_code_size,
            clear_code,
            table: HashMap::new(),
            next_code: clear_code + 2,
            code_size: minimum_code_size + 1,
        }
    }

    fn reset(&mut self) {
        self.table.clear();
        self.next_code = self.clear_code + 2;
        self.code_size = self.minimum_code_size + 1;
    }

    fn add(&mut self, prefix: usize, index: usize) {
        let code = self.next_code;
        self.table.insert((prefix, index), code);
        self.next_code += 1;
        if code == 1 << self.code_size {
            self.code_size += 1;
        }
    }
}

/// Packs variable-width codes least significant bit first.
struct BitWriter {
    bytes: Vec<u8>,
    buffer: u32,
    bits: u8,
}

impl BitWriter {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            bytes: Vec::with_capacity(capacity),
            buffer: 0,
            bits: 0,
        }
    }

    fn write(&mut self, code: usize, size: u8) {
        self.buffer |= (code as u32) << self.bits;
        self.bits += size;
        while self.bits >= 8 {
            self.bytes.push(self.buffer as u8);
            self.buffer >>= 8;
            self.bits -= 8;
        }
    }

    /// Flush the final partial byte, zero-padded in its high bits.
    fn finish(mut self) -> Vec<u8> {
        if self.bits > 0 {
            self.bytes.push(self.buffer as u8);
        }
        self.bytes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimum_code_size() {
        assert_eq!(LzwEncoder::new(1).unwrap().minimum_code_size(), 2);
        assert_eq!(LzwEncoder::new(2).unwrap().minimum_code_size(), 2);
        assert_eq!(LzwEncoder::new(4).unwrap().minimum_code_size(), 2);
        assert_eq!(LzwEncoder::new(8).unwrap().minimum_code_size(), 3);
        assert_eq!(LzwEncoder::new(256).unwrap().minimum_code_size(), 8);
    }

    #[test]
    fn test_invalid_color_table_size() {
        for size in [0, 3, 7, 100, 512] {
            assert!(
                matches!(LzwEncoder::new(size), Err(IoError::InvalidArgument(_))),
                "size {size}"
            );
        }
    }

    #[test]
    fn test_known_stream() {
        // CLEAR 0 0 1 3 EOI, the last two at 4 bits
        let encoder = LzwEncoder::new(4).unwrap();
        assert_eq!(encoder.encode(&[0, 0, 1, 3]), vec![0x04, 0x32, 0x05]);
    }

    #[test]
    fn test_single_pixel() {
        // CLEAR(4) 0 EOI(5) at 3 bits each: 100 000 101
        let encoder = LzwEncoder::new(2).unwrap();
        assert_eq!(encoder.encode(&[0]), vec![0x44, 0x01]);
    }

    #[test]
    fn test_empty_input() {
        // CLEAR(4) EOI(5)
        let encoder = LzwEncoder::new(2).unwrap();
        assert_eq!(encoder.encode(&[]), vec![0x2c]);
    }

    #[test]
    fn test_encode_is_reentrant() {
        let encoder = LzwEncoder::new(16).unwrap();
        let indices: Vec<usize> = (0..500).map(|i| (i * 7) % 16).collect();
        assert_eq!(encoder.encode(&indices), encoder.encode(&indices));
    }

    #[test]
    fn test_bit_writer_packs_lsb_first() {
        let mut writer = BitWriter::with_capacity(2);
        writer.write(0b101, 3);
        writer.write(0b11111, 5);
        writer.write(0b1, 2);
        assert_eq!(writer.finish(), vec![0b1111_1101, 0b01]);
    }
}
