//! GIF89a block writers
//!
//! Each function writes one record of the file format to any
//! [`std::io::Write`]. Multi-byte integers are little-endian.

use crate::IoResult;
use gifweave_core::ColorTable;
use std::io::Write;

const EXTENSION_INTRODUCER: u8 = 0x21;
const APPLICATION_LABEL: u8 = 0xFF;
const GRAPHICS_CONTROL_LABEL: u8 = 0xF9;
const IMAGE_SEPARATOR: u8 = 0x2C;
const TRAILER: u8 = 0x3B;
const BLOCK_TERMINATOR: u8 = 0;

/// Longest data sub-block
pub const MAX_SUB_BLOCK_LEN: usize = 255;

/// Frame disposal method, stored in the graphics control extension
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[repr(u8)]
pub enum DisposalMethod {
    /// The decoder is not required to take any action
    #[default]
    Unspecified = 0,
    /// Leave the graphic in place
    DoNotDispose = 1,
    /// Restore the frame's area to the background color
    RestoreToBackground = 2,
    /// Restore the frame's area to what was there before it was drawn
    RestoreToPrevious = 3,
}

fn write_u16<W: Write>(writer: &mut W, value: u16) -> IoResult<()> {
    writer.write_all(&value.to_le_bytes())?;
    Ok(())
}

/// Write the `GIF89a` signature and version.
pub fn write_header<W: Write>(writer: &mut W) -> IoResult<()> {
    writer.write_all(b"GIF89a")?;
    Ok(())
}

/// Write a logical screen descriptor without a global color table.
///
/// The packed field carries a color resolution of 1 and no sort flag.
pub fn write_logical_screen_descriptor<W: Write>(
    writer: &mut W,
    width: u16,
    height: u16,
) -> IoResult<()> {
    const COLOR_RESOLUTION: u8 = 1;
    write_u16(writer, width)?;
    write_u16(writer, height)?;
    // global table flag, resolution, sort, size; background index; aspect ratio
    writer.write_all(&[COLOR_RESOLUTION << 4, 0, 0])?;
    Ok(())
}

/// Write the NETSCAPE2.0 application extension. A loop count of 0 loops
/// forever.
pub fn write_looping_extension<W: Write>(writer: &mut W, loop_count: u16) -> IoResult<()> {
    const APPLICATION: &[u8; 11] = b"NETSCAPE2.0";
    const SUB_BLOCK_ID: u8 = 1;
    writer.write_all(&[EXTENSION_INTRODUCER, APPLICATION_LABEL, APPLICATION.len() as u8])?;
    writer.write_all(APPLICATION)?;
    writer.write_all(&[3, SUB_BLOCK_ID])?;
    write_u16(writer, loop_count)?;
    writer.write_all(&[BLOCK_TERMINATOR])?;
    Ok(())
}

/// Write a graphics control extension with no transparency and no user
/// input flag. `delay` is in hundredths of a second.
pub fn write_graphics_control_extension<W: Write>(
    writer: &mut W,
    disposal: DisposalMethod,
    delay: u16,
) -> IoResult<()> {
    writer.write_all(&[
        EXTENSION_INTRODUCER,
        GRAPHICS_CONTROL_LABEL,
        4,
        (disposal as u8) << 3,
    ])?;
    write_u16(writer, delay)?;
    // transparent color index, terminator
    writer.write_all(&[0, BLOCK_TERMINATOR])?;
    Ok(())
}

/// Write an image descriptor announcing a local color table.
///
/// `table_size_field` is the color table's size field, see
/// [`ColorTable::size_field`].
pub fn write_image_descriptor<W: Write>(
    writer: &mut W,
    left: u16,
    top: u16,
    width: u16,
    height: u16,
    table_size_field: u8,
) -> IoResult<()> {
    const LOCAL_COLOR_TABLE_FLAG: u8 = 0x80;
    writer.write_all(&[IMAGE_SEPARATOR])?;
    for value in [left, top, width, height] {
        write_u16(writer, value)?;
    }
    writer.write_all(&[LOCAL_COLOR_TABLE_FLAG | (table_size_field & 0x07)])?;
    Ok(())
}

/// Write a color table as RGB triples, zero-filled to its padded size.
pub fn write_color_table<W: Write>(writer: &mut W, table: &ColorTable) -> IoResult<()> {
    writer.write_all(&table.to_rgb_bytes())?;
    Ok(())
}

/// Write an image data block: the minimum code size, the LZW bytes in
/// length-prefixed sub-blocks, and an empty terminating sub-block.
pub fn write_image_data<W: Write>(
    writer: &mut W,
    minimum_code_size: u8,
    lzw_data: &[u8],
) -> IoResult<()> {
    writer.write_all(&[minimum_code_size])?;
    for chunk in lzw_data.chunks(MAX_SUB_BLOCK_LEN) {
        writer.write_all(&[chunk.len() as u8])?;
        writer.write_all(chunk)?;
    }
    writer.write_all(&[BLOCK_TERMINATOR])?;
    Ok(())
}

/// Write the trailer that ends the file.
pub fn write_trailer<W: Write>(writer: &mut W) -> IoResult<()> {
    writer.write_all(&[TRAILER])?;
    Ok(())
}
