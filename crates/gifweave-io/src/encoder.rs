//! Animated GIF encoder
//!
//! [`GifEncoder`] writes the file header when created, one complete frame
//! per [`GifEncoder::add_image`] call, and the trailer on
//! [`GifEncoder::finish`]. Every frame carries its own local color table.
//! Frames with more than 256 distinct colors are quantized and dithered
//! first, using the strategies named in their [`FrameOptions`].

use crate::block::{self, DisposalMethod};
use crate::lzw::LzwEncoder;
use crate::{IoError, IoResult};
use gifweave_color::{ColorQuantizer, DitherMethod, Ditherer, QuantizeMethod};
use gifweave_core::{ColorTable, Image};
use log::debug;
use std::io::Write;
use std::time::Duration;

/// Most colors a frame's color table can hold
pub const MAX_COLORS: usize = 256;

/// Per-frame encoding options
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrameOptions {
    /// Horizontal offset of the frame on the logical screen
    pub left: u16,
    /// Vertical offset of the frame on the logical screen
    pub top: u16,
    /// Strategy used when the frame has more than [`MAX_COLORS`] colors
    pub quantizer: QuantizeMethod,
    /// Strategy used to map a quantized frame onto its palette
    pub ditherer: DitherMethod,
    pub disposal: DisposalMethod,
    /// Delay before the next frame, in hundredths of a second
    pub delay_centiseconds: u16,
}

impl FrameOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_position(mut self, left: u16, top: u16) -> Self {
        self.left = left;
        self.top = top;
        self
    }

    pub fn with_quantizer(mut self, quantizer: QuantizeMethod) -> Self {
        self.quantizer = quantizer;
        self
    }

    pub fn with_ditherer(mut self, ditherer: DitherMethod) -> Self {
        self.ditherer = ditherer;
        self
    }

    pub fn with_disposal(mut self, disposal: DisposalMethod) -> Self {
        self.disposal = disposal;
        self
    }

    /// Set the frame delay. Whole hundredths of a second are kept (the
    /// milliseconds are divided by 10) and the result saturates at
    /// `u16::MAX`.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        let centiseconds = delay.as_millis() / 10;
        self.delay_centiseconds = u16::try_from(centiseconds).unwrap_or(u16::MAX);
        self
    }

    pub fn with_delay_centiseconds(mut self, delay: u16) -> Self {
        self.delay_centiseconds = delay;
        self
    }
}

/// Writes an animated GIF to `W`.
pub struct GifEncoder<W: Write> {
    writer: W,
    screen_width: u16,
    screen_height: u16,
    frame_count: usize,
}

impl<W: Write> GifEncoder<W> {
    /// Start a GIF file.
    ///
    /// Writes the header, a logical screen descriptor without a global color
    /// table and the looping extension. A `loop_count` of 0 loops forever.
    pub fn new(
        mut writer: W,
        screen_width: u16,
        screen_height: u16,
        loop_count: u16,
    ) -> IoResult<Self> {
        block::write_header(&mut writer)?;
        block::write_logical_screen_descriptor(&mut writer, screen_width, screen_height)?;
        block::write_looping_extension(&mut writer, loop_count)?;
        Ok(Self {
            writer,
            screen_width,
            screen_height,
            frame_count: 0,
        })
    }

    /// Number of frames written so far.
    pub fn frame_count(&self) -> usize {
        self.frame_count
    }

    /// Append one frame.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::FrameOutOfBounds`] if the frame does not fit in
    /// the logical screen at its offset. Nothing is written in that case.
    pub fn add_image(&mut self, image: &Image, options: &FrameOptions) -> IoResult<()> {
        self.check_bounds(image, options)?;

        let population = image.colors();
        let reduced;
        let (image, table) = if population.distinct_len() > MAX_COLORS {
            let palette = options.quantizer.quantize(&population, MAX_COLORS)?;
            reduced = options.ditherer.dither(image, &palette)?;
            (&reduced, ColorTable::from_colors(palette))
        } else {
            (image, ColorTable::from_colors(population.distinct()))
        };

        let indices = table.indices_for(image)?;
        let lzw = LzwEncoder::new(table.padded_len())?;
        let data = lzw.encode(&indices);

        debug!(
            "frame {}: {}x{} at ({}, {}), {} distinct colors, {} palette entries, \
             min code size {}, {} LZW bytes",
            self.frame_count,
            image.width(),
            image.height(),
            options.left,
            options.top,
            population.distinct_len(),
            table.len(),
            lzw.minimum_code_size(),
            data.len()
        );

        let w = &mut self.writer;
        block::write_graphics_control_extension(w, options.disposal, options.delay_centiseconds)?;
        // Both dimensions fit in u16 after the bounds check
        block::write_image_descriptor(
            w,
            options.left,
            options.top,
            image.width() as u16,
            image.height() as u16,
            table.size_field(),
        )?;
        block::write_color_table(w, &table)?;
        block::write_image_data(w, lzw.minimum_code_size(), &data)?;

        self.frame_count += 1;
        Ok(())
    }

    /// Append a frame given as rows of packed `0xRRGGBB` pixels.
    pub fn add_rgb_rows<R: AsRef<[u32]>>(
        &mut self,
        rows: &[R],
        options: &FrameOptions,
    ) -> IoResult<()> {
        let image = Image::from_rgb_rows(rows)?;
        self.add_image(&image, options)
    }

    /// Append a frame given as a flat buffer of packed `0xRRGGBB` pixels.
    pub fn add_rgb(&mut self, rgb: &[u32], width: usize, options: &FrameOptions) -> IoResult<()> {
        let image = Image::from_rgb(rgb, width)?;
        self.add_image(&image, options)
    }

    /// Write the trailer, flush and return the writer.
    pub fn finish(mut self) -> IoResult<W> {
        block::write_trailer(&mut self.writer)?;
        self.writer.flush()?;
        debug!("finished GIF with {} frames", self.frame_count);
        Ok(self.writer)
    }

    fn check_bounds(&self, image: &Image, options: &FrameOptions) -> IoResult<()> {
        let fits = |offset: u16, len: usize, screen: u16| offset as usize + len <= screen as usize;
        if fits(options.left, image.width(), self.screen_width)
            && fits(options.top, image.height(), self.screen_height)
        {
            return Ok(());
        }
        Err(IoError::FrameOutOfBounds {
            left: options.left,
            top: options.top,
            width: image.width(),
            height: image.height(),
            screen_width: self.screen_width,
            screen_height: self.screen_height,
        })
    }
}
