//! gifweave-io - GIF89a animation writer
//!
//! - **LZW compression** ([`lzw`]): the format's variable-width LZW variant
//! - **Block writers** ([`block`]): header, screen descriptor, extensions,
//!   image descriptor, color table, image data and trailer
//! - **Encoder** ([`encoder`]): [`GifEncoder`] sequences the blocks for
//!   each frame
//!
//! # Example
//!
//! ```
//! use gifweave_io::{FrameOptions, GifEncoder};
//! use std::time::Duration;
//!
//! let mut encoder = GifEncoder::new(Vec::new(), 2, 1, 0).unwrap();
//! let options = FrameOptions::default().with_delay(Duration::from_millis(500));
//! encoder.add_rgb(&[0xff0000, 0x0000ff], 2, &options).unwrap();
//! encoder.add_rgb(&[0x0000ff, 0xff0000], 2, &options).unwrap();
//! let bytes = encoder.finish().unwrap();
//! assert!(bytes.starts_with(b"GIF89a"));
//! assert_eq!(bytes.last(), Some(&0x3B));
//! ```

pub mod block;
pub mod encoder;
pub mod error;
pub mod lzw;

pub use block::DisposalMethod;
pub use encoder::{FrameOptions, GifEncoder, MAX_COLORS};
pub use error::{IoError, IoResult};
pub use lzw::LzwEncoder;
