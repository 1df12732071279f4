//! A library for decoding ICO/CUR icon containers and the legacy DIB
//! images embedded in them, producing uncompressed RGBA pixel buffers.
//!
//! Directory tables can be read both from standalone `.ico`/`.cur` files
//! (16-byte entries holding absolute offsets) and from icon resources in
//! executables/DLLs (14-byte entries holding resource IDs, resolved by the
//! caller).  The embedded images themselves are decoded by bit depth: 1,
//! 4, 8, 24 and 32 bpp DIBs are handled by [`decode`] and the per-depth
//! entry points, while PNG-encoded entries are detected with [`is_png`]
//! and decoded through [`PngImage`].
//!
//! # Example
//!
//! ```no_run
//! use std::fs;
//! use std::io::Cursor;
//!
//! let file = fs::read("example.ico").unwrap();
//! let mut reader = Cursor::new(&file);
//! let header = ico_reader::IcoHeader::read(&mut reader).unwrap();
//! let entries = ico_reader::read_entries(&mut reader, &header).unwrap();
//! for entry in entries.iter() {
//!     let start = entry.real_image_offset() as usize;
//!     let data = &file[start..][..entry.image_size() as usize];
//!     if ico_reader::is_png(data) {
//!         let image = ico_reader::PngImage::read(data).unwrap();
//!         println!("{}x{} PNG entry", image.width(), image.height());
//!     } else {
//!         let info =
//!             ico_reader::BmpInfoHeader::read(&mut Cursor::new(data))
//!                 .unwrap();
//!         let rgba = ico_reader::decode(data, &info).unwrap();
//!         println!("{}x{} DIB entry, {} bytes of RGBA",
//!                  info.pixel_width(), info.pixel_height(), rgba.len());
//!     }
//! }
//! ```

#![warn(missing_docs)]

#[macro_use]
mod macros;

mod bmpdecode;
mod bmpinfo;
mod direntry;
mod header;
mod pngimage;

pub use crate::bmpdecode::{
    decode, decode_1bpp, decode_24bpp, decode_32bpp, decode_4bpp,
    decode_8bpp,
};
pub use crate::bmpinfo::BmpInfoHeader;
pub use crate::direntry::{
    read_entries, read_exe_entries, DirEntry, EntryKind,
};
pub use crate::header::{IcoHeader, IcoType};
pub use crate::pngimage::{is_png, PngImage};

//===========================================================================//
