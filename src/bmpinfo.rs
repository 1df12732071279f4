use byteorder::{LittleEndian, ReadBytesExt};
use std::io::{self, Read};

//===========================================================================//

// The size of a BITMAPINFOHEADER struct, in bytes.
const BMP_HEADER_LEN: u32 = 40;

//===========================================================================//

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum BmpDepth {
    One,
    Four,
    Eight,
    TwentyFour,
    ThirtyTwo,
}

impl BmpDepth {
    pub(crate) fn from_bit_count(bit_count: u16) -> Option<BmpDepth> {
        match bit_count {
            1 => Some(BmpDepth::One),
            4 => Some(BmpDepth::Four),
            8 => Some(BmpDepth::Eight),
            24 => Some(BmpDepth::TwentyFour),
            32 => Some(BmpDepth::ThirtyTwo),
            _ => None,
        }
    }

    pub(crate) fn bit_count(&self) -> u16 {
        match *self {
            BmpDepth::One => 1,
            BmpDepth::Four => 4,
            BmpDepth::Eight => 8,
            BmpDepth::TwentyFour => 24,
            BmpDepth::ThirtyTwo => 32,
        }
    }
}

//===========================================================================//

/// The parsed DIB header at the start of an embedded BMP image blob.
///
/// Only the fields the decoders consume are retained.  Note that the
/// stored `height` is doubled: it counts the rows of the color data and
/// the rows of the trailing 1-bit transparency mask together.
#[derive(Clone, Copy, Debug)]
pub struct BmpInfoHeader {
    size: u32,
    width: i32,
    height: i32,
    depth: BmpDepth,
    clr_used: u32,
}

impl BmpInfoHeader {
    /// Parses a BITMAPINFOHEADER from the start of an image blob.  All 40
    /// header bytes are consumed, so on success a stream reader is left
    /// positioned at the palette (if any).
    pub fn read<R: Read>(reader: &mut R) -> io::Result<BmpInfoHeader> {
        let size = reader.read_u32::<LittleEndian>()?;
        if size < BMP_HEADER_LEN {
            invalid_data!(
                "Invalid BMP header size (was {}, must be at least {})",
                size,
                BMP_HEADER_LEN
            );
        }
        let width = reader.read_i32::<LittleEndian>()?;
        if width < 1 {
            invalid_data!(
                "Invalid BMP width (was {}, but must be at least 1)",
                width
            );
        }
        let height = reader.read_i32::<LittleEndian>()?;
        // The height counts both the color rows and the mask rows, so it
        // must be even and cover at least one pixel row.
        if height % 2 != 0 || height < 2 {
            invalid_data!(
                "Invalid BMP height (was {}, but must be even and \
                 at least 2)",
                height
            );
        }
        let _planes = reader.read_u16::<LittleEndian>()?;
        let bit_count = reader.read_u16::<LittleEndian>()?;
        let depth = match BmpDepth::from_bit_count(bit_count) {
            Some(depth) => depth,
            None => invalid_data!(
                "Unsupported BMP bits-per-pixel ({})",
                bit_count
            ),
        };
        let _compression = reader.read_u32::<LittleEndian>()?;
        let _image_size = reader.read_u32::<LittleEndian>()?;
        let _horz_ppm = reader.read_i32::<LittleEndian>()?;
        let _vert_ppm = reader.read_i32::<LittleEndian>()?;
        let clr_used = reader.read_u32::<LittleEndian>()?;
        let _clr_important = reader.read_u32::<LittleEndian>()?;
        Ok(BmpInfoHeader { size, width, height, depth, clr_used })
    }

    /// Returns the declared header length in bytes, which is also the
    /// offset of the palette within the image blob.
    pub fn size(&self) -> u32 {
        self.size
    }

    /// Returns the stored width field.
    pub fn width(&self) -> i32 {
        self.width
    }

    /// Returns the stored height field, which includes the mask rows and
    /// is therefore double the visual height.
    pub fn height(&self) -> i32 {
        self.height
    }

    /// Returns the bits-per-pixel of the color data; one of 1, 4, 8, 24
    /// or 32.
    pub fn bit_count(&self) -> u16 {
        self.depth.bit_count()
    }

    /// Returns the stored palette-entry count; 0 means "use
    /// `2^bit_count`" for paletted depths.
    pub fn clr_used(&self) -> u32 {
        self.clr_used
    }

    /// Returns the image width in pixels.
    pub fn pixel_width(&self) -> usize {
        self.width as usize
    }

    /// Returns the visual image height in pixels (half the stored height,
    /// which also counts the mask rows).
    pub fn pixel_height(&self) -> usize {
        (self.height / 2) as usize
    }

    pub(crate) fn depth(&self) -> BmpDepth {
        self.depth
    }

    /// Returns the number of palette entries stored after the header: the
    /// declared count if nonzero, otherwise `2^bit_count` for paletted
    /// depths.  24- and 32-bpp images normally have none.
    pub fn palette_len(&self) -> usize {
        match self.depth() {
            BmpDepth::One | BmpDepth::Four | BmpDepth::Eight => {
                if self.clr_used > 0 {
                    self.clr_used as usize
                } else {
                    1 << self.depth.bit_count()
                }
            }
            BmpDepth::TwentyFour | BmpDepth::ThirtyTwo => {
                self.clr_used as usize
            }
        }
    }

    /// Returns the offset of the pixel data within the image blob: the
    /// header followed by the palette at four bytes per entry.
    pub fn pixel_data_offset(&self) -> usize {
        self.size as usize + self.palette_len() * 4
    }
}

//===========================================================================//

#[cfg(test)]
mod tests {
    use super::{BmpDepth, BmpInfoHeader};
    use std::io::Cursor;

    fn header_bytes(
        width: i32,
        height: i32,
        bit_count: u16,
        clr_used: u32,
    ) -> Vec<u8> {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&40u32.to_le_bytes());
        bytes.extend_from_slice(&width.to_le_bytes());
        bytes.extend_from_slice(&height.to_le_bytes());
        bytes.extend_from_slice(&1u16.to_le_bytes()); // planes
        bytes.extend_from_slice(&bit_count.to_le_bytes());
        bytes.extend_from_slice(&[0u8; 16]); // compression through ppm
        bytes.extend_from_slice(&clr_used.to_le_bytes());
        bytes.extend_from_slice(&0u32.to_le_bytes()); // clr_important
        bytes
    }

    #[test]
    fn bmp_depth_round_trip() {
        let depths = &[
            BmpDepth::One,
            BmpDepth::Four,
            BmpDepth::Eight,
            BmpDepth::TwentyFour,
            BmpDepth::ThirtyTwo,
        ];
        for &depth in depths.iter() {
            assert_eq!(BmpDepth::from_bit_count(depth.bit_count()),
                       Some(depth));
        }
    }

    #[test]
    fn parse_basic_header() {
        let bytes = header_bytes(16, 32, 4, 0);
        let header = BmpInfoHeader::read(&mut Cursor::new(&bytes)).unwrap();
        assert_eq!(header.size(), 40);
        assert_eq!(header.pixel_width(), 16);
        assert_eq!(header.pixel_height(), 16);
        assert_eq!(header.bit_count(), 4);
        assert_eq!(header.clr_used(), 0);
    }

    #[test]
    fn default_palette_len_is_two_to_the_bit_count() {
        for &(bit_count, len) in &[(1u16, 2usize), (4, 16), (8, 256)] {
            let bytes = header_bytes(8, 16, bit_count, 0);
            let header =
                BmpInfoHeader::read(&mut Cursor::new(&bytes)).unwrap();
            assert_eq!(header.palette_len(), len);
            assert_eq!(header.pixel_data_offset(), 40 + len * 4);
        }
    }

    #[test]
    fn declared_palette_len_overrides_the_default() {
        let bytes = header_bytes(8, 16, 8, 17);
        let header = BmpInfoHeader::read(&mut Cursor::new(&bytes)).unwrap();
        assert_eq!(header.palette_len(), 17);
        assert_eq!(header.pixel_data_offset(), 40 + 17 * 4);
    }

    #[test]
    fn true_color_depths_have_no_default_palette() {
        for &bit_count in &[24u16, 32] {
            let bytes = header_bytes(8, 16, bit_count, 0);
            let header =
                BmpInfoHeader::read(&mut Cursor::new(&bytes)).unwrap();
            assert_eq!(header.palette_len(), 0);
            assert_eq!(header.pixel_data_offset(), 40);
        }
    }

    #[test]
    fn reject_odd_height() {
        let bytes = header_bytes(16, 31, 4, 0);
        assert!(BmpInfoHeader::read(&mut Cursor::new(&bytes)).is_err());
    }

    #[test]
    fn reject_nonpositive_width() {
        for &width in &[0i32, -16] {
            let bytes = header_bytes(width, 32, 4, 0);
            assert!(BmpInfoHeader::read(&mut Cursor::new(&bytes)).is_err());
        }
    }

    #[test]
    fn reject_unsupported_bit_count() {
        for &bit_count in &[0u16, 2, 16, 64] {
            let bytes = header_bytes(16, 32, bit_count, 0);
            assert!(BmpInfoHeader::read(&mut Cursor::new(&bytes)).is_err());
        }
    }

    #[test]
    fn reject_undersized_header_length() {
        let mut bytes = header_bytes(16, 32, 4, 0);
        bytes[0] = 12;
        assert!(BmpInfoHeader::read(&mut Cursor::new(&bytes)).is_err());
    }
}

//===========================================================================//
