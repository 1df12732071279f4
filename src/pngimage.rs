use std::io;

//===========================================================================//

// The signature that all PNG files start with.
const PNG_SIGNATURE: &[u8] = &[0x89, b'P', b'N', b'G'];

/// Returns true if the image blob holds a PNG file rather than a DIB.
/// Modern ICO entries may embed a whole PNG; such entries have no BMP info
/// header and must be routed to [`PngImage::read`] instead of the DIB
/// decoders.
pub fn is_png(data: &[u8]) -> bool {
    data.starts_with(PNG_SIGNATURE)
}

//===========================================================================//

/// A PNG-encoded icon entry decoded to RGBA.
///
/// Unlike the DIB decoders, whose output geometry comes from the caller's
/// [`BmpInfoHeader`](crate::BmpInfoHeader), a PNG entry carries its own
/// dimensions, so they are returned alongside the pixel data.
#[derive(Clone)]
pub struct PngImage {
    width: u32,
    height: u32,
    rgba_data: Vec<u8>,
}

impl PngImage {
    /// Decodes a PNG-encoded entry blob.  Returns an error if the data is
    /// malformed or uses a PNG feature this crate does not support (bit
    /// depths other than 8, or indexed color).
    pub fn read(data: &[u8]) -> io::Result<PngImage> {
        let decoder = png::Decoder::new(data);
        let mut png_reader = match decoder.read_info() {
            Ok(png_reader) => png_reader,
            Err(error) => invalid_data!("Malformed PNG data: {}", error),
        };
        if png_reader.info().bit_depth != png::BitDepth::Eight {
            invalid_data!(
                "Unsupported PNG bit depth: {:?}",
                png_reader.info().bit_depth
            );
        }
        let mut buffer = vec![0u8; png_reader.output_buffer_size()];
        match png_reader.next_frame(&mut buffer) {
            Ok(_) => {}
            Err(error) => invalid_data!("Malformed PNG data: {}", error),
        }
        let rgba_data = match png_reader.info().color_type {
            png::ColorType::Rgba => buffer,
            png::ColorType::Rgb => {
                let num_pixels = buffer.len() / 3;
                let mut rgba = Vec::with_capacity(num_pixels * 4);
                for i in 0..num_pixels {
                    rgba.extend_from_slice(&buffer[(3 * i)..][..3]);
                    rgba.push(u8::MAX);
                }
                rgba
            }
            png::ColorType::GrayscaleAlpha => {
                let num_pixels = buffer.len() / 2;
                let mut rgba = Vec::with_capacity(num_pixels * 4);
                for i in 0..num_pixels {
                    let gray = buffer[2 * i];
                    let alpha = buffer[2 * i + 1];
                    rgba.push(gray);
                    rgba.push(gray);
                    rgba.push(gray);
                    rgba.push(alpha);
                }
                rgba
            }
            png::ColorType::Grayscale => {
                let mut rgba = Vec::with_capacity(buffer.len() * 4);
                for value in buffer.into_iter() {
                    rgba.push(value);
                    rgba.push(value);
                    rgba.push(value);
                    rgba.push(u8::MAX);
                }
                rgba
            }
            png::ColorType::Indexed => {
                invalid_data!(
                    "Unsupported PNG color type: {:?}",
                    png_reader.info().color_type
                );
            }
        };
        let width = png_reader.info().width;
        let height = png_reader.info().height;
        Ok(PngImage { width, height, rgba_data })
    }

    /// Returns the width of the image, in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Returns the height of the image, in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Returns the RGBA data, in row-major order from top to bottom.
    pub fn rgba_data(&self) -> &[u8] {
        &self.rgba_data
    }

    /// Consumes the image, returning the RGBA data.
    pub fn into_rgba_data(self) -> Vec<u8> {
        self.rgba_data
    }
}

//===========================================================================//

#[cfg(test)]
mod tests {
    use super::{is_png, PngImage};

    // A 2x2 8-bit grayscale PNG.
    const GRAY_PNG: &[u8] = b"\
        \x89\x50\x4e\x47\x0d\x0a\x1a\x0a\x00\x00\x00\x0d\x49\x48\x44\x52\
        \x00\x00\x00\x02\x00\x00\x00\x02\x08\x00\x00\x00\x00\x57\xdd\x52\
        \xf8\x00\x00\x00\x0e\x49\x44\x41\x54\x78\x9c\x63\xb4\x77\x60\xdc\
        \xef\x00\x00\x04\x08\x01\x81\x86\x2e\xc9\x8d\x00\x00\x00\x00\x49\
        \x45\x4e\x44\xae\x42\x60\x82";

    #[test]
    fn sniff_png_signature() {
        assert!(is_png(GRAY_PNG));
        assert!(!is_png(b"\x28\x00\x00\x00"));
        assert!(!is_png(b""));
    }

    #[test]
    fn decode_grayscale_png() {
        let image = PngImage::read(GRAY_PNG).unwrap();
        assert_eq!(image.width(), 2);
        assert_eq!(image.height(), 2);
        let rgba: &[u8] = b"\
            \x3f\x3f\x3f\xff\x7f\x7f\x7f\xff\
            \xbf\xbf\xbf\xff\xff\xff\xff\xff";
        assert_eq!(image.rgba_data(), rgba);
    }

    #[test]
    fn reject_garbage() {
        assert!(PngImage::read(b"\x89PNG\r\n\x1a\x0anot a png").is_err());
    }
}

//===========================================================================//
