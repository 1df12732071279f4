use crate::bmpinfo::{BmpDepth, BmpInfoHeader};
use std::io;

//===========================================================================//

// Every row of color data and every row of mask data is padded to a
// multiple of four bytes, each computed from its own natural byte width.
fn padded_row_len(data_len: usize) -> usize {
    ((data_len + 3) / 4) * 4
}

fn mask_row_len(width: usize) -> usize {
    padded_row_len((width + 7) / 8)
}

fn checked_num_pixels(header: &BmpInfoHeader) -> io::Result<usize> {
    match header.pixel_width().checked_mul(header.pixel_height()) {
        Some(num_pixels) => Ok(num_pixels),
        None => invalid_data!("Width * Height is too large"),
    }
}

// Reads the color table stored after the info header: `palette_len`
// entries of four bytes each, in B,G,R,reserved order.
fn read_palette(
    data: &[u8],
    header: &BmpInfoHeader,
) -> io::Result<Vec<(u8, u8, u8)>> {
    let start = header.size() as usize;
    let num_entries = header.palette_len();
    let end = match num_entries
        .checked_mul(4)
        .and_then(|len| start.checked_add(len))
    {
        Some(end) if end <= data.len() => end,
        _ => invalid_data!(
            "BMP color table out of range \
             ({} entries at offset {}, but data is {} bytes)",
            num_entries,
            start,
            data.len()
        ),
    };
    let mut palette = Vec::<(u8, u8, u8)>::with_capacity(num_entries);
    for entry in data[start..end].chunks_exact(4) {
        let (blue, green, red) = (entry[0], entry[1], entry[2]);
        palette.push((red, green, blue));
    }
    Ok(palette)
}

//===========================================================================//

/// Decodes a DIB image blob into an RGBA buffer, dispatching on the bit
/// depth declared by the parsed info header.
///
/// The output is `width * height/2 * 4` bytes, row-major from the top
/// visual row down; the bottom-up storage order of the source is undone
/// here.  Each pixel's alpha comes from the 1-bit transparency mask stored
/// after the color rows (set bit = transparent), except at 32 bpp where
/// the alpha channel is native.
pub fn decode(data: &[u8], header: &BmpInfoHeader) -> io::Result<Vec<u8>> {
    match header.depth() {
        BmpDepth::One => decode_1bpp(data, header),
        BmpDepth::Four => decode_4bpp(data, header),
        BmpDepth::Eight => decode_8bpp(data, header),
        BmpDepth::TwentyFour => decode_24bpp(data, header),
        BmpDepth::ThirtyTwo => decode_32bpp(data, header),
    }
}

/// Decodes a 1-bpp DIB: each bit is a palette index, high bit first.
pub fn decode_1bpp(
    data: &[u8],
    header: &BmpInfoHeader,
) -> io::Result<Vec<u8>> {
    debug_assert_eq!(header.bit_count(), 1);
    decode_paletted(data, header, 1)
}

/// Decodes a 4-bpp DIB: each nibble is a palette index, high nibble first.
pub fn decode_4bpp(
    data: &[u8],
    header: &BmpInfoHeader,
) -> io::Result<Vec<u8>> {
    debug_assert_eq!(header.bit_count(), 4);
    decode_paletted(data, header, 4)
}

/// Decodes an 8-bpp DIB: each byte is a palette index.
///
/// Unlike the other depths, a mask byte that falls beyond the end of the
/// supplied buffer is tolerated here and treated as "pixel transparent"
/// rather than a decode error; icons with truncated 8-bpp masks exist in
/// the wild.
pub fn decode_8bpp(
    data: &[u8],
    header: &BmpInfoHeader,
) -> io::Result<Vec<u8>> {
    debug_assert_eq!(header.bit_count(), 8);
    decode_paletted(data, header, 8)
}

// The shared shape of the three palette-indexed depths.  Color rows are
// `bits` bits per pixel padded to four bytes; the mask is one bit per
// pixel with its own padding; the stride math lives here once so the
// per-depth entry points stay trivial.
fn decode_paletted(
    data: &[u8],
    header: &BmpInfoHeader,
    bits: usize,
) -> io::Result<Vec<u8>> {
    let width = header.pixel_width();
    let height = header.pixel_height();
    let num_pixels = checked_num_pixels(header)?;
    let palette = read_palette(data, header)?;

    let data_offset = header.pixel_data_offset();
    let color_stride = padded_row_len((width * bits + 7) / 8);
    let mask_offset = data_offset + color_stride * height;
    let mask_stride = mask_row_len(width);
    if mask_offset > data.len() {
        invalid_data!(
            "BMP color data out of range \
             (ends at {}, but data is {} bytes)",
            mask_offset,
            data.len()
        );
    }
    // Only the 8-bpp decoder forgives a short mask (see decode_8bpp).
    if bits != 8 && mask_offset + mask_stride * height > data.len() {
        invalid_data!(
            "BMP mask data out of range \
             (ends at {}, but data is {} bytes)",
            mask_offset + mask_stride * height,
            data.len()
        );
    }

    let mut rgba = vec![0u8; num_pixels * 4];
    let mut all_transparent = true;
    for y in 0..height {
        let row = &data[(data_offset + y * color_stride)..][..color_stride];
        let mut start = 4 * (height - y - 1) * width;
        for x in 0..width {
            let index = match bits {
                1 => (row[x / 8] >> (7 - x % 8)) & 0x1,
                4 => (row[x / 2] >> (4 * (1 - x % 2))) & 0xf,
                _ => row[x],
            };
            let (red, green, blue) = match palette.get(index as usize) {
                Some(&color) => color,
                None => invalid_data!(
                    "BMP palette index out of range \
                     (was {}, but palette has {} entries)",
                    index,
                    palette.len()
                ),
            };
            rgba[start] = red;
            rgba[start + 1] = green;
            rgba[start + 2] = blue;
            let transparent =
                match data.get(mask_offset + y * mask_stride + x / 8) {
                    Some(&byte) => ((byte >> (7 - x % 8)) & 0x1) == 1,
                    None => true,
                };
            if !transparent {
                rgba[start + 3] = u8::MAX;
                all_transparent = false;
            }
            start += 4;
        }
    }

    if all_transparent {
        make_visible(&mut rgba, &palette)?;
    }
    Ok(rgba)
}

// Degenerate legacy icons store a correct color plane under an all-set
// mask, which would render as nothing.  Rather than return an invisible
// image, swap each pixel between the two boundary palette colors (entry 0
// is the nominal transparent color) and surface every pixel whose
// original color was not entry 0.
fn make_visible(
    rgba: &mut [u8],
    palette: &[(u8, u8, u8)],
) -> io::Result<()> {
    if palette.len() < 2 {
        // No alternate color exists to swap to.
        return Ok(());
    }
    let transparent_color = palette[0];
    for pixel in rgba.chunks_exact_mut(4) {
        let color = (pixel[0], pixel[1], pixel[2]);
        let index = match palette.iter().position(|&entry| entry == color) {
            Some(index) => index,
            None => invalid_data!(
                "Pixel color {:?} matches no palette entry",
                color
            ),
        };
        let visible = palette[index] != transparent_color;
        let (red, green, blue) =
            if index == 0 { palette[1] } else { palette[0] };
        pixel[0] = red;
        pixel[1] = green;
        pixel[2] = blue;
        if visible {
            pixel[3] = u8::MAX;
        }
    }
    Ok(())
}

/// Decodes a 24-bpp DIB: three bytes per pixel in B,G,R order, no palette,
/// alpha from the trailing mask.
pub fn decode_24bpp(
    data: &[u8],
    header: &BmpInfoHeader,
) -> io::Result<Vec<u8>> {
    debug_assert_eq!(header.bit_count(), 24);
    let width = header.pixel_width();
    let height = header.pixel_height();
    let num_pixels = checked_num_pixels(header)?;

    let data_offset = header.pixel_data_offset();
    let color_stride = padded_row_len(3 * width);
    let mask_offset = data_offset + color_stride * height;
    let mask_stride = mask_row_len(width);
    if mask_offset + mask_stride * height > data.len() {
        invalid_data!(
            "BMP image data out of range \
             (ends at {}, but data is {} bytes)",
            mask_offset + mask_stride * height,
            data.len()
        );
    }

    let mut rgba = vec![0u8; num_pixels * 4];
    for y in 0..height {
        let row = &data[(data_offset + y * color_stride)..][..color_stride];
        let mut start = 4 * (height - y - 1) * width;
        for x in 0..width {
            rgba[start] = row[3 * x + 2];
            rgba[start + 1] = row[3 * x + 1];
            rgba[start + 2] = row[3 * x];
            let mask_byte = data[mask_offset + y * mask_stride + x / 8];
            if ((mask_byte >> (7 - x % 8)) & 0x1) == 0 {
                rgba[start + 3] = u8::MAX;
            }
            start += 4;
        }
    }
    Ok(rgba)
}

/// Decodes a 32-bpp DIB: four bytes per pixel in B,G,R,A order.  The alpha
/// channel is native, so no transparency mask is read and the
/// all-transparent fallback never applies, even for an image whose every
/// alpha byte is zero.
pub fn decode_32bpp(
    data: &[u8],
    header: &BmpInfoHeader,
) -> io::Result<Vec<u8>> {
    debug_assert_eq!(header.bit_count(), 32);
    let width = header.pixel_width();
    let height = header.pixel_height();
    let num_pixels = checked_num_pixels(header)?;

    // Rows of 4-byte pixels are inherently 4-byte aligned; no padding.
    let data_offset = header.pixel_data_offset();
    if data_offset + num_pixels * 4 > data.len() {
        invalid_data!(
            "BMP image data out of range \
             (ends at {}, but data is {} bytes)",
            data_offset + num_pixels * 4,
            data.len()
        );
    }

    let mut rgba = vec![0u8; num_pixels * 4];
    for y in 0..height {
        let mut source = data_offset + y * width * 4;
        let mut start = 4 * (height - y - 1) * width;
        for _ in 0..width {
            rgba[start] = data[source + 2];
            rgba[start + 1] = data[source + 1];
            rgba[start + 2] = data[source];
            rgba[start + 3] = data[source + 3];
            source += 4;
            start += 4;
        }
    }
    Ok(rgba)
}

//===========================================================================//


//===========================================================================//
