use crate::header::{IcoHeader, IcoType};
use byteorder::{LittleEndian, ReadBytesExt};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::io::{self, Read};

//===========================================================================//

/// The variant-specific payload of a directory entry.
///
/// The icon and cursor layouts are mutually exclusive reinterpretations of
/// the same record: in a cursor record the hotspot coordinates occupy the
/// byte positions that an icon record uses for `planes`/`color_depth`.
/// Exactly one variant is produced per entry, selected by the container
/// header's [`IcoType`](crate::IcoType).
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
pub enum EntryKind {
    /// Payload of an ICO directory entry.
    Icon {
        /// Number of colors in the image's palette; 0 if not paletted.
        color_count: u8,
        /// The record's reserved byte, stored as read.
        reserved: u8,
    },
    /// Payload of a CUR directory entry.
    Cursor {
        /// Hotspot pixels right from the left edge of the image.
        hotspot_x: u16,
        /// Hotspot pixels down from the top edge of the image.
        hotspot_y: u16,
    },
}

//===========================================================================//

/// One directory entry, describing the geometry and location of a single
/// image embedded in an ICO/CUR container or executable resource.
///
/// Entries are only ever constructed by [`read_entries`] and
/// [`read_exe_entries`]; the sole mutation exposed afterwards is
/// [`set_real_image_offset`](DirEntry::set_real_image_offset), for callers
/// resolving executable resource IDs to file positions.
#[derive(Clone, Copy, Debug)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
pub struct DirEntry {
    width: u8,
    height: u8,
    planes: u16,
    color_depth: u16,
    image_size: u32,
    image_offset: u32,
    real_image_offset: u32,
    kind: EntryKind,
}

impl DirEntry {
    /// Returns the width of the image in pixels.  The on-disk field is a
    /// single byte where 0 stands for 256.
    pub fn width(&self) -> u32 {
        if self.width == 0 {
            256
        } else {
            self.width as u32
        }
    }

    /// Returns the height of the image in pixels.  The on-disk field is a
    /// single byte where 0 stands for 256.
    pub fn height(&self) -> u32 {
        if self.height == 0 {
            256
        } else {
            self.height as u32
        }
    }

    /// Returns the number of color planes (typically 0 or 1 for icons;
    /// always 0 for cursor entries, whose records have no planes field).
    pub fn planes(&self) -> u16 {
        self.planes
    }

    /// Returns the bit depth declared by the directory.  Note that the
    /// authoritative bit depth is the one in the image's own BMP info
    /// header; this field is zero in many real files.
    pub fn color_depth(&self) -> u16 {
        self.color_depth
    }

    /// Returns the byte length of the referenced image blob.
    pub fn image_size(&self) -> u32 {
        self.image_size
    }

    /// Returns the image location as encoded in the source container: an
    /// absolute file offset in the standalone layout, or a 16-bit resource
    /// ID in the executable-resource layout.
    pub fn image_offset(&self) -> u32 {
        self.image_offset
    }

    /// Returns the absolute file position of the image data.  Equal to
    /// [`image_offset`](DirEntry::image_offset) for standalone files; for
    /// executable resources it is 0 until the caller resolves the resource
    /// ID and stores the result via
    /// [`set_real_image_offset`](DirEntry::set_real_image_offset).
    pub fn real_image_offset(&self) -> u32 {
        self.real_image_offset
    }

    /// Stores the resolved absolute file position of the image data.
    /// Intended for callers of [`read_exe_entries`], after mapping the
    /// entry's resource ID through the host executable's resource table.
    pub fn set_real_image_offset(&mut self, offset: u32) {
        self.real_image_offset = offset;
    }

    /// Returns the variant-specific payload of this entry.
    pub fn kind(&self) -> EntryKind {
        self.kind
    }

    /// Returns the coordinates of the cursor hotspot (pixels right from the
    /// left edge of the image, and pixels down from the top edge), or `None`
    /// for icon entries.
    pub fn cursor_hotspot(&self) -> Option<(u16, u16)> {
        match self.kind {
            EntryKind::Cursor { hotspot_x, hotspot_y } => {
                Some((hotspot_x, hotspot_y))
            }
            EntryKind::Icon { .. } => None,
        }
    }
}

//===========================================================================//

/// Reads the directory-entry table of a standalone `.ico`/`.cur` file.
///
/// The stream must be positioned at the start of the table (right after the
/// 6-byte container header); exactly `header.image_count()` fixed 16-byte
/// records are read.  Offsets in this layout are already absolute, so each
/// entry's `real_image_offset` equals its `image_offset`.
pub fn read_entries<R: Read>(
    reader: &mut R,
    header: &IcoHeader,
) -> io::Result<Vec<DirEntry>> {
    let num_entries = header.image_count() as usize;
    let mut entries = Vec::<DirEntry>::with_capacity(num_entries);
    for _ in 0..num_entries {
        let width = reader.read_u8()?;
        let height = reader.read_u8()?;
        let color_count = reader.read_u8()?;
        let reserved = reader.read_u8()?;
        let planes_or_x = reader.read_u16::<LittleEndian>()?;
        let depth_or_y = reader.read_u16::<LittleEndian>()?;
        let image_size = reader.read_u32::<LittleEndian>()?;
        let image_offset = reader.read_u32::<LittleEndian>()?;
        let entry = match header.ico_type() {
            IcoType::Icon => DirEntry {
                width,
                height,
                planes: planes_or_x,
                color_depth: depth_or_y,
                image_size,
                image_offset,
                real_image_offset: image_offset,
                kind: EntryKind::Icon { color_count, reserved },
            },
            IcoType::Cursor => DirEntry {
                width,
                height,
                planes: 0,
                color_depth: 0,
                image_size,
                image_offset,
                real_image_offset: image_offset,
                kind: EntryKind::Cursor {
                    hotspot_x: planes_or_x,
                    hotspot_y: depth_or_y,
                },
            },
        };
        entries.push(entry);
    }
    Ok(entries)
}

/// Reads a directory-entry table in the executable-resource layout used by
/// RT_GROUP_ICON/RT_GROUP_CURSOR resources in EXE and DLL files.
///
/// Records here are 14 bytes, and the trailing 16-bit field at record
/// offset 12 is a resource ID rather than a file offset; it is stored in
/// each entry's `image_offset`, and `real_image_offset` is left at 0 until
/// the caller resolves the ID against the executable's resource table.
///
/// Cursor entries in this layout carry neither hotspot coordinates nor a
/// bit depth (cursor resources keep the hotspot in a separate resource
/// record), so those fields are zeroed.
pub fn read_exe_entries<R: Read>(
    reader: &mut R,
    header: &IcoHeader,
) -> io::Result<Vec<DirEntry>> {
    let num_entries = header.image_count() as usize;
    let mut entries = Vec::<DirEntry>::with_capacity(num_entries);
    for _ in 0..num_entries {
        let width = reader.read_u8()?;
        let height = reader.read_u8()?;
        let color_count = reader.read_u8()?;
        let reserved = reader.read_u8()?;
        let planes = reader.read_u16::<LittleEndian>()?;
        let color_depth = reader.read_u16::<LittleEndian>()?;
        let image_size = reader.read_u32::<LittleEndian>()?;
        let resource_id = reader.read_u16::<LittleEndian>()?;
        let entry = match header.ico_type() {
            IcoType::Icon => DirEntry {
                width,
                height,
                planes,
                color_depth,
                image_size,
                image_offset: resource_id as u32,
                real_image_offset: 0,
                kind: EntryKind::Icon { color_count, reserved },
            },
            IcoType::Cursor => DirEntry {
                width,
                height,
                planes: 0,
                color_depth: 0,
                image_size,
                image_offset: resource_id as u32,
                real_image_offset: 0,
                kind: EntryKind::Cursor { hotspot_x: 0, hotspot_y: 0 },
            },
        };
        entries.push(entry);
    }
    Ok(entries)
}

//===========================================================================//


//===========================================================================//
