use byteorder::{LittleEndian, ReadBytesExt};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::io::{self, Read};

//===========================================================================//

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
/// The kind of image stored in an ICO/CUR container.
pub enum IcoType {
    /// Plain images (ICO files, RT_GROUP_ICON resources)
    Icon,
    /// Images with cursor hotspots (CUR files, RT_GROUP_CURSOR resources)
    Cursor,
}

impl IcoType {
    /// Returns the type for the given wire value (1 for icons, 2 for
    /// cursors), or `None` for any other value.
    pub fn from_number(number: u16) -> Option<IcoType> {
        match number {
            1 => Some(IcoType::Icon),
            2 => Some(IcoType::Cursor),
            _ => None,
        }
    }

    /// Returns the wire value for this type, as stored in the container
    /// header.
    pub fn number(&self) -> u16 {
        match *self {
            IcoType::Icon => 1,
            IcoType::Cursor => 2,
        }
    }
}

//===========================================================================//

/// The 6-byte header at the start of an ICO/CUR container, giving the image
/// type and the number of directory entries that follow.
///
/// The header is owned by the caller and passed by reference into the
/// directory readers; it is never mutated by this crate.
#[derive(Clone, Copy, Debug)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
pub struct IcoHeader {
    ico_type: IcoType,
    image_count: u16,
}

impl IcoHeader {
    /// Creates a header for a directory of `image_count` entries of the
    /// given type.
    pub fn new(ico_type: IcoType, image_count: u16) -> IcoHeader {
        IcoHeader { ico_type, image_count }
    }

    /// Reads an ICONDIR header (reserved, type, count) from a stream.  An
    /// image type other than icon (1) or cursor (2) is a fatal parse error;
    /// no header is produced and the caller must not attempt to read
    /// directory entries.
    pub fn read<R: Read>(reader: &mut R) -> io::Result<IcoHeader> {
        let reserved = reader.read_u16::<LittleEndian>()?;
        if reserved != 0 {
            invalid_data!(
                "Invalid reserved field value in ICONDIR \
                 (was {}, but must be 0)",
                reserved
            );
        }
        let number = reader.read_u16::<LittleEndian>()?;
        let ico_type = match IcoType::from_number(number) {
            Some(ico_type) => ico_type,
            None => invalid_data!("Invalid image type ({})", number),
        };
        let image_count = reader.read_u16::<LittleEndian>()?;
        Ok(IcoHeader { ico_type, image_count })
    }

    /// Returns the type of image stored in this container, either icons or
    /// cursors.
    pub fn ico_type(&self) -> IcoType {
        self.ico_type
    }

    /// Returns the number of directory entries declared by the container.
    pub fn image_count(&self) -> u16 {
        self.image_count
    }
}

//===========================================================================//


//===========================================================================//
