// File Blip Store Entry (FBSE) record parsing
//
// In a Word Data stream each picture's drawing records contain one BSE
// record whose body holds the image metadata followed directly by the
// embedded BLIP record.
//
// References:
// - [MS-ODRAW] 2.2.32: OfficeArtFBSE
// - [MS-ODRAW] 2.4.1: MSOBLIPTYPE

use crate::common::binary::{ByteCursor, parse_utf16le_string};
use crate::common::error::{Error, Result};
use crate::images::BlipType;

/// Maximum value of `cbName`
pub const MAX_NAME_LEN: u8 = 0xFE;

/// FBSE fields preceding the embedded BLIP record.
///
/// # Format
/// ```text
/// Offset | Size | Field
/// -------|------|------
/// 0      | 1    | btWin32 (BLIP type for Windows)
/// 1      | 1    | btMacOS (BLIP type for Mac)
/// 2      | 16   | rgbUid (MD4 of the BLIP data)
/// 18     | 2    | tag
/// 20     | 4    | size (BLIP data size)
/// 24     | 4    | cRef (reference count)
/// 28     | 4    | foDelay (reserved here)
/// 32     | 1    | unused1
/// 33     | 1    | cbName (name length)
/// 34     | 1    | unused2
/// 35     | 1    | unused3
/// 36     | N    | nameData (present if cbName > 0)
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileBlipStoreEntry {
    /// BLIP type indicator for Windows
    pub bt_win32: u8,
    /// BLIP type indicator for Mac OS
    pub bt_macos: u8,
    /// Content UID
    pub uid: [u8; 16],
    /// Resource tag (0xFF for external files)
    pub tag: u16,
    /// Size of BLIP data in bytes
    pub size: u32,
    /// Reference count
    pub ref_count: u32,
    /// Name length in bytes
    pub name_len: u8,
    /// Name decoded from UTF-16LE, if present
    pub name: Option<String>,
}

impl FileBlipStoreEntry {
    /// Size of the fixed part of the record body.
    pub const FIXED_LEN: usize = 36;

    /// Parse the FBSE fields at the cursor, leaving it on the BLIP header.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedRecord`] for an odd name length and
    /// [`Error::TruncatedInput`] when the fields run past the cursor limit.
    pub fn parse(cursor: &mut ByteCursor<'_>) -> Result<Self> {
        let bt_win32 = cursor.read_u8()?;
        let bt_macos = cursor.read_u8()?;
        let uid = cursor.read_array::<16>()?;
        let tag = cursor.read_u16_le()?;
        let size = cursor.read_u32_le()?;
        let ref_count = cursor.read_u32_le()?;
        cursor.skip(4)?; // foDelay
        cursor.skip(1)?; // unused1
        let name_len = cursor.read_u8()?;
        cursor.skip(2)?; // unused2, unused3

        if name_len % 2 != 0 || name_len > MAX_NAME_LEN {
            return Err(Error::MalformedRecord(format!(
                "BSE name length {name_len} must be even and at most {MAX_NAME_LEN}"
            )));
        }

        let name = if name_len > 0 {
            let raw = cursor.read_bytes(usize::from(name_len))?;
            Some(parse_utf16le_string(raw)).filter(|n| !n.is_empty())
        } else {
            None
        };

        Ok(Self {
            bt_win32,
            bt_macos,
            uid,
            tag,
            size,
            ref_count,
            name_len,
            name,
        })
    }

    /// BLIP type announced by `btWin32`, if it names a supported codec.
    pub fn declared_blip_type(&self) -> Option<BlipType> {
        match self.bt_win32 {
            0x02 => Some(BlipType::Emf),
            0x03 => Some(BlipType::Wmf),
            0x04 => Some(BlipType::Pict),
            0x05 | 0x12 => Some(BlipType::Jpeg),
            0x06 => Some(BlipType::Png),
            0x07 => Some(BlipType::Dib),
            0x11 => Some(BlipType::Tiff),
            _ => None,
        }
    }
}
