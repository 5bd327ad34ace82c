//! Picture descriptor (PICF) parsing.
//!
//! Each picture in a Word Data stream starts with a PICF structure: a 4-byte
//! `lcb` (read by the stream scanner), followed by the fixed 0x44-byte header
//! decoded here, after which the OfficeArt drawing records begin.
//!
//! References:
//! - [MS-DOC] 2.9.192: PICFAndOfficeArtData
//! - [MS-DOC] 2.9.193: PICF
//! - [MS-DOC] 2.9.194: PICMID
//! - [MS-DOC] 2.9.17: Brc80

use crate::common::binary::ByteCursor;
use crate::common::error::{Error, Result};
use zerocopy_derive::{FromBytes, Immutable, KnownLayout, Unaligned};

/// The only header size this decoder understands.
pub const PICF_HEADER_SIZE: u16 = 0x44;

/// Metafile mapping mode of a PICF.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MappingMode {
    /// MM_SHAPE (0x64): the picture is an OfficeArt shape
    Shape,
    /// MM_SHAPEFILE (0x66): shape followed by a picture file name
    ShapeFile,
}

impl MappingMode {
    pub const MM_SHAPE: u16 = 0x64;
    pub const MM_SHAPEFILE: u16 = 0x66;

    pub fn from_raw(raw: u16) -> Option<Self> {
        match raw {
            Self::MM_SHAPE => Some(Self::Shape),
            Self::MM_SHAPEFILE => Some(Self::ShapeFile),
            _ => None,
        }
    }
}

/// Border descriptor, kept structurally and never interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, FromBytes, KnownLayout, Immutable, Unaligned)]
#[repr(C)]
pub struct Brc80 {
    /// Line width in eighths of a point
    pub line_width: u8,
    pub border_type: u8,
    /// Palette color index
    pub color_index: u8,
    /// dptSpace (5 bits), fShadow, fFrame, reserved
    pub flags: u8,
}

/// Fixed-layout picture descriptor preceding the drawing records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PictureDescriptor {
    pub header_size: u16,
    pub mapping_mode: MappingMode,
    /// Horizontal and vertical extents from the mfpf
    pub extents: (u16, u16),
    /// swHMF, the placeable metafile handle
    pub placeable_handle: u16,
    /// grf from the inner header
    pub flags: u32,
    /// mmPM from the inner header
    pub mapping_mode_print: u16,
    /// Initial size in twips (dxaGoal, dyaGoal)
    pub goal_extent: (i16, i16),
    /// Scaling in thousandths (mx, my)
    pub scale: (u16, u16),
    pub bits_per_pixel: u8,
    /// Borders above, left, below, right
    pub borders: [Brc80; 4],
    pub property_count: u16,
}

impl PictureDescriptor {
    /// Parse the descriptor that starts right after `lcb`.
    ///
    /// On success the cursor sits on the first drawing record. A
    /// `MM_SHAPEFILE` picture name, if any, is not consumed.
    ///
    /// # Errors
    ///
    /// [`Error::UnsupportedHeaderSize`], [`Error::UnsupportedMappingMode`],
    /// [`Error::UnsupportedExtendedProperties`], or
    /// [`Error::TruncatedInput`] if the element is too short.
    pub fn parse(cursor: &mut ByteCursor<'_>) -> Result<Self> {
        let header_size = cursor.read_u16_le()?;
        if header_size != PICF_HEADER_SIZE {
            return Err(Error::UnsupportedHeaderSize(header_size));
        }

        // mfpf
        let raw_mode = cursor.read_u16_le()?;
        let x_ext = cursor.read_u16_le()?;
        let y_ext = cursor.read_u16_le()?;
        let placeable_handle = cursor.read_u16_le()?;
        let mapping_mode =
            MappingMode::from_raw(raw_mode).ok_or(Error::UnsupportedMappingMode(raw_mode))?;

        // innerHeader
        let flags = cursor.read_u32_le()?;
        cursor.skip(4)?;
        let mapping_mode_print = cursor.read_u16_le()?;
        cursor.skip(4)?;

        // picmid
        let dxa_goal = cursor.read_i16_le()?;
        let dya_goal = cursor.read_i16_le()?;
        let mx = cursor.read_u16_le()?;
        let my = cursor.read_u16_le()?;
        cursor.skip(8)?; // dxaReserved1, dyaReserved1, dxaReserved2, dyaReserved2
        cursor.skip(1)?; // fReserved
        let bits_per_pixel = cursor.read_u8()?;
        let borders = [
            cursor.read_struct::<Brc80>()?,
            cursor.read_struct::<Brc80>()?,
            cursor.read_struct::<Brc80>()?,
            cursor.read_struct::<Brc80>()?,
        ];
        cursor.skip(4)?; // dxaReserved3, dyaReserved3

        let property_count = cursor.read_u16_le()?;
        if property_count != 0 {
            return Err(Error::UnsupportedExtendedProperties(property_count));
        }

        if mapping_mode == MappingMode::ShapeFile {
            tracing::debug!(
                offset = cursor.position(),
                "MM_SHAPEFILE picture name is not consumed"
            );
        }

        Ok(Self {
            header_size,
            mapping_mode,
            extents: (x_ext, y_ext),
            placeable_handle,
            flags,
            mapping_mode_print,
            goal_extent: (dxa_goal, dya_goal),
            scale: (mx, my),
            bits_per_pixel,
            borders,
            property_count,
        })
    }
}
