//! OfficeArt record header.
//!
//! # Format
//!
//! Every drawing record starts with an 8-byte header:
//! - Bytes 0-1: Version (low 4 bits) and Instance (high 12 bits)
//! - Bytes 2-3: Record Type
//! - Bytes 4-7: Record Length (body bytes following the header)
//!
//! References:
//! - [MS-ODRAW] 2.2.1: OfficeArtRecordHeader

use crate::common::binary::ByteCursor;
use crate::common::error::Result;
use crate::images::BlipType;

/// Size of an encoded [`RecordHeader`].
pub const RECORD_HEADER_LEN: usize = 8;

/// Drawing record types the walker distinguishes.
///
/// Only the BSE record is decoded; the shape records are listed so the walker
/// can name what it skips. Anything else lands in [`Unknown`](Self::Unknown).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EscherRecordType {
    /// Shape Container
    SpContainer,
    /// Shape Group atom
    Spgr,
    /// Shape atom
    Sp,
    /// Shape Options
    Opt,
    /// Client Anchor
    ClientAnchor,
    /// Shape property list
    Fpspl,
    /// Secondary Opt (Shape Options)
    SecondaryOpt,
    /// Tertiary Opt
    TertiaryOpt,
    /// Blip Store Entry
    BSE,
    /// One of the BLIP record types
    Blip(BlipType),
    /// Any record type not listed above
    Unknown(u16),
}

impl EscherRecordType {
    pub const SP_CONTAINER: u16 = 0xF004;
    pub const BSE_ID: u16 = 0xF007;
    pub const SPGR: u16 = 0xF009;
    pub const SP: u16 = 0xF00A;
    pub const OPT: u16 = 0xF00B;
    pub const CLIENT_ANCHOR: u16 = 0xF010;
    pub const FPSPL: u16 = 0xF11D;
    pub const SECONDARY_OPT: u16 = 0xF121;
    pub const TERTIARY_OPT: u16 = 0xF122;

    /// Classify a raw record type.
    pub fn from_raw(raw: u16) -> Self {
        match raw {
            Self::SP_CONTAINER => Self::SpContainer,
            Self::SPGR => Self::Spgr,
            Self::SP => Self::Sp,
            Self::OPT => Self::Opt,
            Self::CLIENT_ANCHOR => Self::ClientAnchor,
            Self::FPSPL => Self::Fpspl,
            Self::SECONDARY_OPT => Self::SecondaryOpt,
            Self::TERTIARY_OPT => Self::TertiaryOpt,
            Self::BSE_ID => Self::BSE,
            other => BlipType::from_record_type(other)
                .map(Self::Blip)
                .unwrap_or(Self::Unknown(other)),
        }
    }

    /// Records carrying shape data that image extraction never needs.
    #[inline]
    pub const fn is_shape_data(self) -> bool {
        matches!(
            self,
            Self::SpContainer
                | Self::Spgr
                | Self::Sp
                | Self::Opt
                | Self::ClientAnchor
                | Self::Fpspl
                | Self::SecondaryOpt
                | Self::TertiaryOpt
        )
    }
}

impl From<u16> for EscherRecordType {
    #[inline]
    fn from(raw: u16) -> Self {
        Self::from_raw(raw)
    }
}

/// Decoded OfficeArt record header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordHeader {
    /// Record version (4 bits)
    pub version: u8,
    /// Record instance (12 bits)
    pub instance: u16,
    /// Raw record type
    pub record_type: u16,
    /// Record length (excluding header)
    pub length: u32,
}

impl RecordHeader {
    /// Decode a header, consuming exactly [`RECORD_HEADER_LEN`] bytes.
    ///
    /// No field is validated; callers check `record_type` and `length`.
    pub fn decode(cursor: &mut ByteCursor<'_>) -> Result<Self> {
        let ver_inst = cursor.read_u16_le()?;
        let record_type = cursor.read_u16_le()?;
        let length = cursor.read_u32_le()?;

        Ok(Self {
            version: (ver_inst & 0x000F) as u8,
            instance: (ver_inst & 0xFFF0) >> 4,
            record_type,
            length,
        })
    }

    /// Classified record type.
    #[inline]
    pub fn kind(&self) -> EscherRecordType {
        EscherRecordType::from_raw(self.record_type)
    }

    /// The packed version/instance word.
    pub const fn options(&self) -> u16 {
        (self.instance << 4) | (self.version as u16 & 0x0F)
    }

    /// Encode the header back into its 8-byte wire form.
    pub fn to_bytes(&self) -> [u8; RECORD_HEADER_LEN] {
        let mut out = [0u8; RECORD_HEADER_LEN];
        out[0..2].copy_from_slice(&self.options().to_le_bytes());
        out[2..4].copy_from_slice(&self.record_type.to_le_bytes());
        out[4..8].copy_from_slice(&self.length.to_le_bytes());
        out
    }
}
