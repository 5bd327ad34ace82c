// BLIP (Binary Large Image or Picture) record extraction
//
// This module pulls the raw picture bytes out of an OfficeArtBlip record. The
// record body comes in two layouts: metafile formats (EMF, WMF, PICT) carry a
// 34-byte metafile header, bitmap formats (JPEG, PNG, DIB, TIFF) carry a
// single tag byte. Both may carry a second 16-byte UID, whose presence is
// signalled by a codec-specific record instance.
//
// References:
// - [MS-ODRAW] 2.2.23: OfficeArtBlip records
// - https://learn.microsoft.com/en-us/openspecs/office_file_formats/ms-odraw/5dc1b9ed-818c-436f-8a4f-905a7ebb1ba9

use crate::common::binary::ByteCursor;
use crate::common::error::{Error, Result};
use crate::escher::RecordHeader;
use zerocopy::{I32, LE, U32};
use zerocopy_derive::{FromBytes, Immutable, KnownLayout, Unaligned};

/// Size of a BLIP UID (MD4 digest of the picture data)
pub const UID_LEN: usize = 16;

/// Size of the OfficeArtMetafileHeader
pub const METAFILE_HEADER_LEN: usize = 34;

/// Type of BLIP record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlipType {
    /// Enhanced Metafile (EMF)
    Emf,
    /// Windows Metafile (WMF)
    Wmf,
    /// Macintosh PICT
    Pict,
    /// JPEG (RGB 0xF01D or CMYK 0xF02A)
    Jpeg,
    /// PNG
    Png,
    /// Device Independent Bitmap (DIB)
    Dib,
    /// TIFF
    Tiff,
}

/// How the body of a BLIP record is laid out after the record header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyLayout {
    /// UID, optional secondary UID, 34-byte metafile header, payload
    Metafile,
    /// UID, optional secondary UID, 1 tag byte, payload
    Tagged,
}

impl BodyLayout {
    /// Bytes between the record header and the payload when no secondary
    /// UID is present.
    pub const fn fixed_overhead(self) -> usize {
        match self {
            Self::Metafile => UID_LEN + METAFILE_HEADER_LEN,
            Self::Tagged => UID_LEN + 1,
        }
    }
}

impl BlipType {
    /// Parse BlipType from record type ID
    pub fn from_record_type(record_type: u16) -> Option<Self> {
        match record_type {
            0xF01A => Some(Self::Emf),
            0xF01B => Some(Self::Wmf),
            0xF01C => Some(Self::Pict),
            0xF01D | 0xF02A => Some(Self::Jpeg),
            0xF01E => Some(Self::Png),
            0xF01F => Some(Self::Dib),
            0xF029 => Some(Self::Tiff),
            _ => None,
        }
    }

    pub const fn layout(self) -> BodyLayout {
        match self {
            Self::Emf | Self::Wmf | Self::Pict => BodyLayout::Metafile,
            Self::Jpeg | Self::Png | Self::Dib | Self::Tiff => BodyLayout::Tagged,
        }
    }

    /// Record instances that announce a secondary UID for this codec.
    pub const fn secondary_uid_instances(self) -> &'static [u16] {
        match self {
            Self::Emf => &[0x3D5],
            Self::Wmf => &[0x217],
            Self::Pict => &[0x543],
            Self::Jpeg => &[0x46B, 0x6E3],
            Self::Png => &[0x6E1],
            Self::Dib => &[0x7A9],
            Self::Tiff => &[0x6E5],
        }
    }

    /// Check whether a record with this instance carries a secondary UID
    pub fn has_secondary_uid(self, instance: u16) -> bool {
        self.secondary_uid_instances().contains(&instance)
    }
}

impl std::fmt::Display for BlipType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Emf => "EMF",
            Self::Wmf => "WMF",
            Self::Pict => "PICT",
            Self::Jpeg => "JPEG",
            Self::Png => "PNG",
            Self::Dib => "DIB",
            Self::Tiff => "TIFF",
        };
        f.write_str(name)
    }
}

/// OfficeArtMetafileHeader as stored on disk.
#[derive(Debug, Clone, Copy, FromBytes, KnownLayout, Immutable, Unaligned)]
#[repr(C)]
struct RawMetafileHeader {
    uncompressed_size: U32<LE>,
    bounds: [I32<LE>; 4],
    size_emu: [I32<LE>; 2],
    compressed_size: U32<LE>,
    compression: u8,
    filter: u8,
}

/// Metafile header fields (decoded, not interpreted).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetafileHeader {
    /// Uncompressed size in bytes
    pub uncompressed_size: u32,
    /// Clipping bounds (left, top, right, bottom)
    pub bounds: (i32, i32, i32, i32),
    /// Size in EMU (English Metric Units) - width, height
    pub size_emu: (i32, i32),
    /// Compressed size in bytes
    pub compressed_size: u32,
    /// Compression flag (0 = deflate, 0xFE = no compression)
    pub compression: u8,
    /// Filter byte (usually 0xFE)
    pub filter: u8,
}

impl From<RawMetafileHeader> for MetafileHeader {
    fn from(raw: RawMetafileHeader) -> Self {
        let [left, top, right, bottom] = raw.bounds.map(|v| v.get());
        let [width, height] = raw.size_emu.map(|v| v.get());
        Self {
            uncompressed_size: raw.uncompressed_size.get(),
            bounds: (left, top, right, bottom),
            size_emu: (width, height),
            compressed_size: raw.compressed_size.get(),
            compression: raw.compression,
            filter: raw.filter,
        }
    }
}

/// Layout-specific fields that sit between the UIDs and the payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlipDetail {
    Metafile(MetafileHeader),
    /// Marker byte (0xFF for external files)
    Tagged(u8),
}

/// A BLIP record located inside a Data stream, borrowing its payload.
#[derive(Debug, Clone)]
pub struct ExtractedBlip<'data> {
    /// Record header of the BLIP record
    pub header: RecordHeader,
    pub blip_type: BlipType,
    /// Primary UID
    pub uid: [u8; UID_LEN],
    /// Secondary UID, present for the instances in
    /// [`BlipType::secondary_uid_instances`]
    pub secondary_uid: Option<[u8; UID_LEN]>,
    pub detail: BlipDetail,
    /// Raw picture bytes, exactly as stored
    pub payload: &'data [u8],
}

/// Extract the BLIP record at the cursor.
///
/// The cursor must sit on the BLIP record header. On success it is left just
/// past the payload.
///
/// # Errors
///
/// - [`Error::UnknownBlipType`] if the record type is not a BLIP
/// - [`Error::NegativeOrZeroPayload`] if the declared length does not cover
///   the fixed fields
/// - [`Error::TruncatedInput`] if the record runs past the cursor limit
pub fn extract_blip<'data>(cursor: &mut ByteCursor<'data>) -> Result<ExtractedBlip<'data>> {
    let header = RecordHeader::decode(cursor)?;
    let blip_type = BlipType::from_record_type(header.record_type)
        .ok_or(Error::UnknownBlipType(header.record_type))?;
    let layout = blip_type.layout();
    let has_secondary = blip_type.has_secondary_uid(header.instance);

    let mut remaining = i64::from(header.length) - layout.fixed_overhead() as i64;
    if has_secondary {
        remaining -= UID_LEN as i64;
    }
    if remaining <= 0 {
        return Err(Error::NegativeOrZeroPayload {
            declared: header.length,
            remaining,
        });
    }

    let uid = cursor.read_array::<UID_LEN>()?;
    let secondary_uid = if has_secondary {
        Some(cursor.read_array::<UID_LEN>()?)
    } else {
        None
    };

    let detail = match layout {
        BodyLayout::Metafile => {
            BlipDetail::Metafile(cursor.read_struct::<RawMetafileHeader>()?.into())
        },
        BodyLayout::Tagged => BlipDetail::Tagged(cursor.read_u8()?),
    };

    let payload = cursor.read_bytes(remaining as usize)?;

    tracing::trace!(
        blip_type = %blip_type,
        instance = header.instance,
        secondary_uid = has_secondary,
        payload_len = payload.len(),
        "decoded BLIP record"
    );

    Ok(ExtractedBlip {
        header,
        blip_type,
        uid,
        secondary_uid,
        detail,
        payload,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::escher::RECORD_HEADER_LEN;
    use crate::testing::blip_record;

    #[test]
    fn test_metafile_header_size() {
        assert_eq!(std::mem::size_of::<RawMetafileHeader>(), METAFILE_HEADER_LEN);
    }

    #[test]
    fn test_blip_type_layouts() {
        assert_eq!(BlipType::Emf.layout(), BodyLayout::Metafile);
        assert_eq!(BlipType::Wmf.layout(), BodyLayout::Metafile);
        assert_eq!(BlipType::Pict.layout(), BodyLayout::Metafile);
        assert_eq!(BlipType::Jpeg.layout(), BodyLayout::Tagged);
        assert_eq!(BlipType::Tiff.layout(), BodyLayout::Tagged);
        assert_eq!(BlipType::from_record_type(0xF02A), Some(BlipType::Jpeg));
        assert_eq!(BlipType::from_record_type(0xF007), None);
    }

    #[test]
    fn test_secondary_uid_triggers() {
        assert!(BlipType::Jpeg.has_secondary_uid(0x46B));
        assert!(BlipType::Jpeg.has_secondary_uid(0x6E3));
        assert!(!BlipType::Jpeg.has_secondary_uid(0x6E1));
        assert!(BlipType::Png.has_secondary_uid(0x6E1));
        assert!(BlipType::Emf.has_secondary_uid(0x3D5));
        assert!(!BlipType::Emf.has_secondary_uid(0x3D4));
    }

    #[test]
    fn test_every_record_type_with_and_without_secondary_uid() {
        let cases = [
            (0xF01A, BlipType::Emf, BodyLayout::Metafile, 0x3D5),
            (0xF01B, BlipType::Wmf, BodyLayout::Metafile, 0x217),
            (0xF01C, BlipType::Pict, BodyLayout::Metafile, 0x543),
            (0xF01D, BlipType::Jpeg, BodyLayout::Tagged, 0x46B),
            (0xF02A, BlipType::Jpeg, BodyLayout::Tagged, 0x6E3),
            (0xF01E, BlipType::Png, BodyLayout::Tagged, 0x6E1),
            (0xF01F, BlipType::Dib, BodyLayout::Tagged, 0x7A9),
            (0xF029, BlipType::Tiff, BodyLayout::Tagged, 0x6E5),
        ];
        let payload: Vec<u8> = (0u8..40).collect();

        for (record_type, blip_type, layout, trigger) in cases {
            let context = format!("record type 0x{record_type:04X}");
            assert_eq!(BlipType::from_record_type(record_type), Some(blip_type), "{context}");
            assert_eq!(blip_type.layout(), layout, "{context}");

            // No secondary UID
            let plain = blip_record(record_type, 0x000, &payload, false);
            assert_eq!(
                plain.len(),
                RECORD_HEADER_LEN + layout.fixed_overhead() + payload.len(),
                "{context}"
            );
            let blip = extract_blip(&mut ByteCursor::new(&plain)).unwrap();
            assert_eq!(blip.blip_type, blip_type, "{context}");
            assert_eq!(blip.payload, &payload[..], "{context}");
            assert!(blip.secondary_uid.is_none(), "{context}");
            match (layout, blip.detail) {
                (BodyLayout::Metafile, BlipDetail::Metafile(_))
                | (BodyLayout::Tagged, BlipDetail::Tagged(_)) => {},
                (_, detail) => panic!("{context}: unexpected detail {detail:?}"),
            }

            // Secondary UID written and counted in the record length
            let with_uid = blip_record(record_type, trigger, &payload, true);
            let blip = extract_blip(&mut ByteCursor::new(&with_uid)).unwrap();
            assert_eq!(blip.secondary_uid, Some([0x3C; UID_LEN]), "{context}");
            assert_eq!(blip.payload, &payload[..], "{context}");

            // Same declared length, trigger instance: payload loses 16 bytes
            let mut relabelled = plain.clone();
            relabelled[0..2].copy_from_slice(&(trigger << 4).to_le_bytes());
            let blip = extract_blip(&mut ByteCursor::new(&relabelled)).unwrap();
            assert_eq!(blip.payload.len(), payload.len() - UID_LEN, "{context}");
        }
    }

    #[test]
    fn test_extract_png() {
        let payload = b"\x89PNG\r\n\x1a\nrest-of-image";
        let data = blip_record(0xF01E, 0x6E0, payload, false);
        let mut cursor = ByteCursor::new(&data);

        let blip = extract_blip(&mut cursor).unwrap();
        assert_eq!(blip.blip_type, BlipType::Png);
        assert_eq!(blip.payload, payload);
        assert!(blip.secondary_uid.is_none());
        assert_eq!(blip.detail, BlipDetail::Tagged(0xFF));
        assert!(cursor.is_empty());
    }

    #[test]
    fn test_extract_emf_with_secondary_uid() {
        let payload = [0x01, 0x00, 0x00, 0x00, 0x6C, 0x00, 0x00, 0x00];
        let data = blip_record(0xF01A, 0x3D5, &payload, true);

        let blip = extract_blip(&mut ByteCursor::new(&data)).unwrap();
        assert_eq!(blip.blip_type, BlipType::Emf);
        assert_eq!(blip.payload, &payload);
        assert!(blip.secondary_uid.is_some());
        match blip.detail {
            BlipDetail::Metafile(header) => {
                assert_eq!(header.uncompressed_size, payload.len() as u32);
                assert_eq!(header.compression, 0xFE);
            },
            BlipDetail::Tagged(_) => panic!("EMF must use the metafile layout"),
        }
    }

    #[test]
    fn test_secondary_uid_shrinks_payload_by_sixteen() {
        // Same bytes and declared length, only the instance differs.
        let data = blip_record(0xF01D, 0x46A, &[0xAB; 64], false);
        let mut with_secondary = data.clone();
        with_secondary[0..2].copy_from_slice(&(0x46B_u16 << 4).to_le_bytes());

        let plain = extract_blip(&mut ByteCursor::new(&data)).unwrap();
        let shifted = extract_blip(&mut ByteCursor::new(&with_secondary)).unwrap();
        assert_eq!(plain.payload.len(), 64);
        assert_eq!(shifted.payload.len(), 64 - UID_LEN);
    }

    #[test]
    fn test_unknown_blip_type() {
        let data = blip_record(0xF00B, 0, &[0; 4], false);
        let err = extract_blip(&mut ByteCursor::new(&data)).unwrap_err();
        assert!(matches!(err, Error::UnknownBlipType(0xF00B)));
    }

    #[test]
    fn test_zero_payload_rejected() {
        // Tagged layout with exactly 17 bytes of body leaves nothing.
        let mut data = RecordHeader {
            version: 0,
            instance: 0x46A,
            record_type: 0xF01D,
            length: 17,
        }
        .to_bytes()
        .to_vec();
        data.extend_from_slice(&[0u8; 17]);

        let err = extract_blip(&mut ByteCursor::new(&data)).unwrap_err();
        assert!(matches!(
            err,
            Error::NegativeOrZeroPayload {
                declared: 17,
                remaining: 0
            }
        ));
    }

    #[test]
    fn test_negative_payload_with_secondary_uid() {
        let data = RecordHeader {
            version: 0,
            instance: 0x217,
            record_type: 0xF01B,
            length: 60,
        }
        .to_bytes();
        let err = extract_blip(&mut ByteCursor::new(&data)).unwrap_err();
        assert!(matches!(
            err,
            Error::NegativeOrZeroPayload { remaining: -6, .. }
        ));
    }

    #[test]
    fn test_declared_length_past_buffer() {
        let mut data = blip_record(0xF01F, 0x7A8, &[0x42; 10], false);
        data.truncate(data.len() - 3);
        let err = extract_blip(&mut ByteCursor::new(&data)).unwrap_err();
        assert!(matches!(err, Error::TruncatedInput { .. }));
    }
}
