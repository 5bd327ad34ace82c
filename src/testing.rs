//! Builders for synthetic Data stream fixtures used by the unit tests.

use crate::escher::RecordHeader;
use crate::images::{BlipType, UID_LEN};

/// Encode one drawing record with the given type and version/instance word.
pub(crate) fn record(record_type: u16, options: u16, body: &[u8]) -> Vec<u8> {
    let header = RecordHeader {
        version: (options & 0x0F) as u8,
        instance: options >> 4,
        record_type,
        length: body.len() as u32,
    };
    let mut out = header.to_bytes().to_vec();
    out.extend_from_slice(body);
    out
}

/// The 36 fixed FBSE bytes plus an optional UTF-16LE name.
pub(crate) fn bse_fields(name: Option<&str>) -> Vec<u8> {
    let name_bytes: Vec<u8> = name
        .map(|n| {
            n.encode_utf16()
                .chain(std::iter::once(0))
                .flat_map(u16::to_le_bytes)
                .collect()
        })
        .unwrap_or_default();

    let mut out = vec![0x05, 0x05]; // btWin32, btMacOS
    out.extend_from_slice(&[0x5A; 16]); // rgbUid
    out.extend_from_slice(&0x00FFu16.to_le_bytes()); // tag
    out.extend_from_slice(&0u32.to_le_bytes()); // size
    out.extend_from_slice(&1u32.to_le_bytes()); // cRef
    out.extend_from_slice(&0u32.to_le_bytes()); // foDelay
    out.push(0); // unused1
    out.push(name_bytes.len() as u8); // cbName
    out.extend_from_slice(&[0, 0]); // unused2, unused3
    out.extend_from_slice(&name_bytes);
    out
}

/// Encode a BLIP record around `payload`.
///
/// `secondary` controls whether a second UID is written and counted in the
/// record length; the caller picks an `instance` that agrees with it.
pub(crate) fn blip_record(
    record_type: u16,
    instance: u16,
    payload: &[u8],
    secondary: bool,
) -> Vec<u8> {
    let mut body = vec![0xC3; UID_LEN];
    if secondary {
        body.extend_from_slice(&[0x3C; UID_LEN]);
    }

    let metafile = BlipType::from_record_type(record_type)
        .map(|t| t.layout() == crate::images::BodyLayout::Metafile)
        .unwrap_or(false);
    if metafile {
        body.extend_from_slice(&(payload.len() as u32).to_le_bytes()); // cbSize
        for bound in [0i32, 0, 1000, 800] {
            body.extend_from_slice(&bound.to_le_bytes()); // rcBounds
        }
        body.extend_from_slice(&914_400i32.to_le_bytes()); // ptSize.x
        body.extend_from_slice(&731_520i32.to_le_bytes()); // ptSize.y
        body.extend_from_slice(&(payload.len() as u32).to_le_bytes()); // cbSave
        body.push(0xFE); // compression: none
        body.push(0xFE); // filter
    } else {
        body.push(0xFF); // tag
    }
    body.extend_from_slice(payload);

    record(record_type, instance << 4, &body)
}

/// A complete BSE record wrapping a BLIP record around `payload`.
pub(crate) fn bse_record(blip_record_type: u16, instance: u16, payload: &[u8]) -> Vec<u8> {
    named_bse_record(blip_record_type, instance, None, payload)
}

/// Like [`bse_record`], with an optional name stored in the BSE.
pub(crate) fn named_bse_record(
    blip_record_type: u16,
    instance: u16,
    name: Option<&str>,
    payload: &[u8],
) -> Vec<u8> {
    let secondary = BlipType::from_record_type(blip_record_type)
        .is_some_and(|t| t.has_secondary_uid(instance));
    let mut body = bse_fields(name);
    body.extend(blip_record(blip_record_type, instance, payload, secondary));
    record(0xF007, 0x0052, &body)
}

/// PICF bytes following `lcb`, from `cbHeader` through `cProps`.
pub(crate) fn picture_descriptor(header_size: u16, mapping_mode: u16, property_count: u16) -> Vec<u8> {
    let mut out = Vec::with_capacity(64);
    out.extend_from_slice(&header_size.to_le_bytes());
    // mfpf
    out.extend_from_slice(&mapping_mode.to_le_bytes());
    out.extend_from_slice(&1440u16.to_le_bytes()); // xExt
    out.extend_from_slice(&1080u16.to_le_bytes()); // yExt
    out.extend_from_slice(&0u16.to_le_bytes()); // swHMF
    // innerHeader
    out.extend_from_slice(&0u32.to_le_bytes()); // grf
    out.extend_from_slice(&0u32.to_le_bytes()); // padding1
    out.extend_from_slice(&0u16.to_le_bytes()); // mmPM
    out.extend_from_slice(&0u32.to_le_bytes()); // padding2
    // picmid
    out.extend_from_slice(&2880i16.to_le_bytes()); // dxaGoal
    out.extend_from_slice(&(-1i16).to_le_bytes()); // dyaGoal
    out.extend_from_slice(&1000u16.to_le_bytes()); // mx
    out.extend_from_slice(&1000u16.to_le_bytes()); // my
    out.extend_from_slice(&[0; 8]); // dxaReserved1..dyaReserved2
    out.push(0); // fReserved
    out.push(24); // bpp
    for _ in 0..4 {
        out.extend_from_slice(&[0x08, 0x01, 0x00, 0x00]); // Brc80
    }
    out.extend_from_slice(&[0; 4]); // dxaReserved3, dyaReserved3
    out.extend_from_slice(&property_count.to_le_bytes());
    out
}

/// The descriptor every valid fixture uses.
pub(crate) fn shape_descriptor() -> Vec<u8> {
    picture_descriptor(0x44, 0x64, 0)
}

/// One top-level Data stream element: `lcb`, descriptor, records.
pub(crate) fn data_element(descriptor: &[u8], records: &[u8]) -> Vec<u8> {
    let lcb = (4 + descriptor.len() + records.len()) as u32;
    let mut out = lcb.to_le_bytes().to_vec();
    out.extend_from_slice(descriptor);
    out.extend_from_slice(records);
    out
}

/// An element holding a single JPEG picture behind a shape container.
pub(crate) fn jpeg_element(payload: &[u8]) -> Vec<u8> {
    let mut records = record(0xF004, 0x000F, &[0xEE; 4]);
    records.extend(bse_record(0xF01D, 0x46A, payload));
    data_element(&shape_descriptor(), &records)
}
