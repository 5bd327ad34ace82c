//! Drawing-record walker.
//!
//! Scans the records that follow a picture descriptor, skipping everything
//! until the first BSE record, whose embedded BLIP is extracted. Records are
//! never descended into: containers are skipped whole by their declared
//! length.

use super::record::{EscherRecordType, RecordHeader};
use crate::common::binary::ByteCursor;
use crate::common::error::Result;
use crate::images::{ExtractedBlip, FileBlipStoreEntry, extract_blip};

/// The first image found in a drawing-record region.
#[derive(Debug, Clone)]
pub struct BlipHit<'data> {
    /// Absolute offset of the BSE record header
    pub record_offset: usize,
    pub bse: FileBlipStoreEntry,
    pub blip: ExtractedBlip<'data>,
}

/// Walks the drawing records of one Data stream element.
#[derive(Debug, Clone)]
pub struct DrawingRecordWalker<'data> {
    cursor: ByteCursor<'data>,
}

impl<'data> DrawingRecordWalker<'data> {
    /// The cursor must be positioned on the first record header; its limit
    /// is the end of the element.
    #[inline]
    pub fn new(cursor: ByteCursor<'data>) -> Self {
        Self { cursor }
    }

    /// Find and extract the first BSE record's BLIP.
    ///
    /// Returns `Ok(None)` when the region ends without a BSE record. Only the
    /// first BSE record is examined; if its BLIP cannot be extracted the
    /// error is returned and the rest of the region is not scanned.
    ///
    /// # Errors
    ///
    /// [`TruncatedInput`](crate::Error::TruncatedInput) when a header or a
    /// skip crosses the region end, plus any error from the BSE/BLIP decoders.
    pub fn find_blip(mut self) -> Result<Option<BlipHit<'data>>> {
        while !self.cursor.is_empty() {
            let record_offset = self.cursor.position();
            let header = RecordHeader::decode(&mut self.cursor)?;
            let kind = header.kind();

            tracing::trace!(
                offset = record_offset,
                record_type = header.record_type,
                instance = header.instance,
                length = header.length,
                "drawing record"
            );

            match kind {
                EscherRecordType::BSE => {
                    let bse = FileBlipStoreEntry::parse(&mut self.cursor)?;
                    let blip = extract_blip(&mut self.cursor)?;
                    if bse.declared_blip_type() != Some(blip.blip_type) {
                        tracing::debug!(
                            bt_win32 = bse.bt_win32,
                            blip_type = %blip.blip_type,
                            "BSE type byte disagrees with BLIP record"
                        );
                    }
                    return Ok(Some(BlipHit {
                        record_offset,
                        bse,
                        blip,
                    }));
                },
                k if k.is_shape_data() => {
                    tracing::trace!(kind = ?k, "skipping shape record");
                    self.cursor.skip(header.length as usize)?;
                },
                EscherRecordType::Blip(blip_type) => {
                    tracing::debug!(
                        offset = record_offset,
                        blip_type = %blip_type,
                        "skipping BLIP record outside a BSE"
                    );
                    self.cursor.skip(header.length as usize)?;
                },
                _ => {
                    tracing::trace!(
                        record_type = header.record_type,
                        "skipping unrecognised record"
                    );
                    self.cursor.skip(header.length as usize)?;
                },
            }
        }

        Ok(None)
    }
}
