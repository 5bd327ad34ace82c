//! Top-level scan of a Word "Data" stream.
//!
//! The Data stream is a sequence of elements, each prefixed with its total
//! size (`lcb`, including the 4 size bytes). Picture elements carry a PICF
//! header followed by OfficeArt records; the scanner decodes each element in
//! isolation so a malformed one only costs that element.

use super::picture::PictureDescriptor;
use crate::common::binary::ByteCursor;
use crate::common::error::Result;
use crate::escher::{BlipHit, DrawingRecordWalker};
use crate::images::ResultSink;

/// Size of the `lcb` prefix of every element.
pub const ELEMENT_SIZE_LEN: usize = 4;

/// When the scanner stops looking for images.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScanPolicy {
    /// Stop the whole scan after the first extracted image.
    FirstImage,
    /// Visit every element, extracting at most one image from each.
    #[default]
    EveryElement,
}

/// Counters describing one scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScanSummary {
    /// Elements whose size prefix was read
    pub elements: usize,
    /// Elements that produced an image
    pub images: usize,
    /// Elements that produced no image
    pub skipped: usize,
}

/// Walks the elements of a Data stream and feeds images into a sink.
#[derive(Debug, Clone, Copy, Default)]
pub struct DataStreamScanner {
    policy: ScanPolicy,
}

impl DataStreamScanner {
    pub fn new(policy: ScanPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> ScanPolicy {
        self.policy
    }

    /// Scan `data`, recording every extracted image in `sink`.
    ///
    /// Decoding errors are logged and the element is skipped. The scan stops
    /// early when an element declares a size smaller than its own prefix,
    /// since no further element boundary can be trusted.
    ///
    /// # Errors
    ///
    /// Only non-recoverable errors from the sink, i.e.
    /// [`PersistFailure`](crate::Error::PersistFailure).
    pub fn scan(&self, data: &[u8], sink: &mut ResultSink) -> Result<ScanSummary> {
        let mut summary = ScanSummary::default();
        let mut offset = 0usize;

        while offset < data.len() {
            let mut prefix = ByteCursor::with_region(data, offset, data.len());
            let Ok(lcb) = prefix.read_u32_le() else {
                tracing::warn!(
                    offset,
                    trailing = data.len() - offset,
                    "Data stream ends with a partial element size"
                );
                break;
            };
            let lcb = lcb as usize;
            if lcb < ELEMENT_SIZE_LEN {
                tracing::warn!(offset, lcb, "element size too small, stopping scan");
                break;
            }

            summary.elements += 1;
            let end = offset.saturating_add(lcb);

            match Self::scan_element(data, offset, end) {
                Ok(Some(hit)) => {
                    sink.record(offset, &hit.blip, &hit.bse)?;
                    summary.images += 1;
                    if self.policy == ScanPolicy::FirstImage {
                        break;
                    }
                },
                Ok(None) => {
                    tracing::debug!(offset, lcb, "no BSE record in element");
                    summary.skipped += 1;
                },
                Err(err) if err.is_recoverable() => {
                    tracing::debug!(offset, lcb, error = %err, "skipping element");
                    summary.skipped += 1;
                },
                Err(err) => return Err(err),
            }

            offset = end;
        }

        tracing::debug!(
            elements = summary.elements,
            images = summary.images,
            skipped = summary.skipped,
            "Data stream scan finished"
        );
        Ok(summary)
    }

    /// Decode the element spanning `[offset, end)` of `data`.
    ///
    /// `end` is clamped to the buffer; nothing past it is read.
    pub fn scan_element(data: &[u8], offset: usize, end: usize) -> Result<Option<BlipHit<'_>>> {
        let mut cursor =
            ByteCursor::with_region(data, offset.saturating_add(ELEMENT_SIZE_LEN), end);
        PictureDescriptor::parse(&mut cursor)?;
        DrawingRecordWalker::new(cursor).find_blip()
    }
}
