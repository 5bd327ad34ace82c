//! OfficeArt (Escher) drawing records.
//!
//! - `record`: the 8-byte record header and record type classification
//! - `walker`: bounded scan for the first BSE record of a picture

pub mod record;
pub mod walker;

pub use record::{EscherRecordType, RECORD_HEADER_LEN, RecordHeader};
pub use walker::{BlipHit, DrawingRecordWalker};
