// Image extraction from OfficeArt BLIP records
//
// - `bse`: File Blip Store Entry fields wrapping each embedded BLIP
// - `blip`: BLIP record layouts and payload extraction
// - `sink`: digesting, optional persistence and reporting

pub mod blip;
pub mod bse;
pub mod sink;

pub use blip::{
    BlipDetail, BlipType, BodyLayout, ExtractedBlip, MetafileHeader, UID_LEN, extract_blip,
};
pub use bse::FileBlipStoreEntry;
pub use sink::{DirectoryStore, ExtractionReport, PayloadStore, ResultSink, sha256_hex};
