//! Word binary (.doc) Data stream support.
//!
//! - `picture`: the PICF header that precedes each embedded picture
//! - `data_stream`: the element-by-element scan of the whole stream

pub mod data_stream;
pub mod picture;

pub use data_stream::{DataStreamScanner, ScanPolicy, ScanSummary};
pub use picture::{Brc80, MappingMode, PictureDescriptor};
