//! Blipkit - extraction of embedded pictures from Word binary documents
//!
//! Legacy Word documents (.doc) store their pictures in the `Data` stream of
//! the OLE2 container. Each picture is a PICF header followed by OfficeArt
//! (Escher) drawing records; the image bytes live in a BLIP record nested
//! inside a File Blip Store Entry (BSE).
//!
//! # Features
//!
//! - **Data stream scanner**: walks the size-prefixed elements of the stream
//! - **PICF decoder**: validates the picture descriptor of each element
//! - **Escher walker**: finds the first BSE record of a picture
//! - **BLIP extraction**: metafile (EMF, WMF, PICT) and bitmap (JPEG, PNG,
//!   DIB, TIFF) layouts, with and without a secondary UID
//! - **Digesting**: SHA-256 of every payload, optionally saved to disk
//! - **Zero-copy parsing**: payloads borrow from the stream buffer
//!
//! # Example - Hashing the pictures of a Data stream
//!
//! ```no_run
//! use blipkit::{ExtractImagePlugin, PluginOptions, ScanPolicy};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let data = std::fs::read("Data.bin")?;
//!
//! let options = PluginOptions::new()
//!     .with_save_dir("extracted")
//!     .with_policy(ScanPolicy::EveryElement);
//! let output = ExtractImagePlugin::new(options).analyze(&["Data"], &data)?;
//!
//! for line in &output.lines {
//!     println!("{line}");
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Example - Low-level element decoding
//!
//! ```no_run
//! use blipkit::doc::DataStreamScanner;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let data = std::fs::read("Data.bin")?;
//! let lcb = u32::from_le_bytes(data[0..4].try_into()?) as usize;
//!
//! if let Some(hit) = DataStreamScanner::scan_element(&data, 0, lcb)? {
//!     println!("{} image, {} bytes", hit.blip.blip_type, hit.blip.payload.len());
//! }
//! # Ok(())
//! # }
//! ```

/// Shared byte cursor and error types
pub mod common;

/// Word Data stream and PICF decoding
pub mod doc;

/// OfficeArt drawing record headers and the BSE walker
pub mod escher;

/// BSE and BLIP records, digesting and persistence
pub mod images;

/// Host-facing adapter: option parsing and report lines
pub mod plugin;

#[cfg(test)]
mod testing;

// Re-export commonly used types for convenience
pub use common::{Error, Result};
pub use doc::{DataStreamScanner, ScanPolicy, ScanSummary};
pub use images::{BlipType, ExtractionReport};
pub use plugin::{ExtractImagePlugin, PluginOptions, PluginOutput};
