// Digesting, persisting and reporting extracted images
//
// Every extracted payload is hashed with SHA-256. When a save directory is
// configured the raw payload is written to `<dir>/<hex digest>`, so repeated
// images collapse onto one file and distinct images never collide.

use crate::common::error::{Error, Result};
use crate::images::{BlipType, ExtractedBlip, FileBlipStoreEntry};
use sha2::{Digest, Sha256};
use std::fmt;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Lowercase hex SHA-256 digest of `payload`.
///
/// # Examples
///
/// ```
/// use blipkit::images::sink::sha256_hex;
/// assert_eq!(
///     sha256_hex(b"abc"),
///     "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
/// );
/// ```
pub fn sha256_hex(payload: &[u8]) -> String {
    hex::encode(Sha256::digest(payload))
}

/// Destination for extracted payload bytes.
pub trait PayloadStore {
    /// Store `payload` under `digest`, returning where it was written.
    fn persist(&mut self, digest: &str, payload: &[u8]) -> Result<PathBuf>;
}

/// Writes each payload as a file named by its digest inside one directory.
#[derive(Debug, Clone)]
pub struct DirectoryStore {
    dir: PathBuf,
}

impl DirectoryStore {
    /// Open a store over an existing, writable directory.
    ///
    /// Writability is checked by creating and removing a scratch file, so
    /// ownership, mode bits and ACLs are all taken into account.
    ///
    /// # Errors
    ///
    /// [`Error::PersistFailure`] when the path is missing, is not a
    /// directory, or does not accept new files.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        let metadata = std::fs::metadata(&dir).map_err(|source| Error::PersistFailure {
            path: dir.clone(),
            source,
        })?;

        if !metadata.is_dir() {
            return Err(Error::PersistFailure {
                path: dir,
                source: std::io::Error::other("save location is not a directory"),
            });
        }

        let scratch = dir.join(format!(".blipkit-write-check-{}", std::process::id()));
        check_writable(&scratch).map_err(|source| Error::PersistFailure {
            path: dir.clone(),
            source,
        })?;

        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl PayloadStore for DirectoryStore {
    fn persist(&mut self, digest: &str, payload: &[u8]) -> Result<PathBuf> {
        let path = self.dir.join(digest);
        write_file(&path, payload).map_err(|source| Error::PersistFailure {
            path: path.clone(),
            source,
        })?;
        Ok(path)
    }
}

fn check_writable(scratch: &Path) -> std::io::Result<()> {
    OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(scratch)?;
    std::fs::remove_file(scratch)
}

// The handle is dropped (and closed) on every return path.
fn write_file(path: &Path, payload: &[u8]) -> std::io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(payload)?;
    file.flush()
}

/// One extracted image, as reported to the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionReport {
    /// Lowercase hex SHA-256 of the payload
    pub digest: String,
    pub blip_type: BlipType,
    pub payload_len: usize,
    /// Offset of the top-level Data stream element holding the image
    pub element_offset: usize,
    /// Name stored in the BSE record, if any
    pub name: Option<String>,
    /// Where the payload was written, if saving was requested
    pub saved_to: Option<PathBuf>,
}

impl fmt::Display for ExtractionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "digest: {}", self.digest)
    }
}

/// Collects reports for every image found during one analysis call.
#[derive(Default)]
pub struct ResultSink {
    store: Option<Box<dyn PayloadStore>>,
    reports: Vec<ExtractionReport>,
}

impl ResultSink {
    /// A sink that only hashes and reports.
    pub fn new() -> Self {
        Self::default()
    }

    /// A sink that also persists every payload through `store`.
    pub fn with_store(store: impl PayloadStore + 'static) -> Self {
        Self {
            store: Some(Box::new(store)),
            reports: Vec::new(),
        }
    }

    /// Digest, optionally persist, and report one extracted image.
    ///
    /// # Errors
    ///
    /// Only [`Error::PersistFailure`]; hashing cannot fail.
    pub fn record(
        &mut self,
        element_offset: usize,
        blip: &ExtractedBlip<'_>,
        bse: &FileBlipStoreEntry,
    ) -> Result<&ExtractionReport> {
        let digest = sha256_hex(blip.payload);
        let saved_to = match self.store.as_mut() {
            Some(store) => Some(store.persist(&digest, blip.payload)?),
            None => None,
        };

        tracing::info!(
            digest = %digest,
            blip_type = %blip.blip_type,
            payload_len = blip.payload.len(),
            element_offset,
            saved = saved_to.is_some(),
            "extracted image"
        );

        self.reports.push(ExtractionReport {
            digest,
            blip_type: blip.blip_type,
            payload_len: blip.payload.len(),
            element_offset,
            name: bse.name.clone(),
            saved_to,
        });
        Ok(&self.reports[self.reports.len() - 1])
    }

    pub fn reports(&self) -> &[ExtractionReport] {
        &self.reports
    }

    pub fn is_empty(&self) -> bool {
        self.reports.is_empty()
    }

    pub fn into_reports(self) -> Vec<ExtractionReport> {
        self.reports
    }
}

impl fmt::Debug for ResultSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResultSink")
            .field("persisting", &self.store.is_some())
            .field("reports", &self.reports)
            .finish()
    }
}
