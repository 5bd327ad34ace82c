//! Adapter between a stream-dumping host and the Data stream scanner.
//!
//! The host hands over one OLE stream at a time together with its path and a
//! comma-separated option string. Only the `Data` stream is analysed; the
//! host receives one human-readable line per extracted image and a flag
//! telling it whether there is anything to display.
//!
//! # Example
//!
//! ```
//! use blipkit::plugin::ExtractImagePlugin;
//!
//! # fn main() -> blipkit::Result<()> {
//! let plugin = ExtractImagePlugin::from_option_string("")?;
//! let output = plugin.analyze(&["WordDocument"], &[0u8; 16])?;
//! assert!(!output.ran);
//! assert!(output.lines.is_empty());
//! # Ok(())
//! # }
//! ```

use crate::common::error::{Error, Result};
use crate::doc::{DataStreamScanner, ScanPolicy, ScanSummary};
use crate::images::{DirectoryStore, ExtractionReport, ResultSink};
use std::path::PathBuf;
use std::str::FromStr;

/// Description shown by the host next to the plugin output.
pub const PLUGIN_NAME: &str =
    "Extract and sha256 hash image plugin. save image with --pluginoptions save=<folder_location>";

/// Name of the Word stream holding embedded pictures.
pub const DATA_STREAM: &str = "Data";

/// Settings parsed from the host option string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PluginOptions {
    /// Directory receiving one file per extracted image
    pub save_dir: Option<PathBuf>,
    pub policy: ScanPolicy,
}

impl PluginOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse `key=value` pairs separated by commas.
    ///
    /// Recognised keys are `save` (a directory) and `mode` (`first` or
    /// `all`). Unknown keys and empty segments are ignored.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidOptions`] when a recognised key has no value or an
    /// unsupported one.
    ///
    /// # Examples
    ///
    /// ```
    /// use blipkit::doc::ScanPolicy;
    /// use blipkit::plugin::PluginOptions;
    ///
    /// let options = PluginOptions::parse("save=/tmp/images,mode=first").unwrap();
    /// assert_eq!(options.save_dir.as_deref(), Some(std::path::Path::new("/tmp/images")));
    /// assert_eq!(options.policy, ScanPolicy::FirstImage);
    /// ```
    pub fn parse(options: &str) -> Result<Self> {
        let mut parsed = Self::default();

        for option in options.split(',').map(str::trim).filter(|o| !o.is_empty()) {
            let (key, value) = match option.split_once('=') {
                Some((key, value)) => (key.trim(), value.trim()),
                None => (option, ""),
            };

            match key {
                "save" => {
                    if value.is_empty() {
                        return Err(Error::InvalidOptions(
                            "`save` requires a directory, e.g. save=<folder_location>".into(),
                        ));
                    }
                    parsed.save_dir = Some(PathBuf::from(value));
                },
                "mode" => {
                    parsed.policy = match value {
                        "first" => ScanPolicy::FirstImage,
                        "all" => ScanPolicy::EveryElement,
                        other => {
                            return Err(Error::InvalidOptions(format!(
                                "unknown mode `{other}`, expected `first` or `all`"
                            )));
                        },
                    };
                },
                _ => tracing::debug!(option, "ignoring unrecognised plugin option"),
            }
        }

        Ok(parsed)
    }

    pub fn with_save_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.save_dir = Some(dir.into());
        self
    }

    pub fn with_policy(mut self, policy: ScanPolicy) -> Self {
        self.policy = policy;
        self
    }
}

impl FromStr for PluginOptions {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// What the host displays for one stream.
#[derive(Debug, Clone, Default)]
pub struct PluginOutput {
    /// One `digest: <hex>` line per image
    pub lines: Vec<String>,
    pub reports: Vec<ExtractionReport>,
    pub summary: ScanSummary,
    /// True when at least one image was reported
    pub ran: bool,
}

/// Extracts and hashes the images embedded in a Word Data stream.
#[derive(Debug, Clone, Default)]
pub struct ExtractImagePlugin {
    options: PluginOptions,
}

impl ExtractImagePlugin {
    pub fn new(options: PluginOptions) -> Self {
        Self { options }
    }

    /// Build a plugin from the host's raw option string.
    pub fn from_option_string(options: &str) -> Result<Self> {
        Ok(Self::new(PluginOptions::parse(options)?))
    }

    pub fn options(&self) -> &PluginOptions {
        &self.options
    }

    /// Analyse one stream.
    ///
    /// Streams other than `Data`, and empty buffers, produce an empty output.
    /// The save directory is validated before any element is decoded.
    ///
    /// # Errors
    ///
    /// [`Error::PersistFailure`] if the save directory is unusable or a
    /// payload cannot be written. Malformed stream content never fails the
    /// call.
    pub fn analyze(&self, stream_path: &[&str], data: &[u8]) -> Result<PluginOutput> {
        if stream_path != &[DATA_STREAM] {
            tracing::trace!(?stream_path, "not a Data stream, nothing to do");
            return Ok(PluginOutput::default());
        }
        if data.is_empty() {
            return Ok(PluginOutput::default());
        }

        let mut sink = match &self.options.save_dir {
            Some(dir) => ResultSink::with_store(DirectoryStore::open(dir)?),
            None => ResultSink::new(),
        };

        let summary = DataStreamScanner::new(self.options.policy).scan(data, &mut sink)?;
        let reports = sink.into_reports();
        let lines = reports.iter().map(ToString::to_string).collect();

        Ok(PluginOutput {
            lines,
            ran: !reports.is_empty(),
            reports,
            summary,
        })
    }
}
