use std::path::PathBuf;
use thiserror::Error;

/// Everything that can abort a summary run.
///
/// Malformed data rows are not errors; the loader drops them and counts
/// them in [`LoadStats`](crate::process::LoadStats).
#[derive(Error, Debug)]
pub enum PipelineError {
    /// The input archive exists but holds no entries.
    #[error("ZIP archive {path} is empty")]
    ArchiveEmpty { path: PathBuf },

    /// The archive could not be opened as a ZIP or one of its entries is unreadable.
    #[error("Failed to read ZIP archive {path}: {source}")]
    Archive {
        path: PathBuf,
        #[source]
        source: zip::result::ZipError,
    },

    /// The CSV header lacks one or more of the columns the aggregates need.
    #[error("Required columns not found in CSV header: {}", missing.join(", "))]
    MissingColumns { missing: Vec<String> },

    /// A file could not be opened, read or written.
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The entry stream failed while rows were being read.
    #[error("Failed to read CSV data: {0}")]
    Csv(#[from] csv::Error),

    /// An amount or a running sum left `Decimal`'s representable range.
    #[error("Decimal overflow in {what}")]
    Overflow { what: String },
}

pub type Result<T> = std::result::Result<T, PipelineError>;

impl PipelineError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        PipelineError::Io {
            path: path.into(),
            source,
        }
    }
}
