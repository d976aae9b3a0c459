use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, instrument};
use zip::ZipArchive;

use crate::error::{PipelineError, Result};

/// Open the ZIP at `zip_path` and hand its first entry to `read`.
///
/// The archive file and the entry stream both live only for the duration of
/// this call, so they are closed before it returns whether `read` succeeds or
/// fails. Entry bytes are passed through undecoded; the CSV loader decodes
/// fields as UTF-8.
#[instrument(level = "debug", skip(zip_path, read), fields(zip = %zip_path.as_ref().display()))]
pub fn with_first_entry<P, T, F>(zip_path: P, read: F) -> Result<T>
where
    P: AsRef<Path>,
    F: FnOnce(&mut dyn Read) -> Result<T>,
{
    let zip_path = zip_path.as_ref();
    let file = File::open(zip_path).map_err(|e| PipelineError::io(zip_path, e))?;
    let mut archive = ZipArchive::new(file).map_err(|source| PipelineError::Archive {
        path: zip_path.to_path_buf(),
        source,
    })?;

    if archive.is_empty() {
        return Err(PipelineError::ArchiveEmpty {
            path: zip_path.to_path_buf(),
        });
    }

    let mut entry = archive
        .by_index(0)
        .map_err(|source| PipelineError::Archive {
            path: zip_path.to_path_buf(),
            source,
        })?;
    debug!(entry = entry.name(), size = entry.size(), "reading first entry");

    read(&mut entry)
}
