//! Fixture helpers shared by the unit tests.

use anyhow::Result;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing_subscriber::{EnvFilter, FmtSubscriber};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

pub fn init_test_logging() {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,flinsurance=debug")),
        )
        .with_test_writer()
        .finish();
    // already set by another test
    let _ = tracing::subscriber::set_global_default(subscriber);
}

/// Write `entries` (name, contents) into `dir/input.zip`, in order.
pub fn write_zip(dir: &Path, entries: &[(&str, &str)]) -> Result<PathBuf> {
    let path = dir.join("input.zip");
    let mut zip = ZipWriter::new(File::create(&path)?);
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Stored);
    for (name, contents) in entries {
        zip.start_file(*name, options)?;
        zip.write_all(contents.as_bytes())?;
    }
    zip.finish()?;
    Ok(path)
}
