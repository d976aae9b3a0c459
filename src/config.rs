use std::path::{Path, PathBuf};

pub const DEFAULT_ARCHIVE: &str = "FL_insurance.csv.zip";
pub const COUNT_FILE: &str = "count.txt";
pub const TOTAL_FILE: &str = "tiv2012.txt";
pub const RANKING_FILE: &str = "most_valuable.txt";
pub const DEFAULT_TOP_N: usize = 10;

/// Where a run reads from and writes to.
///
/// The binary always runs with [`PipelineConfig::default`]; the fields exist
/// so tests can point a run at temporary directories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineConfig {
    pub archive_path: PathBuf,
    pub output_dir: PathBuf,
    pub count_file: String,
    pub total_file: String,
    pub ranking_file: String,
    pub top_n: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            archive_path: PathBuf::from(DEFAULT_ARCHIVE),
            output_dir: PathBuf::from("."),
            count_file: COUNT_FILE.to_string(),
            total_file: TOTAL_FILE.to_string(),
            ranking_file: RANKING_FILE.to_string(),
            top_n: DEFAULT_TOP_N,
        }
    }
}

impl PipelineConfig {
    /// Default file names, rooted at `archive_path` and `output_dir`.
    pub fn new(archive_path: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            archive_path: archive_path.into(),
            output_dir: output_dir.into(),
            ..Self::default()
        }
    }

    pub fn count_path(&self) -> PathBuf {
        self.output_dir.join(&self.count_file)
    }

    pub fn total_path(&self) -> PathBuf {
        self.output_dir.join(&self.total_file)
    }

    pub fn ranking_path(&self) -> PathBuf {
        self.output_dir.join(&self.ranking_file)
    }

    pub fn archive_path(&self) -> &Path {
        &self.archive_path
    }
}
