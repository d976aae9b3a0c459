//! Summaries of the Florida insurance sample dataset.
//!
//! Reads the CSV inside `FL_insurance.csv.zip` and writes three reports:
//! the number of distinct counties, the total 2012 insured value, and the
//! ten counties whose insured value grew the most from 2011 to 2012.

pub mod aggregate;
pub mod archive;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod process;
pub mod report;

#[cfg(test)]
pub(crate) mod testing;

pub use config::PipelineConfig;
pub use error::{PipelineError, Result};
pub use pipeline::{run, RunSummary};
