//! `dc-output` — the dispatch center's optional collaborators.
//!
//! Each collaborator is a [`dc_center::CenterObserver`] gated by one
//! `CenterConfig` flag and writes into `config.output_dir`:
//!
//! | Flag              | Observer                  | Files created                                   |
//! |-------------------|---------------------------|-------------------------------------------------|
//! | `plot_simulation` | [`FrameRecorder`]         | `frames.csv`, `tick_summaries.csv` (or `output.db` with `sqlite`) |
//! | `track_noise`     | [`NoiseObserver`]         | `noise_timeline.csv`, `noise_exposure.csv`      |
//! | `density_matrix`  | [`DensityArtifactWriter`] | `density_matrix_T<tick>.csv`                    |
//!
//! [`OutputSet::from_config`] builds whichever are enabled.
//!
//! # Usage
//!
//! ```rust,ignore
//! use dc_output::OutputSet;
//!
//! let mut outputs = OutputSet::from_config(&config, center.density().grid())?;
//! center.run(&mut outputs)?;
//! for e in outputs.take_errors() {
//!     tracing::error!("output error: {e}");
//! }
//! ```

pub mod artifact;
pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod set;
pub mod writer;

#[cfg(feature = "sqlite")]
pub mod sqlite;


pub use artifact::{density_file_name, write_density_csv, write_exposure_csv, write_noise_csv};
pub use crate::csv::CsvFrameWriter;
pub use error::{OutputError, OutputResult};
pub use observer::{DensityArtifactWriter, FrameRecorder, NoiseObserver};
pub use row::{FrameRow, NoiseRow, TickSummaryRow};
pub use set::OutputSet;
pub use writer::FrameWriter;

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteFrameWriter;
