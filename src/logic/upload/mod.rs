//! Upload Module
//!
//! Drives one file from selection to a stored analysis result.
//!
//! ## Structure
//! - `session`: Phases, staged file and progress tuning
//! - `orchestrator`: The state machine issuing the classification request
//!
//! ## Usage
//! ```ignore
//! orchestrator.select_file(LocalFile::from_path("flows.csv")?)?;
//! let result = orchestrator.start().await?;
//! ```

pub mod session;
pub mod orchestrator;


pub use session::{LocalFile, UploadPhase, UploadSession, UploadTiming};
pub use orchestrator::UploadOrchestrator;
