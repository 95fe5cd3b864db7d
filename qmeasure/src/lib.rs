pub mod basis;
pub mod bell;
pub mod binstr;
pub mod error;
pub mod events;
pub mod record;
pub mod report;
pub mod shots;

// Re-export key components for easier access from the binary or other libraries.
pub use basis::{LabelMode, MeasureBasis, MeasureKind};
pub use bell::BellState;
pub use error::{MeasureError, Result};
pub use events::{MeasurementSummary, emit_summary};
pub use record::{DEFAULT_SHOTS, MAX_QUBIT_NUM, MeasurementRecord, QubitIds};
pub use shots::ShotSampler;
