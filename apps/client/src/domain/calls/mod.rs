// Call domain module
// Uploaded call recordings, their analyses and daily metric rollups

pub mod analysis;
pub mod metrics;
pub mod recording;

pub use analysis::Analysis;
pub use metrics::MetricsAggregate;
pub use recording::{Recording, RecordingStatus};
