// Repository ports
// Data access contracts the infrastructure layer implements

pub mod analysis_repository;
pub mod errors;
pub mod lead_repository;
pub mod metrics_repository;
pub mod profile_repository;
pub mod recording_repository;

pub use analysis_repository::AnalysisRepository;
pub use errors::{RepositoryError, RepositoryResult};
pub use lead_repository::LeadRepository;
pub use metrics_repository::MetricsRepository;
pub use profile_repository::ProfileRepository;
pub use recording_repository::RecordingRepository;
