// Repository implementations (data access layer)
// Adapters that implement domain repository interfaces over the REST API

pub mod rest_analysis_repository;
pub mod rest_lead_repository;
pub mod rest_metrics_repository;
pub mod rest_profile_repository;
pub mod rest_recording_repository;

pub use rest_analysis_repository::RestAnalysisRepository;
pub use rest_lead_repository::RestLeadRepository;
pub use rest_metrics_repository::RestMetricsRepository;
pub use rest_profile_repository::RestProfileRepository;
pub use rest_recording_repository::RestRecordingRepository;
