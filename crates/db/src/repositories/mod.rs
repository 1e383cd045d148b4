//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod agency_repo;
pub mod assignment_repo;
pub mod call_recording_repo;
pub mod curriculum_repo;
pub mod profile_repo;
pub mod progress_repo;
pub mod quiz_attempt_repo;
pub mod staff_repo;
pub mod staff_session_repo;

pub use agency_repo::AgencyRepo;
pub use assignment_repo::AssignmentRepo;
pub use call_recording_repo::CallRecordingRepo;
pub use curriculum_repo::CurriculumRepo;
pub use profile_repo::ProfileRepo;
pub use progress_repo::ProgressRepo;
pub use quiz_attempt_repo::QuizAttemptRepo;
pub use staff_repo::StaffRepo;
pub use staff_session_repo::StaffSessionRepo;
