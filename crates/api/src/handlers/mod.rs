pub mod assignments;
pub mod call_scoring;
pub mod challenge;
pub mod lessons;
pub mod program;
pub mod sales_experience;
pub mod staff_auth;
