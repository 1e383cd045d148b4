//! Caller roles and learner kinds.

/// Agency owner signed in through hosted auth.
pub const ROLE_OWNER: &str = "owner";
/// Agency manager signed in through hosted auth.
pub const ROLE_MANAGER: &str = "manager";

/// Profile roles allowed to administer program assignments.
pub const ASSIGNMENT_ADMIN_ROLES: &[&str] = &[ROLE_OWNER, ROLE_MANAGER];

/// Learner kind stored on progress rows for hosted-auth profiles.
pub const LEARNER_OWNER: &str = "owner";
/// Learner kind stored on progress rows for staff-portal users.
pub const LEARNER_STAFF: &str = "staff";

/// Whether a profile role may create or modify program assignments.
pub fn can_manage_assignments(role: &str) -> bool {
    ASSIGNMENT_ADMIN_ROLES.contains(&role)
}
