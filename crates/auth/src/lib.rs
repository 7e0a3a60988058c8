//! `usra-auth`: time-bounded role assignments and effective entitlements.
//!
//! This crate is intentionally decoupled from HTTP and storage: callers load
//! assignment records and the role catalog, and hand in the reference date.

pub mod assignment;
pub mod authorize;
pub mod entitlement;
pub mod permissions;
pub mod roles;

pub use assignment::{
    status_of, AssignmentDate, AssignmentError, AssignmentStatus, DateInput, NewRoleAssignment,
    RoleAssignment, RoleAssignmentRecord, StatusSummary,
};
pub use authorize::{authorize, explain, AuthorizationExplanation, AuthzError};
pub use entitlement::{
    compute_all, compute_effective, ActiveRole, EffectiveEntitlement, EntitlementCacheKey,
    EntitlementOutcome, EntitlementResolver, SkippedAssignment,
};
pub use permissions::Permission;
pub use roles::{InMemoryRoleCatalog, RoleCatalog, RoleDefinition, RoleKey};
