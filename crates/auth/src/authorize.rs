use serde::Serialize;
use thiserror::Error;

use chrono::NaiveDate;
use usra_core::{AssignmentId, Entity, UserId};

use crate::assignment::{AssignmentStatus, RoleAssignment};
use crate::entitlement::EffectiveEntitlement;
use crate::roles::{RoleCatalog, RoleKey};
use crate::Permission;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthzError {
    #[error("forbidden: missing permission '{0}'")]
    Forbidden(String),
}

/// Check a single permission against an effective entitlement.
///
/// - No IO
/// - No panics
/// - Deny unless the permission was merged in from an active role
pub fn authorize(entitlement: &EffectiveEntitlement, required: &Permission) -> Result<(), AuthzError> {
    if entitlement.grants(required) {
        Ok(())
    } else {
        Err(AuthzError::Forbidden(required.as_str().to_string()))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Authorization Explanation (Audit Trail)
// ─────────────────────────────────────────────────────────────────────────────

/// Why a permission check came out the way it did.
#[derive(Debug, Clone, Serialize)]
pub struct AuthorizationExplanation {
    pub required_permission: String,
    pub granted: bool,
    pub reason: String,
    pub user_id: UserId,
    pub as_of: NaiveDate,
    /// Active roles that carry the permission.
    pub granted_by: Vec<RoleKey>,
    pub effective_permissions: Vec<String>,
    pub denial_reason: Option<DenialReason>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DenialReason {
    pub message: String,
    /// Non-active assignments of this user whose role would grant the permission.
    pub dormant_grants: Vec<DormantGrant>,
    pub suggestions: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DormantGrant {
    pub assignment_id: AssignmentId,
    pub role: RoleKey,
    pub status: AssignmentStatus,
}

/// Explain a permission decision for `entitlement`.
///
/// `assignments` is the same history the entitlement was computed from; it is
/// used to point at pending, expired or revoked grants when access is denied.
pub fn explain<C>(
    entitlement: &EffectiveEntitlement,
    required: &Permission,
    assignments: &[RoleAssignment],
    catalog: &C,
) -> AuthorizationExplanation
where
    C: RoleCatalog + ?Sized,
{
    let required_str = required.as_str();

    let granted_by: Vec<RoleKey> = entitlement
        .active_roles
        .iter()
        .filter(|r| catalog.role(&r.role_id).is_some_and(|def| def.grants(required)))
        .map(|r| r.name.clone())
        .collect();

    let effective_permissions: Vec<String> = entitlement
        .merged_permissions
        .iter()
        .map(|p| p.as_str().to_string())
        .collect();

    if entitlement.grants(required) {
        return AuthorizationExplanation {
            required_permission: required_str.to_string(),
            granted: true,
            reason: format!(
                "Permission '{}' is granted by active role(s): {}",
                required_str,
                join_keys(&granted_by)
            ),
            user_id: entitlement.user_id,
            as_of: entitlement.as_of,
            granted_by,
            effective_permissions,
            denial_reason: None,
        };
    }

    let dormant_grants: Vec<DormantGrant> = assignments
        .iter()
        .filter(|a| a.user_id() == entitlement.user_id)
        .filter_map(|a| {
            let status = a.status(entitlement.as_of);
            if status == AssignmentStatus::Active {
                return None;
            }
            let role = catalog.role(&a.role_id())?;
            role.grants(required).then(|| DormantGrant {
                assignment_id: *a.id(),
                role: role.name.clone(),
                status,
            })
        })
        .collect();

    let mut suggestions = Vec::new();
    for grant in &dormant_grants {
        suggestions.push(match grant.status {
            AssignmentStatus::Pending => format!(
                "Assignment {} ({}) has not started yet; move its start date if access is needed now",
                grant.assignment_id, grant.role
            ),
            AssignmentStatus::Expired => format!(
                "Assignment {} ({}) has expired; extend its end date or create a new assignment",
                grant.assignment_id, grant.role
            ),
            _ => format!(
                "Assignment {} ({}) was revoked; revocation is permanent, create a new assignment",
                grant.assignment_id, grant.role
            ),
        });
    }
    suggestions.push(format!(
        "Assign a role that grants the '{}' permission",
        required_str
    ));

    AuthorizationExplanation {
        required_permission: required_str.to_string(),
        granted: false,
        reason: format!(
            "User does not hold permission '{}'. Current permissions: {:?}",
            required_str, effective_permissions
        ),
        user_id: entitlement.user_id,
        as_of: entitlement.as_of,
        granted_by,
        effective_permissions,
        denial_reason: Some(DenialReason {
            message: format!("Missing required permission: '{}'", required_str),
            dormant_grants,
            suggestions,
        }),
    }
}

fn join_keys(keys: &[RoleKey]) -> String {
    keys.iter().map(RoleKey::as_str).collect::<Vec<_>>().join(", ")
}
