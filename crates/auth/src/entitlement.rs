//! Effective entitlements: what a user may do on a given day.
//!
//! - Only assignments that are `Active` on `as_of` contribute.
//! - Permissions are merged by set union, so holding an extra role never
//!   removes a capability. `priority` only picks the role shown as primary.
//! - No active assignments means no permissions.
//! - Assignments whose role is missing from the catalog are skipped and
//!   reported back; they never fail the computation.

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use serde::Serialize;

use usra_core::{AssignmentId, Clock, DomainResult, EngineConfig, Entity, RoleId, UserId};

use crate::assignment::{AssignmentError, AssignmentStatus, RoleAssignment};
use crate::permissions::Permission;
use crate::roles::{RoleCatalog, RoleKey};

/// An active role that contributed to an entitlement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActiveRole {
    pub assignment_id: AssignmentId,
    pub role_id: RoleId,
    pub name: RoleKey,
    pub priority: i32,
}

/// Merged permissions of a user on one day. Computed, never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EffectiveEntitlement {
    pub user_id: UserId,
    pub as_of: NaiveDate,
    pub active_assignment_ids: Vec<AssignmentId>,
    pub merged_permissions: BTreeSet<Permission>,
    /// Contributing roles, highest priority first.
    pub active_roles: Vec<ActiveRole>,
}

impl EffectiveEntitlement {
    /// Deny-by-default entitlement with nothing granted.
    pub fn empty(user_id: UserId, as_of: NaiveDate) -> Self {
        Self {
            user_id,
            as_of,
            active_assignment_ids: Vec::new(),
            merged_permissions: BTreeSet::new(),
            active_roles: Vec::new(),
        }
    }

    pub fn grants(&self, permission: &Permission) -> bool {
        self.merged_permissions.contains(permission)
    }

    pub fn is_empty(&self) -> bool {
        self.merged_permissions.is_empty()
    }

    /// Role to display as the user's main one.
    pub fn primary_role(&self) -> Option<&RoleKey> {
        self.active_roles.first().map(|r| &r.name)
    }
}

/// An active assignment left out because its role is not in the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SkippedAssignment {
    pub assignment_id: AssignmentId,
    pub role_id: RoleId,
}

impl SkippedAssignment {
    pub fn error(&self) -> AssignmentError {
        AssignmentError::UnknownRole(self.role_id)
    }
}

/// Result of resolving one user: the entitlement plus anything the caller
/// should log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntitlementOutcome {
    pub entitlement: EffectiveEntitlement,
    pub skipped: Vec<SkippedAssignment>,
}

/// Key for caching an entitlement outside the engine.
///
/// `assignments_version` must increase on every create, update or revoke of
/// the user's assignments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct EntitlementCacheKey {
    pub user_id: UserId,
    pub assignments_version: u64,
    pub as_of: NaiveDate,
}

/// Compute `user_id`'s entitlement on `as_of`.
///
/// Assignments belonging to other users are ignored. Pure: the same inputs
/// always give the same output.
pub fn compute_effective<C>(
    user_id: UserId,
    assignments: &[RoleAssignment],
    catalog: &C,
    as_of: NaiveDate,
) -> EntitlementOutcome
where
    C: RoleCatalog + ?Sized,
{
    resolve(
        user_id,
        assignments.iter().filter(|a| a.user_id() == user_id),
        catalog,
        as_of,
    )
}

/// Entitlements for every user that appears in `assignments`.
pub fn compute_all<C>(
    assignments: &[RoleAssignment],
    catalog: &C,
    as_of: NaiveDate,
) -> BTreeMap<UserId, EntitlementOutcome>
where
    C: RoleCatalog + ?Sized,
{
    let mut by_user: BTreeMap<UserId, Vec<&RoleAssignment>> = BTreeMap::new();
    for assignment in assignments {
        by_user.entry(assignment.user_id()).or_default().push(assignment);
    }

    by_user
        .into_iter()
        .map(|(user_id, owned)| (user_id, resolve(user_id, owned, catalog, as_of)))
        .collect()
}

fn resolve<'a, I, C>(user_id: UserId, assignments: I, catalog: &C, as_of: NaiveDate) -> EntitlementOutcome
where
    I: IntoIterator<Item = &'a RoleAssignment>,
    C: RoleCatalog + ?Sized,
{
    let mut entitlement = EffectiveEntitlement::empty(user_id, as_of);
    let mut skipped = Vec::new();

    for assignment in assignments {
        if assignment.status(as_of) != AssignmentStatus::Active {
            continue;
        }

        let Some(role) = catalog.role(&assignment.role_id()) else {
            skipped.push(SkippedAssignment {
                assignment_id: *assignment.id(),
                role_id: assignment.role_id(),
            });
            continue;
        };

        entitlement.active_assignment_ids.push(*assignment.id());
        entitlement
            .merged_permissions
            .extend(role.permissions.iter().cloned());
        entitlement.active_roles.push(ActiveRole {
            assignment_id: *assignment.id(),
            role_id: role.id,
            name: role.name.clone(),
            priority: role.priority,
        });
    }

    entitlement
        .active_roles
        .sort_by(|a, b| b.priority.cmp(&a.priority).then_with(|| a.name.cmp(&b.name)));

    tracing::debug!(
        user_id = %user_id,
        as_of = %as_of,
        active = entitlement.active_assignment_ids.len(),
        permissions = entitlement.merged_permissions.len(),
        skipped = skipped.len(),
        "computed effective entitlement"
    );

    EntitlementOutcome {
        entitlement,
        skipped,
    }
}

/// Resolver bound to a catalog, an injected clock and the engine config.
pub struct EntitlementResolver<'a, C: RoleCatalog + ?Sized> {
    catalog: &'a C,
    clock: &'a dyn Clock,
    config: &'a EngineConfig,
}

impl<'a, C: RoleCatalog + ?Sized> EntitlementResolver<'a, C> {
    pub fn new(catalog: &'a C, clock: &'a dyn Clock, config: &'a EngineConfig) -> Self {
        Self {
            catalog,
            clock,
            config,
        }
    }

    /// Today's local date according to the injected clock.
    pub fn today(&self) -> DomainResult<NaiveDate> {
        self.config.today(self.clock)
    }

    pub fn status_of(&self, assignment: &RoleAssignment) -> DomainResult<AssignmentStatus> {
        Ok(assignment.status(self.today()?))
    }

    pub fn effective_for(
        &self,
        user_id: UserId,
        assignments: &[RoleAssignment],
    ) -> DomainResult<EntitlementOutcome> {
        Ok(compute_effective(user_id, assignments, self.catalog, self.today()?))
    }

    pub fn effective_for_all(
        &self,
        assignments: &[RoleAssignment],
    ) -> DomainResult<BTreeMap<UserId, EntitlementOutcome>> {
        Ok(compute_all(assignments, self.catalog, self.today()?))
    }
}
