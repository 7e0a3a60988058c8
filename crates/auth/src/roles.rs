//! Role definitions and the catalog they are looked up from.

use std::borrow::Cow;
use std::collections::{BTreeSet, HashMap};

use serde::{Deserialize, Serialize};

use usra_core::{Entity, RoleId};

use crate::Permission;

/// Machine key of a role (e.g. "financial_manager").
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoleKey(Cow<'static, str>);

impl RoleKey {
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for RoleKey {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A role and the permissions it grants.
///
/// Owned by the external catalog; the engine never mutates one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleDefinition {
    pub id: RoleId,
    pub name: RoleKey,
    /// Arabic display name.
    pub name_ar: String,
    /// Display ordering only. Never affects which permissions apply.
    #[serde(default)]
    pub priority: i32,
    #[serde(default)]
    pub permissions: BTreeSet<Permission>,
    #[serde(default)]
    pub description: Option<String>,
}

impl RoleDefinition {
    pub fn new(id: RoleId, name: RoleKey, name_ar: impl Into<String>) -> Self {
        Self {
            id,
            name,
            name_ar: name_ar.into(),
            priority: 0,
            permissions: BTreeSet::new(),
            description: None,
        }
    }

    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_permissions<I, P>(mut self, permissions: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<Permission>,
    {
        self.permissions.extend(permissions.into_iter().map(Into::into));
        self
    }

    pub fn grants(&self, permission: &Permission) -> bool {
        self.permissions.contains(permission)
    }
}

impl Entity for RoleDefinition {
    type Id = RoleId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Source of role definitions keyed by id.
pub trait RoleCatalog {
    fn role(&self, id: &RoleId) -> Option<&RoleDefinition>;

    fn contains(&self, id: &RoleId) -> bool {
        self.role(id).is_some()
    }
}

impl RoleCatalog for HashMap<RoleId, RoleDefinition> {
    fn role(&self, id: &RoleId) -> Option<&RoleDefinition> {
        self.get(id)
    }
}

/// Catalog snapshot held in memory (loaded once per request by the caller).
#[derive(Debug, Clone, Default)]
pub struct InMemoryRoleCatalog {
    roles: HashMap<RoleId, RoleDefinition>,
}

impl InMemoryRoleCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a definition.
    pub fn insert(&mut self, role: RoleDefinition) -> Option<RoleDefinition> {
        self.roles.insert(role.id, role)
    }

    pub fn len(&self) -> usize {
        self.roles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }

    /// Definitions ordered by descending priority, then key.
    pub fn by_priority(&self) -> Vec<&RoleDefinition> {
        let mut roles: Vec<&RoleDefinition> = self.roles.values().collect();
        roles.sort_by(|a, b| b.priority.cmp(&a.priority).then_with(|| a.name.cmp(&b.name)));
        roles
    }
}

impl RoleCatalog for InMemoryRoleCatalog {
    fn role(&self, id: &RoleId) -> Option<&RoleDefinition> {
        self.roles.get(id)
    }
}

impl FromIterator<RoleDefinition> for InMemoryRoleCatalog {
    fn from_iter<T: IntoIterator<Item = RoleDefinition>>(iter: T) -> Self {
        Self {
            roles: iter.into_iter().map(|r| (r.id, r)).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_lookup_and_priority_order() {
        let admin = RoleDefinition::new(RoleId::new(), RoleKey::new("admin"), "مدير النظام")
            .with_priority(100)
            .with_permissions(["manage_users"]);
        let auditor = RoleDefinition::new(RoleId::new(), RoleKey::new("auditor"), "مدقق")
            .with_priority(10)
            .with_permissions(["view_reports", "view_payments"]);
        let member = RoleDefinition::new(RoleId::new(), RoleKey::new("member"), "عضو")
            .with_priority(10);

        let catalog: InMemoryRoleCatalog =
            [member.clone(), auditor.clone(), admin.clone()].into_iter().collect();

        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.role(&auditor.id), Some(&auditor));
        assert!(!catalog.contains(&RoleId::new()));

        let order: Vec<&str> = catalog.by_priority().iter().map(|r| r.name.as_str()).collect();
        assert_eq!(order, vec!["admin", "auditor", "member"]);
    }

    #[test]
    fn definition_deserializes_with_defaults() {
        let json = r#"{
            "id": "0190f1c4-0000-7000-8000-000000000001",
            "name": "treasurer",
            "name_ar": "أمين الصندوق",
            "permissions": ["view_payments", "edit_payments", "view_payments"]
        }"#;
        let role: RoleDefinition = serde_json::from_str(json).unwrap();
        assert_eq!(role.priority, 0);
        assert_eq!(role.permissions.len(), 2);
        assert!(role.grants(&Permission::new("edit_payments")));
        assert!(!role.grants(&Permission::new("manage_users")));
    }
}
