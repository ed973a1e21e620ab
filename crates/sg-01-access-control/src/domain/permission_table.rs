//! # Permission Table
//!
//! Immutable role → permission mapping. Built once, never mutated; role
//! changes happen on the caller-owned `Identity` instead.

use crate::domain::errors::AccessControlError;
use shared_types::{Permission, Role};
use std::collections::{BTreeMap, BTreeSet, HashMap};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermissionTable {
    grants: HashMap<Role, BTreeSet<Permission>>,
}

impl PermissionTable {
    /// Builds a table from explicit grants. ADMIN is widened to every permission.
    pub fn from_grants<I, P>(grants: I) -> Self
    where
        I: IntoIterator<Item = (Role, P)>,
        P: IntoIterator<Item = Permission>,
    {
        let mut table: HashMap<Role, BTreeSet<Permission>> = HashMap::new();
        for (role, permissions) in grants {
            table.entry(role).or_default().extend(permissions);
        }
        table.insert(Role::Admin, Permission::ALL.into_iter().collect());
        Self { grants: table }
    }

    /// Builds a table from role and permission names, as found in configuration.
    ///
    /// # Errors
    ///
    /// Any role or permission name outside the closed enumerations.
    pub fn from_names(names: &BTreeMap<String, Vec<String>>) -> Result<Self, AccessControlError> {
        let mut grants = Vec::with_capacity(names.len());
        for (role_name, permission_names) in names {
            let role: Role = role_name
                .parse()
                .map_err(|_| AccessControlError::UnknownRole(role_name.clone()))?;

            let permissions = permission_names
                .iter()
                .map(|name| {
                    name.parse::<Permission>()
                        .map_err(|_| AccessControlError::UnknownPermission {
                            role: role_name.clone(),
                            permission: name.clone(),
                        })
                })
                .collect::<Result<Vec<_>, _>>()?;

            grants.push((role, permissions));
        }
        Ok(Self::from_grants(grants))
    }

    /// The grants shipped with the system.
    #[must_use]
    pub fn standard() -> Self {
        Self::from_grants(standard_grants())
    }

    #[must_use]
    pub fn contains(&self, role: Role, permission: Permission) -> bool {
        self.grants
            .get(&role)
            .is_some_and(|permissions| permissions.contains(&permission))
    }

    /// Copy of the permissions held by `role`; empty when the role has no entry.
    #[must_use]
    pub fn permissions(&self, role: Role) -> BTreeSet<Permission> {
        self.grants.get(&role).cloned().unwrap_or_default()
    }

    /// Names view of the table, the inverse of [`PermissionTable::from_names`].
    #[must_use]
    pub fn to_names(&self) -> BTreeMap<String, Vec<String>> {
        self.grants
            .iter()
            .map(|(role, permissions)| {
                (
                    role.name().to_string(),
                    permissions.iter().map(|p| p.name().to_string()).collect(),
                )
            })
            .collect()
    }
}

impl Default for PermissionTable {
    fn default() -> Self {
        Self::standard()
    }
}

/// Default grants per role. ADMIN is implicit.
pub fn standard_grants() -> Vec<(Role, Vec<Permission>)> {
    use Permission::*;
    vec![
        (
            Role::CityManager,
            vec![
                ControlLights,
                ControlTraffic,
                ViewSensors,
                ExecuteRoutines,
                ViewReports,
                ViewSecurityLogs,
            ],
        ),
        (Role::Resident, vec![ProcessPayment, ViewTransactions]),
        (
            Role::PublicSafety,
            vec![ViewSecurityLogs, ViewSensors, ViewReports],
        ),
        (Role::UtilityWorker, vec![ViewSensors, ViewReports]),
    ]
}
