//! # Inbound Ports (Driving Ports / API)
//!
//! The public API of the access-control subsystem.

use crate::domain::entities::AccessDecision;
use shared_bus::Verdict;
use shared_types::{Identity, Permission, Role};
use std::collections::BTreeSet;

/// Primary access-control API.
///
/// Implementations must be thread-safe (`Send + Sync`).
pub trait AccessControlApi: Send + Sync {
    /// Whether the identity's role holds `permission`.
    fn has_permission(&self, identity: &Identity, permission: Permission) -> bool;

    /// Resolves `resource` to a permission and checks it.
    ///
    /// Always returns exactly one `AccessAudit` event.
    fn check_access(&self, identity: &Identity, resource: &str) -> Verdict<AccessDecision>;

    /// Replaces the role on a caller-owned identity.
    ///
    /// Returns the previous role and a `RoleAssigned` audit event.
    fn assign_role(&self, identity: &mut Identity, role: Role) -> Verdict<Role>;

    /// Permissions held by `role`.
    fn permissions(&self, role: Role) -> BTreeSet<Permission>;
}
