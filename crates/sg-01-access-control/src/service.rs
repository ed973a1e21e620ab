//! # Access Control Service
//!
//! Evaluates access decisions against the permission table and produces the
//! audit trail for each one.

use crate::domain::entities::AccessDecision;
use crate::domain::permission_table::PermissionTable;
use crate::ports::inbound::AccessControlApi;
use shared_bus::{AuditRecord, EventType, SecurityEvent, Severity, Verdict};
use shared_types::{Identity, Permission, Role, TimeSource};
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::{info, warn};

pub struct AccessControlService {
    table: PermissionTable,
    time: Arc<dyn TimeSource>,
}

impl AccessControlService {
    pub fn new(table: PermissionTable, time: Arc<dyn TimeSource>) -> Self {
        Self { table, time }
    }

    #[must_use]
    pub fn table(&self) -> &PermissionTable {
        &self.table
    }

    fn audit_event(
        &self,
        identity: &Identity,
        resource: &str,
        decision: AccessDecision,
    ) -> SecurityEvent {
        let severity = if decision.is_granted() {
            Severity::Low
        } else {
            Severity::Medium
        };
        SecurityEvent::new(
            EventType::AccessAudit,
            severity,
            format!(
                "Access {decision}: {} ({}) -> {resource}",
                identity.username, identity.role
            ),
            self.time.now(),
        )
        .with_audit(AuditRecord {
            subject: identity.username.clone(),
            role: identity.role,
            resource: resource.to_string(),
            decision: decision.to_string(),
        })
    }
}

impl AccessControlApi for AccessControlService {
    fn has_permission(&self, identity: &Identity, permission: Permission) -> bool {
        let granted = self.table.contains(identity.role, permission);
        if granted {
            info!(
                target: "audit",
                subject = %identity.username,
                role = %identity.role,
                permission = %permission,
                granted,
                "Permission check"
            );
        } else {
            warn!(
                target: "audit",
                subject = %identity.username,
                role = %identity.role,
                permission = %permission,
                granted,
                "Permission check"
            );
        }
        granted
    }

    fn check_access(&self, identity: &Identity, resource: &str) -> Verdict<AccessDecision> {
        let decision = match Permission::for_resource(resource) {
            None => AccessDecision::UnknownResource,
            Some(permission) if self.table.contains(identity.role, permission) => {
                AccessDecision::Granted
            }
            Some(_) => AccessDecision::Unauthorized,
        };

        if decision.is_granted() {
            info!(
                target: "audit",
                subject = %identity.username,
                role = %identity.role,
                resource,
                decision = %decision,
                "Access decision"
            );
        } else {
            warn!(
                target: "audit",
                subject = %identity.username,
                role = %identity.role,
                resource,
                decision = %decision,
                "Access decision"
            );
        }

        Verdict::with_event(decision, self.audit_event(identity, resource, decision))
    }

    fn assign_role(&self, identity: &mut Identity, role: Role) -> Verdict<Role> {
        let previous = std::mem::replace(&mut identity.role, role);

        info!(
            target: "audit",
            subject = %identity.username,
            from = %previous,
            to = %role,
            "Role assigned"
        );

        let event = SecurityEvent::new(
            EventType::RoleAssigned,
            Severity::Low,
            format!("Role for {} changed {previous} -> {role}", identity.username),
            self.time.now(),
        )
        .with_audit(AuditRecord {
            subject: identity.username.clone(),
            role,
            resource: "ROLE".to_string(),
            decision: format!("ASSIGNED (was {previous})"),
        });

        Verdict::with_event(previous, event)
    }

    fn permissions(&self, role: Role) -> BTreeSet<Permission> {
        self.table.permissions(role)
    }
}
