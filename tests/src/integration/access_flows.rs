//! Role-based access decisions and role changes through the facade.

#[cfg(test)]
mod tests {
    use crate::fixtures::{user, Harness};
    use security_runtime::SecurityConfig;
    use shared_bus::{EventType, Severity};
    use shared_types::{Permission, Role, SecurityError};
    use sg_01_access_control::AccessDecision;

    #[test]
    fn test_standard_role_matrix() {
        let h = Harness::standard();
        let cases = [
            (Role::Admin, "deploy_updates", AccessDecision::Granted),
            (Role::CityManager, "control_traffic", AccessDecision::Granted),
            (Role::CityManager, "process_payment", AccessDecision::Unauthorized),
            (Role::Resident, "process_payment", AccessDecision::Granted),
            (Role::Resident, "control_lights", AccessDecision::Unauthorized),
            (Role::PublicSafety, "view_security_logs", AccessDecision::Granted),
            (Role::PublicSafety, "manage_users", AccessDecision::Unauthorized),
            (Role::UtilityWorker, "view_sensors", AccessDecision::Granted),
            (Role::UtilityWorker, "execute_routines", AccessDecision::Unauthorized),
        ];

        for (role, resource, expected) in cases {
            let identity = user(7, "subject", "pw", role);
            assert_eq!(
                h.facade.check_access(&identity, resource),
                expected,
                "{role} -> {resource}"
            );
        }
    }

    #[test]
    fn test_resource_names_are_case_insensitive_but_exact() {
        let h = Harness::standard();
        let admin = user(1, "root", "pw", Role::Admin);

        assert!(h.facade.check_access(&admin, "VIEW_REPORTS").is_granted());
        assert!(h.facade.check_access(&admin, "View_Reports").is_granted());
        assert_eq!(
            h.facade.check_access(&admin, " view_reports"),
            AccessDecision::UnknownResource
        );
        assert_eq!(
            h.facade.check_access(&admin, "reactor_core"),
            AccessDecision::UnknownResource
        );
    }

    #[test]
    fn test_every_check_is_audited() {
        let h = Harness::standard();
        let carol = user(3, "carol", "pw", Role::Resident);

        h.facade.check_access(&carol, "view_transactions");
        h.facade.check_access(&carol, "system_admin");

        let audits = h.sink.of_type(EventType::AccessAudit);
        assert_eq!(audits.len(), 2);
        assert_eq!(audits[0].severity, Severity::Low);
        assert_eq!(audits[1].severity, Severity::Medium);

        let denied = audits[1].audit.as_ref().unwrap();
        assert_eq!(denied.subject, "carol");
        assert_eq!(denied.resource, "system_admin");
        assert_eq!(denied.decision, "UNAUTHORIZED");

        let decisions = &h.facade.metrics().access_decisions;
        assert_eq!(decisions.with_label_values(&["GRANTED"]).get(), 1);
        assert_eq!(decisions.with_label_values(&["UNAUTHORIZED"]).get(), 1);
    }

    #[test]
    fn test_decisions_convert_to_errors() {
        let h = Harness::standard();
        let carol = user(3, "carol", "pw", Role::Resident);

        let err = h
            .facade
            .check_access(&carol, "manage_accounts")
            .into_result("manage_accounts")
            .unwrap_err();
        assert_eq!(
            err,
            SecurityError::Unauthorized {
                resource: "manage_accounts".to_string()
            }
        );
    }

    #[test]
    fn test_promotion_takes_effect_immediately() {
        let h = Harness::standard();
        let mut carol = user(3, "carol", "pw", Role::Resident);
        assert!(!h.facade.check_access(&carol, "control_lights").is_granted());

        let previous = h.facade.assign_role(&mut carol, Role::CityManager);
        assert_eq!(previous, Role::Resident);
        assert_eq!(carol.role, Role::CityManager);
        assert!(h.facade.check_access(&carol, "control_lights").is_granted());
        assert!(!h.facade.has_permission(&carol, Permission::ProcessPayment));

        let assigned = h.sink.of_type(EventType::RoleAssigned);
        assert_eq!(assigned.len(), 1);
        assert_eq!(assigned[0].audit.as_ref().unwrap().role, Role::CityManager);
    }

    #[test]
    fn test_configured_role_table() {
        let config = SecurityConfig::parse(
            r#"
            [access.roles]
            RESIDENT = ["VIEW_REPORTS"]
            UTILITY_WORKER = ["VIEW_SENSORS", "CONTROL_LIGHTS"]
            "#,
        )
        .unwrap();
        let h = Harness::new(config);

        let resident = user(3, "carol", "pw", Role::Resident);
        let worker = user(5, "eve", "pw", Role::UtilityWorker);
        let manager = user(6, "mallory", "pw", Role::CityManager);

        assert!(h.facade.check_access(&resident, "view_reports").is_granted());
        assert!(!h.facade.check_access(&resident, "process_payment").is_granted());
        assert!(h.facade.check_access(&worker, "control_lights").is_granted());
        assert!(h.facade.permissions(Role::CityManager).is_empty());
        assert!(!h.facade.check_access(&manager, "view_sensors").is_granted());
        assert_eq!(h.facade.permissions(Role::Admin).len(), Permission::ALL.len());
    }
}
