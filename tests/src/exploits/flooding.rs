//! Request floods and bursts against the abuse limiter.

#[cfg(test)]
mod tests {
    use crate::fixtures::Harness;
    use security_runtime::SecurityConfig;
    use shared_bus::{EventType, Severity};
    use shared_types::{ClientId, SecurityError};
    use sg_03_abuse_mitigation::{BlockReason, LimiterDecision};

    const BLACKLIST_MS: u64 = 15 * 60 * 1_000;

    fn steady_flood(h: &Harness, client: &ClientId, requests: usize, spacing_ms: u64) {
        for _ in 0..requests {
            assert!(h.facade.is_allowed(client).is_allowed());
            h.clock.advance(spacing_ms);
        }
    }

    #[test]
    fn test_sustained_flood_is_blacklisted_for_fifteen_minutes() {
        let h = Harness::standard();
        let attacker = ClientId::new("203.0.113.66");

        steady_flood(&h, &attacker, 100, 500);
        assert_eq!(
            h.facade.is_allowed(&attacker),
            LimiterDecision::Blocked(BlockReason::RateLimited)
        );
        let blacklisted_at = h.facade.blacklisted_clients()[&attacker];

        h.clock.set(blacklisted_at + BLACKLIST_MS - 1);
        assert_eq!(
            h.facade.is_allowed(&attacker),
            LimiterDecision::Blocked(BlockReason::Blacklisted)
        );

        h.clock.set(blacklisted_at + BLACKLIST_MS);
        assert!(h.facade.is_allowed(&attacker).is_allowed());
        assert!(h.facade.blacklisted_clients().is_empty());
    }

    #[test]
    fn test_countermeasure_reported_once() {
        let h = Harness::standard();
        let attacker = ClientId::new("203.0.113.66");

        steady_flood(&h, &attacker, 100, 500);
        for _ in 0..20 {
            h.facade.is_allowed(&attacker);
        }

        let reports = h.sink.of_type(EventType::DdosAttempt);
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].severity, Severity::Critical);
        assert_eq!(reports[0].source_id.as_deref(), Some("203.0.113.66"));
        assert!(reports[0].description.contains("Rate limit exceeded"));
        assert_eq!(h.facade.metrics().blacklisted_clients.get(), 1);
    }

    #[test]
    fn test_burst_is_refused_without_extending_history() {
        let h = Harness::standard();
        let bot = ClientId::new("198.51.100.23");

        for _ in 0..51 {
            assert!(h.facade.is_allowed(&bot).is_allowed());
        }
        let decision = h.facade.is_allowed(&bot);
        assert_eq!(decision, LimiterDecision::Blocked(BlockReason::AnomalyDetected));
        assert_eq!(
            decision.into_result(&bot),
            Err(SecurityError::AnomalyDetected {
                client: "198.51.100.23".to_string()
            })
        );

        assert!(h.facade.blacklisted_clients().is_empty());
        let reports = h.sink.of_type(EventType::DdosAttempt);
        assert_eq!(reports.len(), 1);
        assert!(reports[0].description.contains("Anomalous burst pattern"));

        h.clock.advance(6_000);
        assert!(h.facade.is_allowed(&bot).is_allowed());
    }

    #[test]
    fn test_flood_from_one_client_spares_others() {
        let h = Harness::standard();
        let attacker = ClientId::new("203.0.113.66");
        let resident = ClientId::new("192.0.2.10");

        steady_flood(&h, &attacker, 100, 500);
        assert!(!h.facade.is_allowed(&attacker).is_allowed());
        assert!(h.facade.is_allowed(&resident).is_allowed());
    }

    #[test]
    fn test_slow_client_is_never_limited() {
        let h = Harness::standard();
        let sensor = ClientId::new("10.0.0.7");
        // 99 requests per minute, for ten minutes
        steady_flood(&h, &sensor, 990, 607);
        assert!(h.facade.blacklisted_clients().is_empty());
    }

    #[test]
    fn test_manual_release_and_maintenance() {
        let h = Harness::standard();
        let attacker = ClientId::new("203.0.113.66");
        steady_flood(&h, &attacker, 100, 500);
        h.facade.is_allowed(&attacker);

        assert!(h.facade.remove_from_blacklist(&attacker));
        assert!(!h.facade.remove_from_blacklist(&attacker));
        assert_eq!(h.sink.of_type(EventType::BlacklistCleared).len(), 1);
        assert_eq!(h.facade.metrics().blacklisted_clients.get(), 0);

        h.clock.advance(61_000);
        let report = h.facade.purge_stale();
        assert_eq!(report.request_logs, 1);
    }

    #[test]
    fn test_distributed_flood_from_many_threads() {
        let mut config = SecurityConfig::default();
        config.abuse.max_requests = 20;
        config.abuse.min_history = 1_000;
        let h = Harness::new(config);

        std::thread::scope(|scope| {
            for bot in 0..8 {
                let facade = &h.facade;
                scope.spawn(move || {
                    let client = ClientId::new(format!("bot-{bot}"));
                    for _ in 0..50 {
                        facade.is_allowed(&client);
                    }
                });
            }
        });

        let blacklisted = h.facade.blacklisted_clients();
        assert_eq!(blacklisted.len(), 8);
        assert_eq!(h.sink.of_type(EventType::DdosAttempt).len(), 8);

        let decisions = &h.facade.metrics().limiter_decisions;
        assert_eq!(decisions.with_label_values(&["ALLOWED"]).get(), 8 * 20);
        assert_eq!(
            decisions
                .with_label_values(&["BLOCKED(RATE_LIMITED)"])
                .get(),
            8
        );
    }
}
