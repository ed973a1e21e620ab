//! Authentication pipeline through the facade: password, one-time code and
//! optional biometric stage, with the challenge notifications they emit.

#[cfg(test)]
mod tests {
    use crate::fixtures::{user, FixedScore, Harness};
    use security_runtime::SecurityConfig;
    use shared_bus::{EventType, Severity};
    use shared_types::{AuthStage, Credentials, Role};
    use sg_02_mfa_authentication::AuthOutcome;

    #[test]
    fn test_full_mfa_login() {
        let h = Harness::standard();
        let alice = user(1, "alice", "correct horse", Role::CityManager);

        let creds = Credentials::new("alice", "correct horse").with_otp(h.otp.peek_next());
        assert_eq!(h.facade.authenticate(&alice, &creds), AuthOutcome::Success);

        let events = h.sink.events();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].event_type, EventType::ChallengeIssued);
        assert_eq!(events[1].event_type, EventType::AuthenticationSucceeded);
        assert_eq!(events[1].severity, Severity::Low);

        let audit = events[1].audit.as_ref().unwrap();
        assert_eq!(audit.subject, "alice");
        assert_eq!(audit.role, Role::CityManager);
        assert_eq!(audit.decision, "SUCCESS");
    }

    #[test]
    fn test_challenge_notice_is_addressed_to_the_user() {
        let h = Harness::standard();
        let bob = user(2, "bob", "pw", Role::Resident);

        h.facade.authenticate(&bob, &Credentials::new("bob", "pw"));

        let notices = h.sink.of_type(EventType::ChallengeIssued);
        assert_eq!(notices.len(), 1);
        let code = h.otp.last_issued().unwrap();
        assert_eq!(notices[0].recipient.as_deref(), Some("bob@city.example"));
        let message = notices[0].message.as_deref().unwrap();
        assert!(message.contains(&code));
        assert!(message.contains("5 minutes"));
    }

    #[test]
    fn test_wrong_password_stops_before_challenge() {
        let h = Harness::standard();
        let alice = user(1, "alice", "correct horse", Role::Admin);

        let outcome = h
            .facade
            .authenticate(&alice, &Credentials::new("alice", "battery staple"));

        assert_eq!(outcome, AuthOutcome::Failed(AuthStage::Password));
        assert!(h.sink.of_type(EventType::ChallengeIssued).is_empty());
        assert!(h.otp.last_issued().is_none());

        let failures = h.sink.of_type(EventType::AuthenticationFailed);
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].severity, Severity::Medium);
        assert_eq!(
            failures[0].audit.as_ref().unwrap().decision,
            "FAILED at PasswordStage"
        );
    }

    #[test]
    fn test_missing_code_fails_otp_stage() {
        let h = Harness::standard();
        let alice = user(1, "alice", "pw", Role::Resident);

        let outcome = h.facade.authenticate(&alice, &Credentials::new("alice", "pw"));
        assert_eq!(outcome, AuthOutcome::Failed(AuthStage::Otp));
        assert_eq!(h.sink.of_type(EventType::ChallengeIssued).len(), 1);
    }

    #[test]
    fn test_mfa_disabled_skips_challenge() {
        let h = Harness::standard();
        let kiosk = user(9, "kiosk", "pw", Role::UtilityWorker).with_mfa(false);

        let outcome = h.facade.authenticate(&kiosk, &Credentials::new("kiosk", "pw"));
        assert_eq!(outcome, AuthOutcome::Success);
        assert!(h.sink.of_type(EventType::ChallengeIssued).is_empty());
    }

    #[test]
    fn test_biometric_stage_uses_threshold() {
        let strong = Harness::with_matcher(SecurityConfig::default(), Some(FixedScore(0.95)));
        let weak = Harness::with_matcher(SecurityConfig::default(), Some(FixedScore(0.5)));
        let dana = user(4, "dana", "pw", Role::PublicSafety).with_mfa(false);
        let creds = Credentials::new("dana", "pw").with_biometric("fingerprint-template");

        assert_eq!(strong.facade.authenticate(&dana, &creds), AuthOutcome::Success);
        assert_eq!(
            weak.facade.authenticate(&dana, &creds),
            AuthOutcome::Failed(AuthStage::Biometric)
        );
    }

    #[test]
    fn test_threshold_score_passes() {
        let h = Harness::with_matcher(SecurityConfig::default(), Some(FixedScore(0.90)));
        let dana = user(4, "dana", "pw", Role::PublicSafety).with_mfa(false);
        let creds = Credentials::new("dana", "pw").with_biometric("sample");
        assert!(h.facade.authenticate(&dana, &creds).is_success());
    }

    #[test]
    fn test_biometric_sample_without_matcher_fails() {
        let h = Harness::standard();
        let dana = user(4, "dana", "pw", Role::PublicSafety).with_mfa(false);
        let creds = Credentials::new("dana", "pw").with_biometric("sample");

        assert_eq!(
            h.facade.authenticate(&dana, &creds),
            AuthOutcome::Failed(AuthStage::Biometric)
        );
    }

    #[test]
    fn test_empty_biometric_sample_is_ignored() {
        let h = Harness::standard();
        let dana = user(4, "dana", "pw", Role::PublicSafety).with_mfa(false);
        let creds = Credentials::new("dana", "pw").with_biometric("");
        assert!(h.facade.authenticate(&dana, &creds).is_success());
    }

    #[test]
    fn test_abandoned_challenge_is_purged_after_ttl() {
        let h = Harness::standard();
        let alice = user(1, "alice", "pw", Role::Resident);
        h.facade.authenticate(&alice, &Credentials::new("alice", "pw"));
        assert_eq!(h.facade.metrics().pending_challenges.get(), 1);

        h.clock.advance(299_999);
        assert_eq!(h.facade.purge_stale().expired_challenges, 0);

        h.clock.advance(1);
        assert_eq!(h.facade.purge_stale().expired_challenges, 1);
        assert_eq!(h.facade.metrics().pending_challenges.get(), 0);
    }

    #[test]
    fn test_outcomes_are_counted() {
        let h = Harness::standard();
        let alice = user(1, "alice", "pw", Role::Resident);

        h.facade.authenticate(&alice, &Credentials::new("alice", "nope"));
        h.facade.authenticate(
            &alice,
            &Credentials::new("alice", "pw").with_otp(h.otp.peek_next()),
        );

        let outcomes = &h.facade.metrics().auth_outcomes;
        assert_eq!(outcomes.with_label_values(&["success"]).get(), 1);
        assert_eq!(outcomes.with_label_values(&["PasswordStage"]).get(), 1);
    }
}
