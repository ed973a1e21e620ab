//! Configuration documents driving facade construction.

#[cfg(test)]
mod tests {
    use crate::fixtures::{Harness, EPOCH_MS};
    use security_runtime::{ConfigError, SecurityConfig, SecurityFacade, StartupError};
    use shared_bus::RecordingSink;
    use shared_types::{ClientId, Credentials, Identity, ManualTimeSource, Role};
    use sg_02_mfa_authentication::{PasswordHasher, Sha256PasswordHasher};
    use sg_03_abuse_mitigation::{BlockReason, LimiterDecision};
    use sg_05_crypto_envelope::Cipher;
    use std::path::PathBuf;
    use std::sync::Arc;

    fn scratch_file(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("sentinel-{}-{name}", std::process::id()));
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_loaded_limits_drive_the_limiter() {
        let path = scratch_file(
            "limits.toml",
            r#"
            [abuse]
            window_secs = 10
            max_requests = 5
            burst_window_secs = 2
            burst_threshold = 100
            blacklist_duration_secs = 30
            "#,
        );
        let config = SecurityConfig::load(&path).unwrap();
        std::fs::remove_file(&path).ok();

        let h = Harness::new(config);
        let client = ClientId::new("198.51.100.4");
        for _ in 0..5 {
            assert!(h.facade.is_allowed(&client).is_allowed());
            h.clock.advance(100);
        }
        assert_eq!(
            h.facade.is_allowed(&client),
            LimiterDecision::Blocked(BlockReason::RateLimited)
        );

        h.clock.advance(30_000);
        assert!(h.facade.is_allowed(&client).is_allowed());
    }

    #[test]
    fn test_configured_salt_is_used_for_passwords() {
        let config = SecurityConfig::parse(
            r#"
            [mfa]
            password_salt = "north-district"
            "#,
        )
        .unwrap();
        assert!(!config.uses_default_salt());

        let h = Harness::new(config);
        let hash = Sha256PasswordHasher::new("north-district").hash("pw");
        let frank = Identity::new(8, "frank", hash, Role::Resident).with_mfa(false);

        assert!(h
            .facade
            .authenticate(&frank, &Credentials::new("frank", "pw"))
            .is_success());
    }

    #[test]
    fn test_configured_cipher_is_used() {
        let config = SecurityConfig::parse("[envelope]\ncipher = \"xchacha20poly1305\"\n").unwrap();
        assert_eq!(config.envelope.cipher, Cipher::XChaCha20Poly1305);

        let h = Harness::new(config);
        let key = h.facade.derive_key(b"grid-secret");
        let first = h.facade.encrypt(b"meter 17", &key).unwrap();
        let second = h.facade.encrypt(b"meter 17", &key).unwrap();
        assert_ne!(first, second);
        assert_eq!(h.facade.decrypt(&first, &key).unwrap(), b"meter 17");
    }

    #[test]
    fn test_invalid_document_aborts_startup() {
        let config = SecurityConfig::parse(
            r#"
            [abuse]
            window_secs = 5
            burst_window_secs = 5
            "#,
        )
        .unwrap();

        let result = SecurityFacade::builder(config, Arc::new(RecordingSink::new()))
            .time_source(Arc::new(ManualTimeSource::new(EPOCH_MS)))
            .build();
        assert!(matches!(
            result,
            Err(StartupError::Config(ConfigError::InvalidValue {
                field: "abuse.burst_window_secs",
                ..
            }))
        ));
    }

    #[test]
    fn test_unknown_role_name_aborts_startup() {
        let config = SecurityConfig::parse("[access.roles]\nJANITOR = [\"VIEW_SENSORS\"]\n").unwrap();
        let result = SecurityFacade::new(config, Arc::new(RecordingSink::new()));
        assert!(matches!(
            result,
            Err(StartupError::Config(ConfigError::AccessControl(_)))
        ));
    }

    #[test]
    fn test_rendered_config_reloads() {
        let mut config = SecurityConfig::default();
        config.abuse.max_requests = 42;
        config.incidents.authorities = vec!["city-cert".to_string()];

        let path = scratch_file("rendered.toml", &config.to_toml().unwrap());
        let reloaded = SecurityConfig::load(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(reloaded.abuse.max_requests, 42);
        assert_eq!(reloaded.incidents.authorities, vec!["city-cert".to_string()]);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let missing = std::env::temp_dir().join("sentinel-does-not-exist.toml");
        assert!(matches!(
            SecurityConfig::load(&missing),
            Err(ConfigError::Io { .. })
        ));
    }
}
