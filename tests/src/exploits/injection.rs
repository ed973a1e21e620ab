//! SQL injection payloads against `validate`, `sanitize` and safe binding.

#[cfg(test)]
mod tests {
    use crate::fixtures::Harness;
    use proptest::prelude::*;
    use shared_bus::{EventType, Severity};
    use sg_04_input_sanitizer::{sanitize, BoundValue, InjectionPattern, QueryError, ValidationResult};

    const PAYLOADS: [(&str, InjectionPattern); 8] = [
        ("admin' OR '1'='1", InjectionPattern::DangerousCharacters),
        ("'; DROP TABLE users; --", InjectionPattern::DangerousCharacters),
        ("1' UNION SELECT * FROM passwords --", InjectionPattern::DangerousCharacters),
        ("<img src=x onerror=alert(1)>", InjectionPattern::DangerousCharacters),
        ("1; EXEC xp_cmdshell", InjectionPattern::DangerousCharacters),
        ("delete from meters", InjectionPattern::StatementKeyword),
        ("guest or 2=2", InjectionPattern::OrTautology),
        ("0 UNION ALL", InjectionPattern::Union),
    ];

    #[test]
    fn test_payloads_rejected_by_first_matching_detector() {
        let h = Harness::standard();
        for (payload, expected) in PAYLOADS {
            assert_eq!(
                h.facade.validate(payload),
                ValidationResult::Rejected(expected),
                "{payload}"
            );
        }

        let reports = h.sink.of_type(EventType::SqlInjection);
        assert_eq!(reports.len(), PAYLOADS.len());
        assert!(reports.iter().all(|e| e.severity == Severity::High));
    }

    #[test]
    fn test_benign_input_passes_silently() {
        let h = Harness::standard();
        for input in ["john_doe", "Maple Street 12", "selection", "orange", ""] {
            assert!(h.facade.validate(input).is_safe(), "{input}");
        }
        assert!(h.sink.is_empty());
        assert_eq!(
            h.facade
                .metrics()
                .input_validations
                .with_label_values(&["safe"])
                .get(),
            5
        );
    }

    #[test]
    fn test_rejection_converts_to_error() {
        let h = Harness::standard();
        let err = h.facade.validate("x' --").into_result().unwrap_err();
        assert_eq!(
            err,
            shared_types::SecurityError::ValidationRejected { pattern_index: 0 }
        );
    }

    #[test]
    fn test_bound_payload_never_reaches_template() {
        let h = Harness::standard();
        let template = "SELECT balance FROM accounts WHERE owner = ? AND pin = ?";
        let query = h
            .facade
            .build_safe_query(
                template,
                vec![
                    BoundValue::from("admin' OR '1'='1"),
                    BoundValue::from(1234_i64),
                ],
            )
            .unwrap();

        assert_eq!(query.template(), template);
        assert_eq!(query.binding(1).and_then(BoundValue::as_text), Some("admin OR 1=1"));
        assert_eq!(query.binding(2), Some(&BoundValue::Integer(1234)));
    }

    #[test]
    fn test_smuggled_placeholder_does_not_shift_bindings() {
        let h = Harness::standard();
        let template = "UPDATE notes SET body = '?' WHERE id = ?";

        let err = h
            .facade
            .build_safe_query(template, vec![BoundValue::from("x"), BoundValue::from(1_i64)])
            .unwrap_err();
        assert_eq!(
            err,
            QueryError::ParameterCountMismatch {
                placeholders: 1,
                values: 2
            }
        );
    }

    proptest! {
        #[test]
        fn prop_sanitized_text_has_no_stripped_characters(input in ".{0,64}") {
            let out = sanitize(&input);
            prop_assert!(!out.contains(['\'', ';', '"', '-']));
        }

        #[test]
        fn prop_quote_is_always_rejected(prefix in "[a-z ]{0,16}", suffix in "[a-z0-9 ]{0,16}") {
            let h = Harness::standard();
            let payload = format!("{prefix}'{suffix}");
            prop_assert_eq!(
                h.facade.validate(&payload),
                ValidationResult::Rejected(InjectionPattern::DangerousCharacters)
            );
        }
    }
}
