//! Property-based tests for domain invariants
//!
//! Uses proptest to verify that value objects keep their invariants
//! across arbitrary inputs.

use graphmap_domain::value_objects::JsonKey;
use graphmap_domain::{ApiErrorKind, ErrorContainer};
use proptest::prelude::*;

proptest! {
    /// Any non-empty key is accepted and preserved
    #[test]
    fn json_key_accepts_non_empty(key in ".{1,64}") {
        let parsed = JsonKey::new(key.clone()).expect("non-empty key should be valid");
        prop_assert_eq!(parsed.as_str(), key.as_str());
    }

    /// Keys survive a serde round trip unchanged
    #[test]
    fn json_key_serde_roundtrip(key in "[a-z_]{1,32}") {
        let parsed = JsonKey::new(key).unwrap();
        let text = serde_json::to_string(&parsed).unwrap();
        let back: JsonKey = serde_json::from_str(&text).unwrap();
        prop_assert_eq!(back, parsed);
    }

    /// Summary always contains the message and every present code
    #[test]
    fn container_summary_mentions_codes(
        message in "[a-zA-Z ]{0,40}",
        code in proptest::option::of(0i64..100_000),
        subcode in proptest::option::of(0i64..100_000),
    ) {
        let container = ErrorContainer::new(message.clone(), serde_json::Value::Null)
            .with_code(code)
            .with_subcode(subcode);
        let summary = container.summary();
        prop_assert!(summary.starts_with(&message));
        if let Some(code) = code {
            let expected = format!("code {code}");
            prop_assert!(summary.contains(&expected));
        }
        if let Some(subcode) = subcode {
            let expected = format!("subcode {subcode}");
            prop_assert!(summary.contains(&expected));
        }
    }

    /// Wrapping preserves the container
    #[test]
    fn kind_wrap_preserves_container(code in any::<i64>()) {
        let container = ErrorContainer::new("m", serde_json::Value::Null).with_code(Some(code));
        for kind in [ApiErrorKind::ResponseStatus, ApiErrorKind::Batch, ApiErrorKind::OAuth, ApiErrorKind::QueryParse, ApiErrorKind::Graph] {
            let error = kind.wrap(container.clone());
            prop_assert_eq!(error.kind(), kind);
            prop_assert_eq!(error.container(), &container);
        }
    }
}
