use datacat_core::{normalize_url, stable_json_bytes};
use proptest::prelude::*;

proptest! {
    #[test]
    fn normalize_url_is_idempotent(raw in "[a-zA-Z0-9./:?#_-]{0,64}") {
        let once = normalize_url(&raw);
        prop_assert_eq!(normalize_url(&once), once);
    }

    #[test]
    fn normalized_urls_never_end_with_slash(raw in "[a-zA-Z0-9./:-]{0,64}") {
        let out = normalize_url(&raw);
        prop_assert!(!out.ends_with('/'));
    }

    #[test]
    fn stable_json_is_deterministic(key in "[a-z]{1,8}", n in 0u64..1000) {
        let value = serde_json::json!({ key.clone(): n, "fixed": true });
        let a = stable_json_bytes(&value).expect("bytes");
        let b = stable_json_bytes(&value).expect("bytes");
        prop_assert_eq!(a, b);
    }
}
