//! Recursive deep merge for JSON-shaped data.
//!
//! Used for both the core style map (defaults + user overrides) and page
//! data (shared template data + page-specific data).
//!
//! | base   | overlay | result                                  |
//! |--------|---------|-----------------------------------------|
//! | object | object  | merged per key, new keys appended       |
//! | array  | array   | `base` followed by `overlay`            |
//! | any    | any     | `overlay` replaces `base`               |

use serde_json::Value;

/// Merge `overlay` into `base` in place.
pub fn deep_merge(base: &mut Value, overlay: Value) {
    match (base, overlay) {
        (Value::Object(base), Value::Object(overlay)) => {
            for (key, value) in overlay {
                match base.get_mut(&key) {
                    Some(slot) => deep_merge(slot, value),
                    None => {
                        base.insert(key, value);
                    }
                }
            }
        }
        (Value::Array(base), Value::Array(overlay)) => base.extend(overlay),
        (base, overlay) => *base = overlay,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_objects_recurse_per_key() {
        let mut base = json!({"global": {"normalize": "global/normalize", "modify": "global/modify"}});
        deep_merge(&mut base, json!({"global": {"modify": "global/modify-v2"}}));
        assert_eq!(
            base,
            json!({"global": {"normalize": "global/normalize", "modify": "global/modify-v2"}})
        );
    }

    #[test]
    fn test_arrays_concatenate() {
        let mut base = json!({"extra": ["a", "b"]});
        deep_merge(&mut base, json!({"extra": ["b", "c"]}));
        assert_eq!(base, json!({"extra": ["a", "b", "b", "c"]}));
    }

    #[test]
    fn test_scalar_overrides() {
        let mut base = json!({"common": "common", "env": "dev"});
        deep_merge(&mut base, json!({"env": "prod"}));
        assert_eq!(base, json!({"common": "common", "env": "prod"}));
    }

    #[test]
    fn test_type_mismatch_overrides() {
        let mut base = json!({"layout": {"page": "layouts/l-page"}});
        deep_merge(&mut base, json!({"layout": "layouts/single"}));
        assert_eq!(base, json!({"layout": "layouts/single"}));

        let mut base = json!({"vendors": ["a"]});
        deep_merge(&mut base, json!({"vendors": {"print": "global/print"}}));
        assert_eq!(base, json!({"vendors": {"print": "global/print"}}));
    }

    #[test]
    fn test_key_order_kept_and_new_keys_appended() {
        let mut base = json!({"common": "c", "global": {}, "vendors": {}});
        deep_merge(&mut base, json!({"blocks": {"menu": "blocks/menu"}, "common": "c2"}));
        let keys: Vec<&str> = base.as_object().unwrap().keys().map(String::as_str).collect();
        assert_eq!(keys, ["common", "global", "vendors", "blocks"]);
    }

    #[test]
    fn test_null_overlay_replaces() {
        let mut base = json!({"vendors": {"fotorama": "vendors/vendor.fotorama.custom"}});
        deep_merge(&mut base, json!({"vendors": {"fotorama": null}}));
        assert_eq!(base, json!({"vendors": {"fotorama": null}}));
    }
}
