//! Deep-merge semantics for merge-writes.

use serde_json::Value;

/// Merge `patch` into `base` in place.
///
/// Objects merge key-by-key, recursing where both sides hold objects; any
/// other pairing replaces the base value outright, so lists and scalars are
/// overwritten wholesale. Keys present only in `base` are untouched, which is
/// what preserves unknown fields across partial updates.
pub fn merge_documents(base: &mut Value, patch: &Value) {
    if let (Value::Object(base_map), Value::Object(patch_map)) = (&mut *base, patch) {
        for (key, value) in patch_map {
            match base_map.get_mut(key) {
                Some(slot) if slot.is_object() && value.is_object() => {
                    merge_documents(slot, value);
                }
                _ => {
                    base_map.insert(key.clone(), value.clone());
                }
            }
        }
    } else {
        *base = patch.clone();
    }
}
