use serde::{Deserialize, Serialize};
use serde_json::Value;

/// JSON-Patch operation kind (RFC 6902).
///
/// The state-sync protocol currently only ever replaces whole fields, but
/// paths follow full JSON Pointer syntax so further kinds can be added
/// without a wire change.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PatchOpKind {
    Replace,
}

/// A single JSON-Patch operation addressed by a JSON Pointer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PatchOp {
    pub op: PatchOpKind,
    pub path: String,
    pub value: Value,
}

impl PatchOp {
    /// Build a `replace` operation. `path` must be a JSON Pointer
    /// (RFC 6901), i.e. empty or starting with `/`.
    pub fn replace(path: impl Into<String>, value: Value) -> Self {
        let path = path.into();
        debug_assert!(
            path.is_empty() || path.starts_with('/'),
            "patch path must be a JSON Pointer: {path}"
        );
        Self {
            op: PatchOpKind::Replace,
            path,
            value,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_replace_op_wire_shape() {
        let op = PatchOp::replace("/status/phase", json!("completed"));
        let json = serde_json::to_value(&op).unwrap();

        assert_eq!(json["op"], "replace");
        assert_eq!(json["path"], "/status/phase");
        assert_eq!(json["value"], "completed");
    }

    #[test]
    fn test_op_deserialization() {
        let json = r#"{"op":"replace","path":"/processing/progress","value":0.5}"#;
        let op: PatchOp = serde_json::from_str(json).unwrap();

        assert_eq!(op.op, PatchOpKind::Replace);
        assert_eq!(op.path, "/processing/progress");
        assert_eq!(op.value, json!(0.5));
    }
}
