//! Task result records

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Result of one invocation, as reported back to the orchestration engine.
///
/// Fields that were never set are omitted when serialized, so
/// `{"changed": true}` and `{"failed": true, "msg": "..."}` are both valid
/// records. Anything else a delegated operation reports lands in `extra`
/// and is passed through untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResultRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failed: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub msg: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub changed: Option<bool>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ResultRecord {
    /// A failed record carrying a human-readable message.
    pub fn failure(msg: impl Into<String>) -> Self {
        Self {
            failed: Some(true),
            msg: Some(msg.into()),
            ..Self::default()
        }
    }

    /// A successful record with only `changed` set.
    pub fn changed(changed: bool) -> Self {
        Self {
            changed: Some(changed),
            ..Self::default()
        }
    }

    pub fn with_msg(mut self, msg: impl Into<String>) -> Self {
        self.msg = Some(msg.into());
        self
    }

    pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    /// An absent `failed` field means success.
    pub fn is_failed(&self) -> bool {
        self.failed.unwrap_or(false)
    }

    pub fn is_changed(&self) -> bool {
        self.changed.unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn failure_serializes_without_changed() {
        let record = ResultRecord::failure("src and dest are required");
        assert_eq!(
            serde_json::to_value(&record).unwrap(),
            json!({"failed": true, "msg": "src and dest are required"})
        );
    }

    #[test]
    fn changed_serializes_without_failed() {
        let record = ResultRecord::changed(true);
        assert_eq!(serde_json::to_value(&record).unwrap(), json!({"changed": true}));
        assert!(!record.is_failed());
    }

    #[test]
    fn extra_fields_round_trip() {
        let raw = json!({"changed": false, "path": "/etc/motd", "mode": "0644"});
        let record: ResultRecord = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(record.extra.get("path"), Some(&json!("/etc/motd")));
        assert_eq!(serde_json::to_value(&record).unwrap(), raw);
    }
}
