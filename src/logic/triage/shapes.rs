//! Shape Records
//!
//! One flat record per alert shape, read from the first event of
//! `_source.events`. A missing event (or a missing field inside it) leaves
//! the record's fields as `None`, so callers only ever deal with one kind of
//! "no data".

use serde_json::Value;

/// First entry of `_source.events`, when there is one
pub fn first_event(source: &Value) -> Option<&Value> {
    source.get("events")?.as_array()?.first()
}

fn string_at(event: Option<&Value>, pointer: &str) -> Option<String> {
    event?
        .pointer(pointer)
        .and_then(Value::as_str)
        .map(str::to_string)
}

/// `session` alerts
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionRecord {
    pub username: Option<String>,
    pub hostname: Option<String>,
}

impl SessionRecord {
    pub fn from_event(event: Option<&Value>) -> Self {
        Self {
            username: string_at(event, "/documentsource/details/username"),
            hostname: string_at(event, "/documentsource/hostname"),
        }
    }
}

/// Both Duo alerts carry the affected account in `details.object`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DuoRecord {
    pub object: Option<String>,
}

impl DuoRecord {
    pub fn from_event(event: Option<&Value>) -> Self {
        Self {
            object: string_at(event, "/documentsource/details/object"),
        }
    }
}

/// `ssh` access alerts; the username comes from the alert summary instead
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SshAccessRecord {
    pub hostname: Option<String>,
}

impl SshAccessRecord {
    pub fn from_event(event: Option<&Value>) -> Self {
        Self {
            hostname: string_at(event, "/documentsource/details/hostname"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_absent_event_is_null_record() {
        assert_eq!(SessionRecord::from_event(None), SessionRecord::default());
        assert_eq!(DuoRecord::from_event(None), DuoRecord::default());
        assert_eq!(SshAccessRecord::from_event(None), SshAccessRecord::default());
    }

    #[test]
    fn test_first_event() {
        assert!(first_event(&json!({})).is_none());
        assert!(first_event(&json!({"events": []})).is_none());
        assert!(first_event(&json!({"events": null})).is_none());

        let source = json!({"events": [{"n": 1}, {"n": 2}]});
        assert_eq!(first_event(&source).unwrap()["n"], 1);
    }

    #[test]
    fn test_partial_event() {
        let event = json!({"documentsource": {"details": null, "hostname": "bastion"}});
        let record = SessionRecord::from_event(Some(&event));
        assert_eq!(record.username, None);
        assert_eq!(record.hostname.as_deref(), Some("bastion"));

        let event = json!({"documentsource": {"details": {"object": 7}}});
        assert_eq!(DuoRecord::from_event(Some(&event)).object, None);
    }
}
