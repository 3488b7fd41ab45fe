use serde::{Deserialize, Serialize};

/// Control messages the app posts to the offline cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum ControlMessage {
    SkipWaiting,
    ClearCache,
}

impl ControlMessage {
    /// Parses `{"action": "skipWaiting"}` style payloads. Unknown actions yield `None`.
    pub fn parse(payload: &str) -> Option<Self> {
        serde_json::from_str(payload).ok()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageOutcome {
    /// A waiting cache was promoted; carries the stale partitions it deleted.
    Activated(Vec<String>),
    /// Number of partitions deleted.
    Cleared(usize),
    NoChange,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_both_actions() {
        assert_eq!(
            ControlMessage::parse(r#"{"action":"skipWaiting"}"#),
            Some(ControlMessage::SkipWaiting)
        );
        assert_eq!(
            ControlMessage::parse(r#"{"action":"clearCache"}"#),
            Some(ControlMessage::ClearCache)
        );
    }

    #[test]
    fn ignores_unknown_actions() {
        assert_eq!(ControlMessage::parse(r#"{"action":"reboot"}"#), None);
        assert_eq!(ControlMessage::parse("not json"), None);
    }
}
