use crate::types::{BallColor, QueueId};
use serde::{Deserialize, Deserializer};
use std::collections::HashMap;

/// Response from `queue/api/json`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(crate) struct QueueItems {
    pub items: Vec<QueueItem>,
}

/// A request to build which is waiting for, or has been given, an executor.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct QueueItem {
    #[serde(default)]
    pub blocked: bool,
    #[serde(default)]
    pub buildable: bool,
    pub id: QueueId,
    #[serde(default)]
    pub in_queue_since: i64,
    /// Build parameters. Jenkins sends them as lines of `key=value`.
    #[serde(default, deserialize_with = "deserialize_params")]
    pub params: Option<HashMap<String, String>>,
    #[serde(default)]
    pub stuck: bool,
    pub task: Task,
    pub url: Option<String>,
    /// Human-readable reason why the item is still waiting.
    pub why: Option<String>,
    #[serde(default)]
    pub buildable_start_milliseconds: i64,
    pub cancelled: Option<bool>,
    /// Set once the item has left the queue and became a build.
    pub executable: Option<Executable>,
    #[serde(default)]
    pub timestamp: i64,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Task {
    pub name: Option<String>,
    pub url: Option<String>,
    pub color: Option<BallColor>,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Executable {
    pub number: u32,
    pub url: String,
}

fn deserialize_params<'de, D>(deserializer: D) -> Result<Option<HashMap<String, String>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(parse_params))
}

/// Parse `\nkey=value\nother=` into a map. A line without `=` becomes a key with an empty value.
fn parse_params(raw: &str) -> Option<HashMap<String, String>> {
    if raw.trim().is_empty() {
        return None;
    }
    let params = raw
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| match line.split_once('=') {
            Some((key, value)) => (key.to_string(), value.to_string()),
            None => (line.to_string(), String::new()),
        })
        .collect();
    Some(params)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::*;

    #[rstest]
    fn test_deserialize_queue_item() {
        let data = r#"{
          "_class": "hudson.model.Queue$WaitingItem",
          "blocked": false,
          "buildable": false,
          "id": 12,
          "inQueueSince": 1700000000000,
          "params": "\nSomeKey=SomeValue\nEmpty=\nWith=Equals=Sign",
          "stuck": false,
          "task": {"name": "DevTest", "url": "http://localhost:8080/job/DevTest/", "color": "blue"},
          "why": "In the quiet period.",
          "timestamp": 1700000005000
        }"#;
        let item: QueueItem = serde_json::from_str(data).unwrap();
        assert_eq!(item.id, QueueId(12));
        let params = item.params.unwrap();
        assert_eq!(params["SomeKey"], "SomeValue");
        assert_eq!(params["Empty"], "");
        assert_eq!(params["With"], "Equals=Sign");
        assert!(item.executable.is_none());
    }

    #[rstest]
    #[case(r#""""#)]
    #[case(r#""\n""#)]
    #[case("null")]
    fn test_blank_params_are_none(#[case] params: &str) {
        let data = format!(r#"{{"id": 1, "params": {}, "task": {{}}}}"#, params);
        let item: QueueItem = serde_json::from_str(&data).unwrap();
        assert_eq!(item.params, None);
    }

    #[rstest]
    fn test_executable() {
        let data = r#"{"id": 1, "task": {"name": "x"}, "cancelled": false, "executable": {"number": 9, "url": "http://localhost:8080/job/x/9/"}}"#;
        let item: QueueItem = serde_json::from_str(data).unwrap();
        assert_eq!(item.executable.unwrap().number, 9);
        assert_eq!(item.cancelled, Some(false));
    }
}
