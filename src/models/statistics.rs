use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;

/// Load statistics of the whole controller, from `overallLoad/api/json`.
///
/// Each field is a map of time series keyed by their time scale. Their shape
/// depends on the requested depth, so the values are kept as raw JSON.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct OverallLoad {
    pub available_executors: HashMap<String, Value>,
    pub busy_executors: HashMap<String, Value>,
    pub connecting_executors: HashMap<String, Value>,
    pub defined_executors: HashMap<String, Value>,
    pub idle_executors: HashMap<String, Value>,
    pub online_executors: HashMap<String, Value>,
    pub queue_length: HashMap<String, Value>,
    pub total_executors: HashMap<String, Value>,
    pub total_queue_length: HashMap<String, Value>,
}
