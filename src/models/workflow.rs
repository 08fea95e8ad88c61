//! Pipeline introspection from the `wfapi` endpoints of the Pipeline Stage View plugin.

use serde::Deserialize;

/// A pipeline run, from `wfapi/runs` or `{number}/wfapi/describe`.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Workflow {
    pub id: String,
    pub name: String,
    /// `SUCCESS`, `FAILED`, `IN_PROGRESS`, `NOT_EXECUTED`, ...
    pub status: String,
    #[serde(default)]
    pub start_time_millis: i64,
    #[serde(default)]
    pub end_time_millis: i64,
    #[serde(default)]
    pub duration_millis: i64,
    #[serde(default)]
    pub queue_duration_millis: i64,
    #[serde(default)]
    pub pause_duration_millis: i64,
    #[serde(default)]
    pub stages: Vec<Stage>,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Stage {
    /// Node ID, usable with [crate::api::JobsApi::pipeline_node].
    pub id: String,
    pub name: String,
    pub status: String,
    #[serde(default)]
    pub start_time_millis: i64,
    #[serde(default)]
    pub end_time_millis: i64,
    #[serde(default)]
    pub pause_duration_millis: i64,
    #[serde(default)]
    pub duration_millis: i64,
}

/// A stage with its steps, from `execution/node/{id}/wfapi/describe`.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PipelineNode {
    pub name: String,
    pub status: String,
    #[serde(default)]
    pub start_time_millis: i64,
    #[serde(default, alias = "durationMillis")]
    pub duration_time_millis: i64,
    #[serde(default)]
    pub stage_flow_nodes: Vec<StageFlowNode>,
}

/// A step within a [PipelineNode].
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct StageFlowNode {
    pub name: String,
    pub status: String,
    #[serde(default)]
    pub start_time_millis: i64,
    #[serde(default, alias = "durationMillis")]
    pub duration_time_millis: i64,
    #[serde(default)]
    pub parent_nodes: Vec<String>,
}

/// Console output of a single node, from `execution/node/{id}/wfapi/log`.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PipelineNodeLog {
    pub node_id: String,
    pub node_status: String,
    #[serde(default)]
    pub length: u64,
    #[serde(default)]
    pub has_more: bool,
    #[serde(default)]
    pub text: String,
    pub console_url: Option<String>,
}
