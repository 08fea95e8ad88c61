use crate::types::{BallColor, QueueId};
use serde::Deserialize;
use serde_with::{serde_as, DefaultOnNull};
use time::OffsetDateTime;

/// Response from `api/json` at the root or in a folder.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct JobList {
    #[serde(rename = "_class")]
    pub class: Option<String>,
    pub jobs: Vec<Job>,
    pub url: Option<String>,
}

/// A job (or folder) as it appears in a [JobList].
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Job {
    #[serde(rename = "_class")]
    pub class: Option<String>,
    pub name: String,
    pub url: String,
    /// Folders have no color.
    pub color: Option<BallColor>,
}

/// Reference to a build, as found in [JobInfo].
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct BuildRef {
    #[serde(rename = "_class")]
    pub class: Option<String>,
    pub number: u32,
    pub url: String,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct QueueItemRef {
    #[serde(rename = "_class")]
    pub class: Option<String>,
    pub id: QueueId,
    pub url: Option<String>,
}

/// Response from `job/{name}/api/json`.
#[serde_as]
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct JobInfo {
    pub description: Option<String>,
    pub display_name: Option<String>,
    pub display_name_or_null: Option<String>,
    pub name: String,
    pub url: String,
    #[serde(default)]
    pub buildable: bool,
    #[serde_as(as = "DefaultOnNull")]
    #[serde(default)]
    pub builds: Vec<BuildRef>,
    pub color: Option<BallColor>,
    pub first_build: Option<BuildRef>,
    #[serde(default)]
    pub in_queue: bool,
    #[serde(default)]
    pub keep_dependencies: bool,
    pub last_build: Option<BuildRef>,
    pub last_complete_build: Option<BuildRef>,
    pub last_failed_build: Option<BuildRef>,
    pub last_stable_build: Option<BuildRef>,
    pub last_successful_build: Option<BuildRef>,
    pub last_unstable_build: Option<BuildRef>,
    pub last_unsuccessful_build: Option<BuildRef>,
    #[serde(default)]
    pub next_build_number: u32,
    pub queue_item: Option<QueueItemRef>,
    #[serde(default)]
    pub concurrent_build: bool,
}

/// Response from `job/{name}/{number}/api/json`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct BuildInfo {
    pub artifacts: Vec<Artifact>,
    pub actions: Vec<Action>,
    pub in_progress: bool,
    pub building: bool,
    pub description: Option<String>,
    pub display_name: Option<String>,
    pub duration: u64,
    pub estimated_duration: i64,
    pub full_display_name: Option<String>,
    pub id: Option<String>,
    pub keep_log: bool,
    pub number: u32,
    /// `-1` when Jenkins no longer knows which queue item started the build.
    pub queue_id: i64,
    /// `SUCCESS`, `FAILURE`, `UNSTABLE`, `ABORTED` or absent while running.
    pub result: Option<String>,
    /// Milliseconds since the Unix epoch.
    pub timestamp: i64,
    pub url: Option<String>,
    pub change_set: Option<ChangeSetList>,
    pub change_sets: Vec<ChangeSetList>,
    pub built_on: Option<String>,
    pub culprits: Vec<Culprit>,
}

impl BuildInfo {
    /// The queue item which started this build, if Jenkins still knows it.
    pub fn queue_item(&self) -> Option<QueueId> {
        u64::try_from(self.queue_id).ok().map(QueueId)
    }

    /// When the build was scheduled to start.
    pub fn started_at(&self) -> Option<OffsetDateTime> {
        OffsetDateTime::from_unix_timestamp_nanos(self.timestamp as i128 * 1_000_000).ok()
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Artifact {
    pub display_path: Option<String>,
    pub file_name: String,
    /// Path to pass to [crate::api::JobsApi::artifact].
    pub relative_path: String,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct Action {
    #[serde(rename = "_class")]
    pub class: Option<String>,
    pub causes: Vec<Cause>,
    pub parameters: Vec<Parameter>,
    pub text: Option<String>,
    pub icon_path: Option<String>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Parameter {
    #[serde(rename = "_class")]
    pub class: Option<String>,
    pub name: String,
    /// Strings, booleans and numbers are all possible.
    #[serde(default)]
    pub value: serde_json::Value,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct Cause {
    #[serde(rename = "_class")]
    pub class: Option<String>,
    pub short_description: Option<String>,
    pub user_id: Option<String>,
    pub user_name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ChangeSetList {
    pub items: Vec<ChangeSet>,
    pub kind: Option<String>,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ChangeSet {
    #[serde(default)]
    pub affected_paths: Vec<String>,
    pub commit_id: Option<String>,
    #[serde(default)]
    pub timestamp: i64,
    pub author: Option<Culprit>,
    pub author_email: Option<String>,
    pub comment: Option<String>,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Culprit {
    pub absolute_url: Option<String>,
    pub full_name: String,
}

/// A piece of console output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressiveText {
    pub text: String,
    /// Offset to request the next piece from, `-1` if Jenkins did not say.
    pub size: i64,
    /// Whether the build is still writing output.
    pub has_more_data: bool,
}
