use crate::types::Username;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub absolute_url: String,
    pub description: Option<String>,
    pub full_name: String,
    pub id: Username,
}

/// Response to generating a new API token.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct ApiToken {
    /// `"ok"` on success.
    pub status: String,
    pub data: ApiTokenData,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ApiTokenData {
    pub token_name: String,
    pub token_uuid: String,
    /// The secret itself. Jenkins shows it exactly once.
    pub token_value: String,
}
