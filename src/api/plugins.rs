use crate::errors::JenkinsError;
use crate::models::Plugins;
use crate::response::*;
use crate::JenkinsClient;
use reqwest::header::CONTENT_TYPE;
use reqwest::Response;
use serde::Serialize;

/// Query parameters of [PluginManagerApi::plugins].
#[derive(Debug, Clone, Default, Serialize)]
pub struct PluginQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub depth: Option<u32>,
    /// Fields to include, e.g. `plugins[shortName,version]`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tree: Option<String>,
}

/// Installed plugins.
pub struct PluginManagerApi<'a> {
    client: &'a JenkinsClient,
}

impl<'a> PluginManagerApi<'a> {
    pub(crate) fn new(client: &'a JenkinsClient) -> Self {
        Self { client }
    }

    pub async fn plugins_raw(&self, query: &PluginQuery) -> Result<Response, JenkinsError> {
        let url = self.client.endpoint(["pluginManager", "api", "json"]);
        Ok(self.client.get(url).query(query).send().await?)
    }

    pub async fn plugins(&self, query: &PluginQuery) -> Result<ResponseResult<Plugins>, JenkinsError> {
        Json::<Plugins>::map(self.plugins_raw(query).await?).await
    }

    pub async fn install_necessary_plugins_raw(
        &self,
        plugin_id: &str,
    ) -> Result<Response, JenkinsError> {
        let url = self
            .client
            .endpoint(["pluginManager", "installNecessaryPlugins"]);
        let res = self
            .client
            .post(url)
            .header(CONTENT_TYPE, "application/xml")
            .body(install_payload(plugin_id))
            .send()
            .await?;
        Ok(res)
    }

    /// Install a plugin, given as `shortName@version`, e.g. `git@latest`.
    ///
    /// Jenkins accepts the request before it resolves the plugin, so success
    /// only means the installation was scheduled. An unknown plugin is not
    /// reported here.
    pub async fn install_necessary_plugins(
        &self,
        plugin_id: &str,
    ) -> Result<ResponseResult<()>, JenkinsError> {
        Void::map(self.install_necessary_plugins_raw(plugin_id).await?).await
    }
}

fn install_payload(plugin_id: &str) -> String {
    format!(
        "<jenkins><install plugin=\"{}\"/></jenkins>",
        escape_attribute(plugin_id)
    )
}

/// Escape a value for a double-quoted XML attribute.
///
/// The rest of the payload is a fixed template, so the plugin ID is the only
/// text which needs escaping.
fn escape_attribute(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            c => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::*;

    #[rstest]
    #[case("git@latest", r#"<jenkins><install plugin="git@latest"/></jenkins>"#)]
    #[case(r#"a"b<c>"#, r#"<jenkins><install plugin="a&quot;b&lt;c&gt;"/></jenkins>"#)]
    fn test_install_payload(#[case] plugin_id: &str, #[case] expected: &str) {
        assert_eq!(install_payload(plugin_id), expected);
    }
}
