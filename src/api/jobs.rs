use crate::errors::JenkinsError;
use crate::models::*;
use crate::path::{folder_segments, job_segments};
use crate::response::*;
use crate::types::QueueId;
use crate::JenkinsClient;
use camino::Utf8Path;
use fs_err::tokio::{File, OpenOptions};
use futures::TryStreamExt;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Response, Url};
use std::collections::HashMap;
use tokio_util::io::StreamReader;

const XML: &str = "application/xml";

/// Job lifecycle, builds and pipeline introspection.
pub struct JobsApi<'a> {
    client: &'a JenkinsClient,
}

impl<'a> JobsApi<'a> {
    pub(crate) fn new(client: &'a JenkinsClient) -> Self {
        Self { client }
    }

    fn job_url(&self, folder: Option<&str>, job: &str, tail: &[&str]) -> Url {
        let mut segments = job_segments(folder, job);
        segments.extend(tail.iter().map(|s| s.to_string()));
        self.client.endpoint(segments)
    }

    fn build_url(&self, folder: Option<&str>, job: &str, number: u32, tail: &[&str]) -> Url {
        let mut segments = job_segments(folder, job);
        segments.push(number.to_string());
        segments.extend(tail.iter().map(|s| s.to_string()));
        self.client.endpoint(segments)
    }

    async fn get(&self, url: Url) -> Result<Response, JenkinsError> {
        Ok(self.client.get(url).send().await?)
    }

    async fn post(&self, url: Url) -> Result<Response, JenkinsError> {
        Ok(self.client.post(url).send().await?)
    }

    // ==================================================
    //                 LISTING AND INFO
    // ==================================================

    pub async fn job_list_raw(&self, folder: Option<&str>) -> Result<Response, JenkinsError> {
        let mut segments = folder_segments(folder);
        segments.extend(["api".to_string(), "json".to_string()]);
        self.get(self.client.endpoint(segments)).await
    }

    /// List the jobs and folders at the root or inside a folder.
    pub async fn job_list(
        &self,
        folder: Option<&str>,
    ) -> Result<ResponseResult<JobList>, JenkinsError> {
        Json::<JobList>::map(self.job_list_raw(folder).await?).await
    }

    pub async fn job_info_raw(
        &self,
        folder: Option<&str>,
        job: &str,
    ) -> Result<Response, JenkinsError> {
        self.get(self.job_url(folder, job, &["api", "json"])).await
    }

    pub async fn job_info(
        &self,
        folder: Option<&str>,
        job: &str,
    ) -> Result<ResponseResult<JobInfo>, JenkinsError> {
        Json::<JobInfo>::map(self.job_info_raw(folder, job).await?).await
    }

    pub async fn build_info_raw(
        &self,
        folder: Option<&str>,
        job: &str,
        number: u32,
    ) -> Result<Response, JenkinsError> {
        self.get(self.build_url(folder, job, number, &["api", "json"]))
            .await
    }

    pub async fn build_info(
        &self,
        folder: Option<&str>,
        job: &str,
        number: u32,
    ) -> Result<ResponseResult<BuildInfo>, JenkinsError> {
        Json::<BuildInfo>::map(self.build_info_raw(folder, job, number).await?).await
    }

    // ==================================================
    //                 ARTIFACTS
    // ==================================================

    /// Get an artifact. The response body is the artifact itself, which
    /// can be streamed using [Response::bytes_stream].
    pub async fn artifact_raw(
        &self,
        folder: Option<&str>,
        job: &str,
        number: u32,
        relative_path: &str,
    ) -> Result<Response, JenkinsError> {
        let tail: Vec<&str> = std::iter::once("artifact")
            .chain(relative_path.split('/').filter(|s| !s.is_empty()))
            .collect();
        self.get(self.build_url(folder, job, number, &tail)).await
    }

    /// Get the content of an artifact in memory.
    pub async fn artifact(
        &self,
        folder: Option<&str>,
        job: &str,
        number: u32,
        relative_path: &str,
    ) -> Result<ResponseResult<bytes::Bytes>, JenkinsError> {
        Bytes::map(self.artifact_raw(folder, job, number, relative_path).await?).await
    }

    /// Download an artifact to a local path. The entity is the number of bytes written.
    ///
    /// Nothing is written if Jenkins responds with an error.
    /// If `clobber` is `false`, an existing file at `dst` is an error.
    pub async fn download_artifact(
        &self,
        folder: Option<&str>,
        job: &str,
        number: u32,
        relative_path: &str,
        dst: &Utf8Path,
        clobber: bool,
    ) -> Result<ResponseResult<u64>, JenkinsError> {
        let res = self
            .artifact_raw(folder, job, number, relative_path)
            .await?;
        let status = res.status();
        if !is_success(status) {
            return Ok(ResponseResult::err(status, res.text().await?));
        }
        let mut file = if clobber {
            File::create(dst).await
        } else {
            OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(dst)
                .await
        }?;
        let stream = res
            .bytes_stream()
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::ConnectionAborted, e));
        let mut reader = StreamReader::new(stream);
        let written = tokio::io::copy(&mut reader, &mut file).await?;
        Ok(ResponseResult::ok(status, written))
    }

    // ==================================================
    //                 CONFIGURATION
    // ==================================================

    pub async fn create_raw(
        &self,
        folder: Option<&str>,
        job: &str,
        config_xml: impl Into<String>,
    ) -> Result<Response, JenkinsError> {
        let mut segments = folder_segments(folder);
        segments.push("createItem".to_string());
        let res = self
            .client
            .post(self.client.endpoint(segments))
            .query(&[("name", job)])
            .header(CONTENT_TYPE, XML)
            .body(config_xml.into())
            .send()
            .await?;
        Ok(res)
    }

    /// Create a job from its `config.xml`.
    pub async fn create(
        &self,
        folder: Option<&str>,
        job: &str,
        config_xml: impl Into<String>,
    ) -> Result<ResponseResult<()>, JenkinsError> {
        Void::map(self.create_raw(folder, job, config_xml).await?).await
    }

    pub async fn config_raw(
        &self,
        folder: Option<&str>,
        job: &str,
    ) -> Result<Response, JenkinsError> {
        self.get(self.job_url(folder, job, &["config.xml"])).await
    }

    /// Get the `config.xml` of a job.
    pub async fn config(
        &self,
        folder: Option<&str>,
        job: &str,
    ) -> Result<ResponseResult<String>, JenkinsError> {
        Text::map(self.config_raw(folder, job).await?).await
    }

    pub async fn update_config_raw(
        &self,
        folder: Option<&str>,
        job: &str,
        config_xml: impl Into<String>,
    ) -> Result<Response, JenkinsError> {
        let res = self
            .client
            .post(self.job_url(folder, job, &["config.xml"]))
            .header(CONTENT_TYPE, XML)
            .body(config_xml.into())
            .send()
            .await?;
        Ok(res)
    }

    /// Replace the `config.xml` of a job.
    pub async fn update_config(
        &self,
        folder: Option<&str>,
        job: &str,
        config_xml: impl Into<String>,
    ) -> Result<ResponseResult<()>, JenkinsError> {
        Void::map(self.update_config_raw(folder, job, config_xml).await?).await
    }

    pub async fn description_raw(
        &self,
        folder: Option<&str>,
        job: &str,
    ) -> Result<Response, JenkinsError> {
        self.get(self.job_url(folder, job, &["description"])).await
    }

    pub async fn description(
        &self,
        folder: Option<&str>,
        job: &str,
    ) -> Result<ResponseResult<String>, JenkinsError> {
        Text::map(self.description_raw(folder, job).await?).await
    }

    pub async fn set_description_raw(
        &self,
        folder: Option<&str>,
        job: &str,
        description: &str,
    ) -> Result<Response, JenkinsError> {
        let res = self
            .client
            .post(self.job_url(folder, job, &["description"]))
            .form(&[("description", description)])
            .send()
            .await?;
        Ok(res)
    }

    pub async fn set_description(
        &self,
        folder: Option<&str>,
        job: &str,
        description: &str,
    ) -> Result<ResponseResult<()>, JenkinsError> {
        Void::map(self.set_description_raw(folder, job, description).await?).await
    }

    // ==================================================
    //                 LIFECYCLE
    // ==================================================

    pub async fn delete_raw(
        &self,
        folder: Option<&str>,
        job: &str,
    ) -> Result<Response, JenkinsError> {
        self.post(self.job_url(folder, job, &["doDelete"])).await
    }

    pub async fn delete(
        &self,
        folder: Option<&str>,
        job: &str,
    ) -> Result<ResponseResult<()>, JenkinsError> {
        Void::map(self.delete_raw(folder, job).await?).await
    }

    pub async fn enable_raw(
        &self,
        folder: Option<&str>,
        job: &str,
    ) -> Result<Response, JenkinsError> {
        self.post(self.job_url(folder, job, &["enable"])).await
    }

    pub async fn enable(
        &self,
        folder: Option<&str>,
        job: &str,
    ) -> Result<ResponseResult<()>, JenkinsError> {
        Void::map(self.enable_raw(folder, job).await?).await
    }

    pub async fn disable_raw(
        &self,
        folder: Option<&str>,
        job: &str,
    ) -> Result<Response, JenkinsError> {
        self.post(self.job_url(folder, job, &["disable"])).await
    }

    pub async fn disable(
        &self,
        folder: Option<&str>,
        job: &str,
    ) -> Result<ResponseResult<()>, JenkinsError> {
        Void::map(self.disable_raw(folder, job).await?).await
    }

    pub async fn rename_raw(
        &self,
        folder: Option<&str>,
        job: &str,
        new_name: &str,
    ) -> Result<Response, JenkinsError> {
        let res = self
            .client
            .post(self.job_url(folder, job, &["doRename"]))
            .query(&[("newName", new_name)])
            .send()
            .await?;
        Ok(res)
    }

    pub async fn rename(
        &self,
        folder: Option<&str>,
        job: &str,
        new_name: &str,
    ) -> Result<ResponseResult<()>, JenkinsError> {
        Void::map(self.rename_raw(folder, job, new_name).await?).await
    }

    // ==================================================
    //                 BUILDS
    // ==================================================

    pub async fn build_raw(
        &self,
        folder: Option<&str>,
        job: &str,
    ) -> Result<Response, JenkinsError> {
        self.post(self.job_url(folder, job, &["build"])).await
    }

    /// Trigger a build. The entity is the ID of the queue item which was created.
    pub async fn build(
        &self,
        folder: Option<&str>,
        job: &str,
    ) -> Result<ResponseResult<QueueId>, JenkinsError> {
        QueueLocation::map(self.build_raw(folder, job).await?).await
    }

    pub async fn build_with_parameters_raw(
        &self,
        folder: Option<&str>,
        job: &str,
        params: &HashMap<String, Vec<String>>,
    ) -> Result<Response, JenkinsError> {
        let res = self
            .client
            .post(self.job_url(folder, job, &["buildWithParameters"]))
            .form(&parameters_form(params))
            .send()
            .await?;
        Ok(res)
    }

    /// Trigger a build with parameters. A parameter without values is sent empty.
    pub async fn build_with_parameters(
        &self,
        folder: Option<&str>,
        job: &str,
        params: &HashMap<String, Vec<String>>,
    ) -> Result<ResponseResult<QueueId>, JenkinsError> {
        QueueLocation::map(self.build_with_parameters_raw(folder, job, params).await?).await
    }

    pub async fn stop_raw(
        &self,
        folder: Option<&str>,
        job: &str,
        number: u32,
    ) -> Result<Response, JenkinsError> {
        self.post(self.build_url(folder, job, number, &["stop"]))
            .await
    }

    /// Abort a running build.
    pub async fn stop(
        &self,
        folder: Option<&str>,
        job: &str,
        number: u32,
    ) -> Result<ResponseResult<()>, JenkinsError> {
        Void::map(self.stop_raw(folder, job, number).await?).await
    }

    pub async fn term_raw(
        &self,
        folder: Option<&str>,
        job: &str,
        number: u32,
    ) -> Result<Response, JenkinsError> {
        self.post(self.build_url(folder, job, number, &["term"]))
            .await
    }

    /// Forcibly terminate a build which did not respond to [JobsApi::stop].
    ///
    /// Only pipeline builds support this. Jenkins may report success for a
    /// freestyle build without doing anything.
    pub async fn term(
        &self,
        folder: Option<&str>,
        job: &str,
        number: u32,
    ) -> Result<ResponseResult<()>, JenkinsError> {
        Void::map(self.term_raw(folder, job, number).await?).await
    }

    pub async fn kill_raw(
        &self,
        folder: Option<&str>,
        job: &str,
        number: u32,
    ) -> Result<Response, JenkinsError> {
        self.post(self.build_url(folder, job, number, &["kill"]))
            .await
    }

    /// Hard kill a build which did not respond to [JobsApi::term].
    ///
    /// Same caveat as [JobsApi::term] for freestyle builds.
    pub async fn kill(
        &self,
        folder: Option<&str>,
        job: &str,
        number: u32,
    ) -> Result<ResponseResult<()>, JenkinsError> {
        Void::map(self.kill_raw(folder, job, number).await?).await
    }

    pub async fn last_build_number_raw(
        &self,
        folder: Option<&str>,
        job: &str,
    ) -> Result<Response, JenkinsError> {
        self.get(self.job_url(folder, job, &["lastBuild", "buildNumber"]))
            .await
    }

    pub async fn last_build_number(
        &self,
        folder: Option<&str>,
        job: &str,
    ) -> Result<ResponseResult<u32>, JenkinsError> {
        IntFromText::<u32>::map(self.last_build_number_raw(folder, job).await?).await
    }

    pub async fn last_build_timestamp_raw(
        &self,
        folder: Option<&str>,
        job: &str,
    ) -> Result<Response, JenkinsError> {
        self.get(self.job_url(folder, job, &["lastBuild", "buildTimestamp"]))
            .await
    }

    /// Start of the last build, formatted by Jenkins.
    pub async fn last_build_timestamp(
        &self,
        folder: Option<&str>,
        job: &str,
    ) -> Result<ResponseResult<String>, JenkinsError> {
        Text::map(self.last_build_timestamp_raw(folder, job).await?).await
    }

    // ==================================================
    //                 CONSOLE OUTPUT
    // ==================================================

    pub async fn progressive_text_raw(
        &self,
        folder: Option<&str>,
        job: &str,
        start: u64,
    ) -> Result<Response, JenkinsError> {
        let url = self.job_url(folder, job, &["lastBuild", "logText", "progressiveText"]);
        let res = self
            .client
            .get(url)
            .query(&[("start", start)])
            .send()
            .await?;
        Ok(res)
    }

    /// Console output of the last build, starting at byte offset `start`.
    ///
    /// Pass [ProgressiveText::size] of the previous piece as the next `start`
    /// while [ProgressiveText::has_more_data] is `true`.
    pub async fn progressive_text(
        &self,
        folder: Option<&str>,
        job: &str,
        start: u64,
    ) -> Result<ResponseResult<ProgressiveText>, JenkinsError> {
        Progressive::map(self.progressive_text_raw(folder, job, start).await?).await
    }

    pub async fn build_progressive_text_raw(
        &self,
        folder: Option<&str>,
        job: &str,
        number: u32,
        start: u64,
    ) -> Result<Response, JenkinsError> {
        let url = self.build_url(folder, job, number, &["logText", "progressiveText"]);
        let res = self
            .client
            .get(url)
            .query(&[("start", start)])
            .send()
            .await?;
        Ok(res)
    }

    /// Console output of a specific build, starting at byte offset `start`.
    pub async fn build_progressive_text(
        &self,
        folder: Option<&str>,
        job: &str,
        number: u32,
        start: u64,
    ) -> Result<ResponseResult<ProgressiveText>, JenkinsError> {
        Progressive::map(
            self.build_progressive_text_raw(folder, job, number, start)
                .await?,
        )
        .await
    }

    // ==================================================
    //                 PIPELINES
    // ==================================================

    pub async fn run_history_raw(
        &self,
        folder: Option<&str>,
        job: &str,
    ) -> Result<Response, JenkinsError> {
        self.get(self.job_url(folder, job, &["wfapi", "runs"])).await
    }

    /// Recent runs of a pipeline job.
    pub async fn run_history(
        &self,
        folder: Option<&str>,
        job: &str,
    ) -> Result<ResponseResult<Vec<Workflow>>, JenkinsError> {
        Json::<Vec<Workflow>>::map(self.run_history_raw(folder, job).await?).await
    }

    pub async fn workflow_raw(
        &self,
        folder: Option<&str>,
        job: &str,
        number: u32,
    ) -> Result<Response, JenkinsError> {
        self.get(self.build_url(folder, job, number, &["wfapi", "describe"]))
            .await
    }

    pub async fn workflow(
        &self,
        folder: Option<&str>,
        job: &str,
        number: u32,
    ) -> Result<ResponseResult<Workflow>, JenkinsError> {
        Json::<Workflow>::map(self.workflow_raw(folder, job, number).await?).await
    }

    pub async fn pipeline_node_raw(
        &self,
        folder: Option<&str>,
        job: &str,
        number: u32,
        node_id: u32,
    ) -> Result<Response, JenkinsError> {
        let node_id = node_id.to_string();
        let url = self.build_url(
            folder,
            job,
            number,
            &["execution", "node", node_id.as_str(), "wfapi", "describe"],
        );
        self.get(url).await
    }

    pub async fn pipeline_node(
        &self,
        folder: Option<&str>,
        job: &str,
        number: u32,
        node_id: u32,
    ) -> Result<ResponseResult<PipelineNode>, JenkinsError> {
        Json::<PipelineNode>::map(
            self.pipeline_node_raw(folder, job, number, node_id)
                .await?,
        )
        .await
    }

    pub async fn pipeline_node_log_raw(
        &self,
        folder: Option<&str>,
        job: &str,
        number: u32,
        node_id: u32,
    ) -> Result<Response, JenkinsError> {
        let node_id = node_id.to_string();
        let url = self.build_url(
            folder,
            job,
            number,
            &["execution", "node", node_id.as_str(), "wfapi", "log"],
        );
        self.get(url).await
    }

    pub async fn pipeline_node_log(
        &self,
        folder: Option<&str>,
        job: &str,
        number: u32,
        node_id: u32,
    ) -> Result<ResponseResult<PipelineNodeLog>, JenkinsError> {
        Json::<PipelineNodeLog>::map(
            self.pipeline_node_log_raw(folder, job, number, node_id)
                .await?,
        )
        .await
    }
}

/// Flatten parameters into form fields, repeating keys which have multiple values.
fn parameters_form(params: &HashMap<String, Vec<String>>) -> Vec<(&str, &str)> {
    params
        .iter()
        .flat_map(|(key, values)| {
            let values: Vec<&str> = if values.is_empty() {
                vec![""]
            } else {
                values.iter().map(String::as_str).collect()
            };
            values.into_iter().map(move |value| (key.as_str(), value))
        })
        .collect()
}
