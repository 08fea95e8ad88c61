//! Services of the Jenkins HTTP API.
//!
//! Each service borrows a [crate::JenkinsClient] and is obtained from it, e.g.
//! [crate::JenkinsClient::jobs]. Every endpoint comes in two forms: a `_raw`
//! method which returns the [reqwest::Response] as-is, and a typed method
//! which reads it into a [crate::ResponseResult].
//!
//! Operations on jobs take an optional folder path like `team/backend`
//! (see [crate::path::folder_path]). `None` or `""` means the root.

mod casc;
mod crumb;
mod jobs;
mod plugins;
mod queue;
mod statistics;
mod system;
mod user;

pub use casc::ConfigurationAsCodeApi;
pub use crumb::CrumbIssuerApi;
pub(crate) use crumb::CRUMB_ISSUER_PATH;
pub use jobs::JobsApi;
pub use plugins::{PluginManagerApi, PluginQuery};
pub use queue::QueueApi;
pub use statistics::StatisticsApi;
pub use system::SystemApi;
pub use user::UserApi;
