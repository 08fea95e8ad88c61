//! Typed async client for the HTTP API of [Jenkins](https://www.jenkins.io/).
//!
//! ```no_run
//! use jenkins_rest::{Credentials, JenkinsClient};
//!
//! # async fn f() -> Result<(), jenkins_rest::errors::JenkinsError> {
//! let client = JenkinsClient::builder()
//!     .endpoint("http://localhost:8080")
//!     .credentials(Credentials::api_token("admin", "11aa22bb"))
//!     .build()?;
//! let queued = client.jobs().build(Some("team/backend"), "deploy").await?;
//! if let Some(id) = queued.entity {
//!     let item = client.queue().queue_item(id).await?;
//!     println!("{:?}", item.entity.and_then(|i| i.why));
//! }
//! # Ok(())
//! # }
//! ```
//!
//! Clients which authenticate with a password, or anonymously, obtain a CSRF
//! crumb before their first POST request and reuse it afterwards.

pub mod api;
pub mod auth;
mod client;
pub mod errors;
mod middleware;
pub mod models;
pub mod path;
pub mod response;
pub mod types;

pub use auth::Credentials;
pub use client::{ClientOptions, JenkinsClient, JenkinsClientBuilder};
pub use response::ResponseResult;

pub use reqwest;
