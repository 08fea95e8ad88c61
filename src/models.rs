//! Representations of data from *Jenkins*.
//!
//! Everything here is [serde::de::Deserialize]-able from the JSON which
//! Jenkins produces under `.../api/json` and the `wfapi` endpoints, except for
//! [ProgressiveText] and [SystemInfo] which are read from response headers.
//! Jenkins is free to add fields, so unknown fields are always ignored.

mod crumb;
mod job;
mod plugins;
mod queue;
mod statistics;
mod system;
mod user;
mod workflow;

pub use crumb::*;
pub use job::*;
pub use plugins::*;
pub use queue::*;
pub use statistics::*;
pub use system::*;
pub use user::*;
pub use workflow::*;
