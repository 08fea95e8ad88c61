/// Primitive Jenkins API data types and NewType-patterns.
mod ids;
mod jenkins_url;
mod strings;

pub use ids::*;
pub use jenkins_url::*;
pub use strings::*;
