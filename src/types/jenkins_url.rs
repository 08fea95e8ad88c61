//! NewTypes for values used by users when first connecting to Jenkins.

use crate::errors::InvalidJenkinsUrl;
use aliri_braid::braid;

/// A [JenkinsUrl] is the base URL for a Jenkins controller, e.g.
/// `https://ci.example.org/` or `https://example.org/jenkins/`
#[braid(validator, serde)]
pub struct JenkinsUrl(String);

impl aliri_braid::Validator for JenkinsUrl {
    type Error = InvalidJenkinsUrl;

    fn validate(s: &str) -> Result<(), Self::Error> {
        if !(s.starts_with("http://") || s.starts_with("https://")) {
            Err(InvalidJenkinsUrl::Protocol(s.to_string()))
        } else if reqwest::Url::parse(s).is_err() {
            Err(InvalidJenkinsUrl::Malformed(s.to_string()))
        } else {
            Ok(())
        }
    }
}

impl JenkinsUrl {
    /// Parse into a [reqwest::Url] which is ready to have path segments appended.
    pub(crate) fn to_url(&self) -> Result<reqwest::Url, InvalidJenkinsUrl> {
        reqwest::Url::parse(self.as_str()).map_err(|_| InvalidJenkinsUrl::Malformed(self.to_string()))
    }
}
