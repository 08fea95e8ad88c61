/// Version and identity information Jenkins sends in the headers of every response.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SystemInfo {
    /// `X-Hudson`
    pub hudson_version: Option<String>,
    /// `X-Jenkins`
    pub jenkins_version: Option<String>,
    /// `X-Jenkins-Session`
    pub jenkins_session: Option<String>,
    /// `X-Instance-Identity`
    pub instance_identity: Option<String>,
    /// `X-SSH-Endpoint`
    pub ssh_endpoint: Option<String>,
    /// `Server`
    pub server: Option<String>,
}
