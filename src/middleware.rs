//! [reqwest_middleware::Middleware] which implements the CSRF protection handshake of Jenkins.
//!
//! A [JenkinsClient](crate::JenkinsClient) which authenticates with a password,
//! or not at all, must send a crumb with every POST request. The crumb is bound
//! to a session, so the session cookie handed out with the crumb must be sent too.
//!
//! Two pipelines are built on the same [reqwest::Client]: the crumb issuer is
//! called through one which captures the session cookie
//! ([SessionCookieMiddleware]), every other request goes through one which
//! attaches the crumb ([CrumbMiddleware]).

mod cookie;
mod crumb;

pub(crate) use cookie::*;
pub(crate) use crumb::CrumbMiddleware;
pub(crate) use crumb::CrumbMapping;
