use super::cookie::{first_cookie, X_JSESSIONID};
use crate::errors::{CrumbError, JenkinsError};
use crate::models::Crumb;
use crate::response::{is_success, MapResponse, ResponseResult};
use async_trait::async_trait;
use reqwest::header::{HeaderName, HeaderValue, COOKIE};
use reqwest::{Method, Request, Response, Url};
use reqwest_middleware::{ClientWithMiddleware, Next, Result};
use std::sync::Arc;
use task_local_extensions::Extensions;
use tokio::sync::OnceCell;
use tracing::{debug, warn};

/// Reads the response of `crumbIssuer/api/json` into a [Crumb], including
/// the session cookie it was issued for.
pub(crate) struct CrumbMapping;

#[async_trait]
impl MapResponse for CrumbMapping {
    type Output = Crumb;

    async fn map(res: Response) -> std::result::Result<ResponseResult<Crumb>, JenkinsError> {
        let status = res.status();
        if !is_success(status) {
            return Ok(ResponseResult::err(status, res.text().await?));
        }
        let session_cookie = res
            .headers()
            .get(X_JSESSIONID)
            .and_then(|value| value.to_str().ok())
            .map(String::from)
            .or_else(|| first_cookie(res.headers()));
        let body = res.bytes().await?;
        let result = match serde_json::from_slice::<Crumb>(&body) {
            Ok(crumb) => ResponseResult::ok(
                status,
                Crumb {
                    session_cookie,
                    ..crumb
                },
            ),
            Err(e) => ResponseResult::err(status, format!("Failed to parse response body: {}", e)),
        };
        Ok(result)
    }
}

/// Attaches a crumb, and the session cookie it belongs to, to every POST request.
///
/// The crumb is obtained on the first POST request and cached for the lifetime
/// of the client. Concurrent first requests wait for the same crumb issuer call.
/// A failed call is not cached.
pub(crate) struct CrumbMiddleware {
    issuer: ClientWithMiddleware,
    crumb_url: Url,
    crumb: OnceCell<Arc<Crumb>>,
}

impl CrumbMiddleware {
    /// `issuer` must not have a [CrumbMiddleware] itself.
    pub(crate) fn new(issuer: ClientWithMiddleware, crumb_url: Url) -> Self {
        Self {
            issuer,
            crumb_url,
            crumb: OnceCell::new(),
        }
    }

    async fn get_crumb(&self) -> std::result::Result<Arc<Crumb>, JenkinsError> {
        if let Some(crumb) = self.crumb.get() {
            debug!("reusing cached crumb");
            return Ok(Arc::clone(crumb));
        }
        self.crumb
            .get_or_try_init(|| self.issue_crumb())
            .await
            .map(Arc::clone)
    }

    async fn issue_crumb(&self) -> std::result::Result<Arc<Crumb>, JenkinsError> {
        debug!(url = %self.crumb_url, "requesting crumb");
        let res = self.issuer.get(self.crumb_url.clone()).send().await?;
        let result = CrumbMapping::map(res).await?;
        let status = result.status;
        let crumb = match (result.entity, result.error) {
            (Some(crumb), _) => crumb,
            (None, Some(text)) if is_success(status) => return Err(CrumbError::Malformed(text).into()),
            (None, text) => {
                return Err(CrumbError::Issuer {
                    status,
                    text: text.unwrap_or_default(),
                }
                .into())
            }
        };
        if crumb.crumb.as_deref().map(str::is_empty).unwrap_or(true) {
            warn!(url = %self.crumb_url, "crumb issuer did not provide a crumb");
            return Err(CrumbError::Missing.into());
        }
        debug!(
            field = %crumb.crumb_request_field,
            with_session = crumb.session_cookie.is_some(),
            "obtained crumb"
        );
        Ok(Arc::new(crumb))
    }
}

#[async_trait]
impl reqwest_middleware::Middleware for CrumbMiddleware {
    async fn handle(
        &self,
        mut req: Request,
        extensions: &mut Extensions,
        next: Next<'_>,
    ) -> Result<Response> {
        if req.method() == Method::POST {
            let crumb = self.get_crumb().await?;
            attach(&mut req, &crumb)?;
        }
        next.run(req, extensions).await
    }
}

fn attach(req: &mut Request, crumb: &Crumb) -> std::result::Result<(), CrumbError> {
    let value = crumb.crumb.as_deref().ok_or(CrumbError::Missing)?;
    let name = HeaderName::from_bytes(crumb.crumb_request_field.as_bytes())
        .map_err(|_| CrumbError::InvalidHeader(crumb.crumb_request_field.clone()))?;
    let value =
        HeaderValue::from_str(value).map_err(|_| CrumbError::InvalidHeader(value.to_string()))?;
    let headers = req.headers_mut();
    headers.insert(name, value);
    if let Some(session) = &crumb.session_cookie {
        let cookie = match headers.get(COOKIE).and_then(|v| v.to_str().ok()) {
            Some(existing) => format!("{}; {}", existing, session),
            None => session.clone(),
        };
        let cookie = HeaderValue::from_str(&cookie)
            .map_err(|_| CrumbError::InvalidHeader(session.clone()))?;
        headers.insert(COOKIE, cookie);
    }
    Ok(())
}
