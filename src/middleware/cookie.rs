use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, SET_COOKIE};
use reqwest::{Request, Response};
use reqwest_middleware::{Next, Result};
use task_local_extensions::Extensions;
use tracing::trace;

/// Marker header which carries the captured session cookie from the response
/// to whoever reads the crumb.
pub(crate) const X_JSESSIONID: &str = "x-jsessionid";

const JSESSIONID: &str = "JSESSIONID";

/// Copies the `JSESSIONID` cookie of a response into the [X_JSESSIONID] header.
pub(crate) struct SessionCookieMiddleware;

#[async_trait]
impl reqwest_middleware::Middleware for SessionCookieMiddleware {
    async fn handle(
        &self,
        req: Request,
        extensions: &mut Extensions,
        next: Next<'_>,
    ) -> Result<Response> {
        let mut res = next.run(req, extensions).await?;
        if let Some(value) = session_cookie(res.headers()).and_then(|c| HeaderValue::from_str(&c).ok())
        {
            trace!(url = %res.url(), "captured session cookie");
            res.headers_mut().insert(X_JSESSIONID, value);
        }
        Ok(res)
    }
}

/// The `name=value` pair of the session cookie set by a response.
///
/// Jenkins names its cookie `JSESSIONID.<hash>`, so any cookie starting with
/// `JSESSIONID` counts.
pub(crate) fn session_cookie(headers: &HeaderMap) -> Option<String> {
    set_cookie_pairs(headers).find(|pair| pair.starts_with(JSESSIONID))
}

/// The `name=value` pair of the first cookie set by a response.
pub(crate) fn first_cookie(headers: &HeaderMap) -> Option<String> {
    set_cookie_pairs(headers).next()
}

fn set_cookie_pairs(headers: &HeaderMap) -> impl Iterator<Item = String> + '_ {
    headers
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .map(|cookie| cookie.split(';').next().unwrap_or(cookie).trim().to_string())
        .filter(|pair| !pair.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::*;

    fn set_cookies(values: &[&str]) -> HeaderMap {
        let mut headers = HeaderMap::new();
        for value in values {
            headers.append(SET_COOKIE, HeaderValue::from_str(value).unwrap());
        }
        headers
    }

    #[rstest]
    #[case(&["JSESSIONID.a1b2c3=node0xyz; Path=/; HttpOnly"], Some("JSESSIONID.a1b2c3=node0xyz"))]
    #[case(&["remember-me=1; Path=/", "JSESSIONID=abc;Path=/"], Some("JSESSIONID=abc"))]
    #[case(&["remember-me=1; Path=/"], None)]
    #[case(&[], None)]
    fn test_session_cookie(#[case] values: &[&str], #[case] expected: Option<&str>) {
        assert_eq!(session_cookie(&set_cookies(values)).as_deref(), expected);
    }

    #[rstest]
    fn test_first_cookie() {
        let headers = set_cookies(&["remember-me=1; Path=/", "JSESSIONID=abc"]);
        assert_eq!(first_cookie(&headers).as_deref(), Some("remember-me=1"));
    }
}
