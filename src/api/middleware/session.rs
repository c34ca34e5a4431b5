//! Session cookie middleware.
//!
//! Every request gets a `SessionContext`. The id comes from the
//! `healthbot_session` cookie when it carries a valid UUID; otherwise a new
//! id is issued and set on the response as an `HttpOnly` cookie.

use axum::extract::Request;
use axum::http::header::{COOKIE, SET_COOKIE};
use axum::http::{HeaderMap, HeaderValue};
use axum::middleware::Next;
use axum::response::Response;
use uuid::Uuid;

use crate::api::types::SessionContext;

pub const SESSION_COOKIE: &str = "healthbot_session";

pub async fn attach_session(mut req: Request, next: Next) -> Response {
    let (session_id, issued) = match session_from_cookies(req.headers()) {
        Some(id) => (id, false),
        None => (Uuid::new_v4().to_string(), true),
    };

    req.extensions_mut().insert(SessionContext {
        session_id: session_id.clone(),
    });

    let mut response = next.run(req).await;

    if issued {
        let cookie = format!("{SESSION_COOKIE}={session_id}; Path=/; HttpOnly; SameSite=Lax");
        match HeaderValue::from_str(&cookie) {
            Ok(value) => {
                response.headers_mut().append(SET_COOKIE, value);
            }
            Err(e) => tracing::error!(error = %e, "Cannot encode session cookie"),
        }
    }
    response
}

/// Session id from the request cookies, if present and well-formed.
fn session_from_cookies(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .and_then(|(_, value)| Uuid::parse_str(value.trim()).ok())
        .map(|id| id.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(cookie: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, HeaderValue::from_str(cookie).unwrap());
        headers
    }

    #[test]
    fn reads_session_among_other_cookies() {
        let id = Uuid::new_v4().to_string();
        let found = session_from_cookies(&headers(&format!("theme=dark; {SESSION_COOKIE}={id}")));
        assert_eq!(found, Some(id));
    }

    #[test]
    fn rejects_malformed_session_ids() {
        assert_eq!(session_from_cookies(&headers(&format!("{SESSION_COOKIE}=not-a-uuid"))), None);
        assert_eq!(session_from_cookies(&headers("other=1")), None);
        assert_eq!(session_from_cookies(&HeaderMap::new()), None);
    }
}
