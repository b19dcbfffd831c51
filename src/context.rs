//! Per-request context: base-path resolution and session attachment.
//!
//! Wrapped around the finished router, so the mount-prefix rewrite runs
//! before a route is matched and every handler downstream sees a resolved
//! base path and an existing session. The control flow per request is
//! resolver -> session attachment -> (auth gate) -> handler.

use crate::base_path::{
    FORWARDED_PREFIX_HEADER, RequestEvidence, resolve_base_path, strip_mounted_prefix,
};
use crate::session::{Session, SessionUser, session_cookie};
use crate::state::AppState;
use async_trait::async_trait;
use axum::extract::{FromRequestParts, Request, State};
use axum::http::Uri;
use axum::http::header::REFERER;
use axum::http::request::Parts;
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::CookieJar;
use std::convert::Infallible;

use crate::auth::login_path;
use crate::session::SESSION_COOKIE;

/// What the middleware hands to everything downstream.
#[derive(Debug, Clone)]
pub struct RequestContext {
    pub base_path: String,
    pub session: Session,
}

/// Identity of the authenticated caller, inserted by the auth gate.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub SessionUser);

/// Resolved mount prefix for this request, ready to root links and redirects.
#[derive(Debug, Clone)]
pub struct BasePath(pub String);

/// Resolve the base path, make sure a session exists (minting a token and
/// cookie on first contact), and rewrite the routed path when a proxy
/// forwarded the external prefix unstripped.
pub async fn attach_context(
    State(state): State<AppState>,
    jar: CookieJar,
    mut req: Request,
    next: Next,
) -> Response {
    let base_path = {
        let evidence = RequestEvidence {
            forwarded_prefix: header_str(req.headers(), FORWARDED_PREFIX_HEADER),
            referrer: header_str(req.headers(), REFERER.as_str()),
            path: req.uri().path(),
        };
        resolve_base_path(&state.config.base_prefix, &evidence)
    };

    // Proxies that do not strip the prefix send `/usr/7/fitness/add`; route
    // it as `/fitness/add` so one route table serves both setups.
    if let Some(stripped) = strip_mounted_prefix(req.uri().path(), &base_path) {
        let rewritten = match req.uri().query() {
            Some(query) => format!("{stripped}?{query}"),
            None => stripped,
        };
        if let Ok(uri) = rewritten.parse::<Uri>() {
            *req.uri_mut() = uri;
        }
    }

    let existing = jar
        .get(SESSION_COOKIE)
        .and_then(|cookie| state.sessions.find(cookie.value()));
    let (session, minted) = match existing {
        Some(session) => (session, false),
        None => {
            let token = state.sessions.create();
            let session = state.sessions.find(&token).unwrap_or(Session {
                token,
                user: None,
            });
            (session, true)
        }
    };
    let token = session.token.clone();

    req.extensions_mut().insert(RequestContext { base_path, session });
    let response = next.run(req).await;

    if minted {
        (jar.add(session_cookie(&token)), response).into_response()
    } else {
        response
    }
}

fn header_str<'a>(headers: &'a axum::http::HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|value| value.to_str().ok())
}

fn context_from_parts(parts: &Parts) -> RequestContext {
    if let Some(ctx) = parts.extensions.get::<RequestContext>() {
        return ctx.clone();
    }
    // Handler invoked without the middleware; infer the prefix from the
    // request alone and treat the caller as anonymous.
    let evidence = RequestEvidence {
        forwarded_prefix: header_str(&parts.headers, FORWARDED_PREFIX_HEADER),
        referrer: header_str(&parts.headers, REFERER.as_str()),
        path: parts.uri.path(),
    };
    RequestContext {
        base_path: resolve_base_path("", &evidence),
        session: Session::default(),
    }
}

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for RequestContext {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(context_from_parts(parts))
    }
}

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for BasePath {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(BasePath(context_from_parts(parts).base_path))
    }
}

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for CurrentUser {
    type Rejection = Redirect;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        if let Some(user) = parts.extensions.get::<CurrentUser>() {
            return Ok(user.clone());
        }
        let ctx = context_from_parts(parts);
        match ctx.session.user {
            Some(user) => Ok(CurrentUser(user)),
            None => Err(Redirect::to(&login_path(&ctx.base_path))),
        }
    }
}
