//! The gate in front of protected route groups.
//!
//! Authorization is a pure decision over the session snapshot and the
//! resolved base path; the middleware wrapper applies it before any handler
//! logic or store access runs.

use crate::context::{CurrentUser, RequestContext};
use crate::session::Session;
use axum::extract::Request;
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};

/// Outcome of the gate for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthDecision {
    Allow,
    RedirectTo(String),
}

/// Login page under the given mount prefix. Empty-safe: with no prefix the
/// target is `/users/login`.
pub fn login_path(base_path: &str) -> String {
    format!("{base_path}/users/login")
}

/// Admit the request if the session is authenticated, otherwise redirect to
/// the login page under the resolved prefix. Mutates nothing either way.
pub fn authorize(session: &Session, base_path: &str) -> AuthDecision {
    if session.logged_in() {
        AuthDecision::Allow
    } else {
        AuthDecision::RedirectTo(login_path(base_path))
    }
}

/// Derive a root prefix from a route group's own mount path by truncating at
/// the mount segment. Fallback for callers outside the normal mounting flow,
/// where no resolved base path is available.
pub fn mount_root(observed_path: &str, mount: &str) -> String {
    if let Some(idx) = observed_path.find(mount) {
        let after = &observed_path[idx + mount.len()..];
        if after.is_empty() || after.starts_with('/') {
            return observed_path[..idx].to_string();
        }
    }
    String::new()
}

/// Middleware form of the gate, applied to the protected route group. On
/// success the session's identity is exposed to handlers as [`CurrentUser`].
pub async fn require_login(mut req: Request, next: Next) -> Response {
    let (session, base_path) = match req.extensions().get::<RequestContext>() {
        Some(ctx) => (ctx.session.clone(), ctx.base_path.clone()),
        // Invoked outside the documented mounting flow; fall back to the
        // group's own mount path.
        None => (
            Session::default(),
            mount_root(req.uri().path(), "/fitness"),
        ),
    };

    match authorize(&session, &base_path) {
        AuthDecision::Allow => match session.user {
            Some(user) => {
                req.extensions_mut().insert(CurrentUser(user));
                next.run(req).await
            }
            None => Redirect::to(&login_path(&base_path)).into_response(),
        },
        AuthDecision::RedirectTo(target) => Redirect::to(&target).into_response(),
    }
}
