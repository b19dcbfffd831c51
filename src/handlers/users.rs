use crate::audit::{self, AuditAction};
use crate::context::RequestContext;
use crate::models::{LoginForm, RegisterForm};
use crate::session::clear_session_cookie;
use crate::state::AppState;
use crate::ui;
use axum::Form;
use axum::extract::State;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum_extra::extract::CookieJar;
use tracing::error;

pub async fn login_form(ctx: RequestContext) -> Html<String> {
    Html(ui::render_login(&ctx.base_path, None))
}

/// Credential check against the store. A lookup error shows a generic
/// message and writes no audit entry; a clean zero-row result is a failed
/// attempt and is audited as such.
pub async fn login(
    State(state): State<AppState>,
    ctx: RequestContext,
    Form(form): Form<LoginForm>,
) -> Response {
    let username = form.username.trim();

    match state.store.find_user(username, &form.password) {
        Err(err) => {
            error!("login lookup failed: {}", err.message);
            Html(ui::render_login(
                &ctx.base_path,
                Some("An error occurred. Please try again."),
            ))
            .into_response()
        }
        Ok(Some(user)) => {
            state.sessions.login(&ctx.session.token, user.clone());
            audit::record(
                &state.store,
                &user.username,
                AuditAction::Login,
                "User logged in successfully",
            );
            Redirect::to(&format!("{}/", ctx.base_path)).into_response()
        }
        Ok(None) => {
            audit::record(
                &state.store,
                username,
                AuditAction::LoginFail,
                "Failed login attempt",
            );
            // Never distinguish unknown user from wrong password.
            Html(ui::render_login(
                &ctx.base_path,
                Some("Invalid username or password"),
            ))
            .into_response()
        }
    }
}

pub async fn logout(
    State(state): State<AppState>,
    ctx: RequestContext,
    jar: CookieJar,
) -> (CookieJar, Redirect) {
    if let Some(username) = ctx.session.username() {
        audit::record(&state.store, username, AuditAction::Logout, "User logged out");
    }
    state.sessions.destroy(&ctx.session.token);
    (
        jar.remove(clear_session_cookie()),
        Redirect::to(&format!("{}/", ctx.base_path)),
    )
}

pub async fn register_form(ctx: RequestContext) -> Html<String> {
    Html(ui::render_register(&ctx.base_path, &[]))
}

pub async fn register(
    State(state): State<AppState>,
    ctx: RequestContext,
    Form(form): Form<RegisterForm>,
) -> Response {
    let errors = validate_registration(&form);
    if !errors.is_empty() {
        return Html(ui::render_register(&ctx.base_path, &errors)).into_response();
    }

    let username = form.username.trim();
    match state.store.username_taken(username) {
        Err(err) => {
            error!("register lookup failed: {}", err.message);
            render_register_error(&ctx.base_path, "Database error")
        }
        Ok(true) => render_register_error(&ctx.base_path, "Username already exists"),
        Ok(false) => match state.store.create_user(username, &form.password) {
            Err(err) => {
                error!("register insert failed: {}", err.message);
                render_register_error(&ctx.base_path, "Error registering user")
            }
            Ok(()) => {
                audit::record(
                    &state.store,
                    username,
                    AuditAction::Register,
                    "New user registered",
                );
                Redirect::to(&format!("{}/users/login", ctx.base_path)).into_response()
            }
        },
    }
}

fn render_register_error(base_path: &str, message: &str) -> Response {
    Html(ui::render_register(base_path, &[message.to_string()])).into_response()
}

fn validate_registration(form: &RegisterForm) -> Vec<String> {
    let mut errors = Vec::new();
    if form.username.trim().chars().count() < 3 {
        errors.push("Username must be at least 3 characters".to_string());
    }
    if !is_strong_password(&form.password) {
        errors.push(
            "Password must be at least 8 chars long and include 1 lowercase, 1 uppercase, \
             1 number, and 1 special character"
                .to_string(),
        );
    }
    errors
}

fn is_strong_password(password: &str) -> bool {
    password.chars().count() >= 8
        && password.chars().any(|c| c.is_lowercase())
        && password.chars().any(|c| c.is_uppercase())
        && password.chars().any(|c| c.is_ascii_digit())
        && password.chars().any(|c| !c.is_alphanumeric() && !c.is_whitespace())
}
