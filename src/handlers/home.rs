use crate::context::{BasePath, RequestContext};
use crate::state::AppState;
use crate::ui;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Html;
use tracing::error;

/// Landing page. Logged-in users see their recent activity and headline
/// stats; store failures degrade to an empty view rather than an error page.
pub async fn index(State(state): State<AppState>, ctx: RequestContext) -> Html<String> {
    let Some(user) = ctx.session.user.as_ref() else {
        return Html(ui::render_home(&ctx.base_path, None, &[], None));
    };

    let recent = state
        .store
        .recent_workouts(user.id, 3)
        .unwrap_or_else(|err| {
            error!("failed to load recent activity: {}", err.message);
            Vec::new()
        });
    let stats = match state.store.home_stats(user.id) {
        Ok(stats) => Some(stats),
        Err(err) => {
            error!("failed to load home stats: {}", err.message);
            None
        }
    };

    Html(ui::render_home(
        &ctx.base_path,
        Some(&user.username),
        &recent,
        stats.as_ref(),
    ))
}

pub async fn about(BasePath(base): BasePath) -> Html<String> {
    Html(ui::render_about(&base))
}

pub async fn not_found() -> (StatusCode, &'static str) {
    (StatusCode::NOT_FOUND, "Page not found")
}
