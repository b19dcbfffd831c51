use crate::auth::require_login;
use crate::handlers::{fitness, home, users};
use crate::state::AppState;
use axum::{
    Router, middleware,
    routing::{get, post},
};

/// Route table only. The caller wraps this in the request-context middleware
/// (see `main.rs`); that wrapping must sit outside the router so the
/// mount-prefix rewrite happens before a route is matched.
pub fn router(state: AppState) -> Router {
    let user_routes = Router::new()
        .route("/login", get(users::login_form).post(users::login))
        .route("/logout", get(users::logout))
        .route("/register", get(users::register_form).post(users::register));

    let fitness_routes = Router::new()
        .route("/add", get(fitness::add_workout_form).post(fitness::add_workout))
        .route("/exercises", get(fitness::exercises))
        .route("/exercises/search", get(fitness::exercises_search))
        .route("/nutrition", get(fitness::nutrition))
        .route("/nutrition/analyze", post(fitness::nutrition_analyze))
        .route("/nutrition/log", post(fitness::nutrition_log))
        .route("/search", get(fitness::search))
        .route("/bmi", get(fitness::bmi_form).post(fitness::bmi))
        .route("/tips", get(fitness::tips))
        .route("/water", get(fitness::water).post(fitness::add_water))
        .route("/bmr", get(fitness::bmr_form).post(fitness::bmr))
        .route("/macros", get(fitness::macros_form).post(fitness::macros))
        .route("/profile", get(fitness::profile))
        .route("/audit", get(fitness::audit))
        .route_layer(middleware::from_fn(require_login));

    Router::new()
        .route("/", get(home::index))
        .route("/about", get(home::about))
        .nest("/users", user_routes)
        .nest("/fitness", fitness_routes)
        .fallback(home::not_found)
        .with_state(state)
}
