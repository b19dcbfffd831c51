//! Handlers for the protected fitness group. Every route here sits behind
//! the auth gate, so [`CurrentUser`] is always present.

use crate::audit::{self, AuditAction};
use crate::calculators;
use crate::context::{BasePath, CurrentUser};
use crate::errors::AppError;
use crate::models::{
    AddWorkoutQuery, AnalyzeForm, BmiForm, BmrForm, MacroForm, MealLogForm, MuscleQuery,
    SearchQuery, WaterForm, WorkoutForm,
};
use crate::state::AppState;
use crate::ui;
use axum::Form;
use axum::extract::{Query, State};
use axum::response::{Html, IntoResponse, Redirect, Response};
use tracing::{error, warn};

// Workouts.

pub async fn add_workout_form(
    BasePath(base): BasePath,
    _user: CurrentUser,
    Query(query): Query<AddWorkoutQuery>,
) -> Html<String> {
    let prefill = query.activity_name.unwrap_or_default();
    Html(ui::render_add_workout(&base, &[], None, &prefill))
}

pub async fn add_workout(
    State(state): State<AppState>,
    BasePath(base): BasePath,
    CurrentUser(user): CurrentUser,
    Form(form): Form<WorkoutForm>,
) -> Html<String> {
    let activity_type = form.activity_type.trim().to_string();
    let duration = form.duration.trim().parse::<i64>().ok().filter(|d| *d >= 1);
    let calories = form.calories.trim().parse::<i64>().ok().filter(|c| *c >= 0);

    let mut errors = Vec::new();
    if duration.is_none() {
        errors.push("Duration must be a positive number".to_string());
    }
    if calories.is_none() {
        errors.push("Calories must be a positive number".to_string());
    }
    let (Some(duration), Some(calories)) = (duration, calories) else {
        return Html(ui::render_add_workout(&base, &errors, None, &activity_type));
    };

    match state
        .store
        .add_workout(user.id, &activity_type, duration, calories, &form.intensity)
    {
        Err(err) => {
            error!("failed to insert workout: {}", err.message);
            Html(ui::render_add_workout(
                &base,
                &["Database error".to_string()],
                None,
                &activity_type,
            ))
        }
        Ok(()) => {
            audit::record(
                &state.store,
                &user.username,
                AuditAction::AddWorkout,
                &format!(
                    "Type: {activity_type}, Duration: {duration}, Cal: {calories}, Intensity: {}",
                    form.intensity
                ),
            );
            Html(ui::render_add_workout(
                &base,
                &[],
                Some("Workout added successfully!"),
                "",
            ))
        }
    }
}

pub async fn search(
    State(state): State<AppState>,
    BasePath(base): BasePath,
    CurrentUser(user): CurrentUser,
    Query(query): Query<SearchQuery>,
) -> Result<Html<String>, AppError> {
    let Some(term) = query.q.filter(|q| !q.is_empty()) else {
        return Ok(Html(ui::render_search(&base, &[], "")));
    };

    let workouts = state.store.search_workouts(&term)?;
    audit::record(
        &state.store,
        &user.username,
        AuditAction::SearchWorkout,
        &format!("Query: {term}"),
    );
    Ok(Html(ui::render_search(&base, &workouts, &term)))
}

// Exercise lookup.

pub async fn exercises(BasePath(base): BasePath, _user: CurrentUser) -> Html<String> {
    Html(ui::render_exercises(&base, None, ""))
}

pub async fn exercises_search(
    State(state): State<AppState>,
    BasePath(base): BasePath,
    _user: CurrentUser,
    Query(query): Query<MuscleQuery>,
) -> Response {
    let Some(muscle) = query.muscle.filter(|m| !m.is_empty()) else {
        return Redirect::to(&format!("{base}/fitness/exercises")).into_response();
    };

    match state.api.exercises_by_muscle(&muscle).await {
        Ok(exercises) => Html(ui::render_exercises(&base, Some(&exercises), &muscle)).into_response(),
        Err(err) => {
            warn!("exercise lookup failed: {err}");
            Html(ui::render_exercises(&base, Some(&[]), &muscle)).into_response()
        }
    }
}

// Nutrition.

pub async fn nutrition(
    State(state): State<AppState>,
    BasePath(base): BasePath,
    CurrentUser(user): CurrentUser,
) -> Html<String> {
    let history = meal_history(&state, user.id);
    Html(ui::render_nutrition(&base, None, &history, "", None))
}

pub async fn nutrition_analyze(
    State(state): State<AppState>,
    BasePath(base): BasePath,
    CurrentUser(user): CurrentUser,
    Form(form): Form<AnalyzeForm>,
) -> Response {
    let query = form.query.trim().to_string();
    if query.is_empty() {
        return Redirect::to(&format!("{base}/fitness/nutrition")).into_response();
    }

    let history = meal_history(&state, user.id);
    match state.api.analyze_nutrition(&query).await {
        Ok(analysis) => {
            Html(ui::render_nutrition(&base, Some(&analysis), &history, &query, None)).into_response()
        }
        Err(err) => {
            warn!("nutrition lookup failed: {err}");
            Html(ui::render_nutrition(
                &base,
                None,
                &history,
                &query,
                Some("Could not analyze food."),
            ))
            .into_response()
        }
    }
}

pub async fn nutrition_log(
    State(state): State<AppState>,
    BasePath(base): BasePath,
    CurrentUser(user): CurrentUser,
    Form(form): Form<MealLogForm>,
) -> Redirect {
    let calories = parse_or_zero(&form.calories);
    let inserted = state.store.add_meal(
        user.id,
        form.meal_name.trim(),
        calories,
        parse_or_zero(&form.protein),
        parse_or_zero(&form.fat),
        parse_or_zero(&form.carbs),
    );
    match inserted {
        Ok(()) => audit::record(
            &state.store,
            &user.username,
            AuditAction::LogMeal,
            &format!("Meal: {}, Cal: {:.0}", form.meal_name.trim(), calories),
        ),
        Err(err) => error!("failed to log meal: {}", err.message),
    }
    Redirect::to(&format!("{base}/fitness/nutrition"))
}

fn meal_history(state: &AppState, user_id: i64) -> Vec<crate::models::NutritionLog> {
    state.store.recent_meals(user_id, 10).unwrap_or_else(|err| {
        error!("failed to load meal history: {}", err.message);
        Vec::new()
    })
}

fn parse_or_zero(raw: &str) -> f64 {
    raw.trim().parse().unwrap_or(0.0)
}

// Calculators.

pub async fn bmi_form(BasePath(base): BasePath, _user: CurrentUser) -> Html<String> {
    Html(ui::render_bmi(&base, None, None))
}

pub async fn bmi(
    State(state): State<AppState>,
    BasePath(base): BasePath,
    CurrentUser(user): CurrentUser,
    Form(form): Form<BmiForm>,
) -> Html<String> {
    let weight = parse_positive(&form.weight);
    let height = parse_positive(&form.height);
    let (Some(weight), Some(height)) = (weight, height) else {
        return Html(ui::render_bmi(
            &base,
            None,
            Some("Please enter both weight and height."),
        ));
    };

    let value = calculators::bmi(weight, height);
    let status = calculators::bmi_status(value);
    audit::record(
        &state.store,
        &user.username,
        AuditAction::CalculateBmi,
        &format!("BMI: {value:.1}, Status: {status}"),
    );
    Html(ui::render_bmi(&base, Some(value), Some(&format!("Status: {status}"))))
}

pub async fn bmr_form(BasePath(base): BasePath, _user: CurrentUser) -> Html<String> {
    Html(ui::render_bmr(&base, None))
}

pub async fn bmr(
    State(state): State<AppState>,
    BasePath(base): BasePath,
    CurrentUser(user): CurrentUser,
    Form(form): Form<BmrForm>,
) -> Html<String> {
    let weight = parse_positive(&form.weight);
    let height = parse_positive(&form.height);
    let age = parse_positive(&form.age);
    let (Some(weight), Some(height), Some(age)) = (weight, height, age) else {
        return Html(ui::render_bmr(&base, None));
    };

    let value = calculators::bmr(form.gender == "male", weight, height, age);
    audit::record(
        &state.store,
        &user.username,
        AuditAction::CalculateBmr,
        &format!("BMR: {value}"),
    );
    Html(ui::render_bmr(&base, Some(value)))
}

pub async fn macros_form(BasePath(base): BasePath, _user: CurrentUser) -> Html<String> {
    Html(ui::render_macros(&base, None))
}

pub async fn macros(
    State(state): State<AppState>,
    BasePath(base): BasePath,
    CurrentUser(user): CurrentUser,
    Form(form): Form<MacroForm>,
) -> Html<String> {
    let Some(weight) = parse_positive(&form.weight) else {
        return Html(ui::render_macros(&base, None));
    };

    let split = calculators::macro_split(weight, &form.goal, &form.activity);
    audit::record(
        &state.store,
        &user.username,
        AuditAction::CalculateMacros,
        &format!("Goal: {}, Result: {}kcal", form.goal, split.calories),
    );
    Html(ui::render_macros(&base, Some(&split)))
}

fn parse_positive(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| *v > 0.0)
}

// Tips, water, profile, audit.

pub async fn tips(
    State(state): State<AppState>,
    BasePath(base): BasePath,
    CurrentUser(user): CurrentUser,
) -> Html<String> {
    audit::record(
        &state.store,
        &user.username,
        AuditAction::ViewTips,
        "Viewed health tips page",
    );
    Html(ui::render_tips(&base))
}

pub async fn water(
    State(state): State<AppState>,
    BasePath(base): BasePath,
    CurrentUser(user): CurrentUser,
) -> Html<String> {
    match state.store.water_today(user.id) {
        Ok(total) => Html(ui::render_water(&base, total, None)),
        Err(err) => {
            error!("failed to load water total: {}", err.message);
            Html(ui::render_water(&base, 0, Some("Error fetching data")))
        }
    }
}

pub async fn add_water(
    State(state): State<AppState>,
    BasePath(base): BasePath,
    CurrentUser(user): CurrentUser,
    Form(form): Form<WaterForm>,
) -> Html<String> {
    let amount = form.amount.trim().parse::<i64>().ok().filter(|a| *a > 0);
    let Some(amount) = amount else {
        let total = state.store.water_today(user.id).unwrap_or(0);
        return Html(ui::render_water(&base, total, Some("Please enter a valid amount.")));
    };

    match state.store.add_water(user.id, amount) {
        Err(err) => {
            error!("failed to insert water log: {}", err.message);
            Html(ui::render_water(&base, 0, Some("Database error")))
        }
        Ok(()) => {
            audit::record(
                &state.store,
                &user.username,
                AuditAction::AddWater,
                &format!("Amount: {amount}ml"),
            );
            let total = state.store.water_today(user.id).unwrap_or(0);
            Html(ui::render_water(&base, total, Some(&format!("Added {amount}ml!"))))
        }
    }
}

pub async fn profile(
    State(state): State<AppState>,
    BasePath(base): BasePath,
    CurrentUser(user): CurrentUser,
) -> Html<String> {
    let stats = state.store.profile_stats(user.id).unwrap_or_else(|err| {
        error!("failed to load profile stats: {}", err.message);
        Default::default()
    });
    let recent = state.store.recent_workouts(user.id, 5).unwrap_or_else(|err| {
        error!("failed to load recent activity: {}", err.message);
        Vec::new()
    });

    audit::record(
        &state.store,
        &user.username,
        AuditAction::ViewProfile,
        "Viewed personal profile",
    );
    Html(ui::render_profile(&base, &user.username, &stats, &recent))
}

pub async fn audit(
    State(state): State<AppState>,
    BasePath(base): BasePath,
    _user: CurrentUser,
) -> Result<Html<String>, AppError> {
    let logs = state.store.recent_audit()?;
    Ok(Html(ui::render_audit(&base, &logs)))
}
