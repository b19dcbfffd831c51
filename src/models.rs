use serde::Deserialize;

/// One recorded workout.
#[derive(Debug, Clone)]
pub struct FitnessLog {
    pub id: i64,
    pub activity_type: String,
    pub duration: i64,
    pub calories_burned: i64,
    pub intensity: String,
    pub date: String,
}

/// One logged meal.
#[derive(Debug, Clone)]
pub struct NutritionLog {
    pub id: i64,
    pub meal_name: String,
    pub calories: f64,
    pub protein: f64,
    pub fat: f64,
    pub carbs: f64,
    pub date: String,
}

/// One row of the append-only audit trail.
#[derive(Debug, Clone)]
pub struct AuditLog {
    pub username: String,
    pub action: String,
    pub details: String,
    pub timestamp: String,
}

/// Landing-page statistics for a logged-in user.
#[derive(Debug, Clone, Default)]
pub struct HomeStats {
    pub total_calories: i64,
    pub total_workouts: i64,
    pub today_water: i64,
}

/// Lifetime totals shown on the profile page.
#[derive(Debug, Clone, Default)]
pub struct ProfileStats {
    pub total_workouts: i64,
    pub total_calories: i64,
    pub total_duration: i64,
}

// Form payloads. Numeric fields arrive as strings so malformed input can be
// reported inline on the originating form instead of failing extraction.

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct RegisterForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct WorkoutForm {
    #[serde(default)]
    pub activity_type: String,
    #[serde(default)]
    pub duration: String,
    #[serde(default)]
    pub calories: String,
    #[serde(default)]
    pub intensity: String,
}

#[derive(Debug, Deserialize)]
pub struct MealLogForm {
    #[serde(default)]
    pub meal_name: String,
    #[serde(default)]
    pub calories: String,
    #[serde(default)]
    pub protein: String,
    #[serde(default)]
    pub fat: String,
    #[serde(default)]
    pub carbs: String,
}

#[derive(Debug, Deserialize)]
pub struct AnalyzeForm {
    #[serde(default)]
    pub query: String,
}

#[derive(Debug, Deserialize)]
pub struct WaterForm {
    #[serde(default)]
    pub amount: String,
}

#[derive(Debug, Deserialize)]
pub struct BmiForm {
    #[serde(default)]
    pub weight: String,
    #[serde(default)]
    pub height: String,
}

#[derive(Debug, Deserialize)]
pub struct BmrForm {
    #[serde(default)]
    pub gender: String,
    #[serde(default)]
    pub weight: String,
    #[serde(default)]
    pub height: String,
    #[serde(default)]
    pub age: String,
}

#[derive(Debug, Deserialize)]
pub struct MacroForm {
    #[serde(default)]
    pub weight: String,
    #[serde(default)]
    pub goal: String,
    #[serde(default)]
    pub activity: String,
}

// Query-string payloads.

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub q: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct MuscleQuery {
    pub muscle: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AddWorkoutQuery {
    pub activity_name: Option<String>,
}
