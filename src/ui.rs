//! Server-rendered pages: one shared layout, one render function per view.
//! Everything is plain string templating with `{{PLACEHOLDER}}` replacement;
//! user-supplied values go through [`escape`] before interpolation, and every
//! internal link and form action is rooted at the resolved base path.

use crate::calculators::MacroSplit;
use crate::external::{Exercise, NutritionAnalysis};
use crate::models::{AuditLog, FitnessLog, HomeStats, NutritionLog, ProfileStats};
use url::form_urlencoded;

pub fn escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Encode a value for use in a query string. The output contains no HTML
/// metacharacters, so it needs no further escaping.
fn query_encode(value: &str) -> String {
    form_urlencoded::byte_serialize(value.as_bytes()).collect()
}

fn page(base: &str, title: &str, logged_in: bool, content: &str) -> String {
    LAYOUT
        .replace("{{TITLE}}", &escape(title))
        .replace("{{NAV}}", &nav(base, logged_in))
        .replace("{{CONTENT}}", content)
}

fn nav(base: &str, logged_in: bool) -> String {
    let mut links = vec![
        (format!("{base}/"), "Home"),
        (format!("{base}/about"), "About"),
    ];
    if logged_in {
        links.extend([
            (format!("{base}/fitness/add"), "Add Workout"),
            (format!("{base}/fitness/exercises"), "Exercises"),
            (format!("{base}/fitness/nutrition"), "Nutrition"),
            (format!("{base}/fitness/search"), "Search"),
            (format!("{base}/fitness/bmi"), "BMI"),
            (format!("{base}/fitness/bmr"), "BMR"),
            (format!("{base}/fitness/macros"), "Macros"),
            (format!("{base}/fitness/water"), "Water"),
            (format!("{base}/fitness/tips"), "Tips"),
            (format!("{base}/fitness/profile"), "Profile"),
            (format!("{base}/fitness/audit"), "Audit"),
            (format!("{base}/users/logout"), "Logout"),
        ]);
    } else {
        links.extend([
            (format!("{base}/users/login"), "Login"),
            (format!("{base}/users/register"), "Register"),
        ]);
    }

    let mut html = String::new();
    for (href, label) in links {
        html.push_str(&format!("<a href=\"{href}\">{label}</a>\n"));
    }
    html
}

fn message_block(class: &str, message: Option<&str>) -> String {
    match message {
        Some(text) => format!("<p class=\"{class}\">{}</p>\n", escape(text)),
        None => String::new(),
    }
}

fn error_list(errors: &[String]) -> String {
    if errors.is_empty() {
        return String::new();
    }
    let mut html = String::from("<ul class=\"errors\">\n");
    for error in errors {
        html.push_str(&format!("<li>{}</li>\n", escape(error)));
    }
    html.push_str("</ul>\n");
    html
}

pub fn render_home(
    base: &str,
    user: Option<&str>,
    recent: &[FitnessLog],
    stats: Option<&HomeStats>,
) -> String {
    let mut content = String::new();
    match user {
        None => {
            content.push_str("<h1>Welcome to Bitality</h1>\n");
            content.push_str("<p>Track workouts, nutrition, and hydration in one place.</p>\n");
            content.push_str(&format!(
                "<p><a class=\"button\" href=\"{base}/users/login\">Login</a> \
                 <a class=\"button\" href=\"{base}/users/register\">Register</a></p>\n"
            ));
        }
        Some(username) => {
            content.push_str(&format!("<h1>Welcome back, {}</h1>\n", escape(username)));
            if let Some(stats) = stats {
                content.push_str("<section class=\"panel\">\n");
                content.push_str(&stat_card("Calories burned", &stats.total_calories.to_string()));
                content.push_str(&stat_card("Workouts", &stats.total_workouts.to_string()));
                content.push_str(&stat_card("Water today", &format!("{}ml", stats.today_water)));
                content.push_str("</section>\n");
            }
            content.push_str("<h2>Recent activity</h2>\n");
            if recent.is_empty() {
                content.push_str("<p>No workouts logged yet.</p>\n");
            } else {
                content.push_str(&workout_table(recent));
            }
        }
    }
    page(base, "Bitality - Home", user.is_some(), &content)
}

pub fn render_about(base: &str) -> String {
    let content = "<h1>About Bitality</h1>\n\
        <p>Bitality is a health and fitness tracker: log workouts and meals, \
        keep an eye on hydration, and estimate BMI, BMR, and macros.</p>\n";
    page(base, "Bitality - About", false, content)
}

pub fn render_login(base: &str, error: Option<&str>) -> String {
    let content = format!(
        "<h1>Login</h1>\n{}\
         <form method=\"post\" action=\"{base}/users/login\">\n\
         <label>Username <input type=\"text\" name=\"username\" required></label>\n\
         <label>Password <input type=\"password\" name=\"password\" required></label>\n\
         <button type=\"submit\">Login</button>\n\
         </form>\n\
         <p>No account yet? <a href=\"{base}/users/register\">Register</a></p>\n",
        message_block("error", error)
    );
    page(base, "Bitality - Login", false, &content)
}

pub fn render_register(base: &str, errors: &[String]) -> String {
    let content = format!(
        "<h1>Register</h1>\n{}\
         <form method=\"post\" action=\"{base}/users/register\">\n\
         <label>Username <input type=\"text\" name=\"username\" required></label>\n\
         <label>Password <input type=\"password\" name=\"password\" required></label>\n\
         <button type=\"submit\">Register</button>\n\
         </form>\n\
         <p>Already registered? <a href=\"{base}/users/login\">Login</a></p>\n",
        error_list(errors)
    );
    page(base, "Bitality - Register", false, &content)
}

pub fn render_add_workout(
    base: &str,
    errors: &[String],
    success: Option<&str>,
    activity_type: &str,
) -> String {
    let content = format!(
        "<h1>Add Workout</h1>\n{}{}\
         <form method=\"post\" action=\"{base}/fitness/add\">\n\
         <label>Activity <input type=\"text\" name=\"activity_type\" value=\"{}\" required></label>\n\
         <label>Duration (minutes) <input type=\"number\" name=\"duration\" required></label>\n\
         <label>Calories burned <input type=\"number\" name=\"calories\" required></label>\n\
         <label>Intensity <select name=\"intensity\">\n\
         <option value=\"low\">Low</option>\n\
         <option value=\"medium\">Medium</option>\n\
         <option value=\"high\">High</option>\n\
         </select></label>\n\
         <button type=\"submit\">Add workout</button>\n\
         </form>\n",
        error_list(errors),
        message_block("success", success),
        escape(activity_type)
    );
    page(base, "Bitality - Add Workout", true, &content)
}

pub fn render_exercises(base: &str, exercises: Option<&[Exercise]>, selected: &str) -> String {
    let mut content = format!(
        "<h1>Find Exercises</h1>\n\
         <form method=\"get\" action=\"{base}/fitness/exercises/search\">\n\
         <label>Muscle group <input type=\"text\" name=\"muscle\" value=\"{}\"></label>\n\
         <button type=\"submit\">Search</button>\n\
         </form>\n",
        escape(selected)
    );
    if let Some(exercises) = exercises {
        if exercises.is_empty() {
            content.push_str("<p>No exercises found.</p>\n");
        } else {
            content.push_str("<ul class=\"cards\">\n");
            for exercise in exercises {
                content.push_str(&format!(
                    "<li><strong>{}</strong> <em>{}</em><br>{} / {}<br>\
                     <a href=\"{base}/fitness/add?activity_name={}\">Log this</a></li>\n",
                    escape(&exercise.name),
                    escape(&exercise.difficulty),
                    escape(&exercise.muscle),
                    escape(&exercise.equipment),
                    query_encode(&exercise.name),
                ));
            }
            content.push_str("</ul>\n");
        }
    }
    page(base, "Bitality - Find Exercises", true, &content)
}

pub fn render_nutrition(
    base: &str,
    analysis: Option<&NutritionAnalysis>,
    history: &[NutritionLog],
    query: &str,
    error: Option<&str>,
) -> String {
    let mut content = format!(
        "<h1>Nutrition Tracker</h1>\n{}\
         <form method=\"post\" action=\"{base}/fitness/nutrition/analyze\">\n\
         <label>Describe a meal <input type=\"text\" name=\"query\" value=\"{}\"></label>\n\
         <button type=\"submit\">Analyze</button>\n\
         </form>\n",
        message_block("error", error),
        escape(query)
    );

    if let Some(analysis) = analysis {
        content.push_str("<h2>Analysis</h2>\n");
        if analysis.items.is_empty() {
            content.push_str("<p>Nothing recognized in that description.</p>\n");
        }
        for item in &analysis.items {
            content.push_str(&format!(
                "<form class=\"analysis\" method=\"post\" action=\"{base}/fitness/nutrition/log\">\n\
                 <strong>{}</strong>: {:.0} kcal, {:.1}g protein, {:.1}g fat, {:.1}g carbs\n\
                 <input type=\"hidden\" name=\"meal_name\" value=\"{}\">\n\
                 <input type=\"hidden\" name=\"calories\" value=\"{}\">\n\
                 <input type=\"hidden\" name=\"protein\" value=\"{}\">\n\
                 <input type=\"hidden\" name=\"fat\" value=\"{}\">\n\
                 <input type=\"hidden\" name=\"carbs\" value=\"{}\">\n\
                 <button type=\"submit\">Log meal</button>\n\
                 </form>\n",
                escape(&item.name),
                item.calories,
                item.protein_g,
                item.fat_total_g,
                item.carbohydrates_total_g,
                escape(&item.name),
                item.calories,
                item.protein_g,
                item.fat_total_g,
                item.carbohydrates_total_g,
            ));
        }
    }

    content.push_str("<h2>Recent meals</h2>\n");
    if history.is_empty() {
        content.push_str("<p>No meals logged yet.</p>\n");
    } else {
        content.push_str(
            "<table><tr><th>Meal</th><th>Calories</th><th>Protein</th>\
             <th>Fat</th><th>Carbs</th><th>Date</th></tr>\n",
        );
        for meal in history {
            content.push_str(&format!(
                "<tr><td>{}</td><td>{:.0}</td><td>{:.1}</td><td>{:.1}</td><td>{:.1}</td><td>{}</td></tr>\n",
                escape(&meal.meal_name),
                meal.calories,
                meal.protein,
                meal.fat,
                meal.carbs,
                escape(&meal.date),
            ));
        }
        content.push_str("</table>\n");
    }
    page(base, "Bitality - Nutrition Tracker", true, &content)
}

pub fn render_search(base: &str, workouts: &[FitnessLog], term: &str) -> String {
    let mut content = format!(
        "<h1>Search Workouts</h1>\n\
         <form method=\"get\" action=\"{base}/fitness/search\">\n\
         <label>Activity <input type=\"text\" name=\"q\" value=\"{}\"></label>\n\
         <button type=\"submit\">Search</button>\n\
         </form>\n",
        escape(term)
    );
    if !term.is_empty() {
        if workouts.is_empty() {
            content.push_str("<p>No matching workouts.</p>\n");
        } else {
            content.push_str(&workout_table(workouts));
        }
    }
    page(base, "Bitality - Search", true, &content)
}

pub fn render_bmi(base: &str, bmi: Option<f64>, status: Option<&str>) -> String {
    let mut content = format!(
        "<h1>BMI Calculator</h1>\n\
         <form method=\"post\" action=\"{base}/fitness/bmi\">\n\
         <label>Weight (kg) <input type=\"number\" step=\"0.1\" name=\"weight\"></label>\n\
         <label>Height (cm) <input type=\"number\" step=\"0.1\" name=\"height\"></label>\n\
         <button type=\"submit\">Calculate</button>\n\
         </form>\n"
    );
    if let Some(bmi) = bmi {
        content.push_str(&format!("<p class=\"result\">Your BMI: {bmi:.1}</p>\n"));
    }
    content.push_str(&message_block("status", status));
    page(base, "Bitality - BMI Calculator", true, &content)
}

pub fn render_bmr(base: &str, bmr: Option<i64>) -> String {
    let mut content = format!(
        "<h1>BMR Calculator</h1>\n\
         <form method=\"post\" action=\"{base}/fitness/bmr\">\n\
         <label>Gender <select name=\"gender\">\n\
         <option value=\"male\">Male</option>\n\
         <option value=\"female\">Female</option>\n\
         </select></label>\n\
         <label>Weight (kg) <input type=\"number\" step=\"0.1\" name=\"weight\"></label>\n\
         <label>Height (cm) <input type=\"number\" step=\"0.1\" name=\"height\"></label>\n\
         <label>Age <input type=\"number\" name=\"age\"></label>\n\
         <button type=\"submit\">Calculate</button>\n\
         </form>\n"
    );
    if let Some(bmr) = bmr {
        content.push_str(&format!("<p class=\"result\">Your BMR: {bmr} kcal/day</p>\n"));
    }
    page(base, "Bitality - BMR Calculator", true, &content)
}

pub fn render_macros(base: &str, results: Option<&MacroSplit>) -> String {
    let mut content = format!(
        "<h1>Macro Calculator</h1>\n\
         <form method=\"post\" action=\"{base}/fitness/macros\">\n\
         <label>Weight (kg) <input type=\"number\" step=\"0.1\" name=\"weight\"></label>\n\
         <label>Goal <select name=\"goal\">\n\
         <option value=\"maintain\">Maintain</option>\n\
         <option value=\"lose\">Lose</option>\n\
         <option value=\"gain\">Gain</option>\n\
         </select></label>\n\
         <label>Activity <select name=\"activity\">\n\
         <option value=\"sedentary\">Sedentary</option>\n\
         <option value=\"light\">Light</option>\n\
         <option value=\"moderate\">Moderate</option>\n\
         <option value=\"active\">Active</option>\n\
         </select></label>\n\
         <button type=\"submit\">Calculate</button>\n\
         </form>\n"
    );
    if let Some(results) = results {
        content.push_str("<section class=\"panel\">\n");
        content.push_str(&stat_card("Calories", &format!("{} kcal", results.calories)));
        content.push_str(&stat_card("Protein", &format!("{}g", results.protein)));
        content.push_str(&stat_card("Carbs", &format!("{}g", results.carbs)));
        content.push_str(&stat_card("Fats", &format!("{}g", results.fats)));
        content.push_str("</section>\n");
    }
    page(base, "Bitality - Macro Calculator", true, &content)
}

pub fn render_tips(base: &str) -> String {
    const TIPS: [(&str, &str); 6] = [
        ("Hydrate", "Drink at least 2 litres of water a day to stay hydrated."),
        ("Sleep", "Aim for 7-9 hours of sleep per night for optimal recovery."),
        ("Active Recovery", "Take walks on rest days to keep blood flowing."),
        ("Protein", "Consume protein with every meal to support muscle growth."),
        ("Listen to your Body", "If you feel pain, stop. Don't push through injury."),
        ("Consistency", "Consistency is key. Small steps every day add up."),
    ];

    let mut content = String::from("<h1>Health Tips</h1>\n<ul class=\"cards\">\n");
    for (title, body) in TIPS {
        content.push_str(&format!("<li><strong>{title}</strong><br>{body}</li>\n"));
    }
    content.push_str("</ul>\n");
    page(base, "Bitality - Health Tips", true, &content)
}

pub fn render_water(base: &str, total: i64, message: Option<&str>) -> String {
    let content = format!(
        "<h1>Water Tracker</h1>\n{}\
         <p class=\"result\">Today: {total}ml</p>\n\
         <form method=\"post\" action=\"{base}/fitness/water\">\n\
         <label>Amount (ml) <input type=\"number\" name=\"amount\"></label>\n\
         <button type=\"submit\">Add water</button>\n\
         </form>\n",
        message_block("status", message)
    );
    page(base, "Bitality - Water Tracker", true, &content)
}

pub fn render_profile(
    base: &str,
    username: &str,
    stats: &ProfileStats,
    recent: &[FitnessLog],
) -> String {
    let mut content = format!("<h1>{}</h1>\n", escape(username));
    content.push_str("<section class=\"panel\">\n");
    content.push_str(&stat_card("Workouts", &stats.total_workouts.to_string()));
    content.push_str(&stat_card("Calories burned", &stats.total_calories.to_string()));
    content.push_str(&stat_card("Minutes trained", &stats.total_duration.to_string()));
    content.push_str("</section>\n");
    content.push_str("<h2>Recent activity</h2>\n");
    if recent.is_empty() {
        content.push_str("<p>No workouts logged yet.</p>\n");
    } else {
        content.push_str(&workout_table(recent));
    }
    page(base, "Bitality - Profile", true, &content)
}

pub fn render_audit(base: &str, logs: &[AuditLog]) -> String {
    let mut content = String::from("<h1>Audit Logs</h1>\n");
    if logs.is_empty() {
        content.push_str("<p>No entries yet.</p>\n");
    } else {
        content.push_str(
            "<table><tr><th>User</th><th>Action</th><th>Details</th><th>Time</th></tr>\n",
        );
        for log in logs {
            content.push_str(&format!(
                "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
                escape(&log.username),
                escape(&log.action),
                escape(&log.details),
                escape(&log.timestamp),
            ));
        }
        content.push_str("</table>\n");
    }
    page(base, "Bitality - Audit Logs", true, &content)
}

fn stat_card(label: &str, value: &str) -> String {
    format!(
        "<div class=\"stat\"><span class=\"label\">{}</span>\
         <span class=\"value\">{}</span></div>\n",
        escape(label),
        escape(value)
    )
}

fn workout_table(workouts: &[FitnessLog]) -> String {
    let mut html = String::from(
        "<table><tr><th>Activity</th><th>Duration</th><th>Calories</th>\
         <th>Intensity</th><th>Date</th></tr>\n",
    );
    for workout in workouts {
        html.push_str(&format!(
            "<tr><td>{}</td><td>{} min</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
            escape(&workout.activity_type),
            workout.duration,
            workout.calories_burned,
            escape(&workout.intensity),
            escape(&workout.date),
        ));
    }
    html.push_str("</table>\n");
    html
}

const LAYOUT: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>{{TITLE}}</title>
  <style>
    :root {
      --bg-1: #eef6f1;
      --bg-2: #cfe8d8;
      --ink: #22302a;
      --accent: #2e8b57;
      --accent-2: #27515e;
      --card: rgba(255, 255, 255, 0.92);
      --shadow: 0 18px 48px rgba(39, 81, 94, 0.16);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: radial-gradient(circle at top, var(--bg-2), transparent 55%),
        linear-gradient(135deg, var(--bg-1), #e4f2ea 60%, #f2f8f4 100%);
      color: var(--ink);
      font-family: "Trebuchet MS", "Segoe UI", sans-serif;
      display: grid;
      place-items: start center;
      padding: 32px 18px 48px;
    }

    main {
      width: min(820px, 100%);
      background: var(--card);
      border-radius: 22px;
      box-shadow: var(--shadow);
      padding: 32px;
      display: grid;
      gap: 18px;
    }

    nav {
      display: flex;
      flex-wrap: wrap;
      gap: 10px 16px;
      padding-bottom: 12px;
      border-bottom: 1px solid rgba(39, 81, 94, 0.12);
    }

    nav a {
      color: var(--accent-2);
      text-decoration: none;
      font-weight: 600;
      font-size: 0.95rem;
    }

    nav a:hover {
      color: var(--accent);
    }

    h1 {
      margin: 0;
      font-size: 1.9rem;
      color: var(--accent-2);
    }

    h2 {
      margin: 8px 0 0;
      font-size: 1.25rem;
    }

    form {
      display: grid;
      gap: 12px;
      max-width: 420px;
    }

    form.analysis {
      max-width: none;
      background: white;
      border: 1px solid rgba(39, 81, 94, 0.1);
      border-radius: 14px;
      padding: 12px 16px;
    }

    label {
      display: grid;
      gap: 4px;
      font-size: 0.9rem;
      font-weight: 600;
    }

    input, select {
      padding: 10px 12px;
      border-radius: 10px;
      border: 1px solid rgba(39, 81, 94, 0.25);
      font-size: 1rem;
    }

    button, .button {
      justify-self: start;
      appearance: none;
      border: none;
      border-radius: 999px;
      padding: 10px 22px;
      font-size: 1rem;
      font-weight: 600;
      cursor: pointer;
      background: var(--accent);
      color: white;
      text-decoration: none;
      display: inline-block;
    }

    .panel {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(150px, 1fr));
      gap: 14px;
    }

    .stat {
      background: white;
      border-radius: 16px;
      padding: 16px;
      border: 1px solid rgba(39, 81, 94, 0.08);
      display: grid;
      gap: 6px;
    }

    .stat .label {
      font-size: 0.8rem;
      text-transform: uppercase;
      letter-spacing: 0.1em;
      color: #73807a;
    }

    .stat .value {
      font-size: 1.5rem;
      font-weight: 600;
      color: var(--accent-2);
    }

    table {
      width: 100%;
      border-collapse: collapse;
      background: white;
      border-radius: 14px;
      overflow: hidden;
    }

    th, td {
      text-align: left;
      padding: 10px 14px;
      border-bottom: 1px solid rgba(39, 81, 94, 0.08);
      font-size: 0.95rem;
    }

    th {
      background: rgba(46, 139, 87, 0.08);
      color: var(--accent-2);
    }

    .cards {
      list-style: none;
      margin: 0;
      padding: 0;
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(220px, 1fr));
      gap: 14px;
    }

    .cards li {
      background: white;
      border-radius: 14px;
      padding: 14px 16px;
      border: 1px solid rgba(39, 81, 94, 0.08);
    }

    .error, .errors {
      color: #b23c2b;
      font-weight: 600;
    }

    .errors {
      margin: 0;
      padding-left: 20px;
    }

    .success {
      color: #2d7a4b;
      font-weight: 600;
    }

    .status {
      color: var(--accent-2);
      font-weight: 600;
    }

    .result {
      font-size: 1.3rem;
      font-weight: 600;
      color: var(--accent);
    }
  </style>
</head>
<body>
  <main>
    <nav>
{{NAV}}
    </nav>
{{CONTENT}}
  </main>
</body>
</html>
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_neutralizes_markup() {
        assert_eq!(
            escape("<script>\"a\" & 'b'</script>"),
            "&lt;script&gt;&quot;a&quot; &amp; &#39;b&#39;&lt;/script&gt;"
        );
    }

    #[test]
    fn test_links_are_rooted_at_base_path() {
        let html = render_login("/usr/7", None);
        assert!(html.contains("action=\"/usr/7/users/login\""));
        assert!(html.contains("href=\"/usr/7/users/register\""));

        let rooted = render_login("", None);
        assert!(rooted.contains("action=\"/users/login\""));
    }

    #[test]
    fn test_login_error_is_rendered() {
        let html = render_login("", Some("Invalid username or password"));
        assert!(html.contains("Invalid username or password"));
        assert!(!render_login("", None).contains("class=\"error\""));
    }

    #[test]
    fn test_home_escapes_username() {
        let html = render_home("", Some("<b>mallory</b>"), &[], None);
        assert!(html.contains("&lt;b&gt;mallory&lt;/b&gt;"));
        assert!(!html.contains("<b>mallory</b>"));
    }

    #[test]
    fn test_exercise_log_link_encodes_query_value() {
        let exercises = vec![Exercise {
            name: "Barbell Curl & Press 50%".to_string(),
            muscle: "biceps".to_string(),
            equipment: "barbell".to_string(),
            difficulty: "beginner".to_string(),
            ..Default::default()
        }];
        let html = render_exercises("", Some(&exercises), "biceps");
        assert!(html.contains("activity_name=Barbell+Curl+%26+Press+50%25"));
        // The display name is HTML-escaped, not query-encoded.
        assert!(html.contains("<strong>Barbell Curl &amp; Press 50%</strong>"));
    }

    #[test]
    fn test_protected_nav_present_when_logged_in() {
        let html = render_water("/usr/7", 500, None);
        assert!(html.contains("action=\"/usr/7/fitness/water\""));
        assert!(html.contains("href=\"/usr/7/users/logout\""));
        assert!(html.contains("Today: 500ml"));
    }
}
