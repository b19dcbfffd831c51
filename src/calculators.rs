//! Health calculators as pure functions over explicit inputs.

/// BMI rounded to one decimal, the value the user sees. Classification also
/// runs against this rounded value so the number and the band never disagree.
pub fn bmi(weight_kg: f64, height_cm: f64) -> f64 {
    let metres = height_cm / 100.0;
    let raw = weight_kg / (metres * metres);
    (raw * 10.0).round() / 10.0
}

pub fn bmi_status(bmi: f64) -> &'static str {
    if bmi < 18.5 {
        "Underweight"
    } else if bmi < 24.9 {
        "Normal weight"
    } else if bmi < 29.9 {
        "Overweight"
    } else {
        "Obesity"
    }
}

/// Basal metabolic rate, Mifflin-St Jeor: `10w + 6.25h - 5a`, +5 for men
/// and -161 otherwise. Rounded to whole kcal.
pub fn bmr(male: bool, weight_kg: f64, height_cm: f64, age_years: f64) -> i64 {
    let base = 10.0 * weight_kg + 6.25 * height_cm - 5.0 * age_years;
    let adjusted = if male { base + 5.0 } else { base - 161.0 };
    adjusted.round() as i64
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MacroSplit {
    pub calories: i64,
    pub protein: i64,
    pub carbs: i64,
    pub fats: i64,
}

/// Daily macro targets from bodyweight, goal, and activity level. Protein
/// and fat are fixed per kilogram; carbs take the calorie remainder, clamped
/// at zero for aggressive deficits.
pub fn macro_split(weight_kg: f64, goal: &str, activity: &str) -> MacroSplit {
    let multiplier = match activity {
        "sedentary" => 1.2,
        "light" => 1.375,
        "moderate" => 1.55,
        "active" => 1.725,
        _ => 1.2,
    };

    let bmr = weight_kg * 24.0;
    let mut tdee = bmr * multiplier;
    if goal == "lose" {
        tdee -= 500.0;
    } else if goal == "gain" {
        tdee += 300.0;
    }

    let protein = (weight_kg * 2.0).round() as i64;
    let fats = (weight_kg * 0.9).round() as i64;
    let carbs_cal = tdee - (protein * 4) as f64 - (fats * 9) as f64;
    let carbs = ((carbs_cal / 4.0).round() as i64).max(0);

    MacroSplit {
        calories: tdee.round() as i64,
        protein,
        carbs,
        fats,
    }
}
