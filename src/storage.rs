//! Relational persistence over SQLite. Every query is a parameterized
//! statement; the connection is shared behind a mutex and never held across
//! an await point (the guard is not `Send`, so the compiler enforces this).

use crate::errors::AppError;
use crate::models::{AuditLog, FitnessLog, HomeStats, NutritionLog, ProfileStats};
use crate::session::SessionUser;
use chrono::Local;
use rusqlite::{Connection, OptionalExtension, params};
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS users (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    username TEXT NOT NULL UNIQUE,
    password TEXT NOT NULL
);
CREATE TABLE IF NOT EXISTS fitness_logs (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id INTEGER NOT NULL,
    activity_type TEXT NOT NULL,
    duration INTEGER NOT NULL,
    calories_burned INTEGER NOT NULL,
    intensity TEXT NOT NULL DEFAULT '',
    date TEXT NOT NULL
);
CREATE TABLE IF NOT EXISTS nutrition_logs (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id INTEGER NOT NULL,
    meal_name TEXT NOT NULL,
    calories REAL NOT NULL DEFAULT 0,
    protein REAL NOT NULL DEFAULT 0,
    fat REAL NOT NULL DEFAULT 0,
    carbs REAL NOT NULL DEFAULT 0,
    date TEXT NOT NULL
);
CREATE TABLE IF NOT EXISTS water_logs (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id INTEGER NOT NULL,
    amount INTEGER NOT NULL,
    date TEXT NOT NULL
);
CREATE TABLE IF NOT EXISTS audit_logs (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    username TEXT NOT NULL,
    action TEXT NOT NULL,
    details TEXT NOT NULL DEFAULT '',
    timestamp TEXT NOT NULL
);
";

/// Shared handle to the application database.
#[derive(Clone)]
pub struct Store {
    conn: Arc<Mutex<Connection>>,
}

impl Store {
    /// Open (or create) the database and make sure the schema exists.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, AppError> {
        let conn = Connection::open(path)?;
        conn.execute_batch(SCHEMA)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    fn lock(&self) -> MutexGuard<'_, Connection> {
        self.conn.lock().unwrap_or_else(PoisonError::into_inner)
    }

    // Users.

    /// Credential lookup for login: both username and stored password must
    /// match a single row.
    pub fn find_user(&self, username: &str, password: &str) -> Result<Option<SessionUser>, AppError> {
        let conn = self.lock();
        let user = conn
            .query_row(
                "SELECT id, username FROM users WHERE username = ? AND password = ?",
                params![username, password],
                |row| {
                    Ok(SessionUser {
                        id: row.get(0)?,
                        username: row.get(1)?,
                    })
                },
            )
            .optional()?;
        Ok(user)
    }

    pub fn username_taken(&self, username: &str) -> Result<bool, AppError> {
        let conn = self.lock();
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM users WHERE username = ?",
            params![username],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }

    pub fn create_user(&self, username: &str, password: &str) -> Result<(), AppError> {
        self.lock().execute(
            "INSERT INTO users (username, password) VALUES (?, ?)",
            params![username, password],
        )?;
        Ok(())
    }

    // Workouts.

    pub fn add_workout(
        &self,
        user_id: i64,
        activity_type: &str,
        duration: i64,
        calories: i64,
        intensity: &str,
    ) -> Result<(), AppError> {
        self.lock().execute(
            "INSERT INTO fitness_logs (user_id, activity_type, duration, calories_burned, intensity, date)
             VALUES (?, ?, ?, ?, ?, ?)",
            params![user_id, activity_type, duration, calories, intensity, now_stamp()],
        )?;
        Ok(())
    }

    pub fn recent_workouts(&self, user_id: i64, limit: i64) -> Result<Vec<FitnessLog>, AppError> {
        let conn = self.lock();
        let mut stmt = conn.prepare(
            "SELECT id, activity_type, duration, calories_burned, intensity, date
             FROM fitness_logs WHERE user_id = ? ORDER BY date DESC, id DESC LIMIT ?",
        )?;
        let rows = stmt
            .query_map(params![user_id, limit], workout_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    /// Substring search over activity type, newest first.
    pub fn search_workouts(&self, term: &str) -> Result<Vec<FitnessLog>, AppError> {
        let conn = self.lock();
        let mut stmt = conn.prepare(
            "SELECT id, activity_type, duration, calories_burned, intensity, date
             FROM fitness_logs WHERE activity_type LIKE ? ORDER BY date DESC, id DESC",
        )?;
        let pattern = format!("%{term}%");
        let rows = stmt
            .query_map(params![pattern], workout_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    pub fn home_stats(&self, user_id: i64) -> Result<HomeStats, AppError> {
        let conn = self.lock();
        let stats = conn.query_row(
            "SELECT
                COALESCE((SELECT SUM(calories_burned) FROM fitness_logs WHERE user_id = ?1), 0),
                COALESCE((SELECT COUNT(*) FROM fitness_logs WHERE user_id = ?1), 0),
                COALESCE((SELECT SUM(amount) FROM water_logs WHERE user_id = ?1 AND date(date) = ?2), 0)",
            params![user_id, today_key()],
            |row| {
                Ok(HomeStats {
                    total_calories: row.get(0)?,
                    total_workouts: row.get(1)?,
                    today_water: row.get(2)?,
                })
            },
        )?;
        Ok(stats)
    }

    pub fn profile_stats(&self, user_id: i64) -> Result<ProfileStats, AppError> {
        let conn = self.lock();
        let stats = conn.query_row(
            "SELECT COUNT(*), COALESCE(SUM(calories_burned), 0), COALESCE(SUM(duration), 0)
             FROM fitness_logs WHERE user_id = ?",
            params![user_id],
            |row| {
                Ok(ProfileStats {
                    total_workouts: row.get(0)?,
                    total_calories: row.get(1)?,
                    total_duration: row.get(2)?,
                })
            },
        )?;
        Ok(stats)
    }

    // Nutrition.

    pub fn add_meal(
        &self,
        user_id: i64,
        meal_name: &str,
        calories: f64,
        protein: f64,
        fat: f64,
        carbs: f64,
    ) -> Result<(), AppError> {
        self.lock().execute(
            "INSERT INTO nutrition_logs (user_id, meal_name, calories, protein, fat, carbs, date)
             VALUES (?, ?, ?, ?, ?, ?, ?)",
            params![user_id, meal_name, calories, protein, fat, carbs, now_stamp()],
        )?;
        Ok(())
    }

    pub fn recent_meals(&self, user_id: i64, limit: i64) -> Result<Vec<NutritionLog>, AppError> {
        let conn = self.lock();
        let mut stmt = conn.prepare(
            "SELECT id, meal_name, calories, protein, fat, carbs, date
             FROM nutrition_logs WHERE user_id = ? ORDER BY date DESC, id DESC LIMIT ?",
        )?;
        let rows = stmt
            .query_map(params![user_id, limit], |row| {
                Ok(NutritionLog {
                    id: row.get(0)?,
                    meal_name: row.get(1)?,
                    calories: row.get(2)?,
                    protein: row.get(3)?,
                    fat: row.get(4)?,
                    carbs: row.get(5)?,
                    date: row.get(6)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    // Water.

    pub fn add_water(&self, user_id: i64, amount: i64) -> Result<(), AppError> {
        self.add_water_at(user_id, amount, &now_stamp())
    }

    fn add_water_at(&self, user_id: i64, amount: i64, stamp: &str) -> Result<(), AppError> {
        self.lock().execute(
            "INSERT INTO water_logs (user_id, amount, date) VALUES (?, ?, ?)",
            params![user_id, amount, stamp],
        )?;
        Ok(())
    }

    /// Total water logged today by one user, in millilitres.
    pub fn water_today(&self, user_id: i64) -> Result<i64, AppError> {
        let conn = self.lock();
        let total: i64 = conn.query_row(
            "SELECT COALESCE(SUM(amount), 0) FROM water_logs WHERE user_id = ? AND date(date) = ?",
            params![user_id, today_key()],
            |row| row.get(0),
        )?;
        Ok(total)
    }

    // Audit trail.

    pub fn append_audit(&self, username: &str, action: &str, details: &str) -> Result<(), AppError> {
        self.lock().execute(
            "INSERT INTO audit_logs (username, action, details, timestamp) VALUES (?, ?, ?, ?)",
            params![username, action, details, now_stamp()],
        )?;
        Ok(())
    }

    /// The 50 most recent audit entries, with login attempts hidden from the
    /// user-facing view.
    pub fn recent_audit(&self) -> Result<Vec<AuditLog>, AppError> {
        let conn = self.lock();
        let mut stmt = conn.prepare(
            "SELECT username, action, details, timestamp FROM audit_logs
             WHERE action NOT LIKE 'LOGIN%' ORDER BY timestamp DESC, id DESC LIMIT 50",
        )?;
        let rows = stmt
            .query_map([], |row| {
                Ok(AuditLog {
                    username: row.get(0)?,
                    action: row.get(1)?,
                    details: row.get(2)?,
                    timestamp: row.get(3)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }
}

fn workout_row(row: &rusqlite::Row<'_>) -> Result<FitnessLog, rusqlite::Error> {
    Ok(FitnessLog {
        id: row.get(0)?,
        activity_type: row.get(1)?,
        duration: row.get(2)?,
        calories_burned: row.get(3)?,
        intensity: row.get(4)?,
        date: row.get(5)?,
    })
}

fn now_stamp() -> String {
    Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

fn today_key() -> String {
    Local::now().format("%Y-%m-%d").to_string()
}
