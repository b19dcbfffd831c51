pub mod app;
pub mod audit;
pub mod auth;
pub mod base_path;
pub mod calculators;
pub mod config;
pub mod context;
pub mod errors;
pub mod external;
pub mod handlers;
pub mod models;
pub mod session;
pub mod state;
pub mod storage;
pub mod ui;

pub use app::router;
pub use config::AppConfig;
pub use state::AppState;
pub use storage::Store;
