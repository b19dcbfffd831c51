pub mod fitness;
pub mod home;
pub mod users;
