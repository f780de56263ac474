pub mod auth;
pub mod dashboard;
pub mod reports;
pub mod users;
pub mod workers;
