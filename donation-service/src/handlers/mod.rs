pub mod donations;
pub mod health;

pub use donations::{create_donation, delete_donation, list_donations, update_donation};
pub use health::{api_test, health_check, metrics_endpoint};
