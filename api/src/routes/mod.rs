pub mod analyze;
pub mod health;
pub mod manifest_route;
