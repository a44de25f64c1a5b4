//! Data Transfer Objects for API requests and responses.
//!
//! All DTOs use Serde for JSON serialization/deserialization; request bodies
//! with field limits also derive `validator::Validate`.

pub mod click;
pub mod health;
pub mod links;
pub mod profile;
pub mod session;
pub mod signup;
