//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod click;
pub mod health;
pub mod links;
pub mod profile;
pub mod public;
pub mod session;
pub mod signup;

pub use click::click_handler;
pub use health::health_handler;
pub use links::{
    create_link_handler, delete_link_handler, list_links_handler, reorder_links_handler,
};
pub use profile::{get_profile_handler, update_profile_handler};
pub use public::{public_profile_handler, settings_fields_handler};
pub use session::{sign_in_handler, sign_out_handler};
pub use signup::{signup_handler, slug_availability_handler};
