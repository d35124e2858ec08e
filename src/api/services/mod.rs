pub mod admin;
pub mod contact;
pub mod helpers;
pub mod track;

pub use admin::{AdminAccess, admin_routes};
pub use contact::{contact_routes, submit_contact};
pub use helpers::{ErrorResponse, MessageResponse, json_error_handler};
pub use track::{track_interaction, track_routes};
