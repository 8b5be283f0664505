//! Core business logic for wyr.
//!
//! Services sit between the HTTP layer and [`wyr_db`]. They hold no poll
//! state of their own; every read and write goes through the repository.

pub mod services;

pub use services::*;
