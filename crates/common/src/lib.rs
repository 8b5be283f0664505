//! Common utilities and shared types for wyr.
//!
//! This crate provides the foundational pieces used by every other wyr crate:
//!
//! - **Configuration**: Application settings and startup validation via [`Config`]
//! - **Error handling**: The unified error taxonomy via [`AppError`] and [`AppResult`]
//!
//! # Example
//!
//! ```no_run
//! use wyr_common::{AppResult, Config};
//!
//! fn example() -> AppResult<()> {
//!     let config = Config::load()?;
//!     config.validate()?;
//!     println!("Binding to {}:{}", config.server.host, config.server.port);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;

pub use config::Config;
pub use error::{AppError, AppResult};
