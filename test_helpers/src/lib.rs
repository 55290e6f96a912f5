//! Test helpers shared across the workspace.
//!
//! - [`env`]: guards that set or remove process environment variables and
//!   restore them on drop.
//! - [`secrets`]: temporary secret directories populated file by file.
//! - [`figment`]: a result-returning wrapper around `figment::Jail`.

pub mod env;
pub mod figment;
pub mod secrets;
