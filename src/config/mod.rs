//! Environment-driven configuration.
//!
//! Each submodule covers one concern and exposes a `from_env()` constructor.
//! All configuration is loaded once at process start and treated as
//! immutable afterwards.
//!
//! # Modules
//!
//! - [`cors`]: allowed CORS origins
//! - [`database`]: PostgreSQL connection pool initialization
//! - [`jwt`]: signing secret and token lifetime
//! - [`wechat`]: WeChat mini-program credential exchange settings

pub mod cors;
pub mod database;
pub mod jwt;
pub mod wechat;
