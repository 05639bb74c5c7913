//! Fyyur library
//!
//! A booking directory for venues, artists and shows. The modules are
//! exposed for the binary and for integration testing.

pub mod config;
pub mod db;
pub mod error;
pub mod forms;
pub mod handlers;
pub mod services;
pub mod state;
pub mod templates;
pub mod test_utils;
