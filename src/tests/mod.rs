//! Tests for the libraryboard backend.
//!
//! - **support**: fake media server, temporary settings database, test config
//! - **store_tests**: SQLite and in-memory order stores
//! - **controller_tests**: the libraries page (loading, seeding, sorting, actions)
//! - **sources_tests**: folder/task caches and the task poller
//! - **api_tests**: HTTP endpoints through the router
//! - **upstream_tests**: the Jellyfin client against a local fake server
//! - **config_tests**: configuration defaults and validation
//! - **error_tests**: error to HTTP response mapping

pub mod support;

pub mod config_tests;
pub mod error_tests;
