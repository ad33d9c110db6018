//! # Libraryboard Backend Library
//!
//! Backend of the "Libraries" admin page of a media-server dashboard. It keeps
//! an administrator-defined display order of media libraries, triggers the
//! media server's library scan task and relays that task's live progress.
//!
//! ## Architecture
//!
//! - **Axum**: HTTP API and static web UI
//! - **SQLx**: SQLite settings store for the library order
//! - **Reqwest**: client for the Jellyfin-compatible media server
//! - **Tokio**: task polling and SSE fan-out
//!
//! ## Core Components
//!
//! - [`ordering`]: sort policy, up/down moves and the order stores
//! - [`tasks`]: lookup of the refresh-library task
//! - [`controller`]: the libraries page (view derivation and actions)
//! - [`sources`]: pending/ready caches for folders and live tasks, task poller
//! - [`upstream`]: media server client
//! - [`routes`]: HTTP handlers
//! - [`config`], [`db`], [`error`], [`metrics`], [`state`], [`types`]

pub mod config;
pub mod controller;
pub mod db;
pub mod error;
pub mod metrics;
pub mod ordering;
pub mod routes;
pub mod sources;
pub mod state;
pub mod tasks;
pub mod types;
pub mod upstream;

#[cfg(test)]
mod tests;
