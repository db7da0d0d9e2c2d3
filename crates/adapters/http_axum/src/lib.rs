//! # homedash-adapter-http-axum
//!
//! HTTP adapter built on [axum](https://docs.rs/axum).
//!
//! ## Responsibilities
//! - Serve a small **JSON API** for programmatic access
//!   (`/api/targets`, `/api/chat`, `/api/connection`, `/api/commands`)
//! - Stream dashboard events to browsers over **SSE**
//!   (`/api/events/stream`)
//! - Serve a **server-side-rendered status page** that works with zero
//!   JavaScript: tiles, connection badge and transcript, refreshed with
//!   `<meta http-equiv="refresh">`, plus a command form (PRG pattern)
//!
//! ## Dependency rule
//! Depends on `homedash-app` (for port traits and the dashboard service) and
//! `homedash-domain` (for types used in request/response mapping). Never
//! leaks axum types into the domain.

pub mod api;
pub mod dashboard;
pub mod error;
pub mod router;
pub mod state;

#[cfg(test)]
pub(crate) mod test_support;
