//! # homedash-app
//!
//! Application layer: use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters implement or call:
//!   - `CommandPublisher`: relay a command to the controller
//!   - `EventPublisher`: fan dashboard events out to live clients
//!   - `Transport` / `TransportContext`: transport lifecycle and the
//!     callbacks a transport drives
//! - Provide the **dashboard use-case** (`DashboardService`): classify inbound
//!   messages, reconcile statuses, keep the board and transcript
//! - Provide **in-process infrastructure** (event bus) that doesn't need IO
//!
//! ## Dependency rule
//! Depends on `homedash-domain` only (plus `tokio::sync` for channels).
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod event_bus;
pub mod ports;
pub mod services;
