//! # homedash-domain
//!
//! Pure domain model for the homedash status dashboard.
//!
//! ## Responsibilities
//! - Foundational types: typed identifiers, error conventions, timestamps
//! - Define the **device mapping** (ordered `match key → UI target` table)
//! - Parse **status notifications** (`"<device>: <status>"`)
//! - Classify inbound **messages** (sensor readings, bot replies, statuses)
//! - **Reconcile** a notification into UI update instructions
//! - Hold the **board** (current UI state per target) and the **chat** transcript
//! - Model the transport **connection** lifecycle as an explicit value
//! - Define the **events** broadcast to dashboard clients
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod id;
pub mod time;

pub mod board;
pub mod chat;
pub mod command;
pub mod connection;
pub mod event;
pub mod mapping;
pub mod message;
pub mod notification;
pub mod reconciler;
pub mod ui;
pub mod vocabulary;
