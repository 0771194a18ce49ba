//! # Core Application Logic
//!
//! This module contains Zoid's chat logic.
//! It knows nothing about terminals or HTTP.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • State (app data)     │
//!                    │  • Action (events)      │
//!                    │  • update() (reducer)   │
//!                    │                         │
//!                    │  No I/O. No UI. Pure.   │
//!                    └───────────┬─────────────┘
//!                                │
//!                  ┌─────────────┴─────────────┐
//!                  ▼                           ▼
//!           ┌────────────┐              ┌────────────┐
//!           │    TUI     │              │  Backend   │
//!           │  Adapter   │              │  (HTTP)    │
//!           │ (ratatui)  │              │            │
//!           └────────────┘              └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`state`]: The `App` struct, all chat state in one place
//! - [`action`]: The `Action` enum and the `update()` reducer
//! - [`message`]: Conversation turns
//! - [`config`]: Layered settings
//! - [`health`]: Backend liveness reports

pub mod action;
pub mod config;
pub mod health;
pub mod message;
pub mod state;
