// SPDX-FileCopyrightText: 2026 ContactWave Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Dispatch for ContactWave.
//!
//! - [`router`]: channel endpoint table and request validation
//! - [`client`]: HTTP client for the messaging server (header directory,
//!   dispatch transport, login)
//! - [`session`]: credential checks done before any login call
//! - [`broadcast`]: the end-to-end send pipeline

pub mod broadcast;
pub mod client;
pub mod router;
pub mod session;

pub use broadcast::{BroadcastOutcome, Broadcaster};
pub use client::WaveClient;
pub use router::{build_request, endpoint};
pub use session::Credentials;
