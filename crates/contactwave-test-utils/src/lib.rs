// SPDX-FileCopyrightText: 2026 ContactWave Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for ContactWave.
//!
//! In-memory stand-ins for the remote collaborators, so the send pipeline can
//! be exercised deterministically without a messaging server.
//!
//! # Components
//!
//! - [`MockDirectory`] - fixed active source and header set, with a call counter
//! - [`MockTransport`] - captures dispatch requests and answers from a script
//!   or by echoing one outcome per recipient

pub mod mock_directory;
pub mod mock_transport;

pub use mock_directory::{CallCounter, MockDirectory};
pub use mock_transport::MockTransport;
