// SPDX-FileCopyrightText: 2026 ContactWave Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Adapter traits for the remote collaborators of a broadcast.
//!
//! Both traits use `#[async_trait]` so they can be held as trait objects by
//! the broadcast pipeline and swapped for mocks in tests.

pub mod directory;
pub mod transport;

pub use directory::HeaderDirectory;
pub use transport::DispatchTransport;
