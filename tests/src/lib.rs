//! # Plasma Exit Game Test Suite
//!
//! Unified test crate containing:
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! ├── harness.rs        # In-memory child chain + engine (TestLang)
//! │
//! └── integration/      # End-to-end challenge scenarios
//!     ├── non_canonical_challenge.rs
//!     └── concurrency.rs
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p pe-tests
//!
//! # By category
//! cargo test -p pe-tests integration::
//!
//! # Benchmarks
//! cargo bench -p pe-tests
//! ```

pub mod integration;

pub use harness::{Account, ChildChain, Engine, TestLang, ACCOUNT_COUNT, START_TIME};
