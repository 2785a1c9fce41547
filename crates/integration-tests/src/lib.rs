//! Integration tests for Leafbound.
//!
//! # Running Tests
//!
//! ```bash
//! # Start PostgreSQL, then the storefront
//! cargo run -p leafbound-storefront
//!
//! # Run the HTTP flow tests against it
//! cargo test -p leafbound-integration-tests -- --ignored
//! ```
//!
//! The tests live in `tests/` and talk to a running storefront over
//! HTTP with a cookie-holding client, the same way a browser would.
