#![allow(clippy::unwrap_used, clippy::arithmetic_side_effects)]

//! Known-answer tests for coffre-crypto-core.
//!
//! - NIST SP 800-38D AES-256-GCM vectors through the `encrypt` wrapper
//! - Argon2id `derive` against the raw `argon2` crate
//! - A fully deterministic envelope rebuilt from raw primitives

mod kat_vectors;
