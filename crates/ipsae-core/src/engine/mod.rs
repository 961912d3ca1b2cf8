//! # Engine Module
//!
//! Turns a loaded structure and PAE matrix into interface confidence scores.
//!
//! ## Overview
//!
//! Scoring happens in two steps. [`alignment`] checks that the structure and the
//! matrix describe the same residues and hands out indices valid for both. [`scoring`]
//! then visits every cross-chain residue pair once, keeps the pairs that pass both
//! inclusive cutoffs, and aggregates them per chain pair and per residue into a
//! [`result::ScoreResult`].
//!
//! ## Architecture
//!
//! - **Configuration** ([`config`]) - Validated PAE and distance cutoffs
//! - **Alignment** ([`alignment`]) - Structure ↔ matrix correspondence
//! - **Scoring** ([`scoring`]) - The O(N²) pairwise scan
//! - **Results** ([`result`]) - Immutable, serializable score container
//! - **Progress Monitoring** ([`progress`]) - Optional callbacks for long scans
//! - **Error Handling** ([`error`]) - Aggregated engine errors
//!
//! The engine holds no process-wide state, so independent complexes can be scored
//! concurrently by the caller.

pub mod alignment;
pub mod config;
pub mod error;
pub mod progress;
pub mod result;
pub mod scoring;
