//! # Workflows Module
//!
//! High-level entry points that run the whole pipeline for one prediction.
//!
//! ## Overview
//!
//! A workflow loads the structure and PAE files, aligns them, and scores the
//! complex, returning a [`ScoreResult`](crate::engine::result::ScoreResult) or the
//! first error encountered. Nothing is written to disk; reporting is left to the
//! caller.
//!
//! - **Scoring Workflow** ([`score`]) - Load, align, and score a structure/PAE pair

pub mod score;
