//! # Core Module
//!
//! Stateless data models and file readers for predicted protein complexes.
//!
//! ## Overview
//!
//! A prediction produces two files that must be read independently: a coordinate
//! model and a predicted-aligned-error matrix. This module parses both and reduces
//! them to the minimal representations the scoring engine consumes.
//!
//! - **Data Models** ([`models`]) - CA-only structures, residues, chains, and the PAE matrix
//! - **File I/O** ([`io`]) - PDB, mmCIF, JSON, and NPZ readers with transparent gzip support

pub mod io;
pub mod models;
