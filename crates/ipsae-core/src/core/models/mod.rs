//! # Core Models Module
//!
//! Data structures shared by the loaders and the scoring engine.
//!
//! ## Overview
//!
//! Two independently parsed inputs meet here: the CA-only [`structure`] read from a
//! coordinate file and the [`pae`] matrix read from a prediction's score file. Both are
//! addressed through the same [`ids::ResidueIndex`], which makes the residue ↔ matrix
//! correspondence explicit instead of relying on bare array positions.
//!
//! ## Key Components
//!
//! - [`structure`] - Chains, residues, and CA coordinates of one model
//! - [`builder`] - Incremental construction used by the file readers
//! - [`chain`] / [`residue`] - Topology records
//! - [`pae`] - Square predicted-aligned-error matrix
//! - [`ids`] - The shared residue index type
//!
//! ## Usage
//!
//! ```
//! use ipsae::core::models::builder::StructureBuilder;
//! use nalgebra::Point3;
//!
//! let mut builder = StructureBuilder::new();
//! builder.add_residue("A", 1, None, "MET", Point3::new(0.0, 0.0, 0.0));
//! builder.add_residue("B", 1, None, "GLY", Point3::new(3.8, 0.0, 0.0));
//! let structure = builder.build();
//! assert_eq!(structure.residue_count(), 2);
//! ```

pub mod builder;
pub mod chain;
pub mod ids;
pub mod pae;
pub mod residue;
pub mod structure;
