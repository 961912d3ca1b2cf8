//! # ipSAE Core Library
//!
//! Interface confidence scoring for predicted protein complexes, combining the
//! predicted aligned error (PAE) of a structure prediction with CA–CA distances.
//!
//! ## Architectural Philosophy
//!
//! The library follows a strict three-layer architecture:
//!
//! - **[`core`]: The Foundation.** Stateless data models (`StructureData`, `PaeMatrix`)
//!   and the readers for PDB, mmCIF, JSON, and NPZ inputs.
//!
//! - **[`engine`]: The Logic Core.** Alignment of a structure with its PAE matrix,
//!   validated scoring configuration, the pairwise scoring scan, and the immutable
//!   `ScoreResult`.
//!
//! - **[`workflows`]: The Public API.** Ties `core` and `engine` together: give it two
//!   paths and a configuration, get back a scored complex.
//!
//! ## Example
//!
//! ```no_run
//! use ipsae::engine::config::ScoringConfig;
//! use ipsae::workflows::score;
//!
//! let config = ScoringConfig::new(10.0, 8.0)?;
//! let result = score::run("fold_model_0.cif", "fold_full_data_0.json", &config)?;
//! for pair in result.chain_pair_scores() {
//!     println!("{}-{}: {:.3}", pair.chain_a, pair.chain_b, pair.ipsae);
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod core;
pub mod engine;
pub mod workflows;
