//! Alignment feature model, GFF3 parsing, coordinate projection and
//! dot-plot engine behind the Blixem and Dotter genome viewers.
//!
//! This crate is the non-GUI core shared by both tools: Blixem's alignment
//! feature model, GFF3 parser, sequence fetch dispatcher and coverage
//! computation ([`feature`], [`gff3`], [`finalise`], [`fetch`],
//! [`coverage`]); Dotter's dot-plot engine and Karlin-Altschul statistics
//! ([`dotplot`], [`karlin`]); and the coordinate/sequence/selection
//! machinery both tools share ([`coord`], [`seq`], [`selection`]).

pub mod config;
pub mod coord;
pub mod coverage;
pub mod dotplot;
pub mod error;
pub mod feature;
pub mod fetch;
pub mod finalise;
pub mod gff3;
pub mod karlin;
pub mod logging;
pub mod selection;
pub mod seq;

pub use error::{InputError, LocatedInputError, ModelError, RuntimeError, StatisticsError};
