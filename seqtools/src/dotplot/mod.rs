//! The Dotter dot-plot engine (C8): sliding-window score matrix, greyramp,
//! HSP overlay and binary/text save-load.

pub mod engine;
pub mod greyramp;
pub mod hsp;
pub mod io;
pub mod matrix;

pub use engine::{DotplotParams, compute_dotplot};
pub use greyramp::GreyRamp;
pub use hsp::{Hsp, best_hsp, hsps_from_features};
pub use io::{SavedDotplot, load_binary, load_text, save_binary, save_text};
pub use matrix::{DotMatrix, SubstitutionMatrix};
