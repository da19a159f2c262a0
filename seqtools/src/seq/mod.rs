//! Sequence utilities (C2): reverse-complement, IUPAC-aware translation and
//! FASTA reading, shared by the feature model, the GFF3 parser and the
//! dot-plot engine.

pub mod complement;
pub mod fasta;
pub mod iupac;
pub mod translate;

pub use complement::{complement_dna, reverse_complement};
pub use fasta::{FastaRecord, read_fasta};
pub use iupac::{complement_base, validate_iupac};
pub use translate::{translate, translate_codon};
