//! The GFF3+FASTA parser (C4).

pub mod attributes;
pub mod cigar;
pub mod fasta_section;
pub mod parser;
pub mod so_terms;

pub use attributes::{Attribute, Target, parse_attributes};
pub use cigar::{CigarExpansionMode, expand_cigar};
pub use fasta_section::{parse_fasta_section, split_fasta_section};
pub use parser::{Gff3Options, Gff3ParseResult, SequenceRegion, parse_gff3};
pub use so_terms::feature_type_for_so_term;
