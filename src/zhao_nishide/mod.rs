//! Wildcard-capable DSSE built on per-document masked Bloom filters.
//!
//! Based on: Fangming Zhao and Takashi Nishide. Searchable symmetric
//! encryption supporting queries with multiple-character wildcards. In
//! International Conference on Network and System Security, pages 266-282.
//! Springer, 2016.
//!
//! Search queries may contain the `_` wildcard, standing for exactly one
//! arbitrary character, and the `*` wildcard, standing for a run of zero
//! or more arbitrary characters. Each indexed document-keyword pair is
//! encoded as a Bloom filter over the keyword's feature strings (see
//! [`sets`]), then masked bit-by-bit with a pseudo-random stream derived
//! from the record's filter id, so equal keywords in different documents
//! produce unrelated-looking filters.

pub mod client;
pub mod server;
pub mod sets;

pub use client::ZnClient;
pub use server::ZnServer;

use bitvec::prelude::*;

/// Add token: the record the server stores verbatim in its index.
///
/// `ind` is the document identifier as seen by the server: a plain
/// integer in standalone use, or an encrypted update record travelling as
/// a big integer when the scheme backs a Libertas instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZnAddToken<I> {
    pub ind: I,
    pub bloom_filter: BitVec,
    pub bf_id: Vec<u8>,
}

/// Search token: one Bloom-filter position per feature string and hash
/// key, plus the keyed hash of each position.
///
/// The position hashes let the server recompute each record's mask bit
/// for exactly the probed positions and nothing else.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZnSrchToken {
    pub positions: Vec<usize>,
    pub position_hashes: Vec<Vec<u8>>,
}

/// Delete token: the Bloom-filter id of the record(s) to remove.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZnDelToken {
    pub bf_id: Vec<u8>,
}
