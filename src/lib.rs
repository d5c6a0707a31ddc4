//! Dynamic searchable symmetric encryption with wildcard queries.
//!
//! Two cooperating schemes are implemented here. The [`zhao_nishide`]
//! module contains a standalone wildcard-capable DSSE built on per-document
//! masked Bloom filters. The [`libertas`] module wraps any such scheme and
//! lifts it to update-pattern-revealing backward privacy: every add and
//! delete is shipped to the server as an encrypted, timestamped update
//! record, and the client reconciles the add/delete log after each search.
//!
//! The client holds all key material. The server only ever sees opaque
//! tokens: masked bit arrays, Bloom-filter ids and (under Libertas)
//! ciphertext payloads travelling as big-endian integers.

pub mod crypto;
pub mod error;
pub mod libertas;
pub mod zhao_nishide;

pub use crate::libertas::{LibertasClient, LibertasServer};
pub use crate::zhao_nishide::{ZnClient, ZnServer};
pub use error::SseError;

/// The two update operations of a dynamic SSE scheme.
///
/// Wire-encoded inside update records as decimal `1` (add) and `2` (delete).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Add = 1,
    Del = 2,
}

impl Op {
    /// Numeric code used when serialising update records.
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Inverse of [`Op::code`]. Anything other than `1` or `2` is a
    /// malformed record.
    pub fn from_code(code: u8) -> Result<Op, SseError> {
        match code {
            1 => Ok(Op::Add),
            2 => Ok(Op::Del),
            _ => Err(SseError::MalformedRecord),
        }
    }
}

/// A decrypted Libertas update: `(t, op, ind, w)`.
///
/// `t` is the client-side logical timestamp, strictly increasing over the
/// lifetime of a client instance. `ind` is the plaintext document
/// identifier carried inside the encrypted record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Update {
    pub t: u64,
    pub op: Op,
    pub ind: u64,
    pub w: String,
}

/// Client half of a wildcard-supporting SSE scheme usable as the inner
/// layer of a Libertas instance.
///
/// `Ind` is the document identifier type stored in the index. It is kept
/// abstract so the same scheme serves both standalone use (plain integer
/// identifiers) and Libertas use (ciphertext payloads as big integers).
pub trait SigmaClient {
    type Ind;
    type AddToken;
    type SrchToken;
    type DelToken;

    /// Generates the client's key material for the given security
    /// strength in bits.
    fn setup(&mut self, security_parameter: usize) -> Result<(), SseError>;

    /// Creates a search token for a query. `q` may contain the `_`
    /// (exactly one character) and `*` (any run of characters) wildcards.
    fn srch_token(&self, q: &str) -> Result<Self::SrchToken, SseError>;

    /// Creates an add token for a document-keyword pair.
    fn add_token(&self, ind: Self::Ind, w: &str) -> Result<Self::AddToken, SseError>;

    /// Creates a delete token for a document-keyword pair.
    fn del_token(&self, ind: Self::Ind, w: &str) -> Result<Self::DelToken, SseError>;
}

/// Server half of a wildcard-supporting SSE scheme.
///
/// The server is keyless; it stores whatever tokens it is handed and
/// answers search tokens from them.
pub trait SigmaServer {
    type Ind;
    type AddToken;
    type SrchToken;
    type DelToken;

    /// Initialises an empty index, discarding any previous contents.
    fn build_index(&mut self);

    /// Returns the identifiers of all index records matching the token,
    /// possibly with Bloom-filter false positives.
    fn search(&self, token: &Self::SrchToken) -> Vec<Self::Ind>;

    /// Appends a document-keyword record to the index.
    fn add(&mut self, token: Self::AddToken);

    /// Removes every index record carrying the token's Bloom-filter id.
    fn delete(&mut self, token: &Self::DelToken);
}
