use log::debug;

use crate::crypto;
use crate::zhao_nishide::{ZnAddToken, ZnDelToken, ZnSrchToken};
use crate::SigmaServer;

/// Zhao-Nishide server: a keyless, insertion-ordered list of add tokens.
///
/// Search scans the whole index, recomputing each record's mask bit for
/// the probed positions from its stored filter id. Duplicate records are
/// permitted.
#[derive(Debug, Default)]
pub struct ZnServer<I> {
    pub index: Vec<ZnAddToken<I>>,
}

impl<I> ZnServer<I> {
    pub fn new() -> Self {
        ZnServer { index: Vec::new() }
    }
}

impl<I: Clone + PartialEq> SigmaServer for ZnServer<I> {
    type Ind = I;
    type AddToken = ZnAddToken<I>;
    type SrchToken = ZnSrchToken;
    type DelToken = ZnDelToken;

    fn build_index(&mut self) {
        self.index.clear();
    }

    /// # Index Scan
    /// A record matches when every probed position unmasks to a set bit.
    /// The probe short-circuits on the first missing feature. A token
    /// with no positions (a query reducing to `*`) matches every record.
    /// ## Arguments:
    /// * `token: &ZnSrchToken`: positions and position hashes, zipped
    /// ## Returns:
    /// * `return -> Vec<I>`: matching identifiers, first-seen order,
    ///   deduplicated; may contain Bloom-filter false positives
    fn search(&self, token: &ZnSrchToken) -> Vec<I> {
        let mut results = Vec::new();
        for record in &self.index {
            let matches = token
                .positions
                .iter()
                .zip(&token.position_hashes)
                .all(|(&pos, h_pos)| {
                    let mask_bit = crypto::hash_bytes(&record.bf_id, h_pos)[0] & 1 == 1;
                    record.bloom_filter[pos] ^ mask_bit
                });
            if matches && !results.contains(&record.ind) {
                results.push(record.ind.clone());
            }
        }
        debug!(
            "index scan over {} records matched {}",
            self.index.len(),
            results.len()
        );
        results
    }

    fn add(&mut self, token: ZnAddToken<I>) {
        self.index.push(token);
    }

    /// Removes every record carrying the token's filter id.
    fn delete(&mut self, token: &ZnDelToken) {
        let before = self.index.len();
        self.index.retain(|record| record.bf_id != token.bf_id);
        debug!(
            "deleted {} records for filter id {}",
            before - self.index.len(),
            hex::encode(&token.bf_id)
        );
    }
}
