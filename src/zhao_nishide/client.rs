use std::f64::consts::LN_2;
use std::fmt::Display;
use std::marker::PhantomData;

use bitvec::prelude::*;
use log::debug;
use num_bigint::BigUint;

use crate::crypto;
use crate::error::SseError;
use crate::zhao_nishide::sets;
use crate::zhao_nishide::{ZnAddToken, ZnDelToken, ZnSrchToken};
use crate::SigmaClient;

/// Key material of a Zhao-Nishide client: one independent hash key per
/// Bloom-filter hash function, plus the id/mask key `k_g`.
#[derive(Debug, Clone)]
pub struct ZnKeys {
    pub k_h: Vec<Vec<u8>>,
    pub k_g: Vec<u8>,
}

/// Zhao-Nishide client.
///
/// Bloom-filter dimensions are fixed at construction from the desired
/// false-positive rate and the expected average keyword length; key
/// material is generated by [`SigmaClient::setup`]. The identifier type
/// `I` is what the server will store and return for matching records.
pub struct ZnClient<I> {
    pub bf_size: usize,
    pub bf_hash_functions: usize,
    pub k: Option<ZnKeys>,
    _ind: PhantomData<I>,
}

impl<I> ZnClient<I> {
    /// # Client Construction
    /// Derives the optimal Bloom-filter parameters for the given target.
    /// ## Algorithm:
    /// * s ← |S_K('0' × L)|
    /// * m ← ⌈-(s · ln p) / (ln 2)²⌉
    /// * h ← ⌈(m / s) · ln 2⌉
    /// ## Arguments:
    /// * `fp_rate: f64`: tolerated false-positive rate of individual
    ///   search results, e.g. 0.01
    /// * `average_keyword_length: usize`: expected keyword length `L`,
    ///   used to size the filters
    pub fn new(fp_rate: f64, average_keyword_length: usize) -> Self {
        let set_size = sets::s_k(&"0".repeat(average_keyword_length)).len();
        let bf_size = (-(set_size as f64 * fp_rate.ln()) / LN_2.powi(2)).ceil() as usize;
        let bf_hash_functions = ((bf_size as f64 / set_size as f64) * LN_2).ceil() as usize;
        debug!(
            "derived Bloom filter parameters: {} bits, {} hash functions",
            bf_size, bf_hash_functions
        );
        ZnClient {
            bf_size,
            bf_hash_functions,
            k: None,
            _ind: PhantomData,
        }
    }

    fn keys(&self) -> Result<&ZnKeys, SseError> {
        self.k.as_ref().ok_or(SseError::KeyNotInitialized)
    }

    /// Bloom-filter position of a feature string under one hash key.
    fn position(&self, k: &[u8], e: &str) -> usize {
        let pos = crypto::hash_string_to_int(k, e) % BigUint::from(self.bf_size);
        usize::try_from(pos).expect("position reduced modulo the filter size")
    }

    /// Id of the filter for a document-keyword pair. Equal pairs map to
    /// equal ids, which is what makes deletion by id possible.
    fn filter_id(k_g: &[u8], ind: &impl Display, w: &str) -> Vec<u8> {
        crypto::hash_string(k_g, &format!("{}{}", ind, w))
    }
}

impl<I: Display> SigmaClient for ZnClient<I> {
    type Ind = I;
    type AddToken = ZnAddToken<I>;
    type SrchToken = ZnSrchToken;
    type DelToken = ZnDelToken;

    /// # Key Generation
    /// Draws `bf_hash_functions` independent hash keys and the id/mask
    /// key `k_g`, each of `security_parameter / 8` bytes.
    fn setup(&mut self, security_parameter: usize) -> Result<(), SseError> {
        let key_len = security_parameter / 8;
        let k_h = (0..self.bf_hash_functions)
            .map(|_| crypto::get_random_bytes(key_len))
            .collect();
        let k_g = crypto::get_random_bytes(key_len);
        self.k = Some(ZnKeys { k_h, k_g });
        Ok(())
    }

    /// # Search Token
    /// ## Algorithm:
    /// * s_t ← S_T(q || '\0')
    /// * positions ← [H(k, e) mod m for e in s_t, k in k_h]
    /// * position_hashes ← [H(k_g, pos) for pos in positions]
    ///
    /// The `'\0'` sentinel marks the end of the query, so that `"test"`
    /// is interpreted differently from `"test*"`.
    /// ## Arguments:
    /// * `q: &str`: the query, possibly containing `_` and `*` wildcards
    /// ## Returns:
    /// * `return -> Result<ZnSrchToken, SseError>`: positions and their
    ///   keyed hashes, in matching order
    fn srch_token(&self, q: &str) -> Result<ZnSrchToken, SseError> {
        let keys = self.keys()?;
        let s_t = sets::s_t(&format!("{}\0", q));
        let mut positions = Vec::with_capacity(s_t.len() * keys.k_h.len());
        for e in &s_t {
            for k in &keys.k_h {
                positions.push(self.position(k, e));
            }
        }
        let position_hashes = positions
            .iter()
            .map(|&pos| crypto::hash_int(&keys.k_g, pos as u64))
            .collect();
        Ok(ZnSrchToken {
            positions,
            position_hashes,
        })
    }

    /// # Add Token
    /// ## Algorithm:
    /// * b_id ← H(k_g, decimal(ind) || w)
    /// * s_k ← S_K(w || '\0')
    /// * BF[H(k, e) mod m] ← 1 for e in s_k, k in k_h
    /// * BF[pos] ← BF[pos] ⊕ lsb(H(b_id, H(k_g, pos))) for all pos
    ///
    /// The final masking pass makes filters for the same keyword in
    /// different documents indistinguishable without `b_id`-derived
    /// hashes for specific positions.
    /// ## Arguments:
    /// * `ind: I`: the document identifier to store
    /// * `w: &str`: the keyword; must not contain `,`
    /// ## Returns:
    /// * `return -> Result<ZnAddToken<I>, SseError>`: the index record
    fn add_token(&self, ind: I, w: &str) -> Result<ZnAddToken<I>, SseError> {
        let keys = self.keys()?;
        let s_k = sets::s_k(&format!("{}\0", w));
        let bf_id = Self::filter_id(&keys.k_g, &ind, w);

        let mut bloom_filter = bitvec![0; self.bf_size];
        for e in &s_k {
            for k in &keys.k_h {
                bloom_filter.set(self.position(k, e), true);
            }
        }

        for pos in 0..self.bf_size {
            let h = crypto::hash_bytes(&bf_id, &crypto::hash_int(&keys.k_g, pos as u64));
            let mask_bit = h[0] & 1 == 1;
            let bit = bloom_filter[pos];
            bloom_filter.set(pos, bit ^ mask_bit);
        }

        Ok(ZnAddToken {
            ind,
            bloom_filter,
            bf_id,
        })
    }

    /// # Delete Token
    /// The Bloom-filter id of the pair to remove. Note that every record
    /// of the same `(ind, w)` pair carries this id, so deletion removes
    /// all of them.
    fn del_token(&self, ind: I, w: &str) -> Result<ZnDelToken, SseError> {
        let keys = self.keys()?;
        Ok(ZnDelToken {
            bf_id: Self::filter_id(&keys.k_g, &ind, w),
        })
    }
}
