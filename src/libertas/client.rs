use std::collections::HashMap;

use log::debug;
use num_bigint::BigUint;

use crate::crypto;
use crate::error::SseError;
use crate::{Op, SigmaClient, Update};

/// Libertas client wrapping an inner wildcard SSE client.
///
/// Holds the record-encryption key `k` and the logical timestamp counter
/// `t`, which advances on every add or delete. The inner scheme stores
/// encrypted update records as its document identifiers, so `C::Ind` is
/// pinned to `BigUint`.
pub struct LibertasClient<C> {
    pub sigma: C,
    pub k: Option<Vec<u8>>,
    pub t: u64,
}

impl<C: SigmaClient<Ind = BigUint>> LibertasClient<C> {
    pub fn new(sigma: C) -> Self {
        LibertasClient { sigma, k: None, t: 0 }
    }

    /// # Key Generation
    /// Sets up the inner client, draws the record-encryption key and
    /// resets the timestamp counter.
    /// ## Arguments:
    /// * `security_parameter: (usize, usize)`: AES strength for record
    ///   encryption (128, 192 or 256) and the inner scheme's security
    ///   strength, both in bits
    pub fn setup(&mut self, security_parameter: (usize, usize)) -> Result<(), SseError> {
        let (sec_l, sec_sigma) = security_parameter;
        let key_len = sec_l / 8;
        if !matches!(key_len, 16 | 24 | 32) {
            return Err(SseError::InvalidKeyLength(key_len));
        }
        self.sigma.setup(sec_sigma)?;
        self.k = Some(crypto::get_random_bytes(key_len));
        self.t = 0;
        Ok(())
    }

    /// Search tokens pass through to the inner scheme unchanged.
    pub fn srch_token(&self, q: &str) -> Result<C::SrchToken, SseError> {
        self.sigma.srch_token(q)
    }

    /// # Add Token
    /// Advances the timestamp, encrypts the `(t, ADD, ind, w)` record and
    /// wraps it in an inner-scheme add token for keyword `w`.
    pub fn add_token(&mut self, ind: u64, w: &str) -> Result<C::AddToken, SseError> {
        self.update_token(Op::Add, ind, w)
    }

    /// # Delete Token
    /// Same shape as [`LibertasClient::add_token`], with a `(t, DEL, ind,
    /// w)` record inside. Deletion is an *add* at the inner layer; the
    /// record only takes effect when a later search replays the log.
    pub fn del_token(&mut self, ind: u64, w: &str) -> Result<C::AddToken, SseError> {
        self.update_token(Op::Del, ind, w)
    }

    fn update_token(&mut self, op: Op, ind: u64, w: &str) -> Result<C::AddToken, SseError> {
        if self.k.is_none() {
            return Err(SseError::KeyNotInitialized);
        }
        self.t += 1;
        let content = self.encrypt_update(self.t, op, ind, w)?;
        self.sigma.add_token(content, w)
    }

    /// # Search Reconciliation
    /// Decrypts the server's reply and replays the update log.
    /// ## Algorithm:
    /// * decrypt every payload into a `(t, op, ind, w)` record
    /// * sort ascending by `t` — the server may return records in any
    ///   order
    /// * per keyword, apply adds and deletes in timestamp order
    /// * return the union of surviving identifiers, deduplicated
    /// ## Arguments:
    /// * `r_star: &[BigUint]`: encrypted update records from the server
    /// ## Returns:
    /// * `return -> Result<Vec<u64>, SseError>`: the documents whose
    ///   latest matching update is an add
    pub fn dec_search(&self, r_star: &[BigUint]) -> Result<Vec<u64>, SseError> {
        let mut updates = r_star
            .iter()
            .map(|payload| self.decrypt_update(payload))
            .collect::<Result<Vec<Update>, SseError>>()?;
        updates.sort_by_key(|update| update.t);
        debug!("replaying {} matching updates", updates.len());

        let mut keyword_documents: HashMap<String, Vec<u64>> = HashMap::new();
        for update in updates {
            let documents = keyword_documents.entry(update.w).or_default();
            match update.op {
                Op::Add => {
                    if !documents.contains(&update.ind) {
                        documents.push(update.ind);
                    }
                }
                Op::Del => {
                    if let Some(found) = documents.iter().position(|&ind| ind == update.ind) {
                        documents.remove(found);
                    }
                }
            }
        }

        let mut results = Vec::new();
        for documents in keyword_documents.values() {
            for &ind in documents {
                if !results.contains(&ind) {
                    results.push(ind);
                }
            }
        }
        Ok(results)
    }

    /// Encrypts a `(t, op, ind, w)` record into an integer payload for
    /// the inner scheme. The record is serialised as `"t,op,ind,w"`, so
    /// keywords must not contain `,`.
    pub fn encrypt_update(&self, t: u64, op: Op, ind: u64, w: &str) -> Result<BigUint, SseError> {
        let k = self.k.as_ref().ok_or(SseError::KeyNotInitialized)?;
        let record = format!("{},{},{},{}", t, op.code(), ind, w);
        let cipher_text = crypto::encrypt(k, &record)?;
        Ok(crypto::bytes_to_big(&cipher_text))
    }

    /// Inverse of [`LibertasClient::encrypt_update`]: realigns the
    /// integer payload to whole blocks, decrypts and parses it.
    pub fn decrypt_update(&self, payload: &BigUint) -> Result<Update, SseError> {
        let k = self.k.as_ref().ok_or(SseError::KeyNotInitialized)?;
        let cipher_text = crypto::big_to_aligned_bytes(payload);
        let record = crypto::decrypt(k, &cipher_text)?;

        let mut fields = record.splitn(4, ',');
        let t = fields
            .next()
            .and_then(|f| f.parse().ok())
            .ok_or(SseError::MalformedRecord)?;
        let op = fields
            .next()
            .and_then(|f| f.parse().ok())
            .ok_or(SseError::MalformedRecord)
            .and_then(Op::from_code)?;
        let ind = fields
            .next()
            .and_then(|f| f.parse().ok())
            .ok_or(SseError::MalformedRecord)?;
        let w = fields.next().ok_or(SseError::MalformedRecord)?.to_string();
        Ok(Update { t, op, ind, w })
    }
}
