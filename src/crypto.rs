//! Crypto primitives shared by both schemes: HMAC-SHA-256 keyed hashing,
//! AES-CBC encryption of update records, and byte-level helpers.

use aes::cipher::{block_padding::Pkcs7, BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use aes::{Aes128, Aes192, Aes256};
use hmac::{Hmac, Mac};
use num_bigint::BigUint;
use rand::rngs::OsRng;
use rand::RngCore;
use sha2::Sha256;

use crate::error::SseError;

type HmacSha256 = Hmac<Sha256>;

/// AES block size in bytes; CBC ciphertexts and IVs are aligned to it.
pub const BLOCK_SIZE: usize = 16;

/// # Keyed String Hash
/// HMAC-SHA-256 of the UTF-8 encoding of a string.
/// ## Arguments:
/// * `k: &[u8]`: hash key, any length
/// * `e: &str`: hash input
/// ## Returns:
/// * `return -> Vec<u8>`: 32-byte digest
pub fn hash_string(k: &[u8], e: &str) -> Vec<u8> {
    hash_bytes(k, e.as_bytes())
}

/// Keyed hash of an integer, defined as the keyed hash of its decimal
/// string rendering.
pub fn hash_int(k: &[u8], e: u64) -> Vec<u8> {
    hash_string(k, &e.to_string())
}

/// # Keyed Byte Hash
/// HMAC-SHA-256 of a byte string.
/// ## Arguments:
/// * `k: &[u8]`: hash key, any length
/// * `e: &[u8]`: hash input
/// ## Returns:
/// * `return -> Vec<u8>`: 32-byte digest
pub fn hash_bytes(k: &[u8], e: &[u8]) -> Vec<u8> {
    let mut mac = HmacSha256::new_from_slice(k).expect("HMAC accepts keys of any length");
    mac.update(e);
    mac.finalize().into_bytes().to_vec()
}

/// Keyed hash of a string, interpreted as a big-endian 256-bit integer.
/// Callers reduce the result modulo the Bloom-filter size.
pub fn hash_string_to_int(k: &[u8], e: &str) -> BigUint {
    BigUint::from_bytes_be(&hash_string(k, e))
}

/// # Symmetric Encryption
/// Encrypts a string with AES-CBC under a fresh random IV.
///
/// The plaintext is PKCS-7 padded: `p = 16 - (len mod 16)` bytes of value
/// `p` are appended, a full extra block when the length is already
/// block-aligned.
/// ## Arguments:
/// * `key: &[u8]`: AES key, 16, 24 or 32 bytes
/// * `plain_text: &str`: the data to encrypt
/// ## Returns:
/// * `return -> Result<Vec<u8>, SseError>`: `IV || ciphertext`
pub fn encrypt(key: &[u8], plain_text: &str) -> Result<Vec<u8>, SseError> {
    let iv = get_random_bytes(BLOCK_SIZE);
    let pt = plain_text.as_bytes();
    let cipher_text = match key.len() {
        16 => cbc::Encryptor::<Aes128>::new_from_slices(key, &iv)
            .expect("key and IV lengths already checked")
            .encrypt_padded_vec_mut::<Pkcs7>(pt),
        24 => cbc::Encryptor::<Aes192>::new_from_slices(key, &iv)
            .expect("key and IV lengths already checked")
            .encrypt_padded_vec_mut::<Pkcs7>(pt),
        32 => cbc::Encryptor::<Aes256>::new_from_slices(key, &iv)
            .expect("key and IV lengths already checked")
            .encrypt_padded_vec_mut::<Pkcs7>(pt),
        n => return Err(SseError::InvalidKeyLength(n)),
    };
    let mut out = iv;
    out.extend_from_slice(&cipher_text);
    Ok(out)
}

/// # Symmetric Decryption
/// Inverse of [`encrypt`]: splits off the leading IV, decrypts the
/// remainder and strips the PKCS-7 padding.
/// ## Arguments:
/// * `key: &[u8]`: AES key, 16, 24 or 32 bytes
/// * `cipher_text: &[u8]`: `IV || ciphertext`, block-aligned
/// ## Returns:
/// * `return -> Result<String, SseError>`: the recovered plaintext
pub fn decrypt(key: &[u8], cipher_text: &[u8]) -> Result<String, SseError> {
    if cipher_text.len() < 2 * BLOCK_SIZE || cipher_text.len() % BLOCK_SIZE != 0 {
        return Err(SseError::InvalidCiphertext);
    }
    let (iv, ct) = cipher_text.split_at(BLOCK_SIZE);
    let plain = match key.len() {
        16 => cbc::Decryptor::<Aes128>::new_from_slices(key, iv)
            .expect("key and IV lengths already checked")
            .decrypt_padded_vec_mut::<Pkcs7>(ct),
        24 => cbc::Decryptor::<Aes192>::new_from_slices(key, iv)
            .expect("key and IV lengths already checked")
            .decrypt_padded_vec_mut::<Pkcs7>(ct),
        32 => cbc::Decryptor::<Aes256>::new_from_slices(key, iv)
            .expect("key and IV lengths already checked")
            .decrypt_padded_vec_mut::<Pkcs7>(ct),
        n => return Err(SseError::InvalidKeyLength(n)),
    }
    .map_err(|_| SseError::Padding)?;
    String::from_utf8(plain).map_err(|_| SseError::Utf8)
}

/// Draws `size` bytes from the operating system CSPRNG.
pub fn get_random_bytes(size: usize) -> Vec<u8> {
    let mut bytes = vec![0u8; size];
    OsRng.fill_bytes(&mut bytes);
    bytes
}

/// Interprets a byte string as a big-endian unsigned integer.
pub fn bytes_to_big(input: &[u8]) -> BigUint {
    BigUint::from_bytes_be(input)
}

/// Inverse of [`bytes_to_big`] for CBC ciphertexts: renders the integer
/// big-endian and left-pads with zeros to the next block boundary.
///
/// Real `IV || ciphertext` payloads always have block-aligned length, so
/// this recovers any leading zero bytes the integer form dropped, short of
/// an entire leading zero block.
pub fn big_to_aligned_bytes(value: &BigUint) -> Vec<u8> {
    let bytes = value.to_bytes_be();
    let aligned = (bytes.len() + BLOCK_SIZE - 1) / BLOCK_SIZE * BLOCK_SIZE;
    let mut out = vec![0u8; aligned - bytes.len()];
    out.extend_from_slice(&bytes);
    out
}
