use thiserror::Error;

/// Failures surfaced by client-side operations.
///
/// None of these are recovered from internally; an error aborts the
/// operation and leaves client and server state unchanged. Bloom-filter
/// false positives are not errors and are silently included in search
/// results.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SseError {
    /// A token operation was attempted before `setup` generated keys.
    #[error("client keys have not been generated; call setup first")]
    KeyNotInitialized,

    /// An AES key was requested or supplied with a length other than
    /// 16, 24 or 32 bytes.
    #[error("invalid AES key length: {0} bytes")]
    InvalidKeyLength(usize),

    /// A ciphertext was shorter than one block or not block-aligned.
    #[error("ciphertext is not a positive multiple of the block size")]
    InvalidCiphertext,

    /// PKCS-7 unpadding failed, indicating key mis-pairing or a corrupt
    /// ciphertext.
    #[error("decryption produced invalid padding")]
    Padding,

    /// Decryption succeeded at the block level but the plaintext is not
    /// valid UTF-8.
    #[error("decryption did not produce valid UTF-8")]
    Utf8,

    /// A decrypted update record could not be parsed as `"t,op,ind,w"`.
    #[error("decrypted update record is malformed")]
    MalformedRecord,
}
