//! Update-pattern-revealing backward privacy on top of a wildcard SSE
//! scheme.
//!
//! Libertas never deletes at the inner layer. Every add and delete is a
//! fresh, timestamped update record `(t, op, ind, w)`, AES-CBC encrypted
//! and handed to the inner scheme as that record's "document identifier".
//! A search therefore returns the encrypted history of all matching
//! updates; [`client::LibertasClient::dec_search`] decrypts it, orders it
//! by timestamp and replays the add/delete log to recover the documents
//! that are still present.

pub mod client;
pub mod server;

pub use client::LibertasClient;
pub use server::LibertasServer;
