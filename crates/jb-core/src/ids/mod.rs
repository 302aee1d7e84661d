//! ID type wrappers for type safety.

pub mod blob_id;

pub use blob_id::{BlobId, BlobIdError, BLOB_ID_ALPHABET, DEFAULT_BLOB_ID_LENGTH, MAX_BLOB_ID_LENGTH};
