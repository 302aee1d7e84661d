pub mod blob;

pub use blob::{BlobMetadataRow, BlobRow, NewBlobRow};
