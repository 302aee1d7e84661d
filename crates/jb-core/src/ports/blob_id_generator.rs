use crate::BlobId;

pub trait BlobIdGeneratorPort: Send + Sync {
    /// Produce a random id of exactly `length` characters from the id alphabet.
    fn generate(&self, length: usize) -> BlobId;
}
