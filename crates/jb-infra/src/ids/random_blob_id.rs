use jb_core::ids::BLOB_ID_ALPHABET;
use jb_core::ports::BlobIdGeneratorPort;
use jb_core::BlobId;
use rand::Rng;

/// Uniformly random ids over the 64-character URL-safe alphabet, drawn from
/// the thread-local CSPRNG. At the default length of 10 that is 60 bits.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomBlobIdGenerator;

impl BlobIdGeneratorPort for RandomBlobIdGenerator {
    fn generate(&self, length: usize) -> BlobId {
        let mut rng = rand::rng();
        let id: String = (0..length)
            .map(|_| BLOB_ID_ALPHABET[rng.random_range(0..BLOB_ID_ALPHABET.len())] as char)
            .collect();

        BlobId::from_trusted(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_generated_ids_pass_validation() {
        let generator = RandomBlobIdGenerator;
        for length in [1, 10, 21, 64] {
            let id = generator.generate(length);
            assert!(BlobId::parse(id.as_str(), length).is_ok(), "{id}");
        }
    }

    #[test]
    fn test_generated_ids_do_not_repeat() {
        let generator = RandomBlobIdGenerator;
        let ids: HashSet<String> = (0..10_000)
            .map(|_| generator.generate(10).into_inner())
            .collect();
        assert_eq!(ids.len(), 10_000);
    }
}
