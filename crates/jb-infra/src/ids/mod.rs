mod random_blob_id;

pub use random_blob_id::RandomBlobIdGenerator;
