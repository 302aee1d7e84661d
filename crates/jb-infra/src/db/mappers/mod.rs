pub mod blob_mapper;

pub use blob_mapper::BlobRowMapper;
