use crate::db::schema::blobs;
use diesel::prelude::*;

#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = blobs)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct BlobRow {
    pub id: String,
    pub json: String,
    pub created_at: i64,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = blobs)]
pub struct NewBlobRow {
    pub id: String,
    pub json: String,
    pub created_at: i64,
}

/// Listing projection without the document body
#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = blobs)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct BlobMetadataRow {
    pub id: String,
    pub created_at: i64,
}
