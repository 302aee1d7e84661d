//! jbin: a pastebin for JSON documents.
//!
//! Configuration comes from the environment (and `.env`); see
//! `jb_server::bootstrap::config` for the variables.

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    jb_server::bootstrap::run().await
}
