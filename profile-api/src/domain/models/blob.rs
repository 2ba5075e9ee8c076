use std::path::PathBuf;

/// Where the file store put a blob, and the fingerprint it was stored under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredBlob {
    /// Lower-case hex MD5 of the blob bytes.
    pub content_hash: String,
    pub path: PathBuf,
}
