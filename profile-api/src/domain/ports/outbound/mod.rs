mod blob_store;
mod profile_provider;
mod user_records;

pub use blob_store::*;
pub use profile_provider::*;
pub use user_records::*;
