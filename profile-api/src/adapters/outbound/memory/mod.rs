//! In-memory adapters for testing.

mod user_records;

pub use user_records::InMemoryUserRecordRepository;
