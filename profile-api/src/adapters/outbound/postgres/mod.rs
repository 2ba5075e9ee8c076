mod user_records;

pub use user_records::PostgresUserRecordRepository;
