pub mod pg_store;
pub mod pool;
