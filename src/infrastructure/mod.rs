pub mod geocoding;
pub mod observability;
pub mod persistence;
pub mod random;
pub mod storage;
