pub mod backup;
pub mod storage;
