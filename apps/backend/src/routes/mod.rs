pub mod auth;
pub mod device;
pub mod export;
pub mod session;
pub mod stats;
pub mod words;
