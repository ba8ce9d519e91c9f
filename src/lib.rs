pub mod cli;
pub mod config;
pub mod crypto;
pub mod errors;
pub mod secret_source;
pub mod storage;
pub mod vault;
