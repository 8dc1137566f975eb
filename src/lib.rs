pub mod config;
pub mod domain;
pub mod error;
pub mod logging;
pub mod quality;
pub mod query;
pub mod sortkey;
pub mod storage;
