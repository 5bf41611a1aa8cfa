pub mod http;
pub mod persistence;
