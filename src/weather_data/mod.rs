pub mod error;
pub mod fetcher;
pub mod observer;
pub mod reshape;
