pub mod auth;
pub mod import;
pub mod service;

pub use service::Service;
