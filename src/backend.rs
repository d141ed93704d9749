pub mod config;
pub mod dispatch;
pub mod query;
pub mod rest;

pub use config::ClientConfig;
pub use dispatch::Dispatcher;
pub use query::{QueryParams, QueryValue};
pub use rest::Server;
