//! 中间件模块

pub mod request;

pub use request::request_context;
