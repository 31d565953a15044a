//! Plinth - minimal keep-alive HTTP/1.1 server
//!
//! Core library: the connection engine, the route table and configuration.

pub mod config;
pub mod http;
pub mod routes;
pub mod server;
