/*!
 * HTTP Server Module
 */

pub mod http_server;

pub use http_server::{shutdown_signal, AllocationServer};
