//! External interfaces: REST API and real-time notification socket.

pub mod http;
