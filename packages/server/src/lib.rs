// Hello Net - browsing core
//
// Session state machine for a tabbed mobile browser plus the content pipeline
// (proxy, extract, metadata) that backs its embedded frame and reader mode.
//
// Domains live in domains/*; infrastructure traits and clients in kernel/.

pub mod common;
pub mod config;
pub mod domains;
pub mod kernel;
pub mod server;

pub use config::*;
