// services/log-dash/src/lib.rs
//
// log-dash - library exports
//

pub mod aggregate;
pub mod api;
pub mod config;
pub mod mock;
pub mod poller;
pub mod search;
pub mod state;
pub mod view;

#[cfg(test)]
mod test_support;
