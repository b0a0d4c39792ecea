pub mod apis;
pub mod config;
pub mod deposit;
pub mod error;
pub mod evm;
pub mod routers;
pub mod server;
#[cfg(test)]
pub mod tests;
pub mod utils;
