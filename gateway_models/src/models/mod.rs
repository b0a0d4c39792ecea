pub mod api_response;
pub mod chat;
pub mod contract;
pub mod deposit;
pub mod transaction;
pub mod wallet;
