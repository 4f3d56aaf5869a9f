pub mod client;
pub mod session;
pub mod ticket;
pub mod types;
