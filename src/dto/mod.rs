pub mod clients;
pub mod tickets;
