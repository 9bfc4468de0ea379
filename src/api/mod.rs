pub mod attendance;
pub mod backup;
pub mod client;
pub mod employee;
pub mod health;
pub mod leader;
pub mod site;
