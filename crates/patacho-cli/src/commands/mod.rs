pub mod config;
pub mod info;
pub mod links;
pub mod open;
pub mod serve;
pub mod simulate;
