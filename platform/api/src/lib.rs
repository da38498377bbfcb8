pub mod api;
pub mod config;
pub mod database;
pub mod global;
pub mod migration;
pub mod social;

#[cfg(test)]
mod tests;
