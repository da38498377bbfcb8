mod api;
mod config;
mod migration;
mod postgres;
