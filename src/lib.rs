pub mod app;
pub mod cli;
pub mod config;
pub mod loader;
pub mod model;
pub mod output;
pub mod source;
pub mod utils;
pub mod viewmodel;

#[cfg(test)]
mod tests;
