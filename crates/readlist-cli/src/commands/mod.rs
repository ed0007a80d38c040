//! Command handlers

pub mod book;
pub mod config;
pub mod search;
pub mod status;
