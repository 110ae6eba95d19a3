pub mod commands;
pub mod retry;
