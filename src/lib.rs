pub mod cli;
pub mod commands;
pub mod promoter;
pub mod utils;
