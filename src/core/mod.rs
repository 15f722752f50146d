pub mod assets;
pub mod config;
pub mod corpus;
pub mod entry;
pub mod error;
pub mod output;
