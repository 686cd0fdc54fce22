pub mod assemblers;
pub mod config;
pub mod error;
pub mod feed;
pub mod fetch;
pub mod output;
pub mod parser;
pub mod pipeline;
pub mod record;
pub mod render;
pub mod stats;
