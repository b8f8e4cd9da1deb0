pub mod config;
pub mod constants;
pub mod error;
pub mod logging;
pub mod normalize;
pub mod parser;
pub mod pipeline;
pub mod render;
pub mod sanitize;
pub mod sheet;
pub mod sources;
pub mod table;
pub mod types;
