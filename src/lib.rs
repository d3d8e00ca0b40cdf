//! Nature Vision species identification exposed as a single MCP tool,
//! `identify_species`, over stdio or streamable HTTP.

pub mod cli;
pub mod clients;
pub mod core;
pub mod domain;
pub mod infra;
pub mod tools;
