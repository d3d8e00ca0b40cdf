//! `identify_species`: argument schema, validation and the MCP tool router.

pub mod args;
pub mod tool_router;

pub use args::IdentifySpeciesArgs;
pub use tool_router::{SpeciesRouter, SpeciesSvc};
