// AppInventory - app/mod.rs
//
// Application layer: CLI surface and pipeline orchestration.
// Dependencies: core, platform, util.

pub mod cli;
pub mod pipeline;
