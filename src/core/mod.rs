// AppInventory - core/mod.rs
//
// Core business logic: extraction, classification, record building,
// export. No filesystem access except the final save in `export`.

pub mod classify;
pub mod collate;
pub mod export;
pub mod extract;
pub mod location;
pub mod model;
pub mod parser;
