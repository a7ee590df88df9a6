// handlers/mod.rs
//
// One module per resource router plus the public service endpoints.
pub mod folders;
pub mod notes;
pub mod public;
