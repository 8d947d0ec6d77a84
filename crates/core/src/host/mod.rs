// Interfaces the core consumes from the host runtime, plus an in-memory host.
pub mod graph;
pub mod inspect;
pub mod memory;
