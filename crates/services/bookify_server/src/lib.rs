// --- File: crates/services/bookify_server/src/lib.rs ---

// Declare modules shared by the server and CLI binaries
pub mod pages;
pub mod service_factory;
