//! In-memory adapters for the domain ports. All state lives for the process
//! lifetime only; persistence is out of scope.

pub mod credentials;
pub mod in_memory;
