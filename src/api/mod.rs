mod client;
mod types;

pub use client::{GlossaryApi, GlossaryBackend};
pub use types::{Edge, Graph, GraphNodeRecord, NewTerm, Term, TermSummary, TermUpdate};
