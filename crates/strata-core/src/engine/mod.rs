//! The source engine: blueprint construction, declaration identity, merge,
//! statement patching, and emission.
//!
//! Everything here operates on syn trees and is free of I/O. The
//! application layer owns reading and writing files; the engine owns
//! deciding what the merged tree looks like.
//!
//! Pipeline per artifact aspect:
//!
//! ```text
//! EntityConfig ──► Blueprint (desired declarations)
//! source text  ──► syn::File (existing tree, or skeleton when absent)
//!                      │
//!                      ▼
//!              merge (insert-if-missing, append-only)
//!                      │
//!                      ▼
//!              patch  (per-field conditional blocks)
//!                      │
//!                      ▼
//!              emit   (prettyplease, full rewrite)
//! ```

pub mod blueprint;
pub mod emit;
pub mod locate;
pub mod merge;
pub mod patch;

pub use blueprint::Blueprint;
pub use locate::{DeclKey, DeclKind};
pub use patch::GuardPatch;
