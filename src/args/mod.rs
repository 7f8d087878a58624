//! Flag handling for provider builders.
//!
//! ```text
//! Raw args → parse_flags(defs) → ResolvedFlags
//! ```
//!
//! Definitions are plain data so each provider states its own flag set.

mod parser;
mod registry;

pub use parser::{parse_flags, ArgError, ResolvedFlags};
pub use registry::{usage, FlagDef, FlagKind, Requirement};
