//! Design file parser
//!
//! ## Architecture
//!
//! ```text
//! bytes → reader (quick-xml events) → ModuleParserHandler
//!                                        │
//!                     StateStack::dispatch / pop_state
//!                                        │
//!                 Grammar: (state tag, element) → ParseState
//! ```
//!
//! A [`ModuleParserHandler`] owns everything one parse mutates through its
//! [`ParseContext`]. The [`Grammar`] is immutable and shared by all parses
//! of a session.

mod attributes;
mod automaton;
mod context;
mod grammar;
mod handler;
mod reader;
mod state;
mod version;

pub use attributes::Attributes;
pub use automaton::StateStack;
pub use context::ParseContext;
pub use grammar::{Grammar, GrammarBuilder};
pub use handler::ModuleParserHandler;
pub use reader::{detect_version, parse_module};
pub use state::{ParseState, StateTag};
pub use version::{CURRENT_VERSION, CURRENT_VERSION_NUMBER, VERSION_3_1_0, parse_version};
