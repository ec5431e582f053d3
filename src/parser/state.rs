//! Parse states: how to interpret one markup element.

use std::fmt;

use smol_str::SmolStr;

use super::attributes::Attributes;
use super::context::ParseContext;
use super::grammar::Grammar;
use crate::diagnostics::Fault;
use crate::model::ElementRef;

/// Names a kind of parse state in a [`Grammar`]'s transition table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct StateTag(pub &'static str);

impl StateTag {
    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for StateTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// One entry of the parse automaton.
///
/// A state is created when its opening element is seen, pushed on the
/// [`StateStack`](super::StateStack), and popped at the matching closing
/// element. All per-parse data is reached through the [`ParseContext`]
/// passed into each hook.
pub trait ParseState: fmt::Debug {
    /// Tag used to look up this state's transitions.
    fn tag(&self) -> StateTag;

    /// Element name bound to this state, used to match the closing tag.
    /// States pushed through a redirect are never bound.
    fn element_name(&self) -> Option<&str>;

    fn set_element_name(&mut self, name: SmolStr);

    /// State for a child element named `name`, or `None` if the element is
    /// not allowed here.
    fn start_element(&self, name: &str, grammar: &Grammar) -> Option<Box<dyn ParseState>> {
        grammar.next_state(self.tag(), name)
    }

    /// Read this element's attributes. Malformed attributes are reported
    /// through the context and parsing continues with defaults.
    fn parse_attrs(&mut self, _attrs: &Attributes, _ctx: &mut ParseContext<'_>) -> Result<(), Fault> {
        Ok(())
    }

    /// A state to push in place of this one.
    fn jump_to(&mut self, _ctx: &mut ParseContext<'_>) -> Option<Box<dyn ParseState>> {
        None
    }

    /// Character data directly inside this element.
    fn characters(&mut self, _text: &str, _ctx: &mut ParseContext<'_>) {}

    /// Called when the closing element is seen.
    fn end(&mut self, _ctx: &mut ParseContext<'_>) -> Result<(), Fault> {
        Ok(())
    }

    /// Design element created by this state, used as container for children.
    fn element(&self) -> Option<ElementRef> {
        None
    }

    /// Slot children of this state are placed in.
    fn slot(&self) -> Option<&str> {
        None
    }
}
