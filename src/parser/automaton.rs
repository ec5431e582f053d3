//! The push-down automaton driving traversal of nested markup.

use smol_str::SmolStr;

use super::attributes::Attributes;
use super::context::ParseContext;
use super::grammar::Grammar;
use super::state::ParseState;
use crate::diagnostics::{ErrorCode, Fault};
use crate::model::ElementRef;

/// Non-empty stack of parse states.
///
/// The bottom state is fixed at construction and is never popped; the top
/// state interprets the children of the innermost open element.
#[derive(Debug)]
pub struct StateStack {
    bottom: Box<dyn ParseState>,
    states: Vec<Box<dyn ParseState>>,
}

impl StateStack {
    pub fn new(bottom: Box<dyn ParseState>) -> Self {
        Self {
            bottom,
            states: Vec::new(),
        }
    }

    /// Number of states including the bottom one.
    pub fn depth(&self) -> usize {
        self.states.len() + 1
    }

    pub fn top(&self) -> &dyn ParseState {
        &**self.states.last().unwrap_or(&self.bottom)
    }

    pub fn push(&mut self, state: Box<dyn ParseState>) {
        self.states.push(state);
    }

    /// States from top to bottom.
    pub fn iter(&self) -> impl Iterator<Item = &dyn ParseState> {
        self.states
            .iter()
            .rev()
            .chain(std::iter::once(&self.bottom))
            .map(|s| &**s)
    }

    /// Turn one opening element into a stack transition.
    ///
    /// The top state derives the next state, which reads the attributes and
    /// may then redirect to a substitute. A substitute is pushed without the
    /// element name binding. A recoverable fault from the attributes is
    /// returned after the push so the closing tag still balances.
    pub fn dispatch(
        &mut self,
        grammar: &Grammar,
        name: &str,
        attrs: &Attributes,
        ctx: &mut ParseContext<'_>,
    ) -> Result<(), Fault> {
        let Some(mut state) = self.top().start_element(name, grammar) else {
            let within = self.top().element_name().unwrap_or("document");
            return Err(ctx.fatal(
                ErrorCode::E0201,
                format!("element <{name}> is not allowed in <{within}>"),
            ));
        };

        let (container, slot) = self.container();
        ctx.set_container(container, slot);

        let parsed = match state.parse_attrs(attrs, ctx) {
            Err(fault @ Fault::Fatal(_)) => return Err(fault),
            other => other,
        };

        if let Some(redirect) = state.jump_to(ctx) {
            tracing::trace!("<{name}> redirected from {} to {}", state.tag(), redirect.tag());
            self.push(redirect);
            return parsed;
        }

        tracing::trace!("<{name}> dispatched to {}", state.tag());
        state.set_element_name(SmolStr::new(name));
        self.push(state);
        parsed
    }

    /// Pop the top state at a closing element and run its end hook.
    ///
    /// A bound state must be closed by its own element name; redirected
    /// states are not checked.
    pub fn pop_state(&mut self, name: &str, ctx: &mut ParseContext<'_>) -> Result<(), Fault> {
        let Some(mut state) = self.states.pop() else {
            return Err(ctx.fatal(
                ErrorCode::E0202,
                format!("closing tag </{name}> has no open element"),
            ));
        };

        if let Some(bound) = state.element_name() {
            if bound != name {
                return Err(ctx.fatal(
                    ErrorCode::E0202,
                    format!("expected </{bound}>, found </{name}>"),
                ));
            }
        }

        state.end(ctx)
    }

    /// Nearest design element on the stack, with the slot named above it.
    fn container(&self) -> (Option<ElementRef>, Option<SmolStr>) {
        let mut slot = None;
        for state in self.iter() {
            if slot.is_none() {
                slot = state.slot().map(SmolStr::new);
            }
            if let Some(element) = state.element() {
                return (Some(element), slot);
            }
        }
        (None, slot)
    }

    pub(crate) fn top_mut(&mut self) -> &mut Box<dyn ParseState> {
        self.states.last_mut().unwrap_or(&mut self.bottom)
    }
}
