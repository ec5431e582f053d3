//! Data-driven transition table between parse states.
//!
//! ```text
//! (current state tag, child element name) -> next state tag -> constructor
//! ```
//!
//! The table is built once and shared by every parse of a session.

use std::fmt;

use rustc_hash::FxHashMap;
use smol_str::SmolStr;

use super::state::{ParseState, StateTag};

type StateFactory = Box<dyn Fn() -> Box<dyn ParseState> + Send + Sync>;

/// Transition table of a markup schema.
pub struct Grammar {
    root: StateTag,
    root_factory: StateFactory,
    transitions: FxHashMap<StateTag, FxHashMap<SmolStr, StateTag>>,
    factories: FxHashMap<StateTag, StateFactory>,
}

impl Grammar {
    /// Start a grammar whose bottom-of-stack state is built by `root_factory`.
    ///
    /// The bottom state is never the target of a transition.
    pub fn builder<F>(root: StateTag, root_factory: F) -> GrammarBuilder
    where
        F: Fn() -> Box<dyn ParseState> + Send + Sync + 'static,
    {
        GrammarBuilder {
            grammar: Grammar {
                root,
                root_factory: Box::new(root_factory),
                transitions: FxHashMap::default(),
                factories: FxHashMap::default(),
            },
        }
    }

    /// Fresh bottom-of-stack state.
    pub fn root_state(&self) -> Box<dyn ParseState> {
        (self.root_factory)()
    }

    /// Tag reached from `from` through a child element named `element`.
    pub fn transition(&self, from: StateTag, element: &str) -> Option<StateTag> {
        self.transitions.get(&from)?.get(element).copied()
    }

    /// Construct the state reached from `from` through `element`.
    pub fn next_state(&self, from: StateTag, element: &str) -> Option<Box<dyn ParseState>> {
        let to = self.transition(from, element)?;
        self.factories.get(&to).map(|factory| factory())
    }

    /// Child element names allowed under `from`, sorted.
    pub fn allowed_children(&self, from: StateTag) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .transitions
            .get(&from)
            .map(|t| t.keys().map(SmolStr::as_str).collect())
            .unwrap_or_default();
        names.sort_unstable();
        names
    }
}

impl fmt::Debug for Grammar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Grammar")
            .field("root", &self.root)
            .field("transitions", &self.transitions)
            .field("states", &self.factories.len())
            .finish()
    }
}

/// Builder for [`Grammar`].
pub struct GrammarBuilder {
    grammar: Grammar,
}

impl GrammarBuilder {
    /// Register the constructor of a state.
    pub fn state<F>(mut self, tag: StateTag, factory: F) -> Self
    where
        F: Fn() -> Box<dyn ParseState> + Send + Sync + 'static,
    {
        self.grammar.factories.insert(tag, Box::new(factory));
        self
    }

    /// Allow `element` under `from`, interpreted by state `to`.
    pub fn transition(mut self, from: StateTag, element: &str, to: StateTag) -> Self {
        self.grammar
            .transitions
            .entry(from)
            .or_default()
            .insert(SmolStr::new(element), to);
        self
    }

    /// Same transitions for several source states.
    pub fn transitions(mut self, from: &[StateTag], children: &[(&str, StateTag)]) -> Self {
        for source in from {
            for (element, to) in children {
                self = self.transition(*source, element, *to);
            }
        }
        self
    }

    /// Finish the grammar. Transitions to tags without a constructor are
    /// dropped.
    pub fn build(mut self) -> Grammar {
        let factories = &self.grammar.factories;
        for targets in self.grammar.transitions.values_mut() {
            targets.retain(|element, to| {
                let known = factories.contains_key(to);
                if !known {
                    tracing::warn!("dropping <{element}> transition to unregistered state {to}");
                }
                known
            });
        }
        self.grammar
    }
}
