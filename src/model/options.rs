//! Module options

/// Options controlling how a module is finished after parsing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModuleOptions {
    /// Run the semantic check after a successful parse. `None` means the
    /// option was not set, which runs the check.
    pub semantic_check: Option<bool>,
}

impl ModuleOptions {
    /// Options with the semantic check explicitly switched on or off
    pub fn with_semantic_check(enabled: bool) -> Self {
        Self {
            semantic_check: Some(enabled),
        }
    }

    /// Whether the semantic check should run
    pub fn use_semantic_check(&self) -> bool {
        self.semantic_check.unwrap_or(true)
    }
}
