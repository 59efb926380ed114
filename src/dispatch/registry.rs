//! Subcommand registry.

/// What a registered subcommand can do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Capability {
    /// A command that runs; `help_flag` is appended to request its help.
    Leaf { help_flag: String },
    /// A command that dispatches to its own subcommands.
    Dispatcher(Registry),
}

impl Capability {
    pub fn leaf(help_flag: impl Into<String>) -> Self {
        Capability::Leaf {
            help_flag: help_flag.into(),
        }
    }

    pub fn is_dispatcher(&self) -> bool {
        matches!(self, Capability::Dispatcher(_))
    }
}

/// Subcommand names one dispatch level down, in registration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Registry {
    entries: Vec<(String, Capability)>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a subcommand.
    ///
    /// # Panics
    ///
    /// Panics if `name` is already registered.
    pub fn command(mut self, name: impl Into<String>, capability: Capability) -> Self {
        let name = name.into();
        assert!(
            self.get(&name).is_none(),
            "subcommand `{}` registered twice",
            name
        );
        self.entries.push((name, capability));
        self
    }

    pub fn get(&self, name: &str) -> Option<&Capability> {
        self.entries
            .iter()
            .find(|(registered, _)| registered == name)
            .map(|(_, capability)| capability)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
