use crate::{Directive, Expansion, ExpansionError, MacroContext};
use std::collections::HashMap;
use thiserror::Error;

/// A named, parametrized expansion.
///
/// The invoking directive doubles as the settings bag. Implementations must be
/// pure: the same settings and context always yield the same expansion.
pub trait MacroDefinition: Send + Sync {
    fn expand(
        &self,
        settings: &Directive,
        cx: &MacroContext<'_>,
    ) -> Result<Expansion, ExpansionError>;
}

impl<F> MacroDefinition for F
where
    F: Fn(&Directive, &MacroContext<'_>) -> Result<Expansion, ExpansionError> + Send + Sync,
{
    fn expand(
        &self,
        settings: &Directive,
        cx: &MacroContext<'_>,
    ) -> Result<Expansion, ExpansionError> {
        self(settings, cx)
    }
}

/// Errors that can occur while registering a macro.
#[derive(Debug, Error, PartialEq)]
pub enum MacroRegistrationError {
    #[error("macro '{name}' is already registered")]
    DuplicateName { name: String },

    #[error("macro names must not be empty")]
    EmptyName,
}

/// Name-keyed table the resolver consults for every non-terminal directive.
#[derive(Default)]
pub struct MacroRegistry {
    macros: Vec<RegisteredMacro>,
    name_lookup: HashMap<String, usize>,
}

impl MacroRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register<M>(
        &mut self,
        name: impl Into<String>,
        definition: M,
    ) -> Result<(), MacroRegistrationError>
    where
        M: MacroDefinition + 'static,
    {
        let name = name.into();
        if name.is_empty() {
            return Err(MacroRegistrationError::EmptyName);
        }
        if self.name_lookup.contains_key(&name) {
            return Err(MacroRegistrationError::DuplicateName { name });
        }

        self.name_lookup.insert(name.clone(), self.macros.len());
        self.macros.push(RegisteredMacro {
            name,
            definition: Box::new(definition),
        });
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&dyn MacroDefinition> {
        self.name_lookup
            .get(name)
            .and_then(|index| self.macros.get(*index))
            .map(|registered| registered.definition.as_ref())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.name_lookup.contains_key(name)
    }

    /// Registered names in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.macros.iter().map(|registered| registered.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.macros.len()
    }

    pub fn is_empty(&self) -> bool {
        self.macros.is_empty()
    }
}

struct RegisteredMacro {
    name: String,
    definition: Box<dyn MacroDefinition>,
}
