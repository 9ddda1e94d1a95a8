use thiserror::Error;

/// Errors that abort an expansion (and with it, construction of the map).
///
/// All of these are content-authoring bugs; expansion is deterministic so
/// nothing is retried.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ExpansionError {
    #[error("unknown macro '{name}'")]
    UnknownMacro { name: String },

    #[error("unknown pattern '{name}'")]
    UnknownPattern { name: String },

    #[error("no defaults registered for thing '{thing}'")]
    UnknownThing { thing: String },

    #[error("macro '{macro_name}' requires setting '{key}'")]
    MissingSetting { macro_name: String, key: String },

    #[error("macro cycle detected: {chain}")]
    Cycle { chain: String },

    #[error("macro nesting exceeded {limit} levels: {chain}")]
    DepthExceeded { limit: usize, chain: String },

    #[error("macro '{macro_name}' would emit more than {limit} records")]
    TooManyRecords { macro_name: String, limit: usize },
}

impl ExpansionError {
    pub fn missing(macro_name: &str, key: &str) -> Self {
        ExpansionError::MissingSetting {
            macro_name: macro_name.to_string(),
            key: key.to_string(),
        }
    }
}
