//! Fixed-point resolution of directive trees.
//!
//! Every non-terminal directive is looked up in the [`MacroRegistry`], invoked
//! with itself as settings, and its expansion is spliced in its place. The
//! walk is depth-first so a composite's own records interleave with the
//! records of its nested macro calls exactly in emission order.

use crate::{
    Directive, DirectiveKind, Engine, Expansion, ExpansionError, LevelScope, MacroContext,
    MacroRegistry,
};
use std::collections::BTreeMap;
use tracing::{debug, trace};

/// Nesting limit used when none is configured.
pub const DEFAULT_MAX_DEPTH: usize = 32;

/// Terminal records plus bookkeeping about how they were reached.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Resolution {
    /// Flat, ordered, terminal-only records.
    pub records: Vec<Directive>,
    /// Deepest macro nesting encountered (0 when the root was already terminal).
    pub depth: usize,
    /// Number of invocations per macro name.
    pub expansions: BTreeMap<String, usize>,
}

impl Resolution {
    pub fn total_expansions(&self) -> usize {
        self.expansions.values().sum()
    }
}

pub struct Resolver<'r> {
    registry: &'r MacroRegistry,
    max_depth: usize,
}

impl<'r> Resolver<'r> {
    pub fn new(registry: &'r MacroRegistry) -> Self {
        Self {
            registry,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Expand `root` until no record carries a macro reference.
    ///
    /// Fails fast on unknown macros, on a macro that (transitively) calls
    /// itself, and on nesting deeper than the configured limit.
    pub fn resolve(
        &self,
        root: impl Into<Expansion>,
        scope: &LevelScope,
        engine: &Engine<'_>,
    ) -> Result<Resolution, ExpansionError> {
        let cx = MacroContext::new(scope, engine);
        let mut resolution = Resolution::default();
        let mut lineage = Vec::new();

        for directive in root.into() {
            self.expand_into(directive, &cx, &mut lineage, &mut resolution)?;
        }

        debug!(
            records = resolution.records.len(),
            depth = resolution.depth,
            expansions = resolution.total_expansions(),
            "resolved directives"
        );
        Ok(resolution)
    }

    fn expand_into(
        &self,
        directive: Directive,
        cx: &MacroContext<'_>,
        lineage: &mut Vec<String>,
        resolution: &mut Resolution,
    ) -> Result<(), ExpansionError> {
        let name = match directive.kind() {
            DirectiveKind::Thing(_) => {
                resolution.records.push(directive);
                return Ok(());
            }
            DirectiveKind::Macro(name) => name.clone(),
        };

        if lineage.contains(&name) {
            return Err(ExpansionError::Cycle {
                chain: chain_of(lineage, &name),
            });
        }
        if lineage.len() >= self.max_depth {
            return Err(ExpansionError::DepthExceeded {
                limit: self.max_depth,
                chain: chain_of(lineage, &name),
            });
        }

        let definition = self
            .registry
            .get(&name)
            .ok_or_else(|| ExpansionError::UnknownMacro { name: name.clone() })?;
        let expansion = definition.expand(&directive, cx)?;
        trace!(
            macro_name = %name,
            x = directive.x,
            y = directive.y,
            emitted = expansion.len(),
            "expanded macro"
        );

        *resolution.expansions.entry(name.clone()).or_default() += 1;
        lineage.push(name);
        resolution.depth = resolution.depth.max(lineage.len());

        for child in expansion {
            self.expand_into(child, cx, lineage, resolution)?;
        }

        lineage.pop();
        Ok(())
    }
}

fn chain_of(lineage: &[String], next: &str) -> String {
    lineage
        .iter()
        .map(String::as_str)
        .chain(std::iter::once(next))
        .collect::<Vec<_>>()
        .join(" -> ")
}
