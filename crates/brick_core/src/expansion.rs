//! Output of a single macro invocation.

use crate::Directive;

/// Upper bound on the records a single macro invocation may emit.
pub const MAX_RECORDS_PER_EXPANSION: usize = 1 << 16;

/// Either one record or an ordered run of records.
///
/// Order is significant: later records may rely on earlier ones being placed
/// first (doors before the bricks stacked on them).
#[derive(Clone, Debug, PartialEq)]
pub enum Expansion {
    One(Directive),
    Many(Vec<Directive>),
}

impl Expansion {
    pub fn len(&self) -> usize {
        match self {
            Expansion::One(_) => 1,
            Expansion::Many(directives) => directives.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Flatten into emission order.
    pub fn into_directives(self) -> Vec<Directive> {
        match self {
            Expansion::One(directive) => vec![directive],
            Expansion::Many(directives) => directives,
        }
    }
}

impl From<Directive> for Expansion {
    fn from(directive: Directive) -> Self {
        Expansion::One(directive)
    }
}

impl From<Vec<Directive>> for Expansion {
    fn from(directives: Vec<Directive>) -> Self {
        Expansion::Many(directives)
    }
}

impl IntoIterator for Expansion {
    type Item = Directive;
    type IntoIter = std::vec::IntoIter<Directive>;

    fn into_iter(self) -> Self::IntoIter {
        self.into_directives().into_iter()
    }
}
