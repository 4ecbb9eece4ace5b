//! Audiences: assumptions plus argument weights.

use indexmap::{IndexMap, IndexSet};

use crate::{ArgumentId, Proposition};

/// What one audience takes as given, and how strongly it rates each
/// argument by id. Weights live in `[0, 1]`; an argument the audience
/// never weighed counts 0.0.
#[derive(Debug, Clone, Default)]
pub struct Audience {
    assumptions: IndexSet<Proposition>,
    weights: IndexMap<ArgumentId, f64>,
}

impl Audience {
    pub fn new(
        assumptions: impl IntoIterator<Item = Proposition>,
        weights: impl IntoIterator<Item = (ArgumentId, f64)>,
    ) -> Self {
        Self {
            assumptions: assumptions.into_iter().collect(),
            weights: weights.into_iter().collect(),
        }
    }

    pub fn assumes(&self, p: &Proposition) -> bool {
        self.assumptions.contains(p)
    }

    pub fn weight(&self, id: &ArgumentId) -> f64 {
        self.weights.get(id).copied().unwrap_or(0.0)
    }

    pub fn assumptions(&self) -> impl Iterator<Item = &Proposition> {
        self.assumptions.iter()
    }

    pub fn weights(&self) -> impl Iterator<Item = (&ArgumentId, f64)> {
        self.weights.iter().map(|(id, w)| (id, *w))
    }
}
