use serde::{Deserialize, Serialize};

/// One device-path mapping for an action.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InputBinding {
    /// Part name inside a composite (`up`, `negative`, ...); empty otherwise.
    pub name: String,
    pub id: String,
    /// Device-qualified control path, e.g. `<Keyboard>/space`.
    pub path: String,
    pub interactions: String,
    pub processors: String,
    /// Device-group tags joined by `;` or `,` (e.g. `Keyboard&Mouse`).
    pub groups: String,
    /// Name of the owning action; kept so flat binding lists can be filtered by action.
    pub action: String,
    pub is_composite: bool,
    /// Belongs to the closest preceding composite binding.
    pub is_part_of_composite: bool,
}

impl InputBinding {
    pub fn new<P: Into<String>>(path: P) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }

    /// Head of a composite (e.g. `2DVector`). Its parts follow it in the list.
    pub fn composite<N: Into<String>>(name: N) -> Self {
        Self {
            name: name.into(),
            is_composite: true,
            ..Self::default()
        }
    }

    pub fn part<N: Into<String>, P: Into<String>>(name: N, path: P) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            is_part_of_composite: true,
            ..Self::default()
        }
    }

    pub fn with_groups<G: Into<String>>(mut self, groups: G) -> Self {
        self.groups = groups.into();
        self
    }

    pub fn with_interactions<I: Into<String>>(mut self, interactions: I) -> Self {
        self.interactions = interactions.into();
        self
    }

    pub fn with_action<A: Into<String>>(mut self, action: A) -> Self {
        self.action = action.into();
        self
    }

    pub fn with_id<I: Into<String>>(mut self, id: I) -> Self {
        self.id = id.into();
        self
    }

    /// Composite heads and composite parts never resolve on their own.
    #[inline]
    pub fn is_standalone(&self) -> bool {
        !self.is_composite && !self.is_part_of_composite
    }
}
