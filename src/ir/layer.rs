use crate::ir::{
    ids::{LayerId, PathId},
    path::PathData,
};

/// An ordered group of paths. Layer order is z-order.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Layer {
    /// Stable identity.
    pub id: LayerId,
    /// Display name.
    pub name: String,
    /// Paths in paint order.
    pub paths: Vec<PathData>,
    /// Hidden layers are skipped by sampling and export.
    pub visible: bool,
    /// Editor lock flag; carried through import, JSON and export.
    pub locked: bool,
}

impl Layer {
    /// Empty, visible, unlocked layer with a fresh id.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: LayerId::new_v4(),
            name: name.into(),
            paths: Vec::new(),
            visible: true,
            locked: false,
        }
    }

    /// Path `id` in this layer.
    pub fn path(&self, id: &PathId) -> Option<&PathData> {
        self.paths.iter().find(|p| &p.id == id)
    }

    /// Mutable access to path `id`.
    pub fn path_mut(&mut self, id: &PathId) -> Option<&mut PathData> {
        self.paths.iter_mut().find(|p| &p.id == id)
    }
}
