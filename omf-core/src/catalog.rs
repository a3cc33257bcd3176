use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::schema::Move;

/// Fixed size of a chassis move table; move ids index into it directly.
pub const MOVE_TABLE_SIZE: usize = 70;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum CatalogError {
    #[error("move id {0} outside catalog range 0..{MOVE_TABLE_SIZE}")]
    IdOutOfRange(usize),
    #[error("move id {0} has an empty command string")]
    EmptyCommand(usize),
}

/// The moveset of one chassis, indexed by move id. Slots may be empty; the
/// original data files leave gaps in the table.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MoveCatalog {
    slots: Vec<Option<Move>>,
}

impl Default for MoveCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl MoveCatalog {
    pub fn new() -> Self {
        Self {
            slots: vec![None; MOVE_TABLE_SIZE],
        }
    }

    /// Insert a move at its own id, replacing any previous occupant.
    pub fn insert(&mut self, mv: Move) -> Result<(), CatalogError> {
        if mv.id >= MOVE_TABLE_SIZE {
            return Err(CatalogError::IdOutOfRange(mv.id));
        }
        if mv.command.is_empty() {
            return Err(CatalogError::EmptyCommand(mv.id));
        }
        let id = mv.id;
        self.slots[id] = Some(mv);
        Ok(())
    }

    pub fn get(&self, id: usize) -> Option<&Move> {
        self.slots.get(id).and_then(|slot| slot.as_ref())
    }

    /// Occupied slots in id order.
    pub fn iter(&self) -> impl Iterator<Item = &Move> {
        self.slots.iter().flatten()
    }

    pub fn len(&self) -> usize {
        self.slots.iter().flatten().count()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(|slot| slot.is_none())
    }
}
