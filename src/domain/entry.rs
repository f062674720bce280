//! BCM entry records: structural links plus an opaque payload.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::address::{address_to_index, Address, NO_ADDRESS};

/// One record of a BCM entry table.
///
/// The five structural fields are owned by the reindex pass; everything else
/// lives in [`EntryPayload`] and is carried through edits untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    /// Position-derived address of this entry
    #[serde(default)]
    pub address: Address,
    /// Address of the next sibling, 0 if last
    #[serde(default)]
    pub sibling: Address,
    /// Address of the first child, 0 if leaf
    #[serde(default)]
    pub child: Address,
    /// Address of the tree parent, 0 for the root entry
    #[serde(default)]
    pub parent: Address,
    /// Address of the top-level ancestor
    #[serde(default)]
    pub root: Address,
    #[serde(flatten)]
    pub payload: EntryPayload,
}

/// Non-structural entry fields.
///
/// Values are kept as raw integers; interpreting them is up to the game data
/// editors that consume the table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EntryPayload {
    pub u_00: u32,
    pub directional_input: u32,
    pub button_input: u32,
    pub hold_down_conditions: u32,
    pub opponent_size_conditions: u32,
    pub minimum_loop_duration: u32,
    pub maximum_loop_duration: u32,
    pub primary_activator_conditions: u32,
    pub activator_state: u32,
    pub bac_entry_primary: u32,
    pub bac_entry_charge: u32,
    pub u_24: u32,
    pub bac_entry_user_connect: u32,
    pub bac_entry_victim_connect: u32,
    pub bac_entry_airborne: u32,
    pub bac_entry_unknown: u32,
    pub random_flag: u32,
    pub ki_cost: u32,
    pub u_44: u32,
    pub u_48: u32,
    pub receiver_link_id: u32,
    pub u_50: u32,
    pub stamina_cost: u32,
    pub u_58: u32,
    pub ki_required: u32,
    pub health_required: u32,
    pub trans_stage: u32,
    pub cus_aura: u32,
    pub u_68: u32,
    pub u_6a: u32,
}

impl Entry {
    /// Blank record with every field zeroed.
    pub fn zeroed() -> Self {
        Self::default()
    }

    pub fn is_leaf(&self) -> bool {
        self.child == NO_ADDRESS
    }

    /// Pre-order position encoded in this entry's address.
    pub fn index(&self) -> Option<usize> {
        address_to_index(self.address)
    }
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.index() {
            Some(index) => write!(f, "Entry {}", index),
            None => write!(f, "Entry @{:#x}", self.address),
        }
    }
}
