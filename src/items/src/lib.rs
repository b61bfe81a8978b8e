//src/items/src/lib.rs
//! Item kinds the hero can carry.
//!
//! Items are plain identifiers: their effects are applied by the hero crate,
//! which owns the stats they touch.

use strum_macros::{Display, EnumString};

/// 背包中的物品种类
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(ascii_case_insensitive)]
pub enum Item {
    /// Restores the hero's heal amount worth of hp
    #[strum(to_string = "healing potion", serialize = "potion")]
    HealingPotion,
}
