//! Sheet schema definitions for the crafting workbook

use super::types::*;

pub const CREATURE_TYPE: &str = "Creature Type";
pub const COMPONENT: &str = "Component";
pub const NAME: &str = "Name";
pub const ITEM_NAME: &str = "Item Name";

pub static ESSENCE: SheetSchema = SheetSchema {
    name: "Essence",
    columns: &[],
};

pub static HARVEST: SheetSchema = SheetSchema {
    name: "Harvest Table",
    columns: &[
        Column::new(ColumnRole::CreatureType, CREATURE_TYPE),
        Column::new(ColumnRole::Component, COMPONENT),
    ],
};

pub static RECIPES: SheetSchema = SheetSchema {
    name: "Recipes",
    columns: &[
        // Some workbooks label the item column "Item Name"
        Column::new(ColumnRole::Name, NAME).or(&[ITEM_NAME]),
        Column::new(ColumnRole::CreatureType, CREATURE_TYPE),
        Column::new(ColumnRole::Component, COMPONENT),
    ],
};
