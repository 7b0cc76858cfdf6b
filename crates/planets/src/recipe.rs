//! Space station recipes: which items a station in a given dimension costs.

use std::path::Path;

use engine_core::{DimensionId, ItemId, ItemStack};
use serde::{Deserialize, Serialize};

use crate::{read_ron, CatalogError};

/// Accepts stacks whose item is one of `items`. Counts are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemMatcher {
    pub items: Vec<ItemId>,
}

impl ItemMatcher {
    pub fn item(item: impl Into<ItemId>) -> Self {
        Self {
            items: vec![item.into()],
        }
    }

    pub fn any_of(items: impl IntoIterator<Item = ItemId>) -> Self {
        Self {
            items: items.into_iter().collect(),
        }
    }

    pub fn test(&self, stack: &ItemStack) -> bool {
        !stack.is_empty() && self.items.contains(&stack.item)
    }

    /// Canonical stack shown in the menu: the first accepted item with `count`.
    pub fn display_stack(&self, count: u32) -> Option<ItemStack> {
        self.items.first().map(|item| ItemStack::new(item.clone(), count))
    }
}

/// One ingredient line: a matcher and how many matching items are consumed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngredientHolder {
    pub ingredient: ItemMatcher,
    pub count: u32,
}

impl IngredientHolder {
    pub fn new(ingredient: ItemMatcher, count: u32) -> Self {
        Self { ingredient, count }
    }
}

/// Cost of building a station in `dimension`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpaceStationRecipe {
    pub dimension: DimensionId,
    pub ingredients: Vec<IngredientHolder>,
}

/// Every station recipe, in authoring order.
#[derive(Debug, Clone, Default)]
pub struct RecipeBook {
    recipes: Vec<SpaceStationRecipe>,
}

impl RecipeBook {
    pub fn new(recipes: Vec<SpaceStationRecipe>) -> Self {
        Self { recipes }
    }

    /// Load a RON list of recipes.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let recipes: Vec<SpaceStationRecipe> = read_ron(path)?;
        log::info!("Loaded {} space station recipes from {:?}", recipes.len(), path);
        Ok(Self::new(recipes))
    }

    /// One recipe per orbit of the built-in solar system.
    pub fn defaults() -> Self {
        let recipe = |orbit: &str, lines: &[(&str, u32)]| SpaceStationRecipe {
            dimension: DimensionId::new(orbit),
            ingredients: lines
                .iter()
                .map(|(item, count)| IngredientHolder::new(ItemMatcher::item(*item), *count))
                .collect(),
        };
        Self::new(vec![
            recipe("earth_orbit", &[("orbital:steel_ingot", 32), ("orbital:iron_plate", 16)]),
            recipe("moon_orbit", &[("orbital:steel_ingot", 32), ("orbital:desh_plate", 16)]),
            recipe("mars_orbit", &[("orbital:desh_ingot", 32), ("orbital:ostrum_plate", 16)]),
            recipe("venus_orbit", &[("orbital:ostrum_ingot", 32), ("orbital:calorite_plate", 16)]),
            recipe("mercury_orbit", &[("orbital:ostrum_ingot", 32), ("orbital:calorite_plate", 16)]),
            recipe("glacio_orbit", &[("orbital:calorite_ingot", 48), ("orbital:ice_shard", 24)]),
        ])
    }

    pub fn recipes(&self) -> &[SpaceStationRecipe] {
        &self.recipes
    }

    /// Recipes whose target is `dimension`.
    pub fn for_dimension<'a>(&'a self, dimension: &'a DimensionId) -> impl Iterator<Item = &'a SpaceStationRecipe> {
        self.recipes.iter().filter(move |r| &r.dimension == dimension)
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }
}
