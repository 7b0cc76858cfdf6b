//! Recipe cost quotes: what a station costs and how much of it a player holds.

use std::collections::BTreeMap;

use engine_core::{DimensionId, ItemStack};
use planets::{IngredientHolder, ItemMatcher, RecipeBook};
use serde::{Deserialize, Serialize};

/// One ingredient line of a quote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngredientQuote {
    /// Canonical stack for display, already carrying the required count.
    pub display: Option<ItemStack>,
    pub required: u32,
    pub available: u32,
}

impl IngredientQuote {
    pub fn is_satisfied(&self) -> bool {
        self.available >= self.required
    }
}

/// Ingredient lines per target dimension, computed against one inventory at one moment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostQuote {
    entries: BTreeMap<DimensionId, Vec<IngredientQuote>>,
}

impl CostQuote {
    /// Lines for `dimension`. Empty when no recipe targets it.
    pub fn get(&self, dimension: &DimensionId) -> &[IngredientQuote] {
        self.entries.get(dimension).map(Vec::as_slice).unwrap_or(&[])
    }

    /// True iff every line for `dimension` is covered. A dimension without recipes costs nothing.
    pub fn is_feasible(&self, dimension: &DimensionId) -> bool {
        self.get(dimension).iter().all(IngredientQuote::is_satisfied)
    }

    pub fn dimensions(&self) -> impl Iterator<Item = &DimensionId> {
        self.entries.keys()
    }
}

/// Computes cost quotes from the recipe book.
#[derive(Debug, Clone, Copy)]
pub struct RecipeCostResolver<'a> {
    recipes: &'a RecipeBook,
}

impl<'a> RecipeCostResolver<'a> {
    pub fn new(recipes: &'a RecipeBook) -> Self {
        Self { recipes }
    }

    /// Quote every recipe. `available` returns the inventory's total count for a matcher.
    pub fn quote(&self, available: impl Fn(&ItemMatcher) -> u32) -> CostQuote {
        let mut entries: BTreeMap<DimensionId, Vec<IngredientQuote>> = BTreeMap::new();
        for recipe in self.recipes.recipes() {
            for holder in &recipe.ingredients {
                entries
                    .entry(recipe.dimension.clone())
                    .or_default()
                    .push(quote_line(holder, &available));
            }
        }
        CostQuote { entries }
    }

    /// Quote only the recipes targeting `dimension`.
    pub fn quote_dimension(
        &self,
        dimension: &DimensionId,
        available: impl Fn(&ItemMatcher) -> u32,
    ) -> Vec<IngredientQuote> {
        self.recipes
            .for_dimension(dimension)
            .flat_map(|recipe| recipe.ingredients.iter())
            .map(|holder| quote_line(holder, &available))
            .collect()
    }

    /// Ingredient lines consumed when building in `dimension`.
    pub fn cost(&self, dimension: &DimensionId) -> Vec<IngredientHolder> {
        self.recipes
            .for_dimension(dimension)
            .flat_map(|recipe| recipe.ingredients.iter().cloned())
            .collect()
    }
}

fn quote_line(holder: &IngredientHolder, available: &impl Fn(&ItemMatcher) -> u32) -> IngredientQuote {
    IngredientQuote {
        display: holder.ingredient.display_stack(holder.count),
        required: holder.count,
        available: available(&holder.ingredient),
    }
}
