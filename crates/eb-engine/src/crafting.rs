//! Crafting: recipe lookup, ingredient checks, atomic consumption.

use std::collections::HashMap;

use eb_core::RecipeRecord;

/// Why a craft attempt failed. The display strings are the player-facing
/// messages.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CraftError {
    /// No recipe with that id exists.
    #[error("You don't know that recipe.")]
    UnknownRecipe,
    /// The recipe is bound to a different location.
    #[error("You must be at the {0} to craft this.")]
    WrongLocation(String),
    /// The inventory is missing at least one required ingredient.
    #[error("You don't have all the required ingredients.")]
    MissingIngredients,
}

/// The recipe book.
#[derive(Debug, Clone, Default)]
pub struct CraftingBook {
    recipes: HashMap<String, RecipeRecord>,
}

impl CraftingBook {
    /// Build the book over the content recipes.
    pub fn new(recipes: HashMap<String, RecipeRecord>) -> Self {
        Self { recipes }
    }

    /// Look up a recipe by id.
    pub fn get(&self, id: &str) -> Option<&RecipeRecord> {
        self.recipes.get(id)
    }

    /// Every known recipe id, sorted.
    pub fn ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.recipes.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    /// Recipes craftable with the given inventory at the given location,
    /// sorted by id.
    pub fn available<'a>(
        &'a self,
        inventory: &[String],
        location: &str,
    ) -> Vec<(&'a str, &'a RecipeRecord)> {
        let mut out: Vec<(&str, &RecipeRecord)> = self
            .recipes
            .iter()
            .filter(|(_, recipe)| {
                location_matches(recipe, location) && has_ingredients(recipe, inventory)
            })
            .map(|(id, recipe)| (id.as_str(), recipe))
            .collect();
        out.sort_unstable_by_key(|(id, _)| *id);
        out
    }

    /// Attempt a craft. On success exactly the ingredient ids are removed
    /// from `inventory` and the result item id is returned; on failure the
    /// inventory is untouched.
    pub fn craft(
        &self,
        id: &str,
        inventory: &mut Vec<String>,
        location: &str,
    ) -> Result<&str, CraftError> {
        let recipe = self.recipes.get(id).ok_or(CraftError::UnknownRecipe)?;

        if !location_matches(recipe, location) {
            // Checked above; required_location must be present here.
            let required = recipe.required_location.clone().unwrap_or_default();
            return Err(CraftError::WrongLocation(required));
        }
        if !has_ingredients(recipe, inventory) {
            return Err(CraftError::MissingIngredients);
        }

        for ingredient in &recipe.ingredients {
            if let Some(pos) = inventory.iter().position(|i| i == ingredient) {
                inventory.remove(pos);
            }
        }
        Ok(&recipe.result)
    }

    /// Player-facing details for one recipe.
    pub fn details(&self, id: &str) -> Option<String> {
        let recipe = self.recipes.get(id)?;
        let mut out = format!(
            "Recipe: {}\n{}\nIngredients: {}\nCreates: {}",
            recipe.name,
            recipe.description,
            recipe.ingredients.join(", "),
            recipe.result
        );
        if let Some(location) = &recipe.required_location {
            out.push_str(&format!("\nRequires location: {location}"));
        }
        Some(out)
    }
}

fn location_matches(recipe: &RecipeRecord, location: &str) -> bool {
    recipe
        .required_location
        .as_deref()
        .is_none_or(|required| required == location)
}

/// Every ingredient occurrence must be matched: a recipe listing an id twice
/// needs two copies in the inventory.
fn has_ingredients(recipe: &RecipeRecord, inventory: &[String]) -> bool {
    let mut required: HashMap<&str, usize> = HashMap::new();
    for ingredient in &recipe.ingredients {
        *required.entry(ingredient.as_str()).or_insert(0) += 1;
    }
    required.into_iter().all(|(ingredient, count)| {
        inventory.iter().filter(|i| *i == ingredient).count() >= count
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn book() -> CraftingBook {
        let recipes: HashMap<String, RecipeRecord> = serde_json::from_str(
            r#"{
                "glow_lantern": {
                    "name": "Glow Lantern",
                    "ingredients": ["crystal", "lantern_frame"],
                    "result": "glowing_lantern",
                    "description": "A lantern that never burns out."
                },
                "double_charm": {
                    "name": "Double Charm",
                    "ingredients": ["feather", "feather"],
                    "result": "charm",
                    "description": "Takes two feathers."
                },
                "forge_blade": {
                    "name": "Forged Blade",
                    "ingredients": ["iron_ingot"],
                    "result": "blade",
                    "description": "Needs a forge.",
                    "required_location": "forge"
                }
            }"#,
        )
        .unwrap();
        CraftingBook::new(recipes)
    }

    fn inventory(ids: &[&str]) -> Vec<String> {
        ids.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn craft_consumes_exactly_the_ingredients() {
        let book = book();
        let mut inv = inventory(&["crystal", "map", "lantern_frame"]);
        let result = book.craft("glow_lantern", &mut inv, "market").unwrap();
        assert_eq!(result, "glowing_lantern");
        assert_eq!(inv, vec!["map"]);
    }

    #[test]
    fn missing_ingredient_leaves_inventory_unchanged() {
        let book = book();
        let mut inv = inventory(&["crystal"]);
        let err = book.craft("glow_lantern", &mut inv, "market").unwrap_err();
        assert_eq!(err, CraftError::MissingIngredients);
        assert_eq!(inv, vec!["crystal"]);
    }

    #[test]
    fn duplicate_ingredients_need_multiplicity() {
        let book = book();
        let mut inv = inventory(&["feather"]);
        assert_eq!(
            book.craft("double_charm", &mut inv, "market"),
            Err(CraftError::MissingIngredients)
        );

        let mut inv = inventory(&["feather", "feather"]);
        assert_eq!(book.craft("double_charm", &mut inv, "market"), Ok("charm"));
        assert!(inv.is_empty());
    }

    #[test]
    fn location_bound_recipes() {
        let book = book();
        let mut inv = inventory(&["iron_ingot"]);
        assert_eq!(
            book.craft("forge_blade", &mut inv, "market"),
            Err(CraftError::WrongLocation("forge".to_string()))
        );
        assert_eq!(inv, vec!["iron_ingot"]);

        assert_eq!(book.craft("forge_blade", &mut inv, "forge"), Ok("blade"));
    }

    #[test]
    fn unknown_recipe() {
        let book = book();
        let mut inv = inventory(&[]);
        assert_eq!(
            book.craft("philosophers_stone", &mut inv, "market"),
            Err(CraftError::UnknownRecipe)
        );
    }

    #[test]
    fn available_filters_by_inventory_and_location() {
        let book = book();
        let inv = inventory(&["crystal", "lantern_frame", "iron_ingot"]);

        let at_market: Vec<&str> = book
            .available(&inv, "market")
            .into_iter()
            .map(|(id, _)| id)
            .collect();
        assert_eq!(at_market, vec!["glow_lantern"]);

        let at_forge: Vec<&str> = book
            .available(&inv, "forge")
            .into_iter()
            .map(|(id, _)| id)
            .collect();
        assert_eq!(at_forge, vec!["forge_blade", "glow_lantern"]);
    }

    #[test]
    fn details_mention_location_requirement() {
        let book = book();
        let details = book.details("forge_blade").unwrap();
        assert!(details.contains("Forged Blade"));
        assert!(details.contains("Requires location: forge"));
        assert!(book.details("philosophers_stone").is_none());
    }
}
