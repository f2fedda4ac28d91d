//! Generated description text for locations and items.
//!
//! Content may supply several candidate templates per location or item; the
//! narrator picks one at random, fills its placeholders from the variable
//! pool and the session context, and memoizes the result so a given subject
//! reads the same under the same context. Subjects without templates fall
//! back to their static description (still placeholder-rendered, so static
//! text may reference context variables too).

use std::collections::HashMap;

use rand::rngs::StdRng;
use rand::Rng;

use eb_core::{render, BoundedCache, CacheKey, TemplateSet, VariableValue, DEFAULT_CACHE_CAPACITY};

/// The description generator.
#[derive(Debug)]
pub struct Narrator {
    templates: TemplateSet,
    variables: HashMap<String, VariableValue>,
    cache: BoundedCache<String>,
}

impl Narrator {
    /// Build a narrator over the content template pools.
    pub fn new(templates: TemplateSet, variables: HashMap<String, VariableValue>) -> Self {
        Self {
            templates,
            variables,
            cache: BoundedCache::new(DEFAULT_CACHE_CAPACITY),
        }
    }

    /// Describe a location under the given context.
    pub fn describe_location(
        &mut self,
        id: &str,
        fallback: &str,
        context: &[(&str, String)],
        rng: &mut StdRng,
    ) -> String {
        let pool = self.templates.description_templates.get(id).cloned();
        self.describe("location", id, pool, fallback, context, rng)
    }

    /// Describe an item under the given context.
    pub fn describe_item(
        &mut self,
        id: &str,
        fallback: &str,
        context: &[(&str, String)],
        rng: &mut StdRng,
    ) -> String {
        let pool = self.templates.item_templates.get(id).cloned();
        self.describe("item", id, pool, fallback, context, rng)
    }

    /// Drop every memoized description.
    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    fn describe(
        &mut self,
        kind: &str,
        id: &str,
        pool: Option<Vec<String>>,
        fallback: &str,
        context: &[(&str, String)],
        rng: &mut StdRng,
    ) -> String {
        let vars = self.resolve_variables(context, rng);

        let Some(pool) = pool.filter(|p| !p.is_empty()) else {
            return render(fallback, &vars);
        };

        let pairs: Vec<(&str, &str)> = context.iter().map(|(k, v)| (*k, v.as_str())).collect();
        let key = CacheKey::composite(&format!("{kind}:{id}"), &pairs);
        if let Some(hit) = self.cache.get(&key) {
            return hit.clone();
        }

        let template = &pool[rng.random_range(0..pool.len())];
        let text = render(template, &vars);
        self.cache.insert(key, text.clone());
        text
    }

    /// Flatten the variable pool (sampling list values) and overlay the
    /// session context on top.
    fn resolve_variables(
        &self,
        context: &[(&str, String)],
        rng: &mut StdRng,
    ) -> HashMap<String, String> {
        let mut vars: HashMap<String, String> = HashMap::new();
        for (name, value) in &self.variables {
            let resolved = match value {
                VariableValue::Single(s) => s.clone(),
                VariableValue::Choices(choices) if !choices.is_empty() => {
                    choices[rng.random_range(0..choices.len())].clone()
                }
                VariableValue::Choices(_) => continue,
            };
            vars.insert(name.clone(), resolved);
        }
        for (name, value) in context {
            vars.insert((*name).to_string(), value.clone());
        }
        vars
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn narrator() -> Narrator {
        let templates: TemplateSet = serde_json::from_str(
            r#"{
                "description_templates": {
                    "market": [
                        "The market hums with {crowd} in the {time_of_day} air."
                    ]
                },
                "item_templates": {
                    "crystal": ["The crystal glints, {sheen} in the {time_of_day} light."]
                }
            }"#,
        )
        .unwrap();
        let variables: HashMap<String, VariableValue> = serde_json::from_str(
            r#"{"crowd": ["traders", "pilgrims"], "sheen": "opaline"}"#,
        )
        .unwrap();
        Narrator::new(templates, variables)
    }

    fn context() -> Vec<(&'static str, String)> {
        vec![("time_of_day", "morning".to_string())]
    }

    #[test]
    fn renders_location_template_with_variables() {
        let mut narrator = narrator();
        let mut rng = StdRng::seed_from_u64(3);
        let text = narrator.describe_location("market", "A market.", &context(), &mut rng);
        assert!(text.contains("morning"));
        assert!(text.contains("traders") || text.contains("pilgrims"));
    }

    #[test]
    fn same_context_is_memoized() {
        let mut narrator = narrator();
        let mut rng = StdRng::seed_from_u64(3);
        let first = narrator.describe_location("market", "A market.", &context(), &mut rng);
        let second = narrator.describe_location("market", "A market.", &context(), &mut rng);
        assert_eq!(first, second);
    }

    #[test]
    fn different_context_regenerates() {
        let mut narrator = narrator();
        let mut rng = StdRng::seed_from_u64(3);
        let morning = narrator.describe_location("market", "A market.", &context(), &mut rng);
        let dusk = narrator.describe_location(
            "market",
            "A market.",
            &[("time_of_day", "dusk".to_string())],
            &mut rng,
        );
        assert!(morning.contains("morning"));
        assert!(dusk.contains("dusk"));
    }

    #[test]
    fn no_template_falls_back_to_static_text() {
        let mut narrator = narrator();
        let mut rng = StdRng::seed_from_u64(3);
        let text = narrator.describe_location("alley", "A narrow alley.", &context(), &mut rng);
        assert_eq!(text, "A narrow alley.");
    }

    #[test]
    fn item_templates_render() {
        let mut narrator = narrator();
        let mut rng = StdRng::seed_from_u64(3);
        let text = narrator.describe_item("crystal", "A crystal.", &context(), &mut rng);
        assert!(text.contains("opaline"));
    }

    #[test]
    fn clear_cache_forces_regeneration() {
        let mut narrator = narrator();
        let mut rng = StdRng::seed_from_u64(3);
        narrator.describe_location("market", "A market.", &context(), &mut rng);
        narrator.clear_cache();
        // No assertion on the text (the template draw is random); the call
        // must simply succeed against an empty cache.
        let text = narrator.describe_location("market", "A market.", &context(), &mut rng);
        assert!(!text.is_empty());
    }
}
