//! Card catalog: the pool a side deals from.
//!
//! The `CardCatalog` stores immutable templates and produces fresh
//! instances on demand. Each side of a battle draws from its own catalog.

use std::sync::Arc;

use rustc_hash::FxHashMap;
use tracing::debug;

use super::definition::CardTemplate;
use super::instance::{CardInstance, InstanceAllocator};
use crate::core::GameRng;
use crate::error::BattleError;

/// Flat in-memory pool of card templates.
///
/// ## Example
///
/// ```
/// use battle_ccg::cards::{CardCatalog, CardTemplate, CardType, InstanceAllocator};
/// use battle_ccg::core::GameRng;
///
/// let mut catalog = CardCatalog::new();
/// catalog.register(CardTemplate::new("Sword", CardType::Attack).with_attack(12));
///
/// let mut rng = GameRng::new(1);
/// let mut alloc = InstanceAllocator::new();
/// let card = catalog.draw(&mut rng, &mut alloc).unwrap();
/// assert_eq!(card.name(), "Sword");
/// ```
#[derive(Clone, Debug, Default)]
pub struct CardCatalog {
    templates: Vec<Arc<CardTemplate>>,
    by_name: FxHashMap<String, usize>,
}

impl CardCatalog {
    /// Create a new empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog from templates.
    ///
    /// Panics if two templates share a name.
    pub fn from_templates(templates: impl IntoIterator<Item = CardTemplate>) -> Self {
        let mut catalog = Self::new();
        for template in templates {
            catalog.register(template);
        }
        catalog
    }

    /// Load a catalog from a JSON array of templates.
    pub fn from_json(json: &str) -> Result<Self, BattleError> {
        let templates: Vec<CardTemplate> = serde_json::from_str(json)?;
        let mut catalog = Self::new();
        for template in templates {
            catalog.try_register(template)?;
        }
        debug!(templates = catalog.len(), "loaded card catalog");
        Ok(catalog)
    }

    /// Register a template.
    ///
    /// Panics if a template with the same name already exists.
    pub fn register(&mut self, template: CardTemplate) {
        if self.by_name.contains_key(&template.name) {
            panic!("Template {:?} already registered", template.name);
        }
        self.insert(template);
    }

    /// Register a template, reporting a duplicate name as an error.
    pub fn try_register(&mut self, template: CardTemplate) -> Result<(), BattleError> {
        if self.by_name.contains_key(&template.name) {
            return Err(BattleError::DuplicateTemplate(template.name));
        }
        self.insert(template);
        Ok(())
    }

    fn insert(&mut self, template: CardTemplate) {
        self.by_name.insert(template.name.clone(), self.templates.len());
        self.templates.push(Arc::new(template));
    }

    /// Get a template by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Arc<CardTemplate>> {
        self.by_name.get(name).map(|&index| &self.templates[index])
    }

    /// Create a fresh instance of a named template.
    pub fn instantiate(&self, name: &str, alloc: &mut InstanceAllocator) -> Option<CardInstance> {
        self.get(name)
            .map(|template| CardInstance::new(alloc.allocate(), Arc::clone(template)))
    }

    /// Draw a fresh instance of a uniformly random template.
    ///
    /// Returns `None` if the catalog is empty.
    pub fn draw(&self, rng: &mut GameRng, alloc: &mut InstanceAllocator) -> Option<CardInstance> {
        let template = rng.choose(&self.templates)?;
        Some(CardInstance::new(alloc.allocate(), Arc::clone(template)))
    }

    /// Check if a template name is registered.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    /// Get the number of templates.
    #[must_use]
    pub fn len(&self) -> usize {
        self.templates.len()
    }

    /// Check if the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// Iterate over templates in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &CardTemplate> {
        self.templates.iter().map(|t| t.as_ref())
    }
}
