//! Entity archetypes and the chained-effect trigger table

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::CatalogError;

/// Catalog shipped with the crate
const BUILTIN_CATALOG: &str = include_str!("../data/catalog.json");

/// An entity archetype. Placed on cells by value.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    pub id: String,
    pub name: String,
    pub sprite: String,
    pub damage: u32,
    /// Placement multiplicity; only meaningful in the catalog
    pub count: u32,
    pub reward_parts: Option<u32>,
    pub shield_bonus: Option<u32>,
    pub shield_surge: bool,
    pub alert: Option<String>,
}

impl Entity {
    /// Parts salvaged on defeat: the override when positive, else the attack value
    pub fn reward(&self) -> u32 {
        match self.reward_parts {
            Some(parts) if parts > 0 => parts,
            _ => self.damage,
        }
    }
}

/// Boolean-like flag as found in tabular sources ("yes", 1, true, ...)
#[derive(Clone, Debug, Deserialize)]
#[serde(untagged)]
pub enum Flag {
    Bool(bool),
    Int(i64),
    Text(String),
}

impl Flag {
    pub fn is_set(&self) -> bool {
        match self {
            Flag::Bool(b) => *b,
            Flag::Int(n) => *n != 0,
            Flag::Text(s) => matches!(
                s.trim().to_ascii_lowercase().as_str(),
                "true" | "yes" | "y" | "1" | "x"
            ),
        }
    }
}

/// One archetype record as supplied by the external catalog source
#[derive(Clone, Debug, Default, Deserialize)]
pub struct EntityRecord {
    pub id: Option<String>,
    pub name: Option<String>,
    pub sprite_name: Option<String>,
    #[serde(default)]
    pub damage: u32,
    #[serde(default)]
    pub count: u32,
    pub shield_bonus: Option<u32>,
    pub part_bonus: Option<u32>,
    #[serde(default)]
    pub shield_surge: Option<Flag>,
    pub alert_text: Option<String>,
}

impl EntityRecord {
    fn into_entity(self, index: usize) -> Result<Entity, CatalogError> {
        let id = self
            .id
            .filter(|s| !s.trim().is_empty())
            .ok_or(CatalogError::MissingField { index, field: "id" })?;
        let sprite = self
            .sprite_name
            .filter(|s| !s.trim().is_empty())
            .ok_or(CatalogError::MissingField { index, field: "sprite_name" })?;

        Ok(Entity {
            name: self.name.unwrap_or_else(|| id.clone()),
            id,
            sprite,
            damage: self.damage,
            count: self.count,
            reward_parts: self.part_bonus,
            shield_bonus: self.shield_bonus,
            shield_surge: self.shield_surge.is_some_and(|f| f.is_set()),
            alert: self.alert_text.filter(|s| !s.trim().is_empty()),
        })
    }
}

/// Archetypes the generator requires by role
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roles {
    pub boss: String,
    pub guard: String,
}

impl Default for Roles {
    fn default() -> Self {
        Self {
            boss: "E11".to_string(),
            guard: "E10".to_string(),
        }
    }
}

/// Board-wide effect fired when an archetype is defeated
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "effect", rename_all = "snake_case")]
pub enum TriggerEffect {
    /// Reveal every cell holding one of the target archetypes
    Reveal { targets: Vec<String> },
    /// Zero the target's damage and set its reward, without revealing it
    Neutralize { target: String, reward_parts: u32 },
}

/// Trigger table entry: archetype id -> effect
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trigger {
    pub on_defeat: String,
    #[serde(flatten)]
    pub effect: TriggerEffect,
}

/// On-disk catalog
#[derive(Deserialize)]
struct CatalogFile {
    #[serde(default)]
    roles: Roles,
    #[serde(default)]
    triggers: Vec<Trigger>,
    entities: Vec<EntityRecord>,
}

/// Immutable, validated archetype list
#[derive(Clone, Debug)]
pub struct Catalog {
    entities: Vec<Entity>,
    roles: Roles,
    triggers: Vec<Trigger>,
}

impl Catalog {
    /// Validate records and assemble the catalog
    pub fn new(
        records: Vec<EntityRecord>,
        roles: Roles,
        triggers: Vec<Trigger>,
    ) -> Result<Self, CatalogError> {
        let mut entities: Vec<Entity> = Vec::with_capacity(records.len());
        for (index, record) in records.into_iter().enumerate() {
            let entity = record.into_entity(index)?;
            if entities.iter().any(|e| e.id == entity.id) {
                return Err(CatalogError::DuplicateId(entity.id));
            }
            entities.push(entity);
        }

        let known = |id: &str| entities.iter().any(|e| e.id == id);
        for trigger in &triggers {
            let referenced: Vec<&str> = match &trigger.effect {
                TriggerEffect::Reveal { targets } => targets.iter().map(String::as_str).collect(),
                TriggerEffect::Neutralize { target, .. } => vec![target.as_str()],
            };
            if let Some(id) = std::iter::once(trigger.on_defeat.as_str())
                .chain(referenced)
                .find(|&id| !known(id))
            {
                return Err(CatalogError::UnknownTriggerTarget(id.to_string()));
            }
        }

        Ok(Self {
            entities,
            roles,
            triggers,
        })
    }

    /// Parse a catalog from JSON text
    pub fn from_json(content: &str) -> anyhow::Result<Self> {
        let file: CatalogFile = serde_json::from_str(content)?;
        Ok(Self::new(file.entities, file.roles, file.triggers)?)
    }

    /// Load from JSON file
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// The catalog bundled with the crate
    pub fn builtin() -> anyhow::Result<Self> {
        Self::from_json(BUILTIN_CATALOG)
    }

    /// All archetypes in catalog order
    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    pub fn roles(&self) -> &Roles {
        &self.roles
    }

    pub fn triggers(&self) -> &[Trigger] {
        &self.triggers
    }

    /// Look up an archetype by id
    pub fn get(&self, id: &str) -> Option<&Entity> {
        self.entities.iter().find(|e| e.id == id)
    }

    pub fn boss(&self) -> Option<&Entity> {
        self.get(&self.roles.boss)
    }

    pub fn guard(&self) -> Option<&Entity> {
        self.get(&self.roles.guard)
    }

    fn has_role(&self, entity: &Entity) -> bool {
        entity.id == self.roles.boss || entity.id == self.roles.guard
    }

    /// Archetypes distributed by count, in catalog order (boss and guard excluded)
    pub fn placeable(&self) -> impl Iterator<Item = &Entity> + '_ {
        self.entities.iter().filter(move |e| !self.has_role(e))
    }

    /// First archetype flagged as a shield surge pickup
    pub fn surge_archetype(&self) -> Option<&Entity> {
        self.placeable().find(|e| e.shield_surge)
    }

    /// Effects fired by defeating the given archetype
    pub fn effects_for<'a>(&'a self, id: &'a str) -> impl Iterator<Item = &'a TriggerEffect> + 'a {
        self.triggers
            .iter()
            .filter(move |t| t.on_defeat == id)
            .map(|t| &t.effect)
    }
}
