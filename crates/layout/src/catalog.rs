//! Static catalog of placeable entity templates.
//!
//! New entities are stamped from these records; the catalog itself is never
//! mutated at runtime.

use serde::Serialize;

use crate::entity::{EntityId, EntityType, PlacedEntity};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Template {
    #[serde(rename = "type")]
    pub entity_type: EntityType,
    pub name: &'static str,
    pub size: i32,
    pub icon: &'static str,
    pub is_decoration: bool,
}

impl Template {
    const fn building(
        entity_type: EntityType,
        name: &'static str,
        size: i32,
        icon: &'static str,
    ) -> Self {
        Self {
            entity_type,
            name,
            size,
            icon,
            is_decoration: false,
        }
    }

    const fn decoration(
        entity_type: EntityType,
        name: &'static str,
        size: i32,
        icon: &'static str,
    ) -> Self {
        Self {
            entity_type,
            name,
            size,
            icon,
            is_decoration: true,
        }
    }

    /// Stamp a new entity from this template at the given cell.
    pub fn instantiate(&self, id: EntityId, grid_x: i32, grid_y: i32) -> PlacedEntity {
        PlacedEntity {
            id,
            entity_type: self.entity_type,
            name: self.name.to_string(),
            grid_x,
            grid_y,
            size: self.size,
            icon: self.icon.to_string(),
            is_decoration: self.is_decoration,
        }
    }
}

static TEMPLATES: [Template; 18] = [
    Template::building(EntityType::Home, "Home", 2, "home"),
    Template::building(EntityType::Guild, "Guild Hall", 2, "guild"),
    Template::building(EntityType::Store, "Store", 2, "store"),
    Template::building(EntityType::Market, "Market", 3, "market"),
    Template::building(EntityType::Bank, "Bank", 3, "bank"),
    Template::building(EntityType::Hospital, "Hospital", 3, "hospital"),
    Template::building(EntityType::Police, "Police Station", 2, "police"),
    Template::building(EntityType::Gym, "Gym", 2, "gym"),
    Template::building(EntityType::School, "School", 2, "school"),
    Template::building(EntityType::Library, "Library", 2, "library"),
    Template::decoration(EntityType::Park, "Park", 2, "park"),
    Template::decoration(EntityType::Fountain, "Fountain", 1, "fountain"),
    Template::decoration(EntityType::Bush, "Bush", 1, "bush"),
    Template::decoration(EntityType::Tree, "Tree", 1, "tree"),
    Template::decoration(EntityType::Tree2, "Pine Tree", 1, "tree2"),
    Template::building(EntityType::Road, "Road", 1, "road"),
    Template::building(EntityType::Tower2, "Office Tower", 2, "tower2"),
    Template::building(EntityType::Tower3, "Sky Tower", 2, "tower3"),
];

pub fn list_templates() -> &'static [Template] {
    &TEMPLATES
}

pub fn find_template(entity_type: EntityType) -> Option<&'static Template> {
    TEMPLATES.iter().find(|t| t.entity_type == entity_type)
}
