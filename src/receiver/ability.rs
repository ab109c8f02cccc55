//! Ability records and the Pokémon -> ability relations.

use serde::Deserialize;

use super::EntityKind;
use crate::export::CsvEntry;
use crate::text::{get_flavor_text, get_generation, get_localized, get_url_id, sanitize_string};
use crate::types::{Effect, FlavorText, Name, NamedResource};

/// `/ability/{id}/` response
#[derive(Debug, Deserialize)]
pub struct AbilityResponse {
    /// Ability ID
    pub id: i32,
    /// API name
    pub name: String,
    /// Generation the ability was introduced in
    #[serde(default)]
    pub generation: NamedResource,
    /// Localized effect descriptions
    #[serde(default)]
    pub effect_entries: Vec<Effect>,
    /// Localized flavor text per version group
    #[serde(default)]
    pub flavor_text_entries: Vec<FlavorText>,
    /// Localized names
    #[serde(default)]
    pub names: Vec<Name>,
    /// Pokémon that can have this ability
    #[serde(default)]
    pub pokemon: Vec<AbilityPokemon>,
}

/// A Pokémon that can have the ability
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct AbilityPokemon {
    /// Whether this is the Pokémon's hidden ability
    #[serde(default)]
    pub is_hidden: bool,
    /// Ability slot on the Pokémon
    pub slot: i32,
    /// The Pokémon
    pub pokemon: NamedResource,
}

/// Normalized ability row
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AbilityEntry {
    /// Ability ID
    pub id: i32,
    /// Localized name, falling back to the API name
    pub name: String,
    /// Generation number, -1 if unknown
    pub generation: i32,
    /// Short effect text
    pub effect: String,
    /// Flavor text for the ability's generation
    pub flavor_text: String,
    /// Pokémon references, kept for relation projection
    pub pokemon: Vec<AbilityPokemon>,
}

/// Pokémon -> ability join row
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AbilityRelation {
    /// Pokémon ID, -1 if the URL carried no numeric ID
    pub pokemon_id: i32,
    /// Ability ID
    pub ability_id: i32,
    /// Ability slot on the Pokémon
    pub slot: i32,
    /// Whether this is the Pokémon's hidden ability
    pub is_hidden: bool,
}

/// Entity kind for the `ability` endpoint
#[derive(Debug)]
pub struct AbilityKind;

impl EntityKind for AbilityKind {
    const ENDPOINT: &'static str = "ability";

    type Response = AbilityResponse;
    type Record = AbilityEntry;
    type Relation = AbilityRelation;

    fn build(response: AbilityResponse, lang: &str) -> AbilityEntry {
        let generation = get_generation(&response.generation.name);

        AbilityEntry {
            id: response.id,
            name: get_localized(lang, &response.names)
                .map(|n| n.name.clone())
                .unwrap_or(response.name),
            generation,
            effect: get_localized(lang, &response.effect_entries)
                .map(|e| sanitize_string(&e.short_effect))
                .unwrap_or_default(),
            flavor_text: get_flavor_text(generation, lang, &response.flavor_text_entries),
            pokemon: response.pokemon,
        }
    }

    fn relations(record: &AbilityEntry) -> Vec<AbilityRelation> {
        record
            .pokemon
            .iter()
            .map(|holder| AbilityRelation {
                pokemon_id: get_url_id(&holder.pokemon.url),
                ability_id: record.id,
                slot: holder.slot,
                is_hidden: holder.is_hidden,
            })
            .collect()
    }
}

impl CsvEntry for AbilityEntry {
    fn header(&self) -> Vec<&'static str> {
        vec!["id", "name", "generation", "effect", "flavor_text"]
    }

    fn to_row(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.name.clone(),
            self.generation.to_string(),
            self.effect.clone(),
            self.flavor_text.clone(),
        ]
    }
}

impl CsvEntry for AbilityRelation {
    fn header(&self) -> Vec<&'static str> {
        vec!["pokemon_id", "ability_id", "slot", "is_hidden"]
    }

    fn to_row(&self) -> Vec<String> {
        vec![
            self.pokemon_id.to_string(),
            self.ability_id.to_string(),
            self.slot.to_string(),
            self.is_hidden.to_string(),
        ]
    }
}
