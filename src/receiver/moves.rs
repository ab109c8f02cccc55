//! Move records.

use serde::Deserialize;

use super::{EntityKind, NoRelation};
use crate::export::{CsvEntry, cell};
use crate::text::{get_flavor_text, get_generation, get_localized, sanitize_string};
use crate::types::{Effect, FlavorText, Name, NamedResource};

/// Placeholder the API uses inside effect text
const EFFECT_CHANCE_PLACEHOLDER: &str = "$effect_chance";

/// `/move/{id}/` response
#[derive(Debug, Deserialize)]
pub struct MoveResponse {
    /// Move ID
    pub id: i32,
    /// API name
    pub name: String,
    /// Accuracy in percent, absent for moves that never miss
    #[serde(default)]
    pub accuracy: Option<i32>,
    /// Base power, absent for status moves
    #[serde(default)]
    pub power: Option<i32>,
    /// Power points
    #[serde(default)]
    pub pp: Option<i32>,
    /// Priority bracket
    #[serde(default)]
    pub priority: i32,
    /// Chance in percent that the secondary effect triggers
    #[serde(default)]
    pub effect_chance: Option<i32>,
    /// Elemental type
    #[serde(rename = "type", default)]
    pub kind: NamedResource,
    /// Physical, special or status
    #[serde(default)]
    pub damage_class: Option<NamedResource>,
    /// Generation the move was introduced in
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
}

/// Normalized move row
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MoveEntry {
    /// Move ID
    pub id: i32,
    /// Localized name, falling back to the API name
    pub name: String,
    /// Elemental type
    pub kind: String,
    /// Physical, special or status
    pub damage_class: String,
    /// Base power
    pub power: Option<i32>,
    /// Accuracy in percent
    pub accuracy: Option<i32>,
    /// Power points
    pub pp: Option<i32>,
    /// Priority bracket
    pub priority: i32,
    /// Secondary effect chance in percent
    pub effect_chance: Option<i32>,
    /// Generation number, -1 if unknown
    pub generation: i32,
    /// Short effect text with the effect chance filled in
    pub effect: String,
    /// Flavor text for the move's generation
    pub flavor_text: String,
}

/// Entity kind for the `move` endpoint
#[derive(Debug)]
pub struct MoveKind;

impl EntityKind for MoveKind {
    const ENDPOINT: &'static str = "move";

    type Response = MoveResponse;
    type Record = MoveEntry;
    type Relation = NoRelation;

    fn build(response: MoveResponse, lang: &str) -> MoveEntry {
        let generation = get_generation(&response.generation.name);

        let name = get_localized(lang, &response.names)
            .map(|n| n.name.clone())
            .unwrap_or_else(|| response.name.clone());

        let effect = get_localized(lang, &response.effect_entries)
            .map(|e| {
                let text = match response.effect_chance {
                    Some(chance) => e
                        .short_effect
                        .replace(EFFECT_CHANCE_PLACEHOLDER, &chance.to_string()),
                    None => e.short_effect.clone(),
                };
                sanitize_string(&text)
            })
            .unwrap_or_default();

        MoveEntry {
            id: response.id,
            name,
            kind: response.kind.name,
            damage_class: response
                .damage_class
                .map(|class| class.name)
                .unwrap_or_default(),
            power: response.power,
            accuracy: response.accuracy,
            pp: response.pp,
            priority: response.priority,
            effect_chance: response.effect_chance,
            generation,
            effect,
            flavor_text: get_flavor_text(generation, lang, &response.flavor_text_entries),
        }
    }

    fn relations(_record: &MoveEntry) -> Vec<NoRelation> {
        Vec::new()
    }
}

impl CsvEntry for MoveEntry {
    fn header(&self) -> Vec<&'static str> {
        vec![
            "id",
            "name",
            "type",
            "damage_class",
            "power",
            "accuracy",
            "pp",
            "priority",
            "effect_chance",
            "generation",
            "effect",
            "flavor_text",
        ]
    }

    fn to_row(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.name.clone(),
            self.kind.clone(),
            self.damage_class.clone(),
            cell(self.power),
            cell(self.accuracy),
            cell(self.pp),
            self.priority.to_string(),
            cell(self.effect_chance),
            self.generation.to_string(),
            self.effect.clone(),
            self.flavor_text.clone(),
        ]
    }
}
