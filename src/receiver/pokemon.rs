//! Pokémon records and the move relations derived from their learnsets.

use serde::Deserialize;

use super::EntityKind;
use crate::export::{CsvEntry, cell};
use crate::text::{get_origin_generation, get_url_id, resolve_version_group};
use crate::types::NamedResource;

/// `/pokemon/{id}/` response
#[derive(Debug, Deserialize)]
pub struct PokemonResponse {
    /// National dex number
    pub id: i32,
    /// API name
    pub name: String,
    /// Height in decimetres
    #[serde(default)]
    pub height: Option<i32>,
    /// Weight in hectograms
    #[serde(default)]
    pub weight: Option<i32>,
    /// Base experience yield
    #[serde(default)]
    pub base_experience: Option<i32>,
    /// Types, keyed by slot
    #[serde(default)]
    pub types: Vec<PokemonType>,
    /// Base stats
    #[serde(default)]
    pub stats: Vec<PokemonStat>,
    /// Learnable moves
    #[serde(default)]
    pub moves: Vec<PokemonMove>,
    /// Sprite URLs
    #[serde(default)]
    pub sprites: Sprites,
}

/// One of a Pokémon's types
#[derive(Debug, Deserialize)]
pub struct PokemonType {
    /// 1 for the primary type, 2 for the secondary
    pub slot: i32,
    /// The type
    #[serde(rename = "type")]
    pub kind: NamedResource,
}

/// One base stat
#[derive(Debug, Deserialize)]
pub struct PokemonStat {
    /// Base value
    pub base_stat: i32,
    /// Which stat
    pub stat: NamedResource,
}

/// A move in a Pokémon's learnset
#[derive(Debug, Deserialize)]
pub struct PokemonMove {
    /// The move
    #[serde(rename = "move")]
    pub move_ref: NamedResource,
    /// How and when the move is learned, per version group
    #[serde(default)]
    pub version_group_details: Vec<VersionGroupDetail>,
}

/// Learn method and level for one version group
#[derive(Debug, Deserialize)]
pub struct VersionGroupDetail {
    /// Level the move is learned at (0 for non-level-up methods)
    #[serde(default)]
    pub level_learned_at: i32,
    /// Learn method, e.g. `level-up` or `machine`
    pub move_learn_method: NamedResource,
    /// Version group the detail applies to
    pub version_group: NamedResource,
}

/// Sprite URLs; only the default front sprite is exported
#[derive(Debug, Default, Deserialize)]
pub struct Sprites {
    /// Default front sprite
    #[serde(default)]
    pub front_default: Option<String>,
}

/// Base stats by name
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BaseStats {
    /// Hit points
    pub hp: Option<i32>,
    /// Attack
    pub attack: Option<i32>,
    /// Defense
    pub defense: Option<i32>,
    /// Special attack
    pub special_attack: Option<i32>,
    /// Special defense
    pub special_defense: Option<i32>,
    /// Speed
    pub speed: Option<i32>,
}

impl BaseStats {
    fn from_stats(stats: &[PokemonStat]) -> Self {
        let mut base = BaseStats::default();
        for stat in stats {
            let value = Some(stat.base_stat);
            match stat.stat.name.as_str() {
                "hp" => base.hp = value,
                "attack" => base.attack = value,
                "defense" => base.defense = value,
                "special-attack" => base.special_attack = value,
                "special-defense" => base.special_defense = value,
                "speed" => base.speed = value,
                _ => {}
            }
        }
        base
    }
}

/// A learnset reference, kept for relation projection
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LearnableMove {
    /// Move ID parsed from the move URL
    pub move_id: i32,
    /// Move API name
    pub name: String,
    /// Learn method name
    pub learn_method: String,
    /// Level learned at
    pub level: i32,
    /// Generation of the version group
    pub generation: i32,
}

/// Normalized Pokémon row
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PokemonEntry {
    /// National dex number
    pub id: i32,
    /// API name
    pub name: String,
    /// Generation the Pokémon was introduced in
    pub generation: i32,
    /// Height in decimetres
    pub height: Option<i32>,
    /// Weight in hectograms
    pub weight: Option<i32>,
    /// Base experience yield
    pub base_experience: Option<i32>,
    /// Primary type
    pub type_1: String,
    /// Secondary type, empty for single-typed Pokémon
    pub type_2: String,
    /// Base stats
    pub stats: BaseStats,
    /// Default front sprite URL
    pub sprite: String,
    /// Learnset references
    pub moves: Vec<LearnableMove>,
}

/// Pokémon -> move join row
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MoveRelation {
    /// Pokémon ID
    pub pokemon_id: i32,
    /// Move ID
    pub move_id: i32,
    /// Move API name
    pub move_name: String,
    /// Learn method name
    pub learn_method: String,
    /// Level learned at
    pub level: i32,
    /// Generation of the version group
    pub generation: i32,
}

/// Entity kind for the `pokemon` endpoint
#[derive(Debug)]
pub struct PokemonKind;

impl EntityKind for PokemonKind {
    const ENDPOINT: &'static str = "pokemon";

    type Response = PokemonResponse;
    type Record = PokemonEntry;
    type Relation = MoveRelation;

    fn build(response: PokemonResponse, _lang: &str) -> PokemonEntry {
        let mut types = response.types;
        types.sort_by_key(|t| t.slot);
        let mut type_names = types.into_iter().map(|t| t.kind.name);

        let moves = response
            .moves
            .into_iter()
            .flat_map(|learnable| {
                let move_id = get_url_id(&learnable.move_ref.url);
                let name = learnable.move_ref.name;
                learnable
                    .version_group_details
                    .into_iter()
                    .map(move |detail| LearnableMove {
                        move_id,
                        name: name.clone(),
                        learn_method: detail.move_learn_method.name,
                        level: detail.level_learned_at,
                        generation: resolve_version_group(&detail.version_group.url),
                    })
            })
            .collect();

        PokemonEntry {
            id: response.id,
            name: response.name,
            generation: get_origin_generation(response.id),
            height: response.height,
            weight: response.weight,
            base_experience: response.base_experience,
            type_1: type_names.next().unwrap_or_default(),
            type_2: type_names.next().unwrap_or_default(),
            stats: BaseStats::from_stats(&response.stats),
            sprite: response.sprites.front_default.unwrap_or_default(),
            moves,
        }
    }

    fn relations(record: &PokemonEntry) -> Vec<MoveRelation> {
        record
            .moves
            .iter()
            .map(|m| MoveRelation {
                pokemon_id: record.id,
                move_id: m.move_id,
                move_name: m.name.clone(),
                learn_method: m.learn_method.clone(),
                level: m.level,
                generation: m.generation,
            })
            .collect()
    }
}

impl CsvEntry for PokemonEntry {
    fn header(&self) -> Vec<&'static str> {
        vec![
            "id",
            "name",
            "generation",
            "height",
            "weight",
            "base_experience",
            "type_1",
            "type_2",
            "hp",
            "attack",
            "defense",
            "sp_atk",
            "sp_def",
            "speed",
            "sprite",
        ]
    }

    fn to_row(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.name.clone(),
            self.generation.to_string(),
            cell(self.height),
            cell(self.weight),
            cell(self.base_experience),
            self.type_1.clone(),
            self.type_2.clone(),
            cell(self.stats.hp),
            cell(self.stats.attack),
            cell(self.stats.defense),
            cell(self.stats.special_attack),
            cell(self.stats.special_defense),
            cell(self.stats.speed),
            self.sprite.clone(),
        ]
    }
}

impl CsvEntry for MoveRelation {
    fn header(&self) -> Vec<&'static str> {
        vec![
            "pokemon_id",
            "move_id",
            "move",
            "learn_method",
            "level",
            "generation",
        ]
    }

    fn to_row(&self) -> Vec<String> {
        vec![
            self.pokemon_id.to_string(),
            self.move_id.to_string(),
            self.move_name.clone(),
            self.learn_method.clone(),
            self.level.to_string(),
            self.generation.to_string(),
        ]
    }
}
