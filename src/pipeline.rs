//! Orchestration: list -> fan-out -> wait -> post-process, then CSV output.

use std::path::Path;

use tracing::{info, warn};

use crate::client::ApiClient;
use crate::config::Config;
use crate::error::Result;
use crate::export::{create_file, to_csv};
use crate::receiver::{AbilityReceiver, MovesReceiver, PokemonReceiver, Receiver};

/// Pokémon records
pub const POKEMON_CSV: &str = "pokemon.csv";
/// Move records
pub const MOVES_CSV: &str = "moves.csv";
/// Ability records
pub const ABILITY_CSV: &str = "ability.csv";
/// Pokémon -> ability relations
pub const ABILITY_RELATIONS_CSV: &str = "ability-relations.csv";
/// Pokémon -> move relations
pub const MOVE_RELATIONS_CSV: &str = "move-relations.csv";

/// Run one receiver through its whole lifecycle.
///
/// Lists the receiver's endpoint, spawns one fetch per returned locator, waits
/// for all of them and derives relations. Only listing failures are returned;
/// individual fetch failures leave empty slots.
pub async fn get_api_data(
    client: &ApiClient,
    receiver: &mut dyn Receiver,
    limit: usize,
    lang: &str,
) -> Result<()> {
    let endpoint = receiver.endpoint();
    let list = client.list(limit, endpoint).await?;
    let count = list.count;

    receiver.init(count)?;

    if list.results.len() < count {
        warn!(
            endpoint,
            count,
            returned = list.results.len(),
            "List page holds fewer resources than the API reports; raise the limit for a complete export"
        );
    }

    for (index, resource) in list.results.into_iter().take(count).enumerate() {
        receiver.add_worker()?;
        receiver.fetch_entries(resource.url, lang, index)?;
    }

    receiver.wait().await?;
    receiver.post_process()
}

/// Fetch every receiver in order.
///
/// Receivers run one after another; only the fetches within a receiver are
/// concurrent. The first failing receiver aborts the rest.
pub async fn fetch_data(
    client: &ApiClient,
    limit: usize,
    lang: &str,
    receivers: &mut [&mut dyn Receiver],
) -> Result<()> {
    for receiver in receivers.iter_mut() {
        info!(endpoint = receiver.endpoint(), limit, lang, "Fetching");
        get_api_data(client, &mut **receiver, limit, lang).await?;
    }

    Ok(())
}

/// Write the five CSV files into `dir`.
///
/// All files are created (or truncated) before any is written. Any error is
/// returned immediately and leaves the remaining files empty.
pub fn generate_csvs(
    dir: &Path,
    pokemon: &PokemonReceiver,
    moves: &MovesReceiver,
    ability: &AbilityReceiver,
) -> Result<()> {
    let pokemon_csv = create_file(dir, POKEMON_CSV)?;
    let moves_csv = create_file(dir, MOVES_CSV)?;
    let ability_csv = create_file(dir, ABILITY_CSV)?;
    let ability_relations_csv = create_file(dir, ABILITY_RELATIONS_CSV)?;
    let move_relations_csv = create_file(dir, MOVE_RELATIONS_CSV)?;

    to_csv(&pokemon_csv, &pokemon.csv_entries()?)?;
    to_csv(&moves_csv, &moves.csv_entries()?)?;
    to_csv(&ability_csv, &ability.csv_entries()?)?;
    to_csv(&ability_relations_csv, &ability.csv_relations()?)?;
    to_csv(&move_relations_csv, &pokemon.csv_relations()?)?;

    info!(dir = %dir.display(), "Wrote CSV files");
    Ok(())
}

/// Fetch all three endpoints and write the CSV files described by `config`
pub async fn run(config: &Config) -> Result<()> {
    config.validate()?;

    let client = ApiClient::new(&config.api)?;
    let mut pokemon = PokemonReceiver::new(client.clone());
    let mut moves = MovesReceiver::new(client.clone());
    let mut ability = AbilityReceiver::new(client.clone());

    {
        let mut receivers: [&mut dyn Receiver; 3] = [&mut pokemon, &mut moves, &mut ability];
        fetch_data(&client, config.api.limit, &config.api.language, &mut receivers).await?;
    }

    generate_csvs(&config.output.dir, &pokemon, &moves, &ability)
}
