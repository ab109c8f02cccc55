//! # pokeapi-csv
//!
//! Fetches Pokémon, moves and abilities from [PokeAPI](https://pokeapi.co),
//! normalizes their text and writes them to pipe-delimited CSV files.
//!
//! Each endpoint is handled by a [`Receiver`](receiver::Receiver): the list
//! endpoint is queried once for the total count and the resource URLs, one
//! task per resource fetches the detail concurrently into a fixed slot, and
//! once every task has signalled completion the receiver derives relation
//! rows. Endpoints are processed one after another.
//!
//! ## Quick Start
//!
//! ```no_run
//! use pokeapi_csv::{Config, pipeline};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut config = Config::default();
//!     config.api.limit = 151;
//!     config.output.dir = "./data".into();
//!
//!     pipeline::run(&config).await?;
//!     Ok(())
//! }
//! ```
//!
//! Output files: `pokemon.csv`, `moves.csv`, `ability.csv`,
//! `ability-relations.csv` and `move-relations.csv`.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]

/// HTTP client and list endpoint access
pub mod client;
/// Configuration types
pub mod config;
/// Error types
pub mod error;
/// CSV serialization
pub mod export;
/// Fetch orchestration and output generation
pub mod pipeline;
/// Per-endpoint receivers and entity records
pub mod receiver;
/// Text normalization and generation lookups
pub mod text;
/// Wire types shared across endpoints
pub mod types;
/// Completion barrier
pub mod wait_group;

pub use client::ApiClient;
pub use config::Config;
pub use error::{Error, Result};
pub use export::CsvEntry;
pub use receiver::{AbilityReceiver, MovesReceiver, PokemonReceiver, Receiver};
