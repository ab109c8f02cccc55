//! Fake PokeAPI fixtures
//!
//! Builds list and detail responses shaped like the real API, with locators
//! pointing back at the mock server.

use serde_json::{Value, json};
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// A learnset entry: (move id, move name, version group id, level, learn method)
pub type Learnable<'a> = (i32, &'a str, i32, i32, &'a str);

/// Locator for `endpoint/id` on the fake API
pub fn locator(server: &MockServer, endpoint: &str, id: i32) -> String {
    format!("{}/api/v2/{endpoint}/{id}/", server.uri())
}

fn named(name: &str, url: String) -> Value {
    json!({ "name": name, "url": url })
}

fn language(lang: &str) -> Value {
    named(lang, format!("https://pokeapi.co/api/v2/language/{lang}/"))
}

fn version_group(id: i32) -> Value {
    named(
        "version-group",
        format!("https://pokeapi.co/api/v2/version-group/{id}/"),
    )
}

/// Mount the first page of `endpoint` reporting `count` and listing `ids`
pub async fn mount_list(server: &MockServer, endpoint: &str, count: usize, ids: &[i32]) {
    let results: Vec<Value> = ids
        .iter()
        .map(|&id| named(&format!("{endpoint}-{id}"), locator(server, endpoint, id)))
        .collect();

    Mock::given(method("GET"))
        .and(path(format!("/api/v2/{endpoint}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "count": count,
            "next": null,
            "previous": null,
            "results": results,
        })))
        .mount(server)
        .await;
}

/// Mount a detail response for `endpoint/id`, answered after `delay_ms`
pub async fn mount_detail(server: &MockServer, endpoint: &str, id: i32, body: Value, delay_ms: u64) {
    Mock::given(method("GET"))
        .and(path(format!("/api/v2/{endpoint}/{id}/")))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(body)
                .set_delay(Duration::from_millis(delay_ms)),
        )
        .mount(server)
        .await;
}

/// Mount a failing detail response for `endpoint/id`
pub async fn mount_failure(server: &MockServer, endpoint: &str, id: i32, status: u16) {
    Mock::given(method("GET"))
        .and(path(format!("/api/v2/{endpoint}/{id}/")))
        .respond_with(ResponseTemplate::new(status))
        .mount(server)
        .await;
}

/// `/pokemon/{id}/` body
pub fn pokemon_json(id: i32, name: &str, types: &[&str], moves: &[Learnable<'_>]) -> Value {
    let types: Vec<Value> = types
        .iter()
        .enumerate()
        .map(|(slot, kind)| {
            json!({
                "slot": slot + 1,
                "type": named(kind, "https://pokeapi.co/api/v2/type/1/".to_string()),
            })
        })
        .collect();

    let stats: Vec<Value> = [
        ("hp", 45),
        ("attack", 49),
        ("defense", 49),
        ("special-attack", 65),
        ("special-defense", 65),
        ("speed", 45),
    ]
    .iter()
    .map(|(stat, value)| {
        json!({
            "base_stat": value,
            "effort": 0,
            "stat": named(stat, String::new()),
        })
    })
    .collect();

    let moves: Vec<Value> = moves
        .iter()
        .map(|(move_id, move_name, group, level, learn_method)| {
            json!({
                "move": named(move_name, format!("https://pokeapi.co/api/v2/move/{move_id}/")),
                "version_group_details": [{
                    "level_learned_at": level,
                    "move_learn_method": named(learn_method, String::new()),
                    "version_group": version_group(*group),
                }],
            })
        })
        .collect();

    json!({
        "id": id,
        "name": name,
        "height": 7,
        "weight": 69,
        "base_experience": 64,
        "types": types,
        "stats": stats,
        "moves": moves,
        "sprites": { "front_default": format!("https://sprites.test/{id}.png") },
    })
}

/// `/move/{id}/` body with one English flavor text for `group`
pub fn move_json(id: i32, name: &str, generation: &str, power: Option<i32>, flavor: &str, group: i32) -> Value {
    json!({
        "id": id,
        "name": name,
        "accuracy": 100,
        "power": power,
        "pp": 25,
        "priority": 0,
        "effect_chance": null,
        "type": named("normal", String::new()),
        "damage_class": named("physical", String::new()),
        "generation": named(generation, String::new()),
        "effect_entries": [{
            "effect": "Inflicts regular damage.",
            "short_effect": "Inflicts regular damage with no additional effect.",
            "language": language("en"),
        }],
        "flavor_text_entries": [{
            "flavor_text": flavor,
            "language": language("en"),
            "version_group": version_group(group),
        }],
        "names": [{ "name": name.to_uppercase(), "language": language("en") }],
    })
}

/// `/ability/{id}/` body; `holders` are (pokemon id, slot, hidden)
pub fn ability_json(id: i32, name: &str, flavor: &str, holders: &[(i32, i32, bool)]) -> Value {
    let pokemon: Vec<Value> = holders
        .iter()
        .map(|(pokemon_id, slot, hidden)| {
            json!({
                "is_hidden": hidden,
                "slot": slot,
                "pokemon": named(
                    "holder",
                    format!("https://pokeapi.co/api/v2/pokemon/{pokemon_id}/"),
                ),
            })
        })
        .collect();

    json!({
        "id": id,
        "name": name,
        "generation": named("generation-iii", String::new()),
        "effect_entries": [{
            "effect": "long",
            "short_effect": "Powers up moves in a pinch.",
            "language": language("en"),
        }],
        "flavor_text_entries": [{
            "flavor_text": flavor,
            "language": language("en"),
            "version_group": version_group(5),
        }],
        "names": [],
        "pokemon": pokemon,
    })
}

/// Fake API with three Pokémon, three moves and two abilities.
///
/// The first detail of every endpoint answers last so completion order
/// differs from slot order.
pub async fn start_fake_pokeapi() -> MockServer {
    let server = MockServer::start().await;

    mount_list(&server, "pokemon", 3, &[1, 4, 152]).await;
    mount_detail(
        &server,
        "pokemon",
        1,
        pokemon_json(
            1,
            "bulbasaur",
            &["grass", "poison"],
            &[(33, "tackle", 1, 1, "level-up"), (22, "vine-whip", 3, 9, "level-up")],
        ),
        200,
    )
    .await;
    mount_detail(
        &server,
        "pokemon",
        4,
        pokemon_json(4, "charmander", &["fire"], &[(52, "ember", 1, 9, "level-up")]),
        50,
    )
    .await;
    mount_detail(&server, "pokemon", 152, pokemon_json(152, "chikorita", &["grass"], &[]), 0).await;

    mount_list(&server, "move", 3, &[22, 33, 52]).await;
    mount_detail(
        &server,
        "move",
        22,
        move_json(22, "vine-whip", "generation-i", Some(45), "Strikes the\nfoe with vines.", 3),
        150,
    )
    .await;
    mount_detail(
        &server,
        "move",
        33,
        move_json(33, "tackle", "generation-i", Some(40), "A full-body\ncharge.", 1),
        0,
    )
    .await;
    mount_detail(
        &server,
        "move",
        52,
        move_json(52, "ember", "generation-i", Some(40), "Lowers the foe\u{2019}s SP. DEF.", 1),
        20,
    )
    .await;

    mount_list(&server, "ability", 2, &[65, 66]).await;
    mount_detail(
        &server,
        "ability",
        65,
        ability_json(65, "overgrow", "Ups GRASS moves in a pinch.", &[(1, 1, false), (152, 1, false)]),
        100,
    )
    .await;
    mount_detail(
        &server,
        "ability",
        66,
        ability_json(66, "blaze", "Ups FIRE moves in a pinch.", &[(4, 1, false)]),
        0,
    )
    .await;

    server
}
