//! Wire types shared by every PokeAPI resource.
//!
//! Only the fields the exporter consumes are modelled; serde ignores the rest.

use serde::Deserialize;

/// First page of a list endpoint such as `/pokemon?limit=N`
#[derive(Clone, Debug, Deserialize)]
pub struct ResourceList {
    /// Total number of resources the endpoint knows about
    pub count: usize,

    /// Locators for the resources on this page
    #[serde(default)]
    pub results: Vec<Resource>,
}

/// A bare locator, as returned in list pages
#[derive(Clone, Debug, Deserialize)]
pub struct Resource {
    /// URL of the detail endpoint
    pub url: String,
}

/// A `{name, url}` reference to another resource
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct NamedResource {
    /// API name, e.g. `"overgrow"`
    #[serde(default)]
    pub name: String,

    /// URL of the referenced resource
    #[serde(default)]
    pub url: String,
}

/// One localized flavor text entry keyed by language and version group
#[derive(Clone, Debug, Deserialize)]
pub struct FlavorText {
    /// The text, unsanitized
    #[serde(rename = "flavor_text")]
    pub text: String,

    /// Language the text is written in
    pub language: NamedResource,

    /// Version group the text belongs to
    pub version_group: NamedResource,
}

/// One localized effect description
#[derive(Clone, Debug, Deserialize)]
pub struct Effect {
    /// Long-form effect text
    #[serde(default)]
    pub effect: String,

    /// Short-form effect text
    #[serde(default)]
    pub short_effect: String,

    /// Language the text is written in
    pub language: NamedResource,
}

/// A localized display name
#[derive(Clone, Debug, Deserialize)]
pub struct Name {
    /// Display name
    pub name: String,

    /// Language of the name
    pub language: NamedResource,
}

/// Anything carrying a language tag
pub trait Localized {
    /// Language name, e.g. `"en"`
    fn language(&self) -> &str;
}

impl Localized for FlavorText {
    fn language(&self) -> &str {
        &self.language.name
    }
}

impl Localized for Effect {
    fn language(&self) -> &str {
        &self.language.name
    }
}

impl Localized for Name {
    fn language(&self) -> &str {
        &self.language.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resource_list_ignores_pagination_links() {
        let json = r#"{
            "count": 1302,
            "next": "https://pokeapi.co/api/v2/pokemon?offset=2&limit=2",
            "previous": null,
            "results": [
                {"name": "bulbasaur", "url": "https://pokeapi.co/api/v2/pokemon/1/"},
                {"name": "ivysaur", "url": "https://pokeapi.co/api/v2/pokemon/2/"}
            ]
        }"#;
        let list: ResourceList = serde_json::from_str(json).expect("decode list");
        assert_eq!(list.count, 1302);
        assert_eq!(list.results.len(), 2);
        assert_eq!(list.results[1].url, "https://pokeapi.co/api/v2/pokemon/2/");
    }

    #[test]
    fn flavor_text_reads_renamed_field() {
        let json = r#"{
            "flavor_text": "Hits the foe.",
            "language": {"name": "en", "url": "https://pokeapi.co/api/v2/language/9/"},
            "version_group": {"name": "gold-silver", "url": "https://pokeapi.co/api/v2/version-group/3/"}
        }"#;
        let text: FlavorText = serde_json::from_str(json).expect("decode flavor text");
        assert_eq!(text.text, "Hits the foe.");
        assert_eq!(text.language(), "en");
        assert_eq!(text.version_group.name, "gold-silver");
    }
}
