use serde::{Deserialize, Serialize};

/// One catalog entry from the upstream character API.
///
/// The character name is the identifier throughout; the upstream numeric id
/// is dropped during normalization. Absent category lists deserialize as
/// empty, and empty lists score identically to absent ones.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Character {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub films: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub short_films: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tv_shows: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub video_games: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub park_attractions: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub allies: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub enemies: Vec<String>,
}

/// One fetched page of the catalog, with whether more pages follow it.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct CharacterPage {
    pub characters: Vec<Character>,
    pub has_more: bool,
}
