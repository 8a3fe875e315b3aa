use serde::{Deserialize, Serialize};

/// One Pokémon as displayed: name, size, primary type and sprite.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub id: u32,
    pub name: String,
    /// Decimetres.
    pub height_units: u32,
    /// Hectograms.
    pub weight_units: u32,
    pub primary_type_name: String,
    pub sprite_url: String,
}

/// A named entry of the type taxonomy.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeRef {
    pub name: String,
}

/// Lightweight reference to a record, dereferenced by URL.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordRef {
    #[serde(default)]
    pub name: String,
    pub url: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct RecordPage {
    #[serde(default)]
    pub count: usize,
    pub results: Vec<RecordRef>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct TypeListResponse {
    pub results: Vec<TypeRef>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct NamedResource {
    pub name: String,
    #[serde(default)]
    pub url: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct TypeSlot {
    pub slot: u32,
    #[serde(rename = "type")]
    pub kind: NamedResource,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct Sprites {
    pub front_default: Option<String>,
}

/// Detail payload of `/pokemon/{id}`; only the fields the view uses.
#[derive(Clone, Debug, Deserialize)]
pub struct PokemonDetail {
    pub id: u32,
    pub name: String,
    pub height: u32,
    pub weight: u32,
    #[serde(default)]
    pub types: Vec<TypeSlot>,
    #[serde(default)]
    pub sprites: Sprites,
}

impl From<PokemonDetail> for Record {
    fn from(detail: PokemonDetail) -> Self {
        let primary_type_name = detail
            .types
            .iter()
            .min_by_key(|t| t.slot)
            .map(|t| t.kind.name.clone())
            .unwrap_or_default();
        Record {
            id: detail.id,
            name: detail.name,
            height_units: detail.height,
            weight_units: detail.weight,
            primary_type_name,
            sprite_url: detail.sprites.front_default.unwrap_or_default(),
        }
    }
}
