use serde::Deserialize;
use std::collections::BTreeMap;

/// Envelope wrapping every catalog payload.
#[derive(Debug, Deserialize)]
pub struct CatalogEnvelope<T> {
    pub message: T,
    pub status: String,
}

impl<T> CatalogEnvelope<T> {
    pub fn is_success(&self) -> bool {
        self.status == "success"
    }
}

/// Breed name to its sub-breed names, possibly empty.
pub type BreedList = BTreeMap<String, Vec<String>>;

/// The images endpoint answers with either a list of URLs or, for the
/// `random` family of endpoints, a single URL.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum ImageMessage {
    Many(Vec<String>),
    One(String),
}

impl From<ImageMessage> for Vec<String> {
    fn from(value: ImageMessage) -> Self {
        match value {
            ImageMessage::Many(urls) => urls,
            ImageMessage::One(url) => vec![url],
        }
    }
}

/// Expand a breed list into catalog paths: `breed/subbreed` for each
/// sub-breed, or the bare breed name when it has none.
pub fn breed_paths(list: &BreedList) -> Vec<String> {
    list.iter()
        .flat_map(|(breed, subbreeds)| {
            if subbreeds.is_empty() {
                vec![breed.clone()]
            } else {
                subbreeds
                    .iter()
                    .map(|sub| format!("{breed}/{sub}"))
                    .collect()
            }
        })
        .collect()
}
