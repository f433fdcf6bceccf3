use serde::{Deserialize, Serialize};

/// A named reference to another API resource (origin or location)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedResource {
    /// Display name of the referenced resource
    pub name: String,

    /// URL of the referenced resource (empty when unknown)
    #[serde(default)]
    pub url: String,
}

/// A single character as returned by the API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Character {
    pub id: u64,
    pub name: String,

    /// Status string, kept verbatim ("Alive", "Dead", "unknown")
    pub status: String,
    pub species: String,

    /// Sub-species or type, often empty
    #[serde(rename = "type", default)]
    pub kind: String,
    pub gender: String,
    pub image: String,
    pub origin: NamedResource,
    pub location: NamedResource,

    #[serde(default)]
    pub url: String,
}

/// Pagination metadata describing the pages adjacent to the current one
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageInfo {
    /// Total number of characters matching the query
    #[serde(default)]
    pub count: Option<u64>,

    /// Total number of pages for the query
    #[serde(default)]
    pub pages: Option<u64>,

    #[serde(default)]
    pub prev: Option<String>,

    #[serde(default)]
    pub next: Option<String>,
}

impl PageInfo {
    pub fn has_prev(&self) -> bool {
        self.prev.is_some()
    }

    pub fn has_next(&self) -> bool {
        self.next.is_some()
    }
}

/// One page of results, as decoded from the response body.
///
/// Both fields default when the body omits them, so a body such as
/// `{"error": "..."}` decodes into an empty page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterPage {
    #[serde(default)]
    pub results: Vec<Character>,

    #[serde(default)]
    pub info: PageInfo,
}

impl CharacterPage {
    /// Create an empty page with no pagination links
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_api_body() {
        let body = r#"{
            "info": {"count": 826, "pages": 42, "next": "https://rickandmortyapi.com/api/character/?page=2", "prev": null},
            "results": [{
                "id": 1,
                "name": "Rick Sanchez",
                "status": "Alive",
                "species": "Human",
                "type": "",
                "gender": "Male",
                "origin": {"name": "Earth (C-137)", "url": "https://rickandmortyapi.com/api/location/1"},
                "location": {"name": "Citadel of Ricks", "url": "https://rickandmortyapi.com/api/location/3"},
                "image": "https://rickandmortyapi.com/api/character/avatar/1.jpeg",
                "episode": ["https://rickandmortyapi.com/api/episode/1"],
                "url": "https://rickandmortyapi.com/api/character/1",
                "created": "2017-11-04T18:48:46.250Z"
            }]
        }"#;

        let page: CharacterPage = serde_json::from_str(body).unwrap();
        assert_eq!(page.results.len(), 1);
        assert_eq!(page.results[0].name, "Rick Sanchez");
        assert_eq!(page.results[0].origin.name, "Earth (C-137)");
        assert_eq!(page.results[0].location.name, "Citadel of Ricks");
        assert_eq!(page.info.count, Some(826));
        assert!(!page.info.has_prev());
        assert!(page.info.has_next());
    }

    #[test]
    fn test_missing_sections_default_to_empty() {
        let page: CharacterPage = serde_json::from_str(r#"{"error": "There is nothing here"}"#).unwrap();
        assert!(page.is_empty());
        assert_eq!(page.info, PageInfo::default());
    }

    #[test]
    fn test_minimal_character_fields() {
        let body = r#"{"id": 2, "name": "Morty Smith", "status": "unknown", "species": "Human",
            "gender": "Male", "image": "x", "origin": {"name": "unknown"}, "location": {"name": "Earth"}}"#;
        let character: Character = serde_json::from_str(body).unwrap();
        assert_eq!(character.status, "unknown");
        assert_eq!(character.kind, "");
        assert_eq!(character.origin.url, "");
    }
}
