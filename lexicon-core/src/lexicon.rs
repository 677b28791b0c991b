//! # Léxico de Demonstração
//!
//! Entradas `(frase, tags)` usadas para construir a trie na inicialização. Não
//! existe formato persistido da trie: ela é sempre reconstruída a partir destas
//! entradas (ou de uma lista equivalente em JSON fornecida pelo chamador).
//!
//! ## Formato JSON
//!
//! ```json
//! [
//!   { "phrase": "breast cancer", "tags": { "snomed_tag": "disorder" } },
//!   { "phrase": "cancer", "tags": { "snomed_tag": null } }
//! ]
//! ```
//!
//! Um valor `null` remove a tag, como em [`crate::tags::merge_tags`].

use serde::{Deserialize, Serialize};

use crate::tags::TagUpdate;

/// Uma frase do léxico e as alterações de tags associadas
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LexiconEntry {
    pub phrase: String,
    #[serde(default)]
    pub tags: TagUpdate,
}

impl LexiconEntry {
    pub fn new(phrase: impl Into<String>, tags: TagUpdate) -> Self {
        Self {
            phrase: phrase.into(),
            tags,
        }
    }
}

/// Lê uma lista de entradas em JSON.
pub fn parse_entries(json: &str) -> Result<Vec<LexiconEntry>, serde_json::Error> {
    serde_json::from_str(json)
}

/// Léxico clínico mínimo com tags no estilo SNOMED
pub fn demo_lexicon() -> Vec<LexiconEntry> {
    let disorder = || TagUpdate::new().set("snomed_tag", "disorder");
    vec![
        LexiconEntry::new("cancer", disorder()),
        LexiconEntry::new("breast cancer", disorder()),
        LexiconEntry::new("right breast cancer", disorder()),
        LexiconEntry::new(
            "breast cancer treatment",
            TagUpdate::new().set("snomed_tag", "treatment"),
        ),
    ]
}

/// Textos de demonstração para a interface web
pub fn demo_texts() -> Vec<(&'static str, &'static str)> {
    vec![
        ("Frase simples", "cancer"),
        ("Prefixo não casado", "a breast cancer"),
        ("Frase mais longa", "I have a breast cancer treatment"),
        ("Parada gulosa", "I have a breast cancer treatments"),
        (
            "Recomeço pela raiz",
            "I had a breast cancer treatments and cancer test",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_entries_with_null() {
        let json = r#"[
            {"phrase": "breast cancer", "tags": {"snomed_tag": "disorder"}},
            {"phrase": "cancer", "tags": {"snomed_tag": null}},
            {"phrase": "tumor"}
        ]"#;
        let entries = parse_entries(json).unwrap();
        assert_eq!(entries.len(), 3);
        assert_eq!(
            entries[0],
            LexiconEntry::new("breast cancer", TagUpdate::new().set("snomed_tag", "disorder"))
        );
        assert_eq!(entries[1].tags, TagUpdate::new().remove("snomed_tag"));
        assert!(entries[2].tags.is_empty());
    }

    #[test]
    fn test_parse_entries_rejects_garbage() {
        assert!(parse_entries("{not json").is_err());
        assert!(parse_entries(r#"[{"tags": {}}]"#).is_err());
    }

    #[test]
    fn test_demo_lexicon_shape() {
        let entries = demo_lexicon();
        assert_eq!(entries.len(), 4);
        assert!(entries.iter().all(|e| !e.tags.is_empty()));
        assert_eq!(demo_texts().len(), 5);
    }
}
