//! # Tags e Regra de Fusão
//!
//! Cada frase terminal da trie carrega um mapa chave → valor (ex:
//! `snomed_tag → disorder`). Inserir a mesma frase de novo não substitui o mapa
//! inteiro: as tags são **fundidas**.
//!
//! | Atualização          | Efeito no nó                      |
//! |----------------------|-----------------------------------|
//! | `chave → Some(v)`    | define/sobrescreve `chave = v`    |
//! | `chave → None`       | remove `chave` (no-op se ausente) |
//! | chave não mencionada | permanece intocada                |
//!
//! Em JSON, `None` é escrito como `null`:
//!
//! ```rust
//! use lexicon_core::tags::{merge_tags, Tags, TagUpdate};
//!
//! let mut tags = Tags::new();
//! merge_tags(&mut tags, &TagUpdate::new().set("a", "x"));
//!
//! let update: TagUpdate = serde_json::from_str(r#"{"a": null, "b": "y"}"#).unwrap();
//! merge_tags(&mut tags, &update);
//!
//! assert_eq!(tags.len(), 1);
//! assert_eq!(tags["b"], "y");
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Tags efetivas de uma frase. Ordenadas para saída JSON determinística.
pub type Tags = BTreeMap<String, String>;

/// Conjunto de alterações de tags passado para a inserção.
///
/// O valor `None` é o marcador de ausência: remove a chave do nó.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TagUpdate(BTreeMap<String, Option<String>>);

impl TagUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Define `key = value`.
    pub fn set(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.0.insert(key.into(), Some(value.into()));
        self
    }

    /// Marca `key` para remoção.
    pub fn remove(mut self, key: impl Into<String>) -> Self {
        self.0.insert(key.into(), None);
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_deref()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Tags> for TagUpdate {
    fn from(tags: Tags) -> Self {
        Self(tags.into_iter().map(|(k, v)| (k, Some(v))).collect())
    }
}

impl<K, V> FromIterator<(K, Option<V>)> for TagUpdate
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, Option<V>)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.map(Into::into)))
                .collect(),
        )
    }
}

/// Aplica `update` sobre `tags` seguindo a regra de fusão.
pub fn merge_tags(tags: &mut Tags, update: &TagUpdate) {
    for (key, value) in update.iter() {
        match value {
            Some(value) => {
                tags.insert(key.to_string(), value.to_string());
            }
            None => {
                tags.remove(key);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(pairs: &[(&str, &str)]) -> Tags {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_remove_then_set() {
        let mut current = tags(&[("a", "x")]);
        merge_tags(&mut current, &TagUpdate::new().remove("a").set("b", "y"));
        assert_eq!(current, tags(&[("b", "y")]));
    }

    #[test]
    fn test_untouched_keys_survive() {
        let mut current = tags(&[("snomed_tag", "disorder"), ("source", "umls")]);
        merge_tags(&mut current, &TagUpdate::new().set("snomed_tag", "finding"));
        assert_eq!(
            current,
            tags(&[("snomed_tag", "finding"), ("source", "umls")])
        );
    }

    #[test]
    fn test_remove_missing_key_is_noop() {
        let mut current = tags(&[("a", "x")]);
        merge_tags(&mut current, &TagUpdate::new().remove("zzz"));
        assert_eq!(current, tags(&[("a", "x")]));
    }

    #[test]
    fn test_empty_update_is_noop() {
        let mut current = tags(&[("a", "x")]);
        merge_tags(&mut current, &TagUpdate::new());
        assert_eq!(current, tags(&[("a", "x")]));
    }

    #[test]
    fn test_json_null_means_remove() {
        let update: TagUpdate =
            serde_json::from_str(r#"{"snomed_tag": null, "kind": "disorder"}"#).unwrap();
        assert_eq!(update, TagUpdate::new().remove("snomed_tag").set("kind", "disorder"));
        assert_eq!(
            serde_json::to_string(&update).unwrap(),
            r#"{"kind":"disorder","snomed_tag":null}"#
        );
    }

    #[test]
    fn test_from_tags_and_iter() {
        let update = TagUpdate::from(tags(&[("a", "x")]));
        assert_eq!(update.len(), 1);

        let collected: TagUpdate = vec![("a", Some("x")), ("b", None)].into_iter().collect();
        assert_eq!(collected, TagUpdate::new().set("a", "x").remove("b"));
    }
}
