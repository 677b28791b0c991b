//! # Variantes Irregulares
//!
//! Mapa opcional de formas irregulares para uma forma canônica
//! (ex: "saw" → "see", "seen" → "see"). Palavras sem entrada mapeiam para si
//! mesmas.
//!
//! A trie não usa este mapa por conta própria. Quem quiser canonizar tokens deve
//! aplicá-lo **igualmente** na construção e na análise; o [`crate::Annotator`]
//! faz isso quando configurado com [`crate::Annotator::with_variants`].

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::tokenizer::normalize;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IrregularVariants {
    canonical: HashMap<String, String>,
}

impl IrregularVariants {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registra `variant → canonical`.
    ///
    /// Os dois lados passam por [`normalize`], a mesma normalização da trie, e
    /// precisam resultar em exatamente um token cada; caso contrário nada é
    /// registrado e o retorno é `false`. Mapeamentos de uma palavra para ela
    /// mesma são aceitos mas não ocupam entrada, já que a ausência de entrada
    /// tem o mesmo efeito.
    pub fn insert(&mut self, variant: &str, canonical: &str) -> bool {
        let (Some(variant), Some(canonical)) = (single_token(variant), single_token(canonical))
        else {
            return false;
        };
        if variant != canonical {
            self.canonical.insert(variant, canonical);
        }
        true
    }

    /// Forma canônica de `word` (ou a própria palavra).
    pub fn canonical<'a>(&'a self, word: &'a str) -> &'a str {
        self.canonical.get(word).map_or(word, String::as_str)
    }

    /// Canoniza uma sequência de tokens.
    pub fn apply<'a, S: AsRef<str>>(&'a self, tokens: &'a [S]) -> Vec<&'a str> {
        tokens
            .iter()
            .map(|t| self.canonical(t.as_ref()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.canonical.len()
    }

    pub fn is_empty(&self) -> bool {
        self.canonical.is_empty()
    }
}

fn single_token(word: &str) -> Option<String> {
    let mut tokens = normalize(word);
    if tokens.len() == 1 {
        tokens.pop()
    } else {
        None
    }
}

impl<'a> FromIterator<(&'a str, &'a str)> for IrregularVariants {
    fn from_iter<I: IntoIterator<Item = (&'a str, &'a str)>>(iter: I) -> Self {
        let mut variants = Self::new();
        for (variant, canonical) in iter {
            variants.insert(variant, canonical);
        }
        variants
    }
}
