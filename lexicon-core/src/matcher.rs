//! # Casamento Guloso (Longest-Match-then-Restart)
//!
//! Percorre a sequência de tokens da esquerda para a direita, em uma única
//! passada, particionando-a em trechos:
//!
//! 1. A partir da posição atual, desce na trie pela raiz enquanto o próximo token
//!    for uma aresta do nó corrente.
//! 2. Se avançou ao menos um token, emite o trecho consumido com as tags do nó
//!    onde a descida parou (que pode ser um nó intermediário sem tags).
//! 3. Se não avançou nada, emite o token sozinho, sem tags, e anda uma posição.
//! 4. Recomeça sempre pela raiz, logo após o trecho emitido.
//!
//! Não há backtracking: se a descida mais longa termina em um nó sem tags, o
//! trecho é emitido assim mesmo, e nunca se procura um casamento mais curto ou
//! sobreposto.
//!
//! ## Exemplo
//!
//! Com as frases "breast cancer" (disorder) e "breast cancer treatment"
//! (treatment), o texto "breast cancer treatments" vira:
//!
//! ```text
//! [breast cancer]{disorder}  [treatments]{}
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::tags::Tags;
use crate::tokenizer::normalize;
use crate::trie::PhraseTrie;

/// Como um trecho foi produzido.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchKind {
    /// Caminho de ao menos uma aresta na trie (as tags podem estar vazias).
    Phrase,
    /// Token sem aresta a partir da raiz.
    Unmatched,
}

/// Um trecho da saída: tokens `start_token..end_token`, unidos por um espaço.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Match {
    pub text: String,
    pub tags: Tags,
    pub start_token: usize,
    pub end_token: usize,
    pub kind: MatchKind,
}

impl Match {
    /// Visão `(trecho, tags)` do resultado.
    pub fn as_pair(&self) -> (&str, &Tags) {
        (&self.text, &self.tags)
    }

    pub fn token_count(&self) -> usize {
        self.end_token - self.start_token
    }
}

/// Converte os trechos em pares `(trecho, tags)`.
pub fn matches_to_pairs(matches: &[Match]) -> Vec<(String, Tags)> {
    matches
        .iter()
        .map(|m| (m.text.clone(), m.tags.clone()))
        .collect()
}

impl PhraseTrie {
    /// Normaliza o texto e o particiona em trechos.
    pub fn parse(&self, text: &str) -> Vec<Match> {
        self.parse_tokens(&normalize(text))
    }

    /// Particiona uma sequência de tokens já normalizada.
    ///
    /// Todo token aparece em exatamente um trecho, na ordem original.
    pub fn parse_tokens<S: AsRef<str>>(&self, tokens: &[S]) -> Vec<Match> {
        let mut matches = Vec::new();
        let mut i = 0;

        while i < tokens.len() {
            let start = i;
            let mut node = Self::ROOT;

            while let Some(next) = tokens
                .get(i)
                .and_then(|token| self.child(node, token.as_ref()))
            {
                node = next;
                i += 1;
            }

            if i > start {
                let tags = self.node(node).map(|n| n.tags.clone()).unwrap_or_default();
                matches.push(Match {
                    text: join(&tokens[start..i]),
                    tags,
                    start_token: start,
                    end_token: i,
                    kind: MatchKind::Phrase,
                });
            } else {
                matches.push(Match {
                    text: tokens[start].as_ref().to_string(),
                    tags: Tags::new(),
                    start_token: start,
                    end_token: start + 1,
                    kind: MatchKind::Unmatched,
                });
                i += 1;
            }
        }

        debug!(
            tokens = tokens.len(),
            spans = matches.len(),
            "texto particionado"
        );
        matches
    }
}

fn join<S: AsRef<str>>(tokens: &[S]) -> String {
    tokens
        .iter()
        .map(|t| t.as_ref())
        .collect::<Vec<&str>>()
        .join(" ")
}
