//! # Tokenizador por Espaços
//!
//! Divide o texto bruto em tokens separados por sequências de espaços em branco
//! e converte cada token para minúsculas. A mesma normalização é aplicada na
//! construção da trie e no momento da análise: se as duas divergirem, as frases
//! simplesmente deixam de casar, sem nenhum erro visível.
//!
//! ## O que NÃO é feito
//!
//! - Remoção de pontuação ("cancer," continua sendo "cancer,").
//! - Stemming ou lematização ("treatments" ≠ "treatment").
//! - Regras de caixa dependentes de localidade (usa `str::to_lowercase`).
//!
//! ## Exemplo de Uso
//!
//! ```rust
//! use lexicon_core::tokenizer::{normalize, tokenize};
//!
//! assert_eq!(normalize("  Breast   CANCER "), vec!["breast", "cancer"]);
//!
//! let tokens = tokenize("Breast Cancer");
//! assert_eq!(tokens[1].text, "cancer");
//! assert_eq!((tokens[1].start, tokens[1].end), (7, 13));
//! ```

use serde::{Deserialize, Serialize};

/// Um token extraído do texto original.
///
/// Guarda o texto já normalizado (minúsculo) e a posição exata no texto original,
/// permitindo destacar os trechos reconhecidos na interface web sem alterar a
/// formatação que o usuário digitou.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Token {
    /// Texto normalizado do token (ex: "cancer").
    pub text: String,
    /// Índice de byte inicial no texto original (inclusive).
    pub start: usize,
    /// Índice de byte final no texto original (exclusivo).
    pub end: usize,
    /// Índice sequencial do token na lista (0, 1, 2...).
    pub index: usize,
}

/// Normaliza um texto na sequência de tokens usada pela trie.
pub fn normalize(text: &str) -> Vec<String> {
    text.split_whitespace().map(str::to_lowercase).collect()
}

/// Tokeniza um texto preservando os offsets originais de cada token.
pub fn tokenize(text: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut current_start: Option<usize> = None;

    for (byte_pos, ch) in text.char_indices() {
        if ch.is_whitespace() {
            if let Some(start) = current_start.take() {
                push_token(&mut tokens, text, start, byte_pos);
            }
        } else if current_start.is_none() {
            current_start = Some(byte_pos);
        }
    }

    if let Some(start) = current_start {
        push_token(&mut tokens, text, start, text.len());
    }

    tokens
}

/// Fecha o token `text[start..end]` e adiciona à lista
fn push_token(tokens: &mut Vec<Token>, text: &str, start: usize, end: usize) {
    let index = tokens.len();
    tokens.push(Token {
        text: text[start..end].to_lowercase(),
        start,
        end,
        index,
    });
}
