//! # Dicionário de Tokens (Interning)
//!
//! Cada token distinto recebe um identificador inteiro denso, atribuído na ordem
//! em que aparece pela primeira vez (0, 1, 2...). As arestas da trie são
//! chaveadas por esses ids em vez de strings, o que deixa os nós compactos.
//!
//! - [`TokenDictionary::intern`] é usado na construção: cria o id se necessário.
//! - [`TokenDictionary::lookup`] é usado na análise: apenas consulta, nunca aloca.
//!   Um token desconhecido não tem id e, portanto, nunca é aresta da trie.

use std::collections::HashMap;

/// Identificador denso de um token (0-based, ordem de primeira ocorrência).
pub type TokenId = usize;

/// Tabela bidirecional token ↔ id.
///
/// O próximo id livre é sempre `tokens.len()`, então a lista reversa e o contador
/// nunca divergem.
#[derive(Debug, Clone, Default)]
pub struct TokenDictionary {
    ids: HashMap<String, TokenId>,
    tokens: Vec<String>,
}

impl TokenDictionary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Retorna o id do token, criando um novo se ele ainda não existir.
    pub fn intern(&mut self, token: &str) -> TokenId {
        if let Some(&id) = self.ids.get(token) {
            return id;
        }
        let id = self.tokens.len();
        self.tokens.push(token.to_string());
        self.ids.insert(token.to_string(), id);
        id
    }

    /// Consulta o id de um token sem alocar.
    pub fn lookup(&self, token: &str) -> Option<TokenId> {
        self.ids.get(token).copied()
    }

    /// Texto do token com o id dado.
    pub fn resolve(&self, id: TokenId) -> Option<&str> {
        self.tokens.get(id).map(String::as_str)
    }

    /// Registra vários tokens de uma vez, na ordem dada.
    pub fn add_tokens<I, S>(&mut self, tokens: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for token in tokens {
            self.intern(token.as_ref());
        }
    }

    /// Tokens conhecidos, na ordem dos ids.
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_follow_first_seen_order() {
        let mut dict = TokenDictionary::new();
        dict.add_tokens(["breast", "cancer", "treatment"]);
        dict.intern("right");

        assert_eq!(dict.lookup("breast"), Some(0));
        assert_eq!(dict.lookup("cancer"), Some(1));
        assert_eq!(dict.lookup("treatment"), Some(2));
        assert_eq!(dict.lookup("right"), Some(3));
        assert_eq!(dict.len(), 4);
    }

    #[test]
    fn test_intern_is_idempotent() {
        let mut dict = TokenDictionary::new();
        let first = dict.intern("cancer");
        let second = dict.intern("cancer");
        assert_eq!(first, second);
        assert_eq!(dict.len(), 1);
        assert_eq!(dict.tokens(), &["cancer".to_string()]);
    }

    #[test]
    fn test_lookup_does_not_allocate() {
        let mut dict = TokenDictionary::new();
        dict.intern("cancer");
        assert_eq!(dict.lookup("tumor"), None);
        assert_eq!(dict.len(), 1);
    }

    #[test]
    fn test_resolve_reverse_mapping() {
        let mut dict = TokenDictionary::new();
        dict.add_tokens(vec!["a".to_string(), "b".to_string(), "a".to_string()]);
        assert_eq!(dict.resolve(0), Some("a"));
        assert_eq!(dict.resolve(1), Some("b"));
        assert_eq!(dict.resolve(2), None);
        assert!(!dict.is_empty());
    }
}
