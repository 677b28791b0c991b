//! # Trie de Frases
//!
//! Árvore de prefixos onde cada aresta é um token (pelo seu id no
//! [`TokenDictionary`]) e cada nó representa a sequência de tokens lida desde a
//! raiz. Uma frase inserida termina em um nó, e é nesse nó que suas tags ficam.
//!
//! ```text
//! insert("cancer")                  insert("breast cancer treatment")
//!
//!   (raiz) ──cancer──▶ [disorder]
//!      │
//!      ├──breast──▶ ( ) ──cancer──▶ [disorder] ──treatment──▶ [treatment]
//!      │
//!      └──right──▶ ( ) ──breast──▶ ( ) ──cancer──▶ [disorder]
//! ```
//!
//! ## Representação
//!
//! Os nós vivem em uma arena (`Vec<TrieNode>`) e se referenciam por índice
//! ([`NodeId`]). A raiz é sempre o nó `0`. O dicionário de tokens pertence à trie,
//! não aos nós, então não há ponteiros para o pai nem ciclos de posse.
//!
//! Nós são criados sob demanda e nunca removidos. Prefixos comuns são
//! compartilhados automaticamente porque a inserção reaproveita filhos existentes.

use std::collections::HashMap;

use tracing::trace;

use crate::interner::{TokenDictionary, TokenId};
use crate::tags::{merge_tags, TagUpdate, Tags};
use crate::tokenizer::normalize;

/// Índice de um nó na arena da trie.
pub type NodeId = usize;

/// Um nó da trie.
#[derive(Debug, Clone, Default)]
pub struct TrieNode {
    /// Próximo token → nó filho.
    pub children: HashMap<TokenId, NodeId>,
    /// Tags da frase que termina exatamente neste nó (vazio se nenhuma).
    pub tags: Tags,
    /// Número de tokens do prefixo representado (raiz = 0).
    pub depth: usize,
}

/// A trie de frases, dona do dicionário de tokens e de todos os nós.
#[derive(Debug, Clone)]
pub struct PhraseTrie {
    nodes: Vec<TrieNode>,
    dictionary: TokenDictionary,
}

impl PhraseTrie {
    pub const ROOT: NodeId = 0;

    /// Cria uma trie contendo apenas a raiz.
    pub fn new() -> Self {
        Self {
            nodes: vec![TrieNode::default()],
            dictionary: TokenDictionary::new(),
        }
    }

    /// Insere uma frase e funde `update` nas tags do nó terminal.
    ///
    /// A frase é normalizada (espaços + minúsculas). Uma frase vazia atualiza as
    /// tags da própria raiz. Retorna o nó terminal.
    pub fn insert(&mut self, phrase: &str, update: &TagUpdate) -> NodeId {
        let tokens = normalize(phrase);
        self.insert_tokens(&tokens, update)
    }

    /// Insere uma sequência de tokens já normalizada.
    pub fn insert_tokens<S: AsRef<str>>(&mut self, tokens: &[S], update: &TagUpdate) -> NodeId {
        let mut node = Self::ROOT;
        for token in tokens {
            let id = self.dictionary.intern(token.as_ref());
            node = self.child_or_insert(node, id);
        }

        merge_tags(&mut self.nodes[node].tags, update);
        trace!(
            node,
            depth = self.nodes[node].depth,
            tags = self.nodes[node].tags.len(),
            "frase inserida"
        );
        node
    }

    fn child_or_insert(&mut self, parent: NodeId, token: TokenId) -> NodeId {
        if let Some(&child) = self.nodes[parent].children.get(&token) {
            return child;
        }
        let child = self.nodes.len();
        let depth = self.nodes[parent].depth + 1;
        self.nodes.push(TrieNode {
            depth,
            ..TrieNode::default()
        });
        self.nodes[parent].children.insert(token, child);
        child
    }

    /// Filho de `node` pela aresta `token`, sem criar nada.
    ///
    /// Tokens desconhecidos pelo dicionário nunca são arestas.
    pub fn child(&self, node: NodeId, token: &str) -> Option<NodeId> {
        let id = self.dictionary.lookup(token)?;
        self.nodes.get(node)?.children.get(&id).copied()
    }

    /// Nó alcançado pela frase inteira, se o caminho existir.
    pub fn find(&self, phrase: &str) -> Option<NodeId> {
        normalize(phrase)
            .iter()
            .try_fold(Self::ROOT, |node, token| self.child(node, token))
    }

    /// Tags do nó alcançado pela frase, se o caminho existir.
    pub fn tags_for(&self, phrase: &str) -> Option<&Tags> {
        self.find(phrase).map(|node| &self.nodes[node].tags)
    }

    pub fn root(&self) -> &TrieNode {
        &self.nodes[Self::ROOT]
    }

    pub fn node(&self, id: NodeId) -> Option<&TrieNode> {
        self.nodes.get(id)
    }

    /// Total de nós, incluindo a raiz.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Número de nós que carregam ao menos uma tag.
    pub fn phrase_count(&self) -> usize {
        self.nodes.iter().filter(|n| !n.tags.is_empty()).count()
    }

    pub fn dictionary(&self) -> &TokenDictionary {
        &self.dictionary
    }
}

impl Default for PhraseTrie {
    fn default() -> Self {
        Self::new()
    }
}
