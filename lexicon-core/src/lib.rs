//! # lexicon-core: Anotador Léxico de Termos Multi-palavra
//!
//! Este crate reconhece termos de várias palavras (ex: nomes de entidades médicas)
//! em texto livre e anexa tags estruturadas a cada trecho reconhecido, usando
//! casamento guloso pelo prefixo mais longo sobre um dicionário de frases.
//!
//! ## Arquitetura do Sistema
//!
//! 1.  **Entrada**: Texto bruto (String).
//! 2.  **Tokenização** ([`tokenizer`]): Divisão por espaços e conversão para minúsculas.
//! 3.  **Variantes** ([`variants`]): Canonização opcional de formas irregulares.
//! 4.  **Trie de Frases** ([`trie`]): Índice construído uma vez a partir do léxico,
//!     com arestas chaveadas pelo [`interner`] e tags fundidas pela regra de [`tags`].
//! 5.  **Casamento** ([`matcher`]): Particiona os tokens em trechos conhecidos (com
//!     tags) e tokens avulsos (sem tags).
//! 6.  **Saída**: Lista de [`AnnotatedSpan`] cobrindo o texto inteiro.
//!
//! ## Exemplo de Uso
//!
//! ```rust
//! use lexicon_core::{Annotator, TagUpdate};
//!
//! // 1. Fase de construção
//! let mut annotator = Annotator::new();
//! annotator.insert("breast cancer", &TagUpdate::new().set("snomed_tag", "disorder"));
//! annotator.insert("breast cancer treatment", &TagUpdate::new().set("snomed_tag", "treatment"));
//!
//! // 2. Fase de consulta
//! let spans = annotator.annotate("I have a breast cancer treatments");
//!
//! let texts: Vec<&str> = spans.iter().map(|s| s.text.as_str()).collect();
//! assert_eq!(texts, vec!["i", "have", "a", "breast cancer", "treatments"]);
//! assert_eq!(spans[3].tags["snomed_tag"], "disorder");
//! ```
//!
//! ## Módulos Principais
//!
//! - [`pipeline`]: Orquestrador que conecta todos os estágios e emite eventos.
//! - [`trie`]: Construção incremental do índice de frases.
//! - [`matcher`]: Algoritmo de casamento guloso com recomeço pela raiz.
//! - [`lexicon`]: Entradas de léxico e dados de demonstração.

pub mod interner;
pub mod lexicon;
pub mod matcher;
pub mod pipeline;
pub mod tags;
pub mod tokenizer;
pub mod trie;
pub mod variants;

pub use interner::{TokenDictionary, TokenId};
pub use lexicon::LexiconEntry;
pub use matcher::{Match, MatchKind};
pub use pipeline::{AnnotatedSpan, AnnotationEvent, AnnotationReport, Annotator};
pub use tags::{TagUpdate, Tags};
pub use tokenizer::Token;
pub use trie::{NodeId, PhraseTrie};
pub use variants::IrregularVariants;
