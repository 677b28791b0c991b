//! Configuração do servidor via variáveis de ambiente
//!
//! | Variável       | Padrão         | Efeito                                        |
//! |----------------|----------------|-----------------------------------------------|
//! | `LEXICON_ADDR` | `0.0.0.0:3000` | Endereço de escuta                            |
//! | `LEXICON_FILE` | (nenhum)       | JSON com as entradas do léxico                |
//! | `LEXICON_DEMO` | `true`         | Carrega o léxico de demonstração sem arquivo  |
//! | `RUST_LOG`     | `info`         | Filtro do `tracing-subscriber`                |

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::Context;
use lexicon_core::{lexicon::parse_entries, Annotator};

const DEFAULT_ADDR: &str = "0.0.0.0:3000";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub addr: SocketAddr,
    pub lexicon_file: Option<PathBuf>,
    pub demo: bool,
}

impl ServerConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let addr = lookup("LEXICON_ADDR").unwrap_or_else(|| DEFAULT_ADDR.to_string());
        let addr: SocketAddr = addr
            .parse()
            .with_context(|| format!("LEXICON_ADDR inválido: {addr}"))?;

        let demo = match lookup("LEXICON_DEMO") {
            Some(value) => value
                .parse::<bool>()
                .with_context(|| format!("LEXICON_DEMO deve ser true/false, recebido: {value}"))?,
            None => true,
        };

        Ok(Self {
            addr,
            lexicon_file: lookup("LEXICON_FILE").map(PathBuf::from),
            demo,
        })
    }

    /// Constrói a trie a partir do arquivo configurado ou do léxico de demonstração.
    pub fn load_annotator(&self) -> anyhow::Result<Annotator> {
        if let Some(path) = &self.lexicon_file {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("falha ao ler léxico {}", path.display()))?;
            let entries = parse_entries(&json)
                .with_context(|| format!("léxico inválido em {}", path.display()))?;
            return Ok(Annotator::from_entries(entries));
        }

        if self.demo {
            Ok(Annotator::demo())
        } else {
            Ok(Annotator::new())
        }
    }
}
