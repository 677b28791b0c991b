//! # Pipeline de Anotação: Orquestrador com Eventos Observáveis
//!
//! O [`Annotator`] junta tokenizador, variantes irregulares (opcionais) e a trie
//! de frases. Ele emite eventos em cada passo via um canal Rust (`mpsc`),
//! permitindo que o servidor WebSocket transmita o progresso para o cliente.
//!
//! ## Fases
//!
//! 1. **Construção**: zero ou mais chamadas a [`Annotator::insert`].
//! 2. **Consulta**: qualquer número de chamadas a [`Annotator::annotate`], que
//!    apenas leem a trie. Depois de construída, ela pode ser compartilhada
//!    (`Arc<Annotator>`) entre consultas simultâneas.

use std::sync::mpsc;
use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::lexicon::{demo_lexicon, LexiconEntry};
use crate::matcher::{Match, MatchKind};
use crate::tags::{TagUpdate, Tags};
use crate::tokenizer::{normalize, tokenize, Token};
use crate::trie::{NodeId, PhraseTrie};
use crate::variants::IrregularVariants;

/// Trecho anotado, com a posição no texto original.
///
/// `text` é a forma normalizada (e canonizada, se houver variantes); o trecho
/// original é `input[start..end]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotatedSpan {
    pub text: String,
    pub tags: Tags,
    pub kind: MatchKind,
    pub start_token: usize,
    pub end_token: usize,
    /// Índice de byte inicial no texto original (inclusive).
    pub start: usize,
    /// Índice de byte final no texto original (exclusivo).
    pub end: usize,
}

impl AnnotatedSpan {
    fn from_match(m: Match, tokens: &[Token]) -> Self {
        let start = tokens[m.start_token].start;
        let end = tokens[m.end_token - 1].end;
        Self {
            text: m.text,
            tags: m.tags,
            kind: m.kind,
            start_token: m.start_token,
            end_token: m.end_token,
            start,
            end,
        }
    }
}

/// Eventos emitidos durante a anotação.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum AnnotationEvent {
    /// **Passo 1**: Tokenização concluída.
    TokenizationDone { tokens: Vec<Token>, total: usize },
    /// **Passo 2**: Um caminho na trie foi consumido (com ou sem tags).
    PhraseMatched { span: AnnotatedSpan },
    /// **Passo 2**: Token sem aresta a partir da raiz.
    TokenUnmatched {
        token_index: usize,
        token_text: String,
    },
    /// **Conclusão**: Todos os trechos, cobrindo o texto inteiro.
    Done(AnnotationReport),
}

/// Resultado consolidado de uma anotação.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotationReport {
    pub spans: Vec<AnnotatedSpan>,
    pub total_tokens: usize,
    /// Trechos com ao menos uma tag.
    pub tagged_spans: usize,
    pub processing_ms: u64,
}

/// O anotador léxico.
#[derive(Debug, Clone, Default)]
pub struct Annotator {
    trie: PhraseTrie,
    variants: Option<IrregularVariants>,
}

impl Annotator {
    /// Anotador vazio, sem variantes.
    pub fn new() -> Self {
        Self::default()
    }

    /// Anotador vazio que canoniza tokens com `variants` tanto na inserção
    /// quanto na análise.
    pub fn with_variants(variants: IrregularVariants) -> Self {
        Self {
            trie: PhraseTrie::new(),
            variants: Some(variants),
        }
    }

    /// Constrói o anotador a partir de uma lista de entradas.
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = LexiconEntry>,
    {
        let mut annotator = Self::new();
        annotator.extend(entries);
        annotator
    }

    /// Anotador com o léxico clínico de demonstração.
    pub fn demo() -> Self {
        Self::from_entries(demo_lexicon())
    }

    /// Insere todas as entradas, na ordem.
    pub fn extend<I>(&mut self, entries: I)
    where
        I: IntoIterator<Item = LexiconEntry>,
    {
        let mut count = 0usize;
        for entry in entries {
            self.insert_entry(&entry);
            count += 1;
        }
        debug!(
            entries = count,
            nodes = self.trie.node_count(),
            phrases = self.trie.phrase_count(),
            "léxico carregado"
        );
    }

    pub fn insert(&mut self, phrase: &str, update: &TagUpdate) -> NodeId {
        let tokens = normalize(phrase);
        match &self.variants {
            Some(variants) => self.trie.insert_tokens(&variants.apply(&tokens), update),
            None => self.trie.insert_tokens(&tokens, update),
        }
    }

    pub fn insert_entry(&mut self, entry: &LexiconEntry) -> NodeId {
        self.insert(&entry.phrase, &entry.tags)
    }

    pub fn trie(&self) -> &PhraseTrie {
        &self.trie
    }

    pub fn variants(&self) -> Option<&IrregularVariants> {
        self.variants.as_ref()
    }

    /// Anota o texto de forma síncrona e retorna os trechos.
    pub fn annotate(&self, text: &str) -> Vec<AnnotatedSpan> {
        self.annotate_report(text).spans
    }

    /// Anota o texto de forma síncrona e retorna o resultado consolidado.
    pub fn annotate_report(&self, text: &str) -> AnnotationReport {
        let (tx, rx) = mpsc::channel();
        self.annotate_streaming(text, tx);

        let mut report = AnnotationReport::default();
        while let Ok(event) = rx.recv() {
            if let AnnotationEvent::Done(done) = event {
                report = done;
            }
        }
        report
    }

    /// Anota o texto enviando eventos de progresso pelo canal `tx`.
    ///
    /// # Fluxo de Eventos
    /// 1. `TokenizationDone`
    /// 2. `PhraseMatched` / `TokenUnmatched`, um por trecho, em ordem
    /// 3. `Done`
    ///
    /// Erros de envio (receptor descartado) são ignorados.
    pub fn annotate_streaming(&self, text: &str, tx: mpsc::Sender<AnnotationEvent>) {
        let started = Instant::now();

        let tokens = tokenize(text);
        let _ = tx.send(AnnotationEvent::TokenizationDone {
            tokens: tokens.clone(),
            total: tokens.len(),
        });

        let texts: Vec<&str> = tokens.iter().map(|t| t.text.as_str()).collect();
        let matches = match &self.variants {
            Some(variants) => self.trie.parse_tokens(&variants.apply(&texts)),
            None => self.trie.parse_tokens(&texts),
        };

        let spans: Vec<AnnotatedSpan> = matches
            .into_iter()
            .map(|m| AnnotatedSpan::from_match(m, &tokens))
            .collect();

        for span in &spans {
            let event = match span.kind {
                MatchKind::Phrase => AnnotationEvent::PhraseMatched { span: span.clone() },
                MatchKind::Unmatched => AnnotationEvent::TokenUnmatched {
                    token_index: span.start_token,
                    token_text: span.text.clone(),
                },
            };
            let _ = tx.send(event);
        }

        let tagged_spans = spans.iter().filter(|s| !s.tags.is_empty()).count();
        let _ = tx.send(AnnotationEvent::Done(AnnotationReport {
            spans,
            total_tokens: tokens.len(),
            tagged_spans,
            processing_ms: started.elapsed().as_millis() as u64,
        }));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_annotate_keeps_original_offsets() {
        let annotator = Annotator::demo();
        let text = "I have a  Breast Cancer\ttreatments";
        let spans = annotator.annotate(text);

        let texts: Vec<&str> = spans.iter().map(|s| s.text.as_str()).collect();
        assert_eq!(texts, vec!["i", "have", "a", "breast cancer", "treatments"]);

        let phrase = &spans[3];
        assert_eq!(&text[phrase.start..phrase.end], "Breast Cancer");
        assert_eq!(phrase.tags["snomed_tag"], "disorder");
        assert_eq!((phrase.start_token, phrase.end_token), (3, 5));
    }

    #[test]
    fn test_streaming_event_order() {
        let annotator = Annotator::demo();
        let (tx, rx) = mpsc::channel();
        annotator.annotate_streaming("a breast cancer treatment", tx);
        let events: Vec<AnnotationEvent> = rx.try_iter().collect();

        assert_eq!(events.len(), 4);
        assert!(matches!(events[0], AnnotationEvent::TokenizationDone { total: 4, .. }));
        assert!(matches!(
            events[1],
            AnnotationEvent::TokenUnmatched { token_index: 0, .. }
        ));
        match &events[2] {
            AnnotationEvent::PhraseMatched { span } => {
                assert_eq!(span.text, "breast cancer treatment");
                assert_eq!(span.tags["snomed_tag"], "treatment");
            }
            other => panic!("evento inesperado: {:?}", other),
        }
        match &events[3] {
            AnnotationEvent::Done(report) => {
                assert_eq!(report.spans.len(), 2);
                assert_eq!(report.total_tokens, 4);
                assert_eq!(report.tagged_spans, 1);
            }
            other => panic!("evento inesperado: {:?}", other),
        }
    }

    #[test]
    fn test_report_matches_done_event() {
        let annotator = Annotator::demo();
        let text = "I had a breast cancer treatments and cancer test";

        let report = annotator.annotate_report(text);
        assert_eq!(report.total_tokens, 9);
        assert_eq!(report.tagged_spans, 2);
        assert_eq!(report.spans.len(), 8);
        assert_eq!(report.spans, annotator.annotate(text));

        let empty = annotator.annotate_report("");
        assert!(empty.spans.is_empty());
        assert_eq!((empty.total_tokens, empty.tagged_spans), (0, 0));
    }

    #[test]
    fn test_done_event_serializes_report_as_data() {
        let json = serde_json::to_value(AnnotationEvent::Done(AnnotationReport::default())).unwrap();
        assert_eq!(json["type"], "Done");
        assert_eq!(json["data"]["total_tokens"], 0);
        assert!(json["data"]["spans"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_empty_text() {
        let annotator = Annotator::demo();
        assert!(annotator.annotate("").is_empty());
        assert!(annotator.annotate(" \n ").is_empty());
    }

    #[test]
    fn test_variants_apply_on_both_sides() {
        let variants: IrregularVariants = [("saw", "see"), ("seen", "see")].into_iter().collect();
        let mut annotator = Annotator::with_variants(variants);
        annotator.insert("seen by doctor", &TagUpdate::new().set("kind", "event"));

        let spans = annotator.annotate("Patient saw by doctor");
        assert_eq!(spans.len(), 2);
        assert_eq!(spans[1].text, "see by doctor");
        assert_eq!(spans[1].tags["kind"], "event");
    }

    #[test]
    fn test_without_variants_forms_stay_distinct() {
        let mut annotator = Annotator::new();
        annotator.insert("seen by doctor", &TagUpdate::new().set("kind", "event"));
        let spans = annotator.annotate("saw by doctor");
        assert!(spans.iter().all(|s| s.tags.is_empty()));
        assert!(annotator.variants().is_none());
    }

    #[test]
    fn test_incremental_retagging() {
        let mut annotator = Annotator::new();
        annotator.insert("cancer", &TagUpdate::new().set("a", "x"));
        annotator.insert("cancer", &TagUpdate::new().remove("a").set("b", "y"));

        let spans = annotator.annotate("cancer");
        assert_eq!(spans[0].tags, Tags::from([("b".to_string(), "y".to_string())]));
    }

    #[test]
    fn test_events_serialize_with_type_tag() {
        let event = AnnotationEvent::TokenUnmatched {
            token_index: 0,
            token_text: "a".to_string(),
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "TokenUnmatched");
        assert_eq!(json["data"]["token_text"], "a");
    }
}
