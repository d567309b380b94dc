// TestDependencies - mock implementations for testing
//
// Mock collaborators for the session controller and the reader.

use anyhow::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::sync::Semaphore;

use super::{BasePageExtractor, BaseTextGenerator, GeneratedAnswer, SourceLink};
use crate::domains::content::ExtractedDocument;

// =============================================================================
// Mock Text Generator
// =============================================================================

pub struct MockTextGenerator {
    answers: Arc<Mutex<Vec<GeneratedAnswer>>>,
    queries: Arc<Mutex<Vec<String>>>,
    failing: bool,
    gate: Option<Arc<Semaphore>>,
}

impl Default for MockTextGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl MockTextGenerator {
    pub fn new() -> Self {
        Self {
            answers: Arc::new(Mutex::new(Vec::new())),
            queries: Arc::new(Mutex::new(Vec::new())),
            failing: false,
            gate: None,
        }
    }

    /// Queue an answer without sources
    pub fn with_answer(self, text: &str) -> Self {
        self.with_sourced_answer(text, vec![])
    }

    /// Queue an answer with (title, uri) sources
    pub fn with_sourced_answer(self, text: &str, sources: Vec<(&str, &str)>) -> Self {
        let answer = GeneratedAnswer {
            text: text.to_string(),
            sources: sources
                .into_iter()
                .map(|(title, uri)| SourceLink {
                    title: title.to_string(),
                    uri: uri.to_string(),
                })
                .collect(),
        };
        self.answers.lock().unwrap().push(answer);
        self
    }

    /// Every call fails
    pub fn failing(mut self) -> Self {
        self.failing = true;
        self
    }

    /// Hold every call until `release` is called
    pub fn paused(mut self) -> Self {
        self.gate = Some(Arc::new(Semaphore::new(0)));
        self
    }

    /// Let one held call complete
    pub fn release(&self) {
        if let Some(gate) = &self.gate {
            gate.add_permits(1);
        }
    }

    /// Queries received so far
    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.queries.lock().unwrap().len()
    }
}

#[async_trait]
impl BaseTextGenerator for MockTextGenerator {
    async fn generate(&self, query: &str) -> Result<GeneratedAnswer> {
        self.queries.lock().unwrap().push(query.to_string());

        if let Some(gate) = &self.gate {
            gate.acquire().await?.forget();
        }

        if self.failing {
            anyhow::bail!("mock generator failure");
        }

        let mut answers = self.answers.lock().unwrap();
        if !answers.is_empty() {
            Ok(answers.remove(0))
        } else {
            Ok(GeneratedAnswer {
                text: "Mock summary".to_string(),
                sources: vec![],
            })
        }
    }
}

// =============================================================================
// Mock Page Extractor
// =============================================================================

pub struct MockPageExtractor {
    pages: Arc<Mutex<HashMap<String, ExtractedDocument>>>,
    calls: Arc<Mutex<Vec<String>>>,
}

impl Default for MockPageExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl MockPageExtractor {
    pub fn new() -> Self {
        Self {
            pages: Arc::new(Mutex::new(HashMap::new())),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Serve `document` for `url`; unknown URLs fail
    pub fn with_page(self, url: &str, document: ExtractedDocument) -> Self {
        self.pages
            .lock()
            .unwrap()
            .insert(url.to_string(), document);
        self
    }

    /// URLs that were extracted
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl BasePageExtractor for MockPageExtractor {
    async fn extract_page(&self, url: &str) -> Result<ExtractedDocument> {
        self.calls.lock().unwrap().push(url.to_string());

        self.pages
            .lock()
            .unwrap()
            .get(url)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("HTTP 404: Not Found"))
    }
}
