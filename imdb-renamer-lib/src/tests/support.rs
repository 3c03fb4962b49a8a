//! Test doubles shared by unit and integration tests.

#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::io;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use imdb_renamer_core::Candidate;
use imdb_renamer_scraper::{LookupError, MetadataBackend, MetadataClient, RetryPolicy};

use super::Console;

/// Answers searches from a fixed query table and records every call.
///
/// Clones share the call record, so a test can keep one after handing the
/// backend to a client.
#[derive(Default, Clone)]
pub struct StubBackend {
    results: HashMap<String, Vec<Candidate>>,
    calls: Arc<Mutex<Vec<String>>>,
}

impl StubBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, query: &str, candidates: Vec<Candidate>) -> Self {
        self.results.insert(query.to_string(), candidates);
        self
    }

    /// Queries seen so far; fallback calls are prefixed with `fallback:`.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

impl MetadataBackend for StubBackend {
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<Candidate>, LookupError> {
        self.calls.lock().unwrap().push(query.to_string());
        let mut found = self.results.get(query).cloned().unwrap_or_default();
        found.truncate(limit);
        Ok(found)
    }

    async fn fallback_search(&self, query: &str) -> Result<Vec<Candidate>, LookupError> {
        self.calls.lock().unwrap().push(format!("fallback:{query}"));
        Ok(Vec::new())
    }
}

pub fn client(backend: StubBackend) -> MetadataClient<StubBackend> {
    MetadataClient::with_policy(
        backend,
        RetryPolicy {
            max_attempts: 1,
            delay: Duration::ZERO,
        },
        10,
    )
}

pub fn movie(title: &str, year: u16, rating: f32, votes: u64) -> Candidate {
    Candidate::new(title, format!("tt{:07}", votes % 10_000_000))
        .with_year(year)
        .with_rating(rating)
        .with_votes(votes)
}

/// A console fed from a fixed list of answers, recording everything shown.
///
/// Clones share the same script and transcript.
#[derive(Debug, Clone, Default)]
pub struct ScriptedConsole {
    state: Arc<Mutex<ScriptState>>,
}

#[derive(Debug, Default)]
struct ScriptState {
    answers: VecDeque<String>,
    transcript: Vec<String>,
    questions: usize,
    in_prompt: bool,
    prompt_blocks: usize,
    outside_prompt: usize,
}

impl ScriptedConsole {
    pub fn new<S: Into<String>>(answers: impl IntoIterator<Item = S>) -> Self {
        let console = Self::default();
        console.state.lock().unwrap().answers = answers.into_iter().map(Into::into).collect();
        console
    }

    /// Every line shown and every prompt asked, in order.
    pub fn transcript(&self) -> Vec<String> {
        self.state.lock().unwrap().transcript.clone()
    }

    /// Number of times input was requested.
    pub fn questions_asked(&self) -> usize {
        self.state.lock().unwrap().questions
    }

    /// Answers not yet consumed.
    pub fn remaining(&self) -> usize {
        self.state.lock().unwrap().answers.len()
    }

    /// Completed begin/end prompt blocks.
    pub fn prompt_blocks(&self) -> usize {
        self.state.lock().unwrap().prompt_blocks
    }

    /// Lines shown or asked outside a begin/end prompt block.
    pub fn lines_outside_prompt(&self) -> usize {
        self.state.lock().unwrap().outside_prompt
    }

    fn record(state: &mut ScriptState, line: &str) {
        if !state.in_prompt {
            state.outside_prompt += 1;
        }
        state.transcript.push(line.to_string());
    }
}

impl Console for ScriptedConsole {
    fn show(&mut self, line: &str) {
        let mut state = self.state.lock().unwrap();
        Self::record(&mut state, line);
    }

    fn ask(&mut self, prompt: &str) -> io::Result<Option<String>> {
        let mut state = self.state.lock().unwrap();
        Self::record(&mut state, prompt);
        state.questions += 1;
        Ok(state.answers.pop_front())
    }

    fn begin_prompt(&mut self) {
        self.state.lock().unwrap().in_prompt = true;
    }

    fn end_prompt(&mut self) {
        let mut state = self.state.lock().unwrap();
        state.in_prompt = false;
        state.prompt_blocks += 1;
    }
}
