//! Orchestration: discover folders, run each through
//! sanitize -> search -> disambiguate -> rename on a worker pool, and
//! collect one log entry per folder.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use imdb_renamer_core::{ConfigError, Decision, FolderTask, RunLogEntry, Settings};
use imdb_renamer_scraper::{MetadataBackend, MetadataClient};

use crate::console::{Console, PromptLock, prompt_lock};
use crate::disambiguate::Disambiguator;
use crate::rename;
use crate::run_log::RunLogSink;
use crate::sanitize::{NameSanitizer, already_properly_named};
use crate::worker_pool::WorkerPool;

/// Runs the whole rename pipeline over a base directory.
pub struct Orchestrator<B> {
    shared: Arc<Shared<B>>,
    workers: usize,
}

/// State every worker reads. The prompt lock and the log sink are the only
/// resources that serialize access.
struct Shared<B> {
    client: MetadataClient<B>,
    sanitizer: NameSanitizer,
    prompt: PromptLock,
    sink: RunLogSink,
}

impl<B: MetadataBackend + 'static> Orchestrator<B> {
    pub fn new(
        settings: &Settings,
        client: MetadataClient<B>,
        console: impl Console + 'static,
        sink: RunLogSink,
    ) -> Self {
        Self {
            shared: Arc::new(Shared {
                client,
                sanitizer: NameSanitizer::new(settings),
                prompt: prompt_lock(console),
                sink,
            }),
            workers: settings.thread_pool_workers,
        }
    }

    /// Process every immediate subdirectory of `base_path`.
    ///
    /// Returns one entry per folder, in completion order. Only a base path
    /// that cannot be listed is an error.
    pub async fn run(&self, base_path: &Path, dry_run: bool) -> Result<Vec<RunLogEntry>, ConfigError> {
        let folders = discover_folders(base_path)?;
        log::info!(
            "Found {} folders in {} ({} workers{})",
            folders.len(),
            base_path.display(),
            self.workers,
            if dry_run { ", dry run" } else { "" }
        );

        let shared = self.shared.clone();
        let mut pool = WorkerPool::start(self.workers, folders.clone(), move |folder: PathBuf| {
            let shared = shared.clone();
            async move {
                let entry = shared.process(&folder, dry_run).await;
                shared.sink.append(&entry);
                entry
            }
        });

        let mut entries = Vec::with_capacity(folders.len());
        while let Some(entry) = pool.recv().await {
            entries.push(entry);
        }

        // A worker that panicked leaves its folder without an entry.
        let seen: HashSet<PathBuf> = entries.iter().map(|e| e.folder.clone()).collect();
        for folder in folders.into_iter().filter(|f| !seen.contains(f)) {
            log::error!("No result for {}; worker aborted", folder.display());
            let entry = RunLogEntry::failed(folder, None, "worker aborted before finishing");
            self.shared.sink.append(&entry);
            entries.push(entry);
        }

        Ok(entries)
    }
}

impl<B: MetadataBackend> Shared<B> {
    async fn process(&self, folder: &Path, dry_run: bool) -> RunLogEntry {
        let name = folder
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        if already_properly_named(&name) {
            log::info!("Skipping already properly named folder: {}", name);
            return RunLogEntry::skipped(folder.to_path_buf(), "already named");
        }

        log::info!("Processing folder: {}", name);
        let task = FolderTask::new(
            folder.to_path_buf(),
            self.sanitizer.sanitize(&name),
            self.sanitizer.extract_year(&name),
        );
        log::info!("Sanitized name: {}", task.sanitized_name);

        let disambiguator = Disambiguator::new(&self.client, &self.prompt);
        let mut candidates = Vec::new();
        for query in self.sanitizer.query_ladder(&task.sanitized_name) {
            if query != task.sanitized_name {
                log::info!("No valid options found. Retrying with: {}", query);
            }
            candidates = disambiguator.lookup(&query, task.year_hint).await;
            if !candidates.is_empty() {
                break;
            }
        }

        match disambiguator.resolve(&task, candidates).await {
            Decision::Skip => {
                log::info!("Skipped folder: {}", name);
                RunLogEntry::skipped(task.path, "skipped by user")
            }
            decision => rename::apply(&task, &decision, dry_run),
        }
    }
}

/// Immediate subdirectories of `base_path`, sorted by name.
pub fn discover_folders(base_path: &Path) -> Result<Vec<PathBuf>, ConfigError> {
    let list_err = |source| ConfigError::ListBasePath {
        path: base_path.to_path_buf(),
        source,
    };
    let mut folders = Vec::new();
    for entry in std::fs::read_dir(base_path).map_err(list_err)? {
        let path = entry.map_err(list_err)?.path();
        if path.is_dir() {
            folders.push(path);
        }
    }
    folders.sort();
    Ok(folders)
}
