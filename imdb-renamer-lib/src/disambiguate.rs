//! Choosing one candidate (or a skip, or a user-typed title) for a folder.
//!
//! | candidates | behavior                                                  |
//! |------------|-----------------------------------------------------------|
//! | 0          | ask for a custom title to search again, or skip           |
//! | 1          | accept without prompting                                  |
//! | many       | list them; accept a number, a custom title, or a skip     |
//!
//! A custom title typed at the list triggers one more search round. If that
//! round finds nothing, the typed title itself becomes the decision.

use std::io;

use imdb_renamer_core::{Candidate, Decision, FolderTask};
use imdb_renamer_scraper::{MetadataBackend, MetadataClient};

use crate::console::{Console, PromptLock};

/// The user's answer to a candidate list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Choice {
    /// Zero-based index into the shown candidates
    Select(usize),
    Custom(String),
    Skip,
}

pub struct Disambiguator<'a, B> {
    client: &'a MetadataClient<B>,
    prompt: &'a PromptLock,
    max_shown: usize,
}

impl<'a, B: MetadataBackend> Disambiguator<'a, B> {
    pub fn new(client: &'a MetadataClient<B>, prompt: &'a PromptLock) -> Self {
        Self {
            client,
            prompt,
            max_shown: client.max_results(),
        }
    }

    /// Search for `title` and rank the results for this folder.
    pub async fn lookup(&self, title: &str, year_hint: Option<u16>) -> Vec<Candidate> {
        let mut candidates = self.client.search(title).await;
        rank_candidates(&mut candidates, year_hint);
        candidates
    }

    /// Decide what `task` should become, prompting only when needed.
    pub async fn resolve(&self, task: &FolderTask, candidates: Vec<Candidate>) -> Decision {
        let mut candidates = candidates;
        let mut override_title: Option<String> = None;

        loop {
            match candidates.len() {
                0 => {
                    if let Some(title) = override_title {
                        return Decision::ManualOverride(title);
                    }
                    match self.ask_retry(task).await {
                        Some(title) => {
                            log::info!("Retrying with custom name: {}", title);
                            candidates = self.lookup(&title, task.year_hint).await;
                        }
                        None => return Decision::Skip,
                    }
                }
                1 => {
                    let candidate = candidates.swap_remove(0);
                    log::debug!(
                        "Single match for '{}': {} ({})",
                        task.sanitized_name,
                        candidate.title,
                        candidate.imdb_id
                    );
                    return Decision::AcceptedCandidate(candidate);
                }
                _ => match self.ask_choice(task, &candidates).await {
                    Choice::Select(i) => return Decision::AcceptedCandidate(candidates.swap_remove(i)),
                    Choice::Skip => return Decision::Skip,
                    Choice::Custom(title) => {
                        if override_title.is_some() {
                            return Decision::ManualOverride(title);
                        }
                        log::info!("Searching again with custom name: {}", title);
                        candidates = self.lookup(&title, task.year_hint).await;
                        override_title = Some(title);
                    }
                },
            }
        }
    }

    async fn ask_choice(&self, task: &FolderTask, candidates: &[Candidate]) -> Choice {
        let mut console = self.prompt.lock().await;
        console.begin_prompt();
        let answer = prompt_choice(&mut **console, task, candidates, self.max_shown);
        console.end_prompt();
        match answer {
            Ok(choice) => choice,
            Err(e) => {
                log::error!("Console error while prompting for {}: {}", task.original_name(), e);
                Choice::Skip
            }
        }
    }

    async fn ask_retry(&self, task: &FolderTask) -> Option<String> {
        let mut console = self.prompt.lock().await;
        console.begin_prompt();
        let answer = prompt_retry(&mut **console, task);
        console.end_prompt();
        match answer {
            Ok(answer) => answer,
            Err(e) => {
                log::error!("Console error while prompting for {}: {}", task.original_name(), e);
                None
            }
        }
    }
}

/// Order candidates: release year matching the folder first, then by votes.
pub fn rank_candidates(candidates: &mut [Candidate], year_hint: Option<u16>) {
    match year_hint {
        Some(year) => candidates.sort_by(|a, b| {
            (b.year == Some(year))
                .cmp(&(a.year == Some(year)))
                .then_with(|| b.votes.cmp(&a.votes))
        }),
        None => candidates.sort_by(|a, b| b.votes.cmp(&a.votes)),
    }
}

/// Format a vote count with thousands separators.
pub fn format_votes(votes: u64) -> String {
    let digits = votes.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Show up to `max_shown` candidates and read the user's choice.
pub fn prompt_choice(
    console: &mut dyn Console,
    task: &FolderTask,
    candidates: &[Candidate],
    max_shown: usize,
) -> io::Result<Choice> {
    let shown = &candidates[..candidates.len().min(max_shown.max(1))];
    let custom_index = shown.len() + 1;

    console.show("");
    console.show(&format!("Folder: {}", task.original_name()));
    console.show("Please choose one of the following options:");
    for (i, c) in shown.iter().enumerate() {
        console.show(&format!(
            "{}. {} ({}) - IMDb- {} (Ranked by {} people)",
            i + 1,
            c.title,
            c.year_label(),
            c.rating_label(),
            format_votes(c.votes)
        ));
    }
    console.show(&format!("{custom_index}. Enter a custom name"));

    loop {
        let Some(input) =
            console.ask("Enter the number of your choice, a custom name, or 's' to skip: ")?
        else {
            return Ok(Choice::Skip);
        };
        let input = input.trim();

        if input.is_empty() {
            console.show("Custom name cannot be empty. Please try again.");
            continue;
        }
        if input.eq_ignore_ascii_case("s") || input.eq_ignore_ascii_case("skip") {
            return Ok(Choice::Skip);
        }
        if input.chars().all(|c| c.is_ascii_digit()) {
            match input.parse::<usize>() {
                Ok(n) if (1..=shown.len()).contains(&n) => return Ok(Choice::Select(n - 1)),
                Ok(n) if n == custom_index => {
                    let Some(name) = console.ask("Enter the custom name: ")? else {
                        return Ok(Choice::Skip);
                    };
                    let name = name.trim();
                    if name.is_empty() {
                        console.show("Custom name cannot be empty. Please try again.");
                        continue;
                    }
                    return Ok(Choice::Custom(name.to_string()));
                }
                _ => {
                    console.show("Invalid choice number. Please try again.");
                    continue;
                }
            }
        }
        return Ok(Choice::Custom(input.to_string()));
    }
}

/// Ask whether to retry a folder with no matches. `None` means skip.
pub fn prompt_retry(console: &mut dyn Console, task: &FolderTask) -> io::Result<Option<String>> {
    console.show("");
    console.show(&format!(
        "No valid options found for '{}' ({}).",
        task.sanitized_name,
        task.original_name()
    ));
    let Some(answer) = console.ask("Would you like to retry with a custom name? (yes/no) ")? else {
        return Ok(None);
    };
    if !matches!(answer.trim().to_lowercase().as_str(), "yes" | "y") {
        return Ok(None);
    }

    let Some(name) = console.ask("Enter the custom name to retry: ")? else {
        return Ok(None);
    };
    let name = name.trim();
    if name.is_empty() {
        console.show("No custom name provided. Skipping folder...");
        return Ok(None);
    }
    Ok(Some(name.to_string()))
}

#[cfg(test)]
#[path = "tests/disambiguate_tests.rs"]
mod tests;
