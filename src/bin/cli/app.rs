use std::path::Path;
use std::time::Instant;

use anyhow::{bail, Context, Result};
use uuid::Uuid;

use studyloop_lib::notebook::ErrorEntry;
use studyloop_lib::storage::FileStorage;
use studyloop_lib::subjects::Subject;
use studyloop_lib::{Settings, Workspace};

/// Shared application state for CLI commands
pub struct App {
    pub workspace: Workspace,
}

impl App {
    /// Load settings and open the study data
    pub fn new(data_dir: Option<&Path>) -> Result<Self> {
        let mut settings = Settings::load_default().context("Failed to load settings")?;
        if let Some(dir) = data_dir {
            settings.data_dir = Some(dir.to_path_buf());
        }

        let data_dir = settings
            .resolve_data_dir()
            .context("Failed to get data directory")?;
        log::debug!("Using data directory {}", data_dir.display());

        let workspace = Workspace::open(FileStorage::new(data_dir), &settings)
            .context("Failed to open study data")?;

        Ok(Self { workspace })
    }

    /// Find a subject by id, name or unique name prefix
    pub fn find_subject(&self, query: &str) -> Result<Subject> {
        let subject = self.workspace.state().subjects.find(query)?;
        Ok(subject.clone())
    }

    /// Find an error entry by id or unique id prefix
    pub fn find_error(&self, query: &str) -> Result<ErrorEntry> {
        let entries = self.workspace.state().error_log.list();

        if let Ok(id) = Uuid::parse_str(query) {
            if let Some(entry) = entries.iter().find(|e| e.id == id) {
                return Ok(entry.clone());
            }
        }

        let prefix = query.to_lowercase();
        let matches: Vec<&ErrorEntry> = entries
            .iter()
            .filter(|e| e.id.to_string().starts_with(&prefix))
            .collect();

        match matches.len() {
            0 => bail!("No error matching '{}'", query),
            1 => Ok(matches[0].clone()),
            _ => {
                let listing: Vec<String> = matches
                    .iter()
                    .map(|e| format!("  - {} {}", short_id(e.id), e.topic))
                    .collect();
                bail!("Ambiguous error id '{}'. Matches:\n{}", query, listing.join("\n"))
            }
        }
    }

    /// Display name of a subject, tolerating removed subjects
    pub fn subject_name(&self, id: Uuid) -> String {
        self.workspace
            .state()
            .subjects
            .get(id)
            .map(|s| s.name.clone())
            .unwrap_or_else(|| "(removed subject)".to_string())
    }

    /// Write pending changes before exiting
    pub fn finish(mut self) -> Result<()> {
        let written = self.workspace.flush().context("Failed to save changes")?;
        if written > 0 && self.workspace.poll_saved(Instant::now()) {
            eprintln!("Saved.");
        }
        Ok(())
    }
}

/// First 8 hex digits of an id, enough to address it on the command line
pub fn short_id(id: Uuid) -> String {
    id.to_string()[..8].to_string()
}
