//! # Application Controller
//!
//! Wires the profile, gateway, session and history cache together and
//! runs one command-line operation.

use anyhow::{anyhow, Result};
use serde::Serialize;

use crate::analysis::Dispatcher;
use crate::cmd_args::{AnalyzeArgs, Command, CommandLineArgs, HistoryAction};
use crate::config::{self, Profile};
use crate::gateway::{ApiClient, HealthStatus};
use crate::history::{FileStorage, HistoryCache, NewHistoryEntry};
use crate::output;
use crate::session::{AnalysisSession, SessionEvent};

/// Outcome of a history mutation, as printed by the CLI
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryChange {
    pub action: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub removed: usize,
    pub remaining: usize,
}

impl HistoryChange {
    fn summary(&self) -> String {
        match &self.id {
            Some(id) if self.removed == 0 => {
                format!("No entry {id}; {} entries remain\n", self.remaining)
            }
            Some(id) => format!("Removed {id}; {} entries remain\n", self.remaining),
            None => format!("History cleared ({} entries removed)\n", self.removed),
        }
    }
}

/// Fail when the backend answers but reports itself unhealthy
pub fn check_health(health: &HealthStatus) -> Result<()> {
    if health.is_healthy() {
        Ok(())
    } else {
        Err(anyhow!(
            "backend is {} (database={}, cache={})",
            health.status,
            health.database,
            health.cache
        ))
    }
}

pub struct App {
    args: CommandLineArgs,
    profile: Profile,
    session: AnalysisSession,
    history: HistoryCache<FileStorage>,
}

impl App {
    /// Build the application from parsed arguments and the configured profile
    pub fn new(args: CommandLineArgs) -> Result<Self> {
        let profile_path = config::get_profile_path();
        let profile = config::load_profile(&profile_path, args.profile())?.with_env_overrides();
        tracing::debug!("Using profile '{}' against {}", profile.name, profile.host);

        let client = ApiClient::new(profile.host.clone())?;
        let session = AnalysisSession::new(Dispatcher::new(client));
        session.subscribe(Box::new(|event: &SessionEvent| match event {
            SessionEvent::Started { generation } => {
                tracing::debug!("Analysis {generation} started")
            }
            SessionEvent::Discarded { generation, .. } => {
                tracing::debug!("Analysis {generation} superseded")
            }
            _ => {}
        }));

        let history = HistoryCache::open(
            FileStorage::new(profile.data_dir.clone()),
            profile.history_capacity,
        );

        Ok(Self {
            args,
            profile,
            session,
            history,
        })
    }

    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    pub async fn run(&mut self) -> Result<()> {
        let command = self.args.command().clone();
        match command {
            Command::Analyze(analyze) => self.analyze(&analyze).await,
            Command::History { action } => self.history(action.unwrap_or(HistoryAction::List)),
            Command::Health => {
                let health = self.client().health().await?;
                self.emit(&health, || {
                    format!(
                        "{} (version {}, database={}, cache={})\n",
                        health.status, health.version, health.database, health.cache
                    )
                })?;
                check_health(&health)
            }
            Command::Surahs => {
                let surahs = self.client().list_surahs().await?;
                self.emit(&surahs, || output::format_surahs(&surahs))
            }
            Command::Surah { number } => {
                let surah = self.client().get_surah(number).await?;
                self.emit(&surah, || {
                    let mut text = output::format_surahs(std::slice::from_ref(&surah.summary));
                    for verse in &surah.verses {
                        text.push_str(&output::format_verse(verse));
                    }
                    text
                })
            }
            Command::Verse {
                surah,
                ayah: Some(ayah),
            } => {
                let verse = self.client().get_verse(surah, ayah).await?;
                self.emit(&verse, || output::format_verse(&verse))
            }
            Command::Verse { surah, ayah: None } => {
                let verses = self.client().get_surah_verses(surah).await?;
                self.emit(&verses, || {
                    verses
                        .verses
                        .iter()
                        .map(|v| format!("{}:{}  {}\n", verses.surah_number, v.number, v.text))
                        .collect()
                })
            }
            Command::Frequency { surah, verse } => {
                let frequency = self.client().letter_frequency(surah, verse).await?;
                self.emit(&frequency, || {
                    let mut text = format!(
                        "{} letters, {} distinct\n",
                        frequency.total_items, frequency.unique_items
                    );
                    for (letter, count) in &frequency.top_items {
                        text.push_str(&format!("{letter}  {count}\n"));
                    }
                    text
                })
            }
            Command::Search {
                query,
                surah,
                limit,
            } => {
                let results = self.client().search(&query, surah, limit).await?;
                self.emit(&results, || {
                    let mut text = format!("{} results\n", results.total_results);
                    for hit in &results.results {
                        text.push_str(&format!(
                            "{}:{}  {}\n",
                            hit.surah_number, hit.verse_number, hit.text
                        ));
                    }
                    text
                })
            }
        }
    }

    fn client(&self) -> &ApiClient {
        self.session.dispatcher().client()
    }

    async fn analyze(&mut self, args: &AnalyzeArgs) -> Result<()> {
        let request = args.to_request()?;

        match self.session.analyze(&request).await {
            Some(result) => {
                if !args.no_history {
                    let entry = self.history.add_entry(NewHistoryEntry::from_result(&result));
                    tracing::debug!("Recorded analysis as {}", entry.id);
                }
                self.emit(&result, || output::format_result(&result))
            }
            None => {
                let snapshot = self.session.snapshot();
                match snapshot.error {
                    Some(error) => Err(anyhow!(output::format_failure(&error))),
                    None => Err(anyhow!("analysis did not complete")),
                }
            }
        }
    }

    fn history(&mut self, action: HistoryAction) -> Result<()> {
        match action {
            HistoryAction::List => {
                let entries = self.history.entries();
                self.emit(entries, || output::format_history(entries))
            }
            HistoryAction::Remove { id } => {
                let before = self.history.len();
                if self.history.get(&id).is_none() {
                    tracing::warn!("No history entry with id {id}");
                }
                self.history.remove_entry(&id);
                let change = HistoryChange {
                    action: "remove",
                    id: Some(id),
                    removed: before - self.history.len(),
                    remaining: self.history.len(),
                };
                self.emit(&change, || change.summary())
            }
            HistoryAction::Clear => {
                let change = HistoryChange {
                    action: "clear",
                    id: None,
                    removed: self.history.len(),
                    remaining: 0,
                };
                self.history.clear_history();
                self.emit(&change, || change.summary())
            }
        }
    }

    fn emit<T, F>(&self, value: &T, text: F) -> Result<()>
    where
        T: serde::Serialize + ?Sized,
        F: FnOnce() -> String,
    {
        if self.args.json() {
            println!("{}", output::to_json(value)?);
        } else {
            print!("{}", text());
        }
        Ok(())
    }
}
