//! Harvester - main run orchestration logic
//!
//! This module contains the main harvest loop that coordinates the whole
//! run, including:
//! - Determining the incremental cutoff (configured or from the database)
//! - Fetching the listing and walking events newest-first
//! - Bounded parallel fetching of fight and fighter pages
//! - Assembling fights, with per-fight failures skipped and counted
//! - Flushing results to SQLite and CSV, on interrupt too

use crate::cache::FighterCache;
use crate::config::Config;
use crate::extract::{
    extract_details, extract_event_stubs, extract_fight_links, extract_fighter_links,
    extract_outcome, extract_round, extract_weight_label, text,
};
use crate::fetch::{build_http_client, fetch_all, fetch_document, FIGHTER_FETCH_WIDTH};
use crate::model::{Event, EventStub, Fight, Gender};
use crate::storage::SqliteStorage;
use crate::Result;
use chrono::NaiveDate;
use reqwest::Client;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

/// How a harvest run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// Every discovered fight was harvested and saved.
    Completed,
    /// The run finished, but some fights could not be assembled.
    CompletedWithSkips { skipped: usize },
    /// The run was interrupted; everything harvested so far was saved.
    Interrupted,
}

/// Main harvester structure
pub struct Harvester {
    config: Config,
    client: Client,
    cache: FighterCache,
    events: Vec<Event>,
    skipped_fights: usize,
    interrupted: Arc<AtomicBool>,
}

impl Harvester {
    /// Creates a new harvester from a validated configuration.
    pub fn new(config: Config) -> Result<Self> {
        let client = build_http_client(&config.scrape.user_agent)?;
        Ok(Self {
            config,
            client,
            cache: FighterCache::new(),
            events: Vec::new(),
            skipped_fights: 0,
            interrupted: Arc::new(AtomicBool::new(false)),
        })
    }

    /// Flag that, once set, stops the run at the next event boundary and
    /// triggers an early flush. Handed to the signal handler.
    pub fn interrupt_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.interrupted)
    }

    /// Events harvested so far.
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Runs the harvest to completion (or interruption) and flushes.
    pub async fn run(&mut self) -> Result<RunOutcome> {
        let cutoff = self.determine_cutoff()?;
        match cutoff {
            Some(date) => tracing::info!("Harvesting events newer than {}", date),
            None => tracing::info!("No cutoff; harvesting the full event history"),
        }

        let listing_url = self.config.scrape.listing_url.clone();
        let Some(listing) = fetch_document(&self.client, &listing_url).await else {
            tracing::warn!("Listing page unreachable, nothing to do: {}", listing_url);
            return Ok(RunOutcome::Completed);
        };

        let stubs = extract_event_stubs(&listing, cutoff);
        tracing::info!("{} new event(s) to harvest", stubs.len());

        for stub in stubs {
            if self.interrupted.load(Ordering::SeqCst) {
                tracing::warn!("Interrupted; flushing {} harvested event(s)", self.events.len());
                self.flush(true)?;
                return Ok(RunOutcome::Interrupted);
            }

            let started = Instant::now();
            let link = stub.link.clone();
            let event = self.harvest_event(stub).await;
            tracing::info!(
                "Harvested {} fight(s) from {} in {:.1}s",
                event.fights.len(),
                link,
                started.elapsed().as_secs_f64()
            );
            self.events.push(event);
        }

        self.flush(false)?;

        if self.skipped_fights > 0 {
            tracing::warn!("Run finished with {} skipped fight(s)", self.skipped_fights);
            Ok(RunOutcome::CompletedWithSkips {
                skipped: self.skipped_fights,
            })
        } else {
            Ok(RunOutcome::Completed)
        }
    }

    /// The configured cutoff date, falling back to the date of the most
    /// recent event already in the database.
    fn determine_cutoff(&self) -> Result<Option<NaiveDate>> {
        if let Some(date) = self.config.scrape.cutoff() {
            return Ok(Some(date));
        }
        let storage = SqliteStorage::open(Path::new(&self.config.output.database_path))?;
        storage.latest_event_date()
    }

    /// Harvests one event: fetches its detail page, then every fight page
    /// in a bounded batch. A fight that cannot be assembled is logged,
    /// counted, and skipped; the event keeps its other fights.
    async fn harvest_event(&mut self, stub: EventStub) -> Event {
        let mut event = Event::from_stub(stub);

        let Some(detail) = fetch_document(&self.client, &event.link).await else {
            tracing::warn!("Event page unreachable, keeping stub only: {}", event.link);
            return event;
        };

        let fight_links = extract_fight_links(&detail, &event.link);
        let width = self.config.scrape.max_concurrent_fetches;
        let pages = fetch_all(&self.client, &fight_links, width).await;

        for link in &fight_links {
            let Some(Some(doc)) = pages.get(link) else {
                tracing::warn!("Fight page unreachable, skipping: {}", link);
                self.skipped_fights += 1;
                continue;
            };
            match self.build_fight(link, doc).await {
                Ok(fight) => event.fights.push(fight),
                Err(e) => {
                    tracing::warn!("Skipping fight {}: {}", link, e);
                    self.skipped_fights += 1;
                }
            }
        }

        event
    }

    /// Assembles a full fight record from its detail page.
    async fn build_fight(&self, link: &str, doc: &crate::Document) -> Result<Fight> {
        let (link_a, link_b) = extract_fighter_links(doc, link)?;

        // Prefetch only the profiles the cache has not seen, so each
        // profile page is fetched at most once per run.
        let mut to_fetch = Vec::new();
        for profile in [&link_a, &link_b] {
            if !self.cache.contains(profile).await {
                to_fetch.push(profile.clone());
            }
        }
        let profiles = fetch_all(&self.client, &to_fetch, FIGHTER_FETCH_WIDTH).await;

        let fighter_a = self
            .cache
            .resolve(&self.client, &link_a, profiles.get(&link_a).and_then(Option::as_ref))
            .await;
        let fighter_b = self
            .cache
            .resolve(&self.client, &link_b, profiles.get(&link_b).and_then(Option::as_ref))
            .await;

        let winner = extract_outcome(doc);
        let label = extract_weight_label(doc);
        let (weight_class, gender, title_fight) = match &label {
            Some(label) => (
                text::map_weight_class(label),
                text::infer_gender(label),
                text::is_title_fight(label),
            ),
            None => (None, Gender::Male, false),
        };

        let details = extract_details(doc);
        let method_of_victory = details.get("METHOD").filter(|m| !m.is_empty()).cloned();
        let round_of_victory = details
            .get("ROUND")
            .and_then(|r| text::parse_round_number(r));
        let time_of_victory_sec = details.get("TIME").and_then(|t| text::parse_mm_ss(t));
        let time_format = details
            .get("TIME FORMAT")
            .and_then(|f| text::parse_time_format(f));
        let referee = details.get("REFEREE").filter(|r| !r.is_empty()).cloned();

        let mut rounds = Vec::new();
        if let Some(last_round) = round_of_victory {
            for round_number in 1..=last_round {
                rounds.push(extract_round(doc, round_number, (&link_a, &link_b))?);
            }
        }

        Ok(Fight {
            link: link.to_string(),
            fighter_a,
            fighter_b,
            winner,
            weight_class,
            gender,
            title_fight,
            method_of_victory,
            round_of_victory,
            time_of_victory_sec,
            time_format,
            referee,
            rounds,
        })
    }

    /// Writes everything harvested so far to both sinks.
    ///
    /// On the interrupt path sink errors are logged and swallowed so that
    /// a failure in one sink cannot prevent the other from saving; on the
    /// normal path they propagate.
    fn flush(&mut self, interrupted: bool) -> Result<()> {
        if self.events.is_empty() {
            tracing::info!("Nothing to flush");
            return Ok(());
        }

        let db = self.save_to_database();
        let csv = self.save_to_csv();

        if interrupted {
            if let Err(e) = db {
                tracing::error!("Database flush failed during interrupt: {}", e);
            }
            if let Err(e) = csv {
                tracing::error!("CSV flush failed during interrupt: {}", e);
            }
            return Ok(());
        }

        db?;
        csv?;
        Ok(())
    }

    fn save_to_database(&mut self) -> Result<()> {
        let mut storage = SqliteStorage::open(Path::new(&self.config.output.database_path))?;
        storage.save_events(&self.events)?;
        tracing::info!(
            "Saved {} event(s) to {}",
            self.events.len(),
            self.config.output.database_path
        );
        Ok(())
    }

    fn save_to_csv(&self) -> Result<()> {
        crate::export::write_events(Path::new(&self.config.output.csv_path), &self.events)?;
        tracing::info!("Exported CSV to {}", self.config.output.csv_path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{OutputConfig, ScrapeConfig};

    fn test_config(dir: &Path) -> Config {
        Config {
            scrape: ScrapeConfig::default(),
            output: OutputConfig {
                database_path: dir.join("test.db").to_string_lossy().into_owned(),
                csv_path: dir.join("test.csv").to_string_lossy().into_owned(),
            },
        }
    }

    #[test]
    fn test_configured_cutoff_wins_over_database() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = test_config(dir.path());
        config.scrape.cutoff_date = Some("2024-03-05".to_string());

        let harvester = Harvester::new(config).unwrap();
        assert_eq!(
            harvester.determine_cutoff().unwrap(),
            NaiveDate::from_ymd_opt(2024, 3, 5)
        );
    }

    #[test]
    fn test_cutoff_falls_back_to_empty_database() {
        let dir = tempfile::tempdir().unwrap();
        let harvester = Harvester::new(test_config(dir.path())).unwrap();
        assert_eq!(harvester.determine_cutoff().unwrap(), None);
    }

    #[test]
    fn test_interrupt_flag_is_shared() {
        let dir = tempfile::tempdir().unwrap();
        let harvester = Harvester::new(test_config(dir.path())).unwrap();
        let flag = harvester.interrupt_flag();
        flag.store(true, Ordering::SeqCst);
        assert!(harvester.interrupted.load(Ordering::SeqCst));
    }
}
