use std::path::PathBuf;
use std::sync::mpsc::{Receiver, TryRecvError};

use crate::config::default_data_dir;
use crate::data::filter::{displayed_names, rank_key, NameFilters, SortBy};
use crate::data::loader::{spawn_load, LoadError, LoadOutcome};
use crate::data::model::{Gender, NameDataset, NameItem, Year};

type PendingLoad = Receiver<Result<LoadOutcome, LoadError>>;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Directory the current (or in-flight) dataset comes from.
    pub data_dir: PathBuf,

    /// Loaded dataset (None until the first load finishes).
    pub dataset: Option<NameDataset>,

    pub selected_gender: Option<Gender>,

    pub filters: NameFilters,

    /// Names passing the current filters, in display order (cached).
    pub displayed: Vec<NameItem>,

    /// Name whose rank history is charted.
    pub selected_name: Option<String>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,

    /// Whether a load is in progress.
    pub loading: bool,

    pending: Option<PendingLoad>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(default_data_dir())
    }
}

impl AppState {
    pub fn new(data_dir: PathBuf) -> Self {
        Self {
            data_dir,
            dataset: None,
            selected_gender: None,
            filters: NameFilters::default(),
            displayed: Vec::new(),
            selected_name: None,
            status_message: None,
            loading: false,
            pending: None,
        }
    }

    // -- loading --

    /// Start loading `dir` in the background. A load already in flight is
    /// abandoned.
    pub fn start_load<F>(&mut self, dir: PathBuf, on_done: F)
    where
        F: FnOnce() + Send + 'static,
    {
        self.pending = Some(spawn_load(dir.clone(), on_done));
        self.data_dir = dir;
        self.loading = true;
        self.status_message = None;
    }

    /// Pick up a finished background load, if any.
    pub fn poll_load(&mut self) {
        let Some(rx) = &self.pending else {
            return;
        };
        match rx.try_recv() {
            Ok(Ok(outcome)) => {
                self.pending = None;
                self.apply_outcome(outcome);
            }
            Ok(Err(e)) => {
                self.pending = None;
                log::error!("Error loading names: {e}");
                self.status_message = Some(format!("Error: {e}"));
                self.loading = false;
            }
            Err(TryRecvError::Empty) => {}
            Err(TryRecvError::Disconnected) => {
                self.pending = None;
                log::error!("Name loader stopped without a result");
                self.status_message = Some("Error: loader stopped unexpectedly".into());
                self.loading = false;
            }
        }
    }

    pub fn apply_outcome(&mut self, outcome: LoadOutcome) {
        let stats = outcome.dataset.stats();
        log::info!(
            "Loaded {} years, {} boys' and {} girls' names from {}",
            stats.years,
            stats.male_names,
            stats.female_names,
            self.data_dir.display()
        );
        self.set_dataset(outcome.dataset);
        if !outcome.failed.is_empty() {
            self.status_message = Some(format!(
                "{} source file(s) could not be loaded",
                outcome.failed.len()
            ));
        }
    }

    /// Ingest a newly loaded dataset, keeping whatever selection still applies.
    pub fn set_dataset(&mut self, dataset: NameDataset) {
        if let Some(year) = self.filters.year {
            if dataset.year(year).is_none() {
                self.filters.year = None;
            }
        }
        let name_gone = match (self.selected_gender, &self.selected_name) {
            (Some(gender), Some(name)) => !dataset.universe(gender).contains(name),
            _ => false,
        };
        if name_gone {
            self.selected_name = None;
        }
        self.dataset = Some(dataset);
        self.status_message = None;
        self.loading = false;
        self.refilter();
    }

    // -- selection --

    /// Recompute `displayed` after any selection change.
    pub fn refilter(&mut self) {
        self.displayed = match &self.dataset {
            Some(ds) => displayed_names(ds, self.selected_gender, &self.filters),
            None => Vec::new(),
        };
    }

    pub fn select_gender(&mut self, gender: Gender) {
        if self.selected_gender != Some(gender) {
            self.selected_name = None;
        }
        self.selected_gender = Some(gender);
        self.refilter();
    }

    pub fn set_year(&mut self, year: Option<Year>) {
        self.filters.year = year;
        self.refilter();
    }

    pub fn set_sort_by(&mut self, sort_by: SortBy) {
        self.filters.sort_by = sort_by;
        self.refilter();
    }

    pub fn set_search_text(&mut self, text: String) {
        self.filters.search_text = text;
        self.refilter();
    }

    pub fn set_include_plural(&mut self, include: bool) {
        self.filters.include_plural_names = include;
        self.refilter();
    }

    pub fn select_name(&mut self, name: Option<String>) {
        self.selected_name = name;
    }

    // -- derived views --

    /// Whether the displayed list is actually ordered by rank.
    pub fn rank_sorted(&self) -> bool {
        self.filters.year.is_some() && self.filters.sort_by == SortBy::Rank
    }

    pub fn available_years(&self) -> Vec<Year> {
        self.dataset
            .as_ref()
            .map(NameDataset::available_years)
            .unwrap_or_default()
    }

    /// Rank history of the selected name, oldest year first.
    pub fn selected_history(&self) -> Vec<(Year, &str)> {
        match (&self.dataset, self.selected_gender, &self.selected_name) {
            (Some(ds), Some(gender), Some(name)) => ds.rank_history(gender, name),
            _ => Vec::new(),
        }
    }

    /// Largest numeric rank in the displayed list (for tinting).
    pub fn worst_displayed_rank(&self) -> i64 {
        self.displayed
            .iter()
            .filter_map(|item| rank_key(&item.rank))
            .max()
            .unwrap_or(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, Instant};

    fn dataset() -> NameDataset {
        let mut ds = NameDataset::default();
        ds.insert(Gender::Male, Some(2020), "JAKUB".into(), "1".into());
        ds.insert(Gender::Male, Some(2021), "JAN".into(), "1".into());
        ds.insert(Gender::Male, Some(2021), "JAKUB".into(), "2".into());
        ds.insert(Gender::Female, Some(2021), "JANA".into(), "3".into());
        ds.insert(Gender::Female, Some(2021), "ANNA MARIE".into(), "1".into());
        ds
    }

    fn names(state: &AppState) -> Vec<&str> {
        state.displayed.iter().map(|i| i.name.as_str()).collect()
    }

    #[test]
    fn nothing_is_shown_before_gender_selection() {
        let mut state = AppState::default();
        state.set_dataset(dataset());
        assert!(state.displayed.is_empty());

        state.select_gender(Gender::Male);
        assert_eq!(names(&state), vec!["JAKUB", "JAN"]);
    }

    #[test]
    fn every_mutation_recomputes_the_list() {
        let mut state = AppState::default();
        state.set_dataset(dataset());
        state.select_gender(Gender::Female);
        assert_eq!(names(&state), vec!["ANNA MARIE", "JANA"]);

        state.set_include_plural(false);
        assert_eq!(names(&state), vec!["JANA"]);

        state.set_include_plural(true);
        state.set_search_text("mar".into());
        assert_eq!(names(&state), vec!["ANNA MARIE"]);

        state.set_search_text(String::new());
        state.set_year(Some(2021));
        state.set_sort_by(SortBy::Rank);
        assert!(state.rank_sorted());
        assert_eq!(names(&state), vec!["ANNA MARIE", "JANA"]);
        assert_eq!(state.worst_displayed_rank(), 3);

        state.set_year(None);
        assert!(!state.rank_sorted());
        assert!(state.displayed.iter().all(|i| i.rank.is_empty()));
    }

    #[test]
    fn switching_gender_clears_selected_name() {
        let mut state = AppState::default();
        state.set_dataset(dataset());
        state.select_gender(Gender::Male);
        state.select_name(Some("JAKUB".into()));
        assert_eq!(state.selected_history(), vec![(2020, "1"), (2021, "2")]);

        state.select_gender(Gender::Female);
        assert!(state.selected_name.is_none());
        assert!(state.selected_history().is_empty());
    }

    #[test]
    fn reload_drops_selection_that_no_longer_exists() {
        let mut state = AppState::default();
        state.set_dataset(dataset());
        state.select_gender(Gender::Male);
        state.set_year(Some(2020));
        state.select_name(Some("JAKUB".into()));

        let mut smaller = NameDataset::default();
        smaller.insert(Gender::Male, Some(2021), "JAN".into(), "1".into());
        state.set_dataset(smaller);

        assert_eq!(state.filters.year, None);
        assert!(state.selected_name.is_none());
        assert_eq!(names(&state), vec!["JAN"]);
    }

    #[test]
    fn failed_sources_are_reported() {
        let mut state = AppState::default();
        state.apply_outcome(LoadOutcome {
            dataset: dataset(),
            failed: vec![PathBuf::from("data/boys/2019.csv")],
        });
        assert!(!state.loading);
        assert_eq!(
            state.status_message.as_deref(),
            Some("1 source file(s) could not be loaded")
        );
        assert_eq!(state.available_years(), vec![2021, 2020]);
    }

    #[test]
    fn background_load_finishes_through_poll() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("boys")).unwrap();
        std::fs::write(dir.path().join("boys/2022.csv"), "1,Matyáš\n").unwrap();

        let mut state = AppState::default();
        state.start_load(dir.path().to_path_buf(), || {});
        assert!(state.loading);

        let deadline = Instant::now() + Duration::from_secs(10);
        while state.loading && Instant::now() < deadline {
            state.poll_load();
            std::thread::sleep(Duration::from_millis(5));
        }
        assert!(!state.loading);
        state.select_gender(Gender::Male);
        assert_eq!(names(&state), vec!["MATYÁŠ"]);
    }

    #[test]
    fn missing_dir_surfaces_as_status() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = AppState::default();
        state.start_load(dir.path().join("absent"), || {});

        let deadline = Instant::now() + Duration::from_secs(10);
        while state.loading && Instant::now() < deadline {
            state.poll_load();
            std::thread::sleep(Duration::from_millis(5));
        }
        assert!(state.dataset.is_none());
        assert!(state
            .status_message
            .as_deref()
            .unwrap()
            .starts_with("Error: data directory not found"));
    }
}
