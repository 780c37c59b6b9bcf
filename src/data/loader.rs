use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver};
use std::thread;

use once_cell::sync::Lazy;
use rayon::prelude::*;
use regex::Regex;
use thiserror::Error;

use super::model::{Gender, NameDataset, Year};

static YEAR_FILE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\d{4})\.csv$").unwrap());

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Failure of a single source. Logged and skipped; never aborts a load.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("reading {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("parsing {}: {source}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

/// Failure of a whole load (nothing could be discovered).
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("data directory not found: {}", .0.display())]
    MissingDir(PathBuf),
    #[error("invalid source pattern: {0}")]
    Pattern(#[from] glob::PatternError),
}

// ---------------------------------------------------------------------------
// Sources
// ---------------------------------------------------------------------------

/// One `rank,name` file, attributed to a gender and (usually) a year.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Source {
    pub path: PathBuf,
    pub gender: Gender,
    pub year: Option<Year>,
}

impl Source {
    /// Attribute an arbitrary path. `None` when it has no `boys`/`girls` segment.
    pub fn from_path(path: impl Into<PathBuf>) -> Option<Self> {
        let path = path.into();
        let gender = Gender::from_path(&path)?;
        let year = year_from_path(&path);
        Some(Source { path, gender, year })
    }
}

/// Extract the year from a path ending in `/<4 digits>.csv`.
pub fn year_from_path(path: &Path) -> Option<Year> {
    let file_name = path.file_name()?.to_str()?;
    YEAR_FILE
        .captures(file_name)
        .and_then(|caps| caps[1].parse().ok())
}

/// Find `<dir>/boys/*.csv` and `<dir>/girls/*.csv`.
pub fn discover_sources(dir: &Path) -> Result<Vec<Source>, LoadError> {
    if !dir.is_dir() {
        return Err(LoadError::MissingDir(dir.to_path_buf()));
    }

    // The directory is literal; only the file name is a wildcard.
    let base = PathBuf::from(glob::Pattern::escape(&dir.to_string_lossy()));

    let mut sources = Vec::new();
    for gender in Gender::ALL {
        let pattern = base.join(gender.segment()).join("*.csv");
        for entry in glob::glob(&pattern.to_string_lossy())? {
            match entry {
                Ok(path) => match Source::from_path(path.clone()) {
                    Some(source) => sources.push(source),
                    None => log::warn!("Skipping {}: no boys/girls segment", path.display()),
                },
                Err(e) => log::warn!("Skipping unreadable entry: {e}"),
            }
        }
    }
    Ok(sources)
}

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

/// One parsed line. `name` is upper-cased and never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameRow {
    pub rank: String,
    pub name: String,
}

/// Parse `rank,name` lines (no header). Blank lines and rows without a name
/// are dropped; fields past the second are ignored. Quotes are plain text,
/// so every line is exactly one row.
pub fn parse_rows(text: &str) -> Result<Vec<NameRow>, csv::Error> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .quoting(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result?;
        let name = match record.get(1) {
            Some(name) if !name.is_empty() => name,
            _ => continue,
        };
        rows.push(NameRow {
            rank: record.get(0).unwrap_or("").to_string(),
            name: name.to_uppercase(),
        });
    }
    Ok(rows)
}

pub fn read_source(source: &Source) -> Result<Vec<NameRow>, SourceError> {
    let text = std::fs::read_to_string(&source.path).map_err(|e| SourceError::Io {
        path: source.path.clone(),
        source: e,
    })?;
    parse_rows(&text).map_err(|e| SourceError::Csv {
        path: source.path.clone(),
        source: e,
    })
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

/// Result of a load: the merged dataset plus the sources that failed.
#[derive(Debug, Clone, Default)]
pub struct LoadOutcome {
    pub dataset: NameDataset,
    pub failed: Vec<PathBuf>,
}

/// Read every source in parallel, then merge in the given order.
///
/// A source that cannot be read contributes nothing and is listed in
/// [`LoadOutcome::failed`].
pub fn load_sources(sources: &[Source]) -> LoadOutcome {
    let results: Vec<_> = sources
        .par_iter()
        .map(|source| (source, read_source(source)))
        .collect();

    let mut outcome = LoadOutcome::default();
    for (source, result) in results {
        match result {
            Ok(rows) => {
                log::debug!("{}: {} names", source.path.display(), rows.len());
                for row in rows {
                    outcome
                        .dataset
                        .insert(source.gender, source.year, row.name, row.rank);
                }
            }
            Err(e) => {
                log::error!("Error loading {e}");
                outcome.failed.push(source.path.clone());
            }
        }
    }
    outcome
}

pub fn load_dir(dir: &Path) -> Result<LoadOutcome, LoadError> {
    let sources = discover_sources(dir)?;
    log::info!("Found {} name sources in {}", sources.len(), dir.display());
    Ok(load_sources(&sources))
}

/// Load `dir` on a background thread. `on_done` runs after the outcome has
/// been sent (the UI uses it to request a repaint).
pub fn spawn_load<F>(dir: PathBuf, on_done: F) -> Receiver<Result<LoadOutcome, LoadError>>
where
    F: FnOnce() + Send + 'static,
{
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let outcome = load_dir(&dir);
        // The receiver is gone if the app closed or a newer load replaced it.
        let _ = tx.send(outcome);
        on_done();
    });
    rx
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write(dir: &Path, rel: &str, contents: &[u8]) {
        let path = dir.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, contents).unwrap();
    }

    #[test]
    fn year_needs_four_digit_file_name() {
        assert_eq!(year_from_path(Path::new("data/girls/2021.csv")), Some(2021));
        assert_eq!(year_from_path(Path::new("data/girls/21.csv")), None);
        assert_eq!(year_from_path(Path::new("data/girls/x2021.csv")), None);
        assert_eq!(year_from_path(Path::new("data/girls/2021.txt")), None);
        assert_eq!(year_from_path(Path::new("data/girls/all.csv")), None);
    }

    #[test]
    fn rows_are_trimmed_and_upper_cased() {
        let rows = parse_rows("1, Jakub\n2,tomáš \n\n   \n12-13,Anna Marie\n").unwrap();
        assert_eq!(
            rows,
            vec![
                NameRow { rank: "1".into(), name: "JAKUB".into() },
                NameRow { rank: "2".into(), name: "TOMÁŠ".into() },
                NameRow { rank: "12-13".into(), name: "ANNA MARIE".into() },
            ]
        );
    }

    #[test]
    fn rows_without_name_are_dropped() {
        let rows = parse_rows("7\n8,\n9,  \n10,Eva,extra\r\n").unwrap();
        assert_eq!(rows, vec![NameRow { rank: "10".into(), name: "EVA".into() }]);
    }

    #[test]
    fn quote_does_not_swallow_following_lines() {
        let rows = parse_rows("1,\"Jan\n2,Eva\n3,Petr\n").unwrap();
        assert_eq!(
            rows,
            vec![
                NameRow { rank: "1".into(), name: "\"JAN".into() },
                NameRow { rank: "2".into(), name: "EVA".into() },
                NameRow { rank: "3".into(), name: "PETR".into() },
            ]
        );
    }

    #[test]
    fn jana_lands_in_2021_female_index() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "girls/2021.csv", b"3,Jana\n");

        let outcome = load_dir(dir.path()).unwrap();
        let ds = &outcome.dataset;
        assert!(ds.female_names.contains("JANA"));
        assert_eq!(ds.year(2021).unwrap().female.get("JANA").unwrap(), "3");
        assert!(ds.male_names.is_empty());
        assert!(outcome.failed.is_empty());
    }

    #[test]
    fn source_without_year_feeds_universe_only() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "boys/extra.csv", b"1,Ondra\n");

        let ds = load_dir(dir.path()).unwrap().dataset;
        assert!(ds.male_names.contains("ONDRA"));
        assert!(ds.years.is_empty());
    }

    #[test]
    fn year_file_without_valid_rows_adds_no_year() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "boys/2019.csv", b"7\n8,\n\n");
        write(dir.path(), "boys/2020.csv", b"1,Jakub\n");

        let outcome = load_dir(dir.path()).unwrap();
        assert!(outcome.failed.is_empty());
        assert_eq!(outcome.dataset.available_years(), vec![2020]);
        assert!(outcome.dataset.year(2019).is_none());
    }

    #[test]
    fn data_dir_with_glob_characters_is_literal() {
        let root = tempfile::tempdir().unwrap();
        let dir = root.path().join("names [2024] *?");
        write(&dir, "boys/2021.csv", b"1,Jan\n");

        let ds = load_dir(&dir).unwrap().dataset;
        assert_eq!(ds.male_names.len(), 1);
        assert_eq!(ds.year(2021).unwrap().male.get("JAN").unwrap(), "1");
    }

    #[test]
    fn failing_source_does_not_abort_load() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "boys/2020.csv", b"1,Jakub\n2,Jan\n");
        write(dir.path(), "boys/2021.csv", &[0xff, 0xfe, 0x00, 0x2c]);
        write(dir.path(), "girls/2020.csv", b"1,Eliska\n");

        let outcome = load_dir(dir.path()).unwrap();
        assert_eq!(outcome.failed, vec![dir.path().join("boys/2021.csv")]);
        assert_eq!(outcome.dataset.male_names.len(), 2);
        assert_eq!(outcome.dataset.available_years(), vec![2020]);
        assert!(outcome.dataset.female_names.contains("ELISKA"));
    }

    #[test]
    fn loading_twice_is_deterministic() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "boys/2020.csv", b"1,Jakub\n2,Jan\n");
        write(dir.path(), "boys/2021.csv", b"1,Jan\n2,Jakub\n3,Adam\n");
        write(dir.path(), "girls/2021.csv", b"1,Eliska\n2-3,Anna Marie\n");

        let first = load_dir(dir.path()).unwrap().dataset;
        let second = load_dir(dir.path()).unwrap().dataset;
        assert_eq!(first, second);
        assert_eq!(first.male_names.len(), 3);
    }

    #[test]
    fn bundled_sample_data_loads_cleanly() {
        let outcome = load_dir(&crate::config::default_data_dir()).unwrap();
        assert!(outcome.failed.is_empty());
        assert_eq!(outcome.dataset.available_years(), vec![2023, 2022, 2021]);
        for gender in Gender::ALL {
            let universe = outcome.dataset.universe(gender);
            assert!(!universe.is_empty());
            assert!(universe
                .iter()
                .all(|name| !name.is_empty() && *name == name.to_uppercase()));
        }
    }

    #[test]
    fn missing_dir_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_dir(&dir.path().join("nope")).unwrap_err();
        assert!(matches!(err, LoadError::MissingDir(_)));
    }

    #[test]
    fn background_load_delivers_outcome() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "girls/2022.csv", b"1,Sofie\n");

        let rx = spawn_load(dir.path().to_path_buf(), || {});
        let outcome = rx.recv().unwrap().unwrap();
        assert!(outcome.dataset.female_names.contains("SOFIE"));
    }

    #[test]
    fn ad_hoc_source_is_attributed_from_path() {
        let source = Source::from_path("names/boys/1999.csv").unwrap();
        assert_eq!(source.gender, Gender::Male);
        assert_eq!(source.year, Some(1999));
        assert!(Source::from_path("names/1999.csv").is_none());
    }
}
