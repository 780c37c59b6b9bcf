use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::path::Path;

// ---------------------------------------------------------------------------
// Gender – which half of the data set a source belongs to
// ---------------------------------------------------------------------------

/// Calendar year of a source file (always four digits).
pub type Year = u16;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub const ALL: [Gender; 2] = [Gender::Male, Gender::Female];

    /// Path segment naming the directory that holds this gender's sources.
    pub fn segment(self) -> &'static str {
        match self {
            Gender::Male => "boys",
            Gender::Female => "girls",
        }
    }

    /// Detect the gender from the nearest `boys` / `girls` path segment.
    pub fn from_path(path: &Path) -> Option<Gender> {
        path.components().rev().find_map(|c| match c.as_os_str().to_str() {
            Some("boys") => Some(Gender::Male),
            Some("girls") => Some(Gender::Female),
            _ => None,
        })
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Gender::Male => write!(f, "Boys"),
            Gender::Female => write!(f, "Girls"),
        }
    }
}

// ---------------------------------------------------------------------------
// NameItem – one row of the displayed list
// ---------------------------------------------------------------------------

/// A displayed name with its rank for the selected year.
///
/// `rank` stays textual because tied positions are written as ranges
/// (`"12-13"`). It is empty when the list is not rank-sorted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameItem {
    pub name: String,
    pub rank: String,
}

// ---------------------------------------------------------------------------
// YearData – name → rank mappings for one year
// ---------------------------------------------------------------------------

/// Upper-cased name → rank string.
pub type RankMap = BTreeMap<String, String>;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct YearData {
    pub male: RankMap,
    pub female: RankMap,
}

impl YearData {
    pub fn names(&self, gender: Gender) -> &RankMap {
        match gender {
            Gender::Male => &self.male,
            Gender::Female => &self.female,
        }
    }

    pub fn names_mut(&mut self, gender: Gender) -> &mut RankMap {
        match gender {
            Gender::Male => &mut self.male,
            Gender::Female => &mut self.female,
        }
    }
}

// ---------------------------------------------------------------------------
// NameDataset – everything the loader produced
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DatasetStats {
    pub years: usize,
    pub male_names: usize,
    pub female_names: usize,
}

/// Year indices plus the per-gender name universes.
///
/// Universes are ordered sets, so iterating one yields names in code-point
/// order without a separate sort.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameDataset {
    pub years: BTreeMap<Year, YearData>,
    pub male_names: BTreeSet<String>,
    pub female_names: BTreeSet<String>,
}

impl NameDataset {
    /// Every distinct name seen for `gender`, across all years.
    pub fn universe(&self, gender: Gender) -> &BTreeSet<String> {
        match gender {
            Gender::Male => &self.male_names,
            Gender::Female => &self.female_names,
        }
    }

    fn universe_mut(&mut self, gender: Gender) -> &mut BTreeSet<String> {
        match gender {
            Gender::Male => &mut self.male_names,
            Gender::Female => &mut self.female_names,
        }
    }

    /// Record one parsed row. `name` must already be upper-cased.
    ///
    /// The year entry is created on first insert, so only years with at
    /// least one row ever appear in the index.
    pub fn insert(&mut self, gender: Gender, year: Option<Year>, name: String, rank: String) {
        if let Some(year) = year {
            self.years
                .entry(year)
                .or_default()
                .names_mut(gender)
                .insert(name.clone(), rank);
        }
        self.universe_mut(gender).insert(name);
    }

    pub fn year(&self, year: Year) -> Option<&YearData> {
        self.years.get(&year)
    }

    /// Indexed years, newest first.
    pub fn available_years(&self) -> Vec<Year> {
        self.years.keys().rev().copied().collect()
    }

    /// `(year, rank)` for every year that ranks `name`, oldest first.
    pub fn rank_history(&self, gender: Gender, name: &str) -> Vec<(Year, &str)> {
        self.years
            .iter()
            .filter_map(|(year, data)| {
                data.names(gender)
                    .get(name)
                    .map(|rank| (*year, rank.as_str()))
            })
            .collect()
    }

    pub fn stats(&self) -> DatasetStats {
        DatasetStats {
            years: self.years.len(),
            male_names: self.male_names.len(),
            female_names: self.female_names.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.male_names.is_empty() && self.female_names.is_empty()
    }
}
