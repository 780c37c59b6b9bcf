use std::cmp::Ordering;

use super::model::{Gender, NameDataset, NameItem, RankMap, Year};

// ---------------------------------------------------------------------------
// Filter selection
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortBy {
    #[default]
    Alpha,
    /// Only honoured while a year is selected.
    Rank,
}

impl SortBy {
    pub fn label(self) -> &'static str {
        match self {
            SortBy::Alpha => "Alphabetical",
            SortBy::Rank => "By rank",
        }
    }
}

/// Everything the user can narrow the list by, apart from gender.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameFilters {
    pub year: Option<Year>,
    pub sort_by: SortBy,
    pub search_text: String,
    pub include_plural_names: bool,
}

impl Default for NameFilters {
    fn default() -> Self {
        Self {
            year: None,
            sort_by: SortBy::Alpha,
            search_text: String::new(),
            include_plural_names: true,
        }
    }
}

// ---------------------------------------------------------------------------
// Rank parsing
// ---------------------------------------------------------------------------

/// Numeric sort key of a rank string: the leading integer before the first
/// `-`, so a tie range like `"12-13"` sorts as 12.
///
/// `None` when there are no leading digits. Digit runs too long for `i64`
/// saturate to `i64::MAX`.
pub fn rank_key(rank: &str) -> Option<i64> {
    let head = rank.split('-').next().unwrap_or("").trim_start();
    // `head` never contains '-', so only a '+' sign can appear.
    let digits = head.strip_prefix('+').unwrap_or(head);
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }
    Some(digits[..end].parse().unwrap_or(i64::MAX))
}

/// Unparsable ranks order after every parsable one.
fn compare_ranks(a: &str, b: &str) -> Ordering {
    match (rank_key(a), rank_key(b)) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

// ---------------------------------------------------------------------------
// Filter / sort pipeline
// ---------------------------------------------------------------------------

/// Compute the displayed list for the current selection.
///
/// Steps run in a fixed order: search text, year membership, plural names,
/// then sorting. Rank sorting needs a year; without one the list falls back
/// to alphabetical order with empty ranks.
pub fn displayed_names(
    dataset: &NameDataset,
    gender: Option<Gender>,
    filters: &NameFilters,
) -> Vec<NameItem> {
    let Some(gender) = gender else {
        return Vec::new();
    };

    let empty = RankMap::new();
    let year_data: Option<&RankMap> = filters.year.map(|year| {
        dataset
            .year(year)
            .map(|data| data.names(gender))
            .unwrap_or(&empty)
    });

    let search_term = filters.search_text.to_uppercase();

    // The universe is an ordered set, so survivors stay in code-point order.
    let names: Vec<&String> = dataset
        .universe(gender)
        .iter()
        .filter(|name| search_term.is_empty() || name.contains(&search_term))
        .filter(|name| year_data.map_or(true, |ranks| ranks.contains_key(name.as_str())))
        .filter(|name| filters.include_plural_names || !name.contains(' '))
        .collect();

    match (year_data, filters.sort_by) {
        (Some(ranks), SortBy::Rank) => {
            let mut items: Vec<NameItem> = names
                .into_iter()
                .map(|name| NameItem {
                    name: name.clone(),
                    rank: ranks.get(name.as_str()).cloned().unwrap_or_default(),
                })
                .collect();
            // Stable: equal ranks keep alphabetical order.
            items.sort_by(|a, b| compare_ranks(&a.rank, &b.rank));
            items
        }
        _ => names
            .into_iter()
            .map(|name| NameItem {
                name: name.clone(),
                rank: String::new(),
            })
            .collect(),
    }
}
