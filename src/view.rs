//! What one render shows: a neutral placeholder, the harvest table, or
//! recipes with their harvest sources

use crate::schema::{HarvestRow, RecipeRow, Sheet};

pub const NO_MATCHING_ITEMS: &str = "No matching magic items found for the selected criteria.";
pub const NO_HARVEST_SOURCES: &str = "No harvest sources found for the selected criteria.";
pub const NO_HARVEST_ROWS: &str = "No harvest rows found for the selected creature type.";
pub const RESULTS_CLEARED: &str = "Results cleared. Change a filter to search again.";

/// A cell range that matched an active filter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Highlight {
    pub column: usize,
    pub needle: String,
}

/// Rows of a section, or the notice shown instead of an empty table
#[derive(Debug, Clone, PartialEq)]
pub enum Listing<'a, R> {
    Rows(Vec<&'a R>),
    NoMatches(&'static str),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Section<'a, R> {
    pub title: String,
    pub headers: &'a [String],
    pub listing: Listing<'a, R>,
    pub highlights: Vec<Highlight>,
}

impl<'a, R> Section<'a, R> {
    /// Build a section, substituting `notice` when no rows survived filtering
    pub fn new(title: impl Into<String>, sheet: &'a Sheet<R>, rows: Vec<&'a R>, notice: &'static str) -> Self {
        let listing = if rows.is_empty() {
            Listing::NoMatches(notice)
        } else {
            Listing::Rows(rows)
        };

        Self {
            title: title.into(),
            headers: &sheet.headers,
            listing,
            highlights: Vec::new(),
        }
    }

    /// Mark a column as matched, ignored when the column is unknown
    pub fn highlight(mut self, column: Option<usize>, needle: &str) -> Self {
        if let Some(column) = column {
            self.highlights.push(Highlight {
                column,
                needle: needle.to_string(),
            });
        }
        self
    }

    pub fn rows(&self) -> &[&'a R] {
        match &self.listing {
            Listing::Rows(rows) => rows,
            Listing::NoMatches(_) => &[],
        }
    }

    pub fn notice(&self) -> Option<&'static str> {
        match self.listing {
            Listing::Rows(_) => None,
            Listing::NoMatches(notice) => Some(notice),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self.listing, Listing::NoMatches(_))
    }

    /// Needle to highlight in a column, if any
    pub fn needle_for(&self, column: usize) -> Option<&str> {
        self.highlights
            .iter()
            .find(|h| h.column == column)
            .map(|h| h.needle.as_str())
    }
}

/// Exactly one primary view per render
#[derive(Debug, Clone, PartialEq)]
pub enum View<'a> {
    /// Neutral state after a clear action
    Cleared,
    Harvest(Section<'a, HarvestRow>),
    Recipes {
        recipes: Section<'a, RecipeRow>,
        /// Harvest cross-reference, absent for the unfiltered table
        sources: Option<Section<'a, HarvestRow>>,
    },
}

impl<'a> View<'a> {
    pub fn title(&self) -> &str {
        match self {
            View::Cleared => "No results shown",
            View::Harvest(section) => &section.title,
            View::Recipes { recipes, .. } => &recipes.title,
        }
    }
}
