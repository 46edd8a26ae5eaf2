//! Filter engine: pure predicates over the loaded sheets and the harvest
//! cross-reference. Nothing here mutates the dataset or the filter state.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

use crate::schema::{ColumnRole, CraftingRow, Dataset, HarvestRow, RecipeRow, Sheet};
use crate::view::{Section, View, NO_HARVEST_ROWS, NO_HARVEST_SOURCES, NO_MATCHING_ITEMS};

/// Sentinel option meaning "no creature type filter"
pub const ANY_CREATURE: &str = "(Any)";

/// Creature type selection
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CreatureFilter {
    #[default]
    Any,
    Type(String),
}

impl CreatureFilter {
    /// The value to match, `None` for `(Any)`
    pub fn active(&self) -> Option<&str> {
        match self {
            CreatureFilter::Any => None,
            CreatureFilter::Type(t) => Some(t),
        }
    }

    pub fn label(&self) -> &str {
        self.active().unwrap_or(ANY_CREATURE)
    }
}

impl From<String> for CreatureFilter {
    fn from(value: String) -> Self {
        if value == ANY_CREATURE || value.is_empty() {
            CreatureFilter::Any
        } else {
            CreatureFilter::Type(value)
        }
    }
}

impl From<CreatureFilter> for String {
    fn from(value: CreatureFilter) -> Self {
        match value {
            CreatureFilter::Any => ANY_CREATURE.to_string(),
            CreatureFilter::Type(t) => t,
        }
    }
}

/// Which dimension the search text drives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchMode {
    CreatureType,
    Component,
    #[default]
    MagicItem,
}

impl SearchMode {
    pub fn next(self) -> Self {
        match self {
            SearchMode::MagicItem => SearchMode::Component,
            SearchMode::Component => SearchMode::CreatureType,
            SearchMode::CreatureType => SearchMode::MagicItem,
        }
    }
}

impl fmt::Display for SearchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchMode::CreatureType => write!(f, "Creature Type"),
            SearchMode::Component => write!(f, "Component"),
            SearchMode::MagicItem => write!(f, "Magic Item"),
        }
    }
}

/// Everything the user has chosen, passed to [`evaluate`] on every render
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterState {
    pub search_text: String,
    pub creature_type: CreatureFilter,
    pub mode: SearchMode,
    pub show_harvest: bool,
}

impl FilterState {
    /// Trimmed search text, `None` when blank
    pub fn search(&self) -> Option<&str> {
        let text = self.search_text.trim();
        if text.is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

/// Case-insensitive containment; a missing value never matches
pub fn contains_ci(haystack: Option<&str>, needle: &str) -> bool {
    match haystack {
        Some(value) => value.to_lowercase().contains(&needle.to_lowercase()),
        None => false,
    }
}

/// Recipes whose name contains `text`, in sheet order
pub fn filter_recipes_by_name<'a>(
    rows: impl IntoIterator<Item = &'a RecipeRow>,
    text: &str,
) -> Vec<&'a RecipeRow> {
    rows.into_iter()
        .filter(|r| contains_ci(r.name.as_deref(), text))
        .collect()
}

/// Rows whose creature type contains the selected type; `(Any)` keeps all rows
pub fn filter_by_creature_type<'a, R: CraftingRow + 'a>(
    rows: impl IntoIterator<Item = &'a R>,
    filter: &CreatureFilter,
) -> Vec<&'a R> {
    match filter.active() {
        None => rows.into_iter().collect(),
        Some(creature) => rows
            .into_iter()
            .filter(|r| contains_ci(r.creature_type(), creature))
            .collect(),
    }
}

/// Rows whose creature type contains free `text`
pub fn filter_by_creature_text<'a, R: CraftingRow + 'a>(
    rows: impl IntoIterator<Item = &'a R>,
    text: &str,
) -> Vec<&'a R> {
    rows.into_iter()
        .filter(|r| contains_ci(r.creature_type(), text))
        .collect()
}

/// Rows whose component contains free `text`
pub fn filter_by_component<'a, R: CraftingRow + 'a>(
    rows: impl IntoIterator<Item = &'a R>,
    text: &str,
) -> Vec<&'a R> {
    rows.into_iter()
        .filter(|r| contains_ci(r.component(), text))
        .collect()
}

/// Distinct non-null components of a row set
pub fn components_of<'a, R: CraftingRow + 'a>(
    rows: impl IntoIterator<Item = &'a R>,
) -> BTreeSet<&'a str> {
    rows.into_iter().filter_map(|r| r.component()).collect()
}

/// Harvest rows whose component is exactly one of `components`, narrowed by
/// creature type
pub fn harvest_for_components<'a>(
    harvest: &'a [HarvestRow],
    components: &BTreeSet<&str>,
    creature: &CreatureFilter,
) -> Vec<&'a HarvestRow> {
    let supplying = harvest
        .iter()
        .filter(|h| h.component.as_deref().is_some_and(|c| components.contains(c)));
    filter_by_creature_type(supplying, creature)
}

/// Harvest rows supplying the components the given recipes need
pub fn derive_harvest<'a>(
    harvest: &'a Sheet<HarvestRow>,
    recipes: &[&RecipeRow],
    creature: &CreatureFilter,
) -> Vec<&'a HarvestRow> {
    let needed = components_of(recipes.iter().copied());
    harvest_for_components(&harvest.rows, &needed, creature)
}

/// Selector options: `(Any)` followed by the distinct sorted creature types
/// of the recipes sheet
pub fn creature_type_options(recipes: &Sheet<RecipeRow>) -> Vec<String> {
    let distinct: BTreeSet<&str> = recipes
        .rows
        .iter()
        .filter_map(|r| r.creature_type.as_deref())
        .collect();

    std::iter::once(ANY_CREATURE)
        .chain(distinct)
        .map(str::to_string)
        .collect()
}

/// Compute the primary view for a filter state.
///
/// Precedence: harvest toggle, then search text, then creature type, then the
/// full recipe table. The one-shot clear is handled by the session.
pub fn evaluate<'a>(data: &'a Dataset, state: &FilterState) -> View<'a> {
    if state.show_harvest {
        return View::Harvest(harvest_table(data, &state.creature_type));
    }

    match (state.search(), state.creature_type.active()) {
        (Some(text), _) => search(data, state, text),
        (None, Some(creature)) => by_creature_type(data, &state.creature_type, creature),
        (None, None) => View::Recipes {
            recipes: Section::new(
                "All Magic Items",
                &data.recipes,
                data.recipes.rows.iter().collect(),
                NO_MATCHING_ITEMS,
            ),
            sources: None,
        },
    }
}

fn harvest_table<'a>(data: &'a Dataset, creature: &CreatureFilter) -> Section<'a, HarvestRow> {
    let rows = filter_by_creature_type(&data.harvest.rows, creature);
    let title = match creature.active() {
        Some(c) => format!("Harvest Table for '{}'", c),
        None => "Harvest Table".to_string(),
    };

    let section = Section::new(title, &data.harvest, rows, NO_HARVEST_ROWS);
    highlight_creature(section, &data.harvest, creature)
}

fn search<'a>(data: &'a Dataset, state: &FilterState, text: &str) -> View<'a> {
    let creature = &state.creature_type;
    let recipes_sheet = &data.recipes;
    let harvest_sheet = &data.harvest;

    let (title, recipes, harvest, role) = match state.mode {
        SearchMode::MagicItem => {
            // Name first, then creature type on the survivors
            let by_name = filter_recipes_by_name(&recipes_sheet.rows, text);
            let recipes = filter_by_creature_type(by_name, creature);
            let harvest = derive_harvest(harvest_sheet, &recipes, creature);
            let title = format!("Magic Items matching '{}'", text);
            (title, recipes, harvest, ColumnRole::Name)
        }
        SearchMode::Component => {
            let recipes = filter_by_creature_type(
                filter_by_component(&recipes_sheet.rows, text),
                creature,
            );
            let harvest = filter_by_creature_type(
                filter_by_component(&harvest_sheet.rows, text),
                creature,
            );
            let title = format!("Magic Items needing '{}'", text);
            (title, recipes, harvest, ColumnRole::Component)
        }
        SearchMode::CreatureType => {
            let recipes = filter_by_creature_type(
                filter_by_creature_text(&recipes_sheet.rows, text),
                creature,
            );
            let harvest = filter_by_creature_type(
                filter_by_creature_text(&harvest_sheet.rows, text),
                creature,
            );
            let title = format!("Magic Items from '{}'", text);
            (title, recipes, harvest, ColumnRole::CreatureType)
        }
    };

    let recipes_section = Section::new(title, recipes_sheet, recipes, NO_MATCHING_ITEMS)
        .highlight(recipes_sheet.role_index(role), text);
    let recipes_section = highlight_creature(recipes_section, recipes_sheet, creature);

    let sources = if recipes_section.is_empty() {
        None
    } else {
        let section = Section::new("Harvest Sources", harvest_sheet, harvest, NO_HARVEST_SOURCES);
        let section = if role == ColumnRole::Name {
            section
        } else {
            section.highlight(harvest_sheet.role_index(role), text)
        };
        Some(highlight_creature(section, harvest_sheet, creature))
    };

    View::Recipes {
        recipes: recipes_section,
        sources,
    }
}

fn by_creature_type<'a>(data: &'a Dataset, filter: &CreatureFilter, creature: &str) -> View<'a> {
    let recipes = filter_by_creature_type(&data.recipes.rows, filter);
    let harvest = filter_by_creature_type(&data.harvest.rows, filter);

    let recipes = Section::new(
        format!("Magic Items using '{}' Parts", creature),
        &data.recipes,
        recipes,
        NO_MATCHING_ITEMS,
    );
    let sources = Section::new(
        format!("Harvest Sources for '{}'", creature),
        &data.harvest,
        harvest,
        NO_HARVEST_SOURCES,
    );

    View::Recipes {
        recipes: highlight_creature(recipes, &data.recipes, filter),
        sources: Some(highlight_creature(sources, &data.harvest, filter)),
    }
}

fn highlight_creature<'a, R>(
    section: Section<'a, R>,
    sheet: &Sheet<R>,
    creature: &CreatureFilter,
) -> Section<'a, R> {
    match creature.active() {
        Some(c) => section.highlight(sheet.role_index(ColumnRole::CreatureType), c),
        None => section,
    }
}
