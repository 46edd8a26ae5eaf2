//! Integration tests for the filter engine, session and loader.
//!
//! The sheets are built from in-memory grids through the same parser the
//! workbook reader uses, so column resolution is exercised too.

use once_cell::sync::Lazy;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::collections::BTreeSet;
use std::path::PathBuf;

use crafting_explorer::filter::{
    components_of, creature_type_options, derive_harvest, evaluate, filter_by_creature_type,
    filter_recipes_by_name, harvest_for_components, CreatureFilter, FilterState,
};
use crafting_explorer::parser::{parse_essence, parse_harvest, parse_recipes};
use crafting_explorer::schema::{Cell, Dataset, RecipeRow};
use crafting_explorer::session::{Event, Session};
use crafting_explorer::ui::{Phase, SilentUi, Ui};
use crafting_explorer::view::{View, NO_MATCHING_ITEMS};
use crafting_explorer::workbook::{load_dataset, load_logo, LoadError};
use crafting_explorer::writer::{view_to_json, write_text};

// =============================================================================
// Test Configuration
// =============================================================================

/// Random seed for reproducible sampling
const RANDOM_SEED: u64 = 42;

/// Number of random cases per property
const CASES: usize = 200;

// =============================================================================
// Shared Test Dataset
// =============================================================================

fn grid(rows: &[&[&str]]) -> Vec<Vec<Cell>> {
    rows.iter()
        .map(|r| {
            r.iter()
                .map(|c| if c.is_empty() { None } else { Some(c.to_string()) })
                .collect()
        })
        .collect()
}

fn build_dataset(essence: &[&[&str]], harvest: &[&[&str]], recipes: &[&[&str]]) -> Dataset {
    Dataset {
        essence: parse_essence(grid(essence)).expect("essence sheet"),
        harvest: parse_harvest(grid(harvest)).expect("harvest sheet"),
        recipes: parse_recipes(grid(recipes)).expect("recipes sheet"),
    }
}

/// Shared dataset - built once and reused for all tests
static DATASET: Lazy<Dataset> = Lazy::new(|| {
    build_dataset(
        &[
            &["Essence", "Rarity"],
            &["Frail", "Uncommon"],
            &["Robust", "Rare"],
        ],
        &[
            &["Creature Type", "Component", "DC"],
            &["Dragon", "Scale", "15"],
            &["Dragon", "Heart", "20"],
            &["Dragon, Young", "Scale", "12"],
            &["Yeti", "Fur", "10"],
            &["Salamander", "Scale", "14"],
            &["", "Dust", "5"],
            &["Fey", "", "8"],
        ],
        &[
            &["Item Name", "Creature Type", "Component", "Rarity"],
            &["Flame Tongue", "Dragon", "Scale", "Rare"],
            &["Flame Tongue", "Dragon", "Heart", "Rare"],
            &["Ice Brand", "Yeti", "Fur", "Very Rare"],
            &["", "Dragon", "Blood", "Rare"],
            &["Wyrmling Cloak", "Dragon, Young", "Scale", "Uncommon"],
            &["Pixie Dust Pouch", "", "Dust", "Common"],
            &["Cloak of Salamander", "Salamander", "Scale", "Rare"],
        ],
    )
});

fn names(rows: &[&RecipeRow]) -> Vec<String> {
    rows.iter().filter_map(|r| r.name.clone()).collect()
}

/// Random needle: a slice of an existing name in random case, or noise
fn random_needle(rng: &mut impl Rng) -> String {
    let named: Vec<&str> = DATASET
        .recipes
        .rows
        .iter()
        .filter_map(|r| r.name.as_deref())
        .collect();

    if rng.gen_bool(0.7) {
        let name: Vec<char> = named.choose(rng).unwrap().chars().collect();
        let start = rng.gen_range(0..name.len());
        let end = rng.gen_range(start..=name.len());
        name[start..end]
            .iter()
            .map(|c| {
                if rng.gen_bool(0.5) {
                    c.to_ascii_uppercase()
                } else {
                    c.to_ascii_lowercase()
                }
            })
            .collect()
    } else {
        let alphabet: Vec<char> = "abcdefgxyz ".chars().collect();
        (0..rng.gen_range(1..5))
            .map(|_| *alphabet.choose(rng).unwrap())
            .collect()
    }
}

// =============================================================================
// Filter Properties
// =============================================================================

#[test]
fn test_name_filter_matches_case_folded_substrings() {
    let mut rng = rand::rngs::StdRng::seed_from_u64(RANDOM_SEED);

    for _ in 0..CASES {
        let needle = random_needle(&mut rng);
        let matched = filter_recipes_by_name(&DATASET.recipes.rows, &needle);

        let expected: Vec<&RecipeRow> = DATASET
            .recipes
            .rows
            .iter()
            .filter(|r| match &r.name {
                Some(name) => name.to_lowercase().contains(&needle.to_lowercase()),
                None => false,
            })
            .collect();

        assert_eq!(matched, expected, "needle {:?}", needle);
        assert!(matched.iter().all(|r| r.name.is_some()));
    }
}

#[test]
fn test_any_creature_type_is_identity() {
    let recipes = filter_by_creature_type(&DATASET.recipes.rows, &CreatureFilter::Any);
    let all: Vec<_> = DATASET.recipes.rows.iter().collect();
    assert_eq!(recipes, all);

    let harvest = filter_by_creature_type(&DATASET.harvest.rows, &CreatureFilter::Any);
    assert_eq!(harvest.len(), DATASET.harvest.len());
}

#[test]
fn test_harvest_derivation_is_idempotent() {
    let mut rng = rand::rngs::StdRng::seed_from_u64(RANDOM_SEED);
    let creatures: Vec<CreatureFilter> = creature_type_options(&DATASET.recipes)
        .into_iter()
        .map(CreatureFilter::from)
        .collect();

    for _ in 0..CASES {
        let recipes: Vec<&RecipeRow> = DATASET
            .recipes
            .rows
            .iter()
            .filter(|_| rng.gen_bool(0.4))
            .collect();
        let creature = creatures.choose(&mut rng).unwrap();

        let first = derive_harvest(&DATASET.harvest, &recipes, creature);
        let supplied = components_of(first.iter().copied());
        let second = harvest_for_components(&DATASET.harvest.rows, &supplied, creature);

        assert_eq!(first, second);
    }
}

#[test]
fn test_component_match_is_exact() {
    // A partial component name supplies nothing
    let needed: BTreeSet<&str> = ["Scal"].into_iter().collect();
    let rows = harvest_for_components(&DATASET.harvest.rows, &needed, &CreatureFilter::Any);
    assert!(rows.is_empty());
}

#[test]
fn test_missing_values_never_offered_or_matched() {
    let options = creature_type_options(&DATASET.recipes);
    assert_eq!(
        options,
        vec!["(Any)", "Dragon", "Dragon, Young", "Salamander", "Yeti"]
    );

    let recipes = filter_recipes_by_name(&DATASET.recipes.rows, "");
    assert_eq!(recipes.len(), DATASET.recipes.len() - 1);
}

// =============================================================================
// Session Properties
// =============================================================================

#[test]
fn test_reset_always_restores_defaults() {
    let mut rng = rand::rngs::StdRng::seed_from_u64(RANDOM_SEED);
    let options = creature_type_options(&DATASET.recipes);

    for _ in 0..CASES {
        let mut session = Session::new(&DATASET);

        for _ in 0..rng.gen_range(0..12) {
            let event = match rng.gen_range(0..8) {
                0 => Event::SetSearch(random_needle(&mut rng)),
                1 => Event::PushSearchChar('x'),
                2 => Event::PopSearchChar,
                3 => Event::SetCreatureType(options.choose(&mut rng).unwrap().clone()),
                4 => Event::SelectNextCreatureType,
                5 => Event::ToggleHarvest,
                6 => Event::CycleMode,
                _ => Event::Clear,
            };
            session.apply(event).unwrap();
        }

        session.apply(Event::Reset).unwrap();
        assert_eq!(session.state().search_text, "");
        assert_eq!(session.state().creature_type, CreatureFilter::Any);
    }
}

#[test]
fn test_default_state_shows_full_recipe_table() {
    let mut session = Session::new(&DATASET);
    match session.render() {
        View::Recipes { recipes, sources } => {
            assert_eq!(recipes.title, "All Magic Items");
            assert_eq!(recipes.rows().len(), DATASET.recipes.len());
            assert!(sources.is_none());
        }
        other => panic!("unexpected view: {:?}", other),
    }
}

#[test]
fn test_clear_then_resume() {
    let mut session = Session::new(&DATASET);
    session.apply(Event::SetSearch("ice".into())).unwrap();
    session.apply(Event::Clear).unwrap();

    assert_eq!(session.render(), View::Cleared);
    match session.render() {
        View::Recipes { recipes, .. } => assert_eq!(names(recipes.rows()), vec!["Ice Brand"]),
        other => panic!("unexpected view: {:?}", other),
    }
}

#[test]
fn test_harvest_toggle_suppresses_recipes() {
    let mut session = Session::new(&DATASET);
    session.apply(Event::SetSearch("flame".into())).unwrap();
    session.apply(Event::ToggleHarvest).unwrap();

    match session.render() {
        View::Harvest(section) => {
            assert_eq!(section.title, "Harvest Table");
            assert_eq!(section.rows().len(), DATASET.harvest.len());
        }
        other => panic!("unexpected view: {:?}", other),
    }
}

// =============================================================================
// Scenarios
// =============================================================================

#[test]
fn test_flame_scenario() {
    let data = build_dataset(
        &[&["Essence"]],
        &[
            &["Creature Type", "Component"],
            &["Dragon", "Scale"],
            &["Yeti", "Fur"],
        ],
        &[
            &["Name", "Creature Type", "Component"],
            &["Flame Tongue", "Dragon", "Scale"],
            &["Ice Brand", "Yeti", "Fur"],
        ],
    );

    let state = FilterState {
        search_text: "flame".into(),
        ..FilterState::default()
    };

    match evaluate(&data, &state) {
        View::Recipes { recipes, sources } => {
            assert_eq!(recipes.rows(), &[&data.recipes.rows[0]]);
            let sources = sources.expect("harvest sources");
            assert_eq!(sources.rows(), &[&data.harvest.rows[0]]);
            assert_eq!(sources.rows()[0].creature_type.as_deref(), Some("Dragon"));
            assert_eq!(sources.rows()[0].component.as_deref(), Some("Scale"));
        }
        other => panic!("unexpected view: {:?}", other),
    }
}

#[test]
fn test_no_match_shows_notice() {
    let state = FilterState {
        search_text: "vorpal".into(),
        ..FilterState::default()
    };

    match evaluate(&DATASET, &state) {
        View::Recipes { recipes, sources } => {
            assert!(recipes.is_empty());
            assert_eq!(recipes.notice(), Some(NO_MATCHING_ITEMS));
            assert!(sources.is_none());
        }
        other => panic!("unexpected view: {:?}", other),
    }
}

#[test]
fn test_dragon_creature_type_without_search() {
    let mut session = Session::new(&DATASET);
    session.apply(Event::SetCreatureType("Dragon".into())).unwrap();

    match session.render() {
        View::Recipes { recipes, sources } => {
            assert_eq!(recipes.title, "Magic Items using 'Dragon' Parts");
            let expected: Vec<_> = DATASET
                .recipes
                .rows
                .iter()
                .filter(|r| {
                    r.creature_type
                        .as_deref()
                        .is_some_and(|c| c.to_lowercase().contains("dragon"))
                })
                .collect();
            assert_eq!(recipes.rows(), expected.as_slice());
            assert_eq!(recipes.rows().len(), 4);

            let sources = sources.expect("harvest rows");
            assert_eq!(sources.rows().len(), 3);
            assert!(sources
                .rows()
                .iter()
                .all(|h| h.creature_type.as_deref().unwrap().contains("Dragon")));
        }
        other => panic!("unexpected view: {:?}", other),
    }
}

#[test]
fn test_search_narrowed_by_creature_type() {
    let mut session = Session::new(&DATASET);
    session.apply(Event::SetSearch("cloak".into())).unwrap();
    session.apply(Event::SetCreatureType("Salamander".into())).unwrap();

    match session.render() {
        View::Recipes { recipes, sources } => {
            assert_eq!(recipes.title, "Magic Items matching 'cloak'");
            assert_eq!(names(recipes.rows()), vec!["Cloak of Salamander"]);
            let sources = sources.unwrap();
            // Scale comes from three creatures, only the salamander survives
            assert_eq!(sources.rows().len(), 1);
            assert_eq!(sources.rows()[0].creature_type.as_deref(), Some("Salamander"));
        }
        other => panic!("unexpected view: {:?}", other),
    }
}

// =============================================================================
// Output
// =============================================================================

#[test]
fn test_text_output_lists_rows() {
    let mut session = Session::new(&DATASET);
    session.apply(Event::SetSearch("ice".into())).unwrap();
    let view = session.render();

    let mut out = Vec::new();
    write_text(&mut out, &view).unwrap();
    let text = String::from_utf8(out).unwrap();

    assert!(text.contains("== Magic Items matching 'ice' =="));
    assert!(text.contains("Ice Brand"));
    assert!(text.contains("== Harvest Sources =="));
    assert!(text.contains("Yeti"));
}

#[test]
fn test_json_output() {
    let mut session = Session::new(&DATASET);
    session.apply(Event::SetSearch("vorpal".into())).unwrap();
    let view = session.render();

    let doc = view_to_json(&view, session.state());
    assert_eq!(doc["filters"]["search_text"], "vorpal");
    assert_eq!(doc["filters"]["creature_type"], "(Any)");
    assert_eq!(doc["view"]["kind"], "recipes");
    assert_eq!(doc["view"]["recipes"]["notice"], NO_MATCHING_ITEMS);
    assert!(doc["view"]["sources"].is_null());

    session.apply(Event::SetSearch("ice".into())).unwrap();
    let view = session.render();
    let doc = view_to_json(&view, session.state());
    let row = &doc["view"]["recipes"]["rows"][0];
    assert_eq!(row["Item Name"], "Ice Brand");
    assert_eq!(row["Rarity"], "Very Rare");
}

// =============================================================================
// Loading
// =============================================================================

#[test]
fn test_missing_workbook() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("Heliana's Recipes.xlsx");

    let err = load_dataset(&path, &mut SilentUi::new()).unwrap_err();
    match &err {
        LoadError::MissingFile(p) => assert_eq!(p, &path),
        other => panic!("unexpected error: {other}"),
    }
    assert!(err.to_string().contains("was not found"));
}

#[test]
fn test_unreadable_workbook() {
    let file = tempfile::Builder::new().suffix(".xlsx").tempfile().unwrap();
    std::fs::write(file.path(), b"not a spreadsheet").unwrap();

    let err = load_dataset(file.path(), &mut SilentUi::new()).unwrap_err();
    assert!(matches!(err, LoadError::Open { .. }));
}

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// Keeps what the loader reports so tests can inspect it
#[derive(Default)]
struct RecordingUi {
    phases: Vec<Phase>,
    messages: Vec<String>,
}

impl Ui for RecordingUi {
    fn set_phase(&mut self, phase: Phase) {
        self.phases.push(phase);
    }

    fn set_info(&mut self, _info: impl Into<String>) {}

    fn log(&mut self, message: impl Into<String>) {
        self.messages.push(message.into());
    }
}

#[test]
fn test_load_fixture_workbook() {
    let mut ui = RecordingUi::default();
    let data = load_dataset(&fixture("crafting.xlsx"), &mut ui).unwrap();

    assert_eq!(data.essence.len(), 3);
    // The blank spreadsheet row between Dragon and Yeti is dropped
    assert_eq!(data.harvest.len(), 4);
    assert_eq!(data.recipes.len(), 3);
    assert_eq!(ui.phases.last(), Some(&Phase::Ready));
    assert_eq!(ui.messages.len(), 3);

    assert_eq!(data.recipes.headers[0], "Item Name");
    assert_eq!(data.recipes.rows[0].name.as_deref(), Some("Flame Tongue"));
    assert_eq!(data.essence.rows[0].cells[2].as_deref(), Some("12"));
    assert_eq!(data.harvest.rows[2].creature_type.as_deref(), Some("Yeti"));

    let state = FilterState {
        search_text: "flame".into(),
        ..Default::default()
    };
    match evaluate(&data, &state) {
        View::Recipes { recipes, sources } => {
            assert_eq!(recipes.rows().len(), 2);
            let parts: BTreeSet<_> = sources
                .unwrap()
                .rows()
                .iter()
                .filter_map(|r| r.component.clone())
                .collect();
            assert_eq!(parts, BTreeSet::from(["Ember".to_string(), "Scale".to_string()]));
        }
        other => panic!("unexpected view: {other:?}"),
    }
}

#[test]
fn test_workbook_without_recipes_sheet() {
    let err = load_dataset(&fixture("no_recipes.xlsx"), &mut SilentUi::new()).unwrap_err();
    assert!(matches!(&err, LoadError::MissingSheet(name) if name == "Recipes"));
    assert_eq!(err.to_string(), "Sheet 'Recipes' not found in workbook");
}

#[test]
fn test_unreadable_sheet_keeps_cause() {
    // The workbook lists a Recipes sheet whose part is absent from the archive
    let err = load_dataset(&fixture("broken_recipes.xlsx"), &mut SilentUi::new()).unwrap_err();
    assert!(matches!(&err, LoadError::ReadSheet { sheet, .. } if sheet == "Recipes"));
    assert!(std::error::Error::source(&err).is_some());
}

#[test]
fn test_missing_logo_does_not_stop_startup() {
    let dir = tempfile::tempdir().unwrap();
    let mut ui = RecordingUi::default();

    assert_eq!(load_logo(&dir.path().join("logo.txt"), &mut ui), None);
    assert_eq!(ui.messages.len(), 1);
    assert!(ui.messages[0].starts_with("Logo not found"));

    let mut ui = SilentUi::new();
    assert_eq!(load_logo(&dir.path().join("logo.txt"), &mut ui), None);
}

#[test]
fn test_logo_banner_is_read() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("logo.txt");
    std::fs::write(&path, "CRAFTING\n").unwrap();

    assert_eq!(
        load_logo(&path, &mut SilentUi::new()).as_deref(),
        Some("CRAFTING\n")
    );
}
