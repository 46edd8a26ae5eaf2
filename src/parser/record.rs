use calamine::Data;

use crate::schema::{
    Cell, ColumnRole, EssenceRow, HarvestRow, RecipeRow, Sheet, SheetSchema, ESSENCE, HARVEST,
    RECIPES,
};
use crate::workbook::LoadError;

/// Convert a spreadsheet value into display text
pub fn cell_text(data: &Data) -> Cell {
    match data {
        Data::Empty | Data::Error(_) => None,
        Data::String(s) => {
            if s.trim().is_empty() {
                None
            } else {
                Some(s.clone())
            }
        }
        Data::Float(f) => Some(format_float(*f)),
        Data::Int(i) => Some(i.to_string()),
        Data::Bool(b) => Some(b.to_string()),
        other => Some(other.to_string()),
    }
}

/// Whole floats lose their trailing `.0`, spreadsheets store most counts as floats
fn format_float(f: f64) -> String {
    if f.fract() == 0.0 && f.abs() < 1e15 {
        format!("{}", f as i64)
    } else {
        f.to_string()
    }
}

/// Split the header row off a grid and normalize the remaining rows.
///
/// Blank headers become `Column N`. Data rows are padded or truncated to the
/// header width and rows without any value are dropped.
pub fn split_header(
    schema: &SheetSchema,
    grid: Vec<Vec<Cell>>,
) -> Result<(Vec<String>, Vec<Vec<Cell>>), LoadError> {
    let mut rows = grid.into_iter();
    let header_row = rows
        .next()
        .ok_or_else(|| LoadError::EmptySheet(schema.name.to_string()))?;

    let headers: Vec<String> = header_row
        .into_iter()
        .enumerate()
        .map(|(i, cell)| match cell {
            Some(text) => text.trim().to_string(),
            None => format!("Column {}", i + 1),
        })
        .collect();

    let width = headers.len();
    let body = rows
        .filter(|row| row.iter().any(Option::is_some))
        .map(|mut row| {
            row.resize(width, None);
            row
        })
        .collect();

    Ok((headers, body))
}

/// Find the column for a role, trying each accepted spelling in order
pub fn resolve_column(
    schema: &SheetSchema,
    role: ColumnRole,
    headers: &[String],
) -> Result<usize, LoadError> {
    let column = schema
        .column(role)
        .ok_or_else(|| LoadError::MissingColumn {
            sheet: schema.name.to_string(),
            column: format!("{:?}", role),
        })?;

    column
        .spellings()
        .find_map(|spelling| headers.iter().position(|h| h == spelling))
        .ok_or_else(|| LoadError::MissingColumn {
            sheet: schema.name.to_string(),
            column: column.spellings().collect::<Vec<_>>().join("' or '"),
        })
}

/// The essence sheet has no required columns, so a sheet without a header
/// row is an empty table rather than an error
pub fn parse_essence(grid: Vec<Vec<Cell>>) -> Result<Sheet<EssenceRow>, LoadError> {
    if grid.is_empty() {
        return Ok(Sheet::new(Vec::new(), Vec::new()));
    }
    let (headers, body) = split_header(&ESSENCE, grid)?;
    let rows = body.into_iter().map(|cells| EssenceRow { cells }).collect();
    Ok(Sheet::new(headers, rows))
}

pub fn parse_harvest(grid: Vec<Vec<Cell>>) -> Result<Sheet<HarvestRow>, LoadError> {
    let (headers, body) = split_header(&HARVEST, grid)?;
    let creature_col = resolve_column(&HARVEST, ColumnRole::CreatureType, &headers)?;
    let component_col = resolve_column(&HARVEST, ColumnRole::Component, &headers)?;

    let rows = body
        .into_iter()
        .map(|cells| HarvestRow {
            creature_type: cells[creature_col].clone(),
            component: cells[component_col].clone(),
            cells,
        })
        .collect();

    Ok(Sheet::new(headers, rows).with_roles(vec![
        (ColumnRole::CreatureType, creature_col),
        (ColumnRole::Component, component_col),
    ]))
}

pub fn parse_recipes(grid: Vec<Vec<Cell>>) -> Result<Sheet<RecipeRow>, LoadError> {
    let (headers, body) = split_header(&RECIPES, grid)?;
    let name_col = resolve_column(&RECIPES, ColumnRole::Name, &headers)?;
    let creature_col = resolve_column(&RECIPES, ColumnRole::CreatureType, &headers)?;
    let component_col = resolve_column(&RECIPES, ColumnRole::Component, &headers)?;

    let rows = body
        .into_iter()
        .map(|cells| RecipeRow {
            name: cells[name_col].clone(),
            creature_type: cells[creature_col].clone(),
            component: cells[component_col].clone(),
            cells,
        })
        .collect();

    Ok(Sheet::new(headers, rows).with_roles(vec![
        (ColumnRole::Name, name_col),
        (ColumnRole::CreatureType, creature_col),
        (ColumnRole::Component, component_col),
    ]))
}
