use std::io::{self, Write};

use crate::schema::DisplayRow;
use crate::view::{Section, View, RESULTS_CLEARED};

const MAX_COLUMN_WIDTH: usize = 40;

/// Write a view as plain-text tables
pub fn write_text(out: &mut impl Write, view: &View<'_>) -> io::Result<()> {
    match view {
        View::Cleared => writeln!(out, "{}", RESULTS_CLEARED),
        View::Harvest(section) => write_section(out, section),
        View::Recipes { recipes, sources } => {
            write_section(out, recipes)?;
            if let Some(sources) = sources {
                writeln!(out)?;
                write_section(out, sources)?;
            }
            Ok(())
        }
    }
}

pub fn write_section<R: DisplayRow>(out: &mut impl Write, section: &Section<'_, R>) -> io::Result<()> {
    writeln!(out, "== {} ==", section.title)?;

    if let Some(notice) = section.notice() {
        return writeln!(out, "{}", notice);
    }

    let rows = section.rows();
    let widths: Vec<usize> = section
        .headers
        .iter()
        .enumerate()
        .map(|(i, h)| {
            rows.iter()
                .filter_map(|r| r.cells().get(i).and_then(|c| c.as_deref()))
                .map(|c| c.chars().count())
                .chain(std::iter::once(h.chars().count()))
                .max()
                .unwrap_or(0)
                .min(MAX_COLUMN_WIDTH)
        })
        .collect();

    let headers: Vec<&str> = section.headers.iter().map(String::as_str).collect();
    write_line(out, &headers, &widths)?;
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    let rule: Vec<&str> = rule.iter().map(String::as_str).collect();
    write_line(out, &rule, &widths)?;

    for row in rows {
        let cells: Vec<&str> = row.cells().iter().map(|c| c.as_deref().unwrap_or("")).collect();
        write_line(out, &cells, &widths)?;
    }

    writeln!(out, "({} rows)", rows.len())
}

fn write_line(out: &mut impl Write, cells: &[&str], widths: &[usize]) -> io::Result<()> {
    let line: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{:<width$}", truncate(cell, *width), width = *width))
        .collect();
    writeln!(out, "{}", line.join("  ").trim_end())
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        text.to_string()
    } else {
        let mut cut: String = text.chars().take(width.saturating_sub(1)).collect();
        cut.push('…');
        cut
    }
}
