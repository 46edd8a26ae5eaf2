/// A single spreadsheet cell, `None` when the cell is empty
pub type Cell = Option<String>;

/// Role a column plays in filtering
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnRole {
    /// Magic item identity
    Name,
    CreatureType,
    /// Join key between the harvest and recipe sheets
    Component,
}

/// Column definition
#[derive(Debug, Clone)]
pub struct Column {
    pub role: ColumnRole,
    pub header: &'static str,
    /// Alternative header spellings, tried in order when `header` is absent
    pub aliases: &'static [&'static str],
}

impl Column {
    pub const fn new(role: ColumnRole, header: &'static str) -> Self {
        Self {
            role,
            header,
            aliases: &[],
        }
    }

    /// Set fallback header spellings
    pub const fn or(self, aliases: &'static [&'static str]) -> Self {
        Self { aliases, ..self }
    }

    /// Every accepted header spelling, preferred first
    pub fn spellings(&self) -> impl Iterator<Item = &'static str> + '_ {
        std::iter::once(self.header).chain(self.aliases.iter().copied())
    }
}

/// Sheet schema definition
#[derive(Debug, Clone)]
pub struct SheetSchema {
    pub name: &'static str,
    /// Columns the filters depend on; all are required
    pub columns: &'static [Column],
}

impl SheetSchema {
    pub fn column(&self, role: ColumnRole) -> Option<&Column> {
        self.columns.iter().find(|c| c.role == role)
    }
}

/// Reference row, displayed as-is
#[derive(Debug, Clone, PartialEq)]
pub struct EssenceRow {
    pub cells: Vec<Cell>,
}

/// A component obtainable from a creature
#[derive(Debug, Clone, PartialEq)]
pub struct HarvestRow {
    pub creature_type: Cell,
    pub component: Cell,
    pub cells: Vec<Cell>,
}

/// One component need of a craftable magic item
#[derive(Debug, Clone, PartialEq)]
pub struct RecipeRow {
    pub name: Cell,
    pub creature_type: Cell,
    pub component: Cell,
    pub cells: Vec<Cell>,
}

/// Access to the full row for display
pub trait DisplayRow {
    fn cells(&self) -> &[Cell];
}

impl DisplayRow for EssenceRow {
    fn cells(&self) -> &[Cell] {
        &self.cells
    }
}

impl DisplayRow for HarvestRow {
    fn cells(&self) -> &[Cell] {
        &self.cells
    }
}

impl DisplayRow for RecipeRow {
    fn cells(&self) -> &[Cell] {
        &self.cells
    }
}

/// Filter keys shared by harvest and recipe rows
pub trait CraftingRow {
    fn creature_type(&self) -> Option<&str>;
    fn component(&self) -> Option<&str>;
}

impl CraftingRow for HarvestRow {
    fn creature_type(&self) -> Option<&str> {
        self.creature_type.as_deref()
    }

    fn component(&self) -> Option<&str> {
        self.component.as_deref()
    }
}

impl CraftingRow for RecipeRow {
    fn creature_type(&self) -> Option<&str> {
        self.creature_type.as_deref()
    }

    fn component(&self) -> Option<&str> {
        self.component.as_deref()
    }
}

/// Headers plus rows of one sheet, in sheet order
#[derive(Debug, Clone, PartialEq)]
pub struct Sheet<R> {
    pub headers: Vec<String>,
    pub rows: Vec<R>,
    /// Resolved positions of the filter columns
    pub roles: Vec<(ColumnRole, usize)>,
}

impl<R> Sheet<R> {
    pub fn new(headers: Vec<String>, rows: Vec<R>) -> Self {
        Self {
            headers,
            rows,
            roles: Vec::new(),
        }
    }

    pub fn with_roles(self, roles: Vec<(ColumnRole, usize)>) -> Self {
        Self { roles, ..self }
    }

    /// Column position resolved for a role at load time
    pub fn role_index(&self, role: ColumnRole) -> Option<usize> {
        self.roles.iter().find(|(r, _)| *r == role).map(|(_, i)| *i)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// The three sheets of a workbook, immutable once loaded
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    pub essence: Sheet<EssenceRow>,
    pub harvest: Sheet<HarvestRow>,
    pub recipes: Sheet<RecipeRow>,
}
