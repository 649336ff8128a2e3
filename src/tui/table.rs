//! Resource table state machine
//!
//! Owns the rows, column layout, cursor and scroll window of the resource
//! list. It never talks to the cluster: the app hands it fresh sequences via
//! [`ResourceTable::set_resources`] and asks it to translate keys into cursor
//! movement.

use crate::models::{FluxResourceKind, Resource};
use crate::sync::UNKNOWN_STATUS;
use crate::tui::constants::{
    BORDER_RESERVE, DEFAULT_COLUMNS_NAME, DEFAULT_COLUMNS_STATUS, MESSAGE_KEEP_CHARS,
    MESSAGE_MAX_CHARS, MIN_FLEX_COLUMN_WIDTH, STATUS_KEEP_CHARS, STATUS_MAX_CHARS,
    TABLE_CHROME_ROWS,
};
use crate::tui::views::helpers::{format_age, truncate_with_ellipsis};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Status label shown for suspended resources
pub const SUSPENDED_STATUS: &str = "Suspended";

/// A table column and its width in cells
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    pub title: &'static str,
    pub width: u16,
    /// Flexible columns share the width left over by fixed ones
    pub flex: bool,
}

impl Column {
    const fn fixed(title: &'static str, width: u16) -> Self {
        Self {
            title,
            width,
            flex: false,
        }
    }

    const fn flex(title: &'static str, default_width: u16) -> Self {
        Self {
            title,
            width: default_width,
            flex: true,
        }
    }
}

/// Kind-specific part of row construction, picked once per kind selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowFormatter {
    /// GitRepository / HelmRepository: trailing URL
    Repository,
    /// Kustomization: trailing "source/path"
    Kustomization,
    /// HelmRelease: trailing "chart:version"
    HelmRelease,
}

impl RowFormatter {
    pub fn for_kind(kind: FluxResourceKind) -> Self {
        match kind {
            FluxResourceKind::GitRepository | FluxResourceKind::HelmRepository => {
                RowFormatter::Repository
            }
            FluxResourceKind::Kustomization => RowFormatter::Kustomization,
            FluxResourceKind::HelmRelease => RowFormatter::HelmRelease,
        }
    }

    pub fn trailing_column(&self) -> Column {
        match self {
            RowFormatter::Repository => Column::flex("URL", 40),
            RowFormatter::Kustomization => Column::flex("Source/Path", 30),
            RowFormatter::HelmRelease => Column::fixed("Chart", 25),
        }
    }

    pub fn trailing_cell(&self, resource: &Resource) -> String {
        match self {
            RowFormatter::Repository => resource.url.clone().unwrap_or_default(),
            RowFormatter::Kustomization => {
                join_present(resource.source.as_deref(), resource.path.as_deref(), "/")
            }
            RowFormatter::HelmRelease => {
                join_present(resource.chart.as_deref(), resource.version.as_deref(), ":")
            }
        }
    }

    /// Format every cell of a row
    pub fn format_row(&self, resource: &Resource, show_namespace: bool) -> Vec<String> {
        let name = if show_namespace && !resource.namespace.is_empty() {
            format!("{}/{}", resource.namespace, resource.name)
        } else {
            resource.name.clone()
        };

        let ready = if resource.ready { "True" } else { "False" };

        let status = if resource.suspended {
            SUSPENDED_STATUS
        } else if resource.status.is_empty() {
            UNKNOWN_STATUS
        } else {
            resource.status.as_str()
        };

        vec![
            name,
            ready.to_string(),
            truncate_with_ellipsis(status, STATUS_MAX_CHARS, STATUS_KEEP_CHARS),
            format_age(resource.age),
            truncate_with_ellipsis(&resource.message, MESSAGE_MAX_CHARS, MESSAGE_KEEP_CHARS),
            self.trailing_cell(resource),
        ]
    }
}

fn join_present(first: Option<&str>, second: Option<&str>, separator: &str) -> String {
    match (first, second) {
        (Some(a), Some(b)) => format!("{}{}{}", a, separator, b),
        (Some(a), None) => a.to_string(),
        (None, Some(b)) => b.to_string(),
        (None, None) => String::new(),
    }
}

/// Outcome of feeding a key to the table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableAction {
    /// The cursor moved
    Moved,
    /// A navigation key that left the cursor where it was
    Unchanged,
    /// Enter/Space: accepted and reserved for a detail view
    Reserved,
    /// Not a table key
    Unhandled,
}

/// Owned state of one resource table
#[derive(Debug, Clone)]
pub struct ResourceTable {
    kind: FluxResourceKind,
    formatter: RowFormatter,
    resources: Vec<Resource>,
    rows: Vec<Vec<String>>,
    cursor: usize,
    offset: usize,
    width: u16,
    height: u16,
    flex_width: Option<u16>,
    show_namespace: bool,
    columns_name: u16,
    columns_status: u16,
}

impl ResourceTable {
    pub fn new(kind: FluxResourceKind) -> Self {
        Self {
            kind,
            formatter: RowFormatter::for_kind(kind),
            resources: Vec::new(),
            rows: Vec::new(),
            cursor: 0,
            offset: 0,
            width: 0,
            height: 0,
            flex_width: None,
            show_namespace: false,
            columns_name: DEFAULT_COLUMNS_NAME,
            columns_status: DEFAULT_COLUMNS_STATUS,
        }
    }

    /// Configure the namespace prefix and the Name/Status widths
    pub fn with_options(mut self, show_namespace: bool, columns_name: u16, columns_status: u16) -> Self {
        self.show_namespace = show_namespace;
        self.columns_name = columns_name;
        self.columns_status = columns_status;
        self.recompute_layout();
        self.rebuild_rows();
        self
    }

    pub fn kind(&self) -> FluxResourceKind {
        self.kind
    }

    pub fn resources(&self) -> &[Resource] {
        &self.resources
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// First row index inside the viewport
    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn selected(&self) -> Option<&Resource> {
        self.resources.get(self.cursor)
    }

    /// Number of data rows the viewport can show
    pub fn visible_rows(&self) -> usize {
        (self.height.saturating_sub(TABLE_CHROME_ROWS) as usize).max(1)
    }

    /// Placeholder text shown instead of an empty table
    pub fn empty_message(&self) -> String {
        format!("No {} resources found", self.kind)
    }

    /// Replace the displayed sequence; the cursor stays where it was
    pub fn set_resources(&mut self, resources: Vec<Resource>) {
        self.resources = resources;
        self.rebuild_rows();
        self.clamp_cursor();
    }

    /// Switch kind, rebuilding columns and rows
    pub fn set_resource_kind(&mut self, kind: FluxResourceKind) {
        self.kind = kind;
        self.formatter = RowFormatter::for_kind(kind);
        self.recompute_layout();
        self.rebuild_rows();
    }

    /// Record the viewport size and recompute the flexible column width
    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        self.recompute_layout();
        self.clamp_cursor();
    }

    /// Current column layout with flexible widths applied
    pub fn columns(&self) -> Vec<Column> {
        self.base_columns()
            .into_iter()
            .map(|mut col| {
                if col.flex
                    && let Some(width) = self.flex_width
                {
                    col.width = width;
                }
                col
            })
            .collect()
    }

    fn base_columns(&self) -> Vec<Column> {
        vec![
            Column::fixed("Name", self.columns_name),
            Column::fixed("Ready", 8),
            Column::fixed("Status", self.columns_status),
            Column::fixed("Age", 10),
            Column::flex("Message", 35),
            self.formatter.trailing_column(),
        ]
    }

    /// Width shared by flexible columns, never below the floor
    ///
    /// A viewport too narrow for the floor (or not yet measured) leaves the
    /// previous width in place.
    fn recompute_layout(&mut self) {
        if self.width == 0 {
            return;
        }
        let columns = self.base_columns();
        let flex_count = columns.iter().filter(|c| c.flex).count() as i32;
        if flex_count == 0 {
            return;
        }
        let fixed: i32 = columns
            .iter()
            .filter(|c| !c.flex)
            .map(|c| i32::from(c.width))
            .sum();
        let flex_width = (i32::from(self.width) - fixed - i32::from(BORDER_RESERVE)) / flex_count;
        if flex_width >= i32::from(MIN_FLEX_COLUMN_WIDTH) {
            self.flex_width = u16::try_from(flex_width).ok();
        }
    }

    fn rebuild_rows(&mut self) {
        self.rows = self
            .resources
            .iter()
            .map(|r| self.formatter.format_row(r, self.show_namespace))
            .collect();
    }

    fn clamp_cursor(&mut self) {
        if self.resources.is_empty() {
            self.cursor = 0;
            self.offset = 0;
            return;
        }
        self.cursor = self.cursor.min(self.resources.len() - 1);
        self.scroll_to_cursor();
    }

    fn scroll_to_cursor(&mut self) {
        let visible = self.visible_rows();
        if self.cursor < self.offset {
            self.offset = self.cursor;
        } else if self.cursor >= self.offset + visible {
            self.offset = self.cursor + 1 - visible;
        }
        let max_offset = self.resources.len().saturating_sub(visible);
        self.offset = self.offset.min(max_offset);
    }

    fn last_index(&self) -> usize {
        self.resources.len().saturating_sub(1)
    }

    fn move_to(&mut self, index: usize) {
        self.cursor = index.min(self.last_index());
        self.scroll_to_cursor();
    }

    fn step_down(&mut self) {
        self.move_to(self.cursor.saturating_add(1));
    }

    fn step_up(&mut self) {
        self.move_to(self.cursor.saturating_sub(1));
    }

    /// Translate a key into cursor movement
    pub fn handle_key(&mut self, key: KeyEvent) -> TableAction {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let is_navigation = match key.code {
            KeyCode::Enter | KeyCode::Char(' ') => return TableAction::Reserved,
            KeyCode::Char('d') | KeyCode::Char('u') => ctrl,
            KeyCode::Up
            | KeyCode::Down
            | KeyCode::Left
            | KeyCode::Right
            | KeyCode::PageUp
            | KeyCode::PageDown
            | KeyCode::Home
            | KeyCode::End
            | KeyCode::Char('j')
            | KeyCode::Char('k')
            | KeyCode::Char('g')
            | KeyCode::Char('G')
            | KeyCode::Char('H')
            | KeyCode::Char('M')
            | KeyCode::Char('L') => !ctrl,
            _ => false,
        };
        if !is_navigation {
            return TableAction::Unhandled;
        }
        if self.resources.is_empty() {
            return TableAction::Unchanged;
        }

        let before = self.cursor;
        let page = self.visible_rows();
        match key.code {
            KeyCode::Down | KeyCode::Right | KeyCode::Char('j') => self.step_down(),
            KeyCode::Up | KeyCode::Left | KeyCode::Char('k') => self.step_up(),
            KeyCode::PageDown | KeyCode::Char('d') => {
                self.move_to(self.cursor.saturating_add(page))
            }
            KeyCode::PageUp | KeyCode::Char('u') => self.move_to(self.cursor.saturating_sub(page)),
            KeyCode::Home | KeyCode::Char('g') => self.move_to(0),
            KeyCode::End | KeyCode::Char('G') => self.move_to(self.last_index()),
            KeyCode::Char('H') => self.move_to(self.offset),
            KeyCode::Char('M') => {
                let in_page = page.min(self.resources.len() - self.offset);
                self.move_to(self.offset);
                for _ in 0..in_page / 2 {
                    self.step_down();
                }
            }
            KeyCode::Char('L') => self.move_to(self.offset + page - 1),
            _ => {}
        }

        if self.cursor == before {
            TableAction::Unchanged
        } else {
            TableAction::Moved
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resources(n: usize) -> Vec<Resource> {
        (0..n)
            .map(|i| Resource::new(FluxResourceKind::Kustomization, "flux-system", format!("ks-{}", i)))
            .collect()
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_set_resources_preserves_cursor() {
        let mut table = ResourceTable::new(FluxResourceKind::Kustomization);
        table.resize(120, 20);
        table.set_resources(resources(10));
        table.handle_key(key(KeyCode::Char('j')));
        table.handle_key(key(KeyCode::Char('j')));
        assert_eq!(table.cursor(), 2);

        table.set_resources(resources(10));
        assert_eq!(table.cursor(), 2);

        table.set_resources(resources(1));
        assert_eq!(table.cursor(), 0);
    }

    #[test]
    fn test_enter_is_reserved_without_side_effect() {
        let mut table = ResourceTable::new(FluxResourceKind::HelmRelease);
        table.set_resources(resources(3));
        table.handle_key(key(KeyCode::Down));
        assert_eq!(table.handle_key(key(KeyCode::Enter)), TableAction::Reserved);
        assert_eq!(table.handle_key(key(KeyCode::Char(' '))), TableAction::Reserved);
        assert_eq!(table.cursor(), 1);
    }

    #[test]
    fn test_ctrl_only_for_half_page_keys() {
        let mut table = ResourceTable::new(FluxResourceKind::Kustomization);
        table.set_resources(resources(3));
        assert_eq!(table.handle_key(key(KeyCode::Char('d'))), TableAction::Unhandled);
        assert_eq!(
            table.handle_key(KeyEvent::new(KeyCode::Char('d'), KeyModifiers::CONTROL)),
            TableAction::Moved
        );
    }

    #[test]
    fn test_join_present() {
        assert_eq!(join_present(Some("fleet"), Some("./apps"), "/"), "fleet/./apps");
        assert_eq!(join_present(None, Some("./apps"), "/"), "./apps");
        assert_eq!(join_present(Some("podinfo"), None, ":"), "podinfo");
        assert_eq!(join_present(None, None, ":"), "");
    }

    #[test]
    fn test_resize_recomputes_flex_on_kind_switch() {
        let mut table = ResourceTable::new(FluxResourceKind::HelmRelease);
        // Fixed: 30 + 8 + 12 + 10 + 25 = 85, one flex column
        table.resize(155, 20);
        assert_eq!(table.columns()[4].width, 60);

        // Two flex columns now: (155 - 60 - 10) / 2
        table.set_resource_kind(FluxResourceKind::GitRepository);
        let columns = table.columns();
        assert_eq!(columns[4].width, 42);
        assert_eq!(columns[5].title, "URL");
        assert_eq!(columns[5].width, 42);
    }
}
