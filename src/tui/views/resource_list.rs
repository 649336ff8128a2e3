//! Resource list view rendering

use crate::models::Resource;
use crate::tui::table::ResourceTable;
use crate::tui::theme::Theme;
use ratatui::{
    Frame,
    layout::{Constraint, Rect},
    style::Style,
    widgets::{Cell, Row, Table},
};

use super::helpers::{create_themed_block, render_empty_state};

/// Style for the Ready cell
fn ready_style(resource: &Resource, theme: &Theme) -> Style {
    if resource.ready {
        theme.status_ready_style()
    } else {
        theme.status_error_style()
    }
}

/// Style for the Status cell
fn status_style(resource: &Resource, theme: &Theme) -> Style {
    if resource.suspended {
        theme.status_suspended_style()
    } else if resource.ready {
        theme.status_ready_style()
    } else if resource.ready_condition().is_none() {
        theme.status_pending_style()
    } else {
        theme.status_error_style()
    }
}

/// Render the resource table, or the placeholder when there are no rows
pub fn render_resource_table(f: &mut Frame, area: Rect, table: &ResourceTable, theme: &Theme) {
    let title = format!(" {} ({}) ", table.kind(), table.resources().len());

    if table.is_empty() {
        render_empty_state(
            f,
            area,
            &title,
            &table.empty_message(),
            "Press Tab to switch kind, a to toggle all namespaces",
            theme,
        );
        return;
    }

    let columns = table.columns();
    let header =
        Row::new(columns.iter().map(|c| Cell::from(c.title))).style(theme.table_header_style());

    let start = table.offset();
    let end = (start + table.visible_rows()).min(table.rows().len());
    let rows: Vec<Row> = (start..end)
        .map(|i| {
            let resource = &table.resources()[i];
            let cells = table.rows()[i].iter().enumerate().map(|(col, text)| {
                let style = match col {
                    1 => ready_style(resource, theme),
                    2 => status_style(resource, theme),
                    _ => Style::default(),
                };
                Cell::from(text.clone()).style(style)
            });
            let row = Row::new(cells);
            if i == table.cursor() {
                row.style(theme.table_selected_style())
            } else {
                row
            }
        })
        .collect();

    let widths: Vec<Constraint> = columns.iter().map(|c| Constraint::Length(c.width)).collect();
    let widget = Table::new(rows, widths)
        .header(header)
        .block(create_themed_block(&title, theme));
    f.render_widget(widget, area);
}
