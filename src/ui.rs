use crate::app::App;
use crate::constants::{SIDEBAR_WIDTH, STATUS_BAR_HEIGHT, UI_BORDER_WIDTH};
use crate::models::LoadStatus;
use crate::sidebar::SidebarRow;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};
use unicode_width::UnicodeWidthChar;

pub fn ui(f: &mut Frame, app: &App) {
    let palette = app.palette();
    let base = Style::default().fg(palette.fg).bg(palette.bg);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),                       // Sidebar + content
            Constraint::Length(STATUS_BAR_HEIGHT),    // Status line
        ])
        .split(f.area());

    let content_area = if app.sidebar_visible() {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(0)])
            .split(rows[0]);
        render_sidebar(f, app, columns[0], base);
        columns[1]
    } else {
        rows[0]
    };

    render_content(f, app, content_area, base);
    render_status(f, app, rows[1], base);
}

fn render_sidebar(f: &mut Frame, app: &App, area: Rect, base: Style) {
    let palette = app.palette();
    let inner_width = (area.width as usize).saturating_sub(UI_BORDER_WIDTH);

    let lines: Vec<Line> = app
        .sidebar
        .rows()
        .into_iter()
        .enumerate()
        .map(|(i, row)| {
            let label = truncate_to_width(&app.sidebar.row_label(row), inner_width);
            let mut style = match row {
                SidebarRow::Control(_) => base.add_modifier(Modifier::BOLD),
                SidebarRow::Link(panel, link) if app.sidebar.active_link(panel) == Some(link) => {
                    base.fg(palette.accent).add_modifier(Modifier::BOLD)
                }
                SidebarRow::Link(..) => base,
            };
            if i == app.sidebar.cursor {
                style = style.fg(palette.highlight_fg).bg(palette.highlight_bg);
            }
            Line::from(Span::styled(label, style))
        })
        .collect();

    let sidebar = Paragraph::new(lines)
        .scroll((app.sidebar.scroll as u16, 0))
        .style(base)
        .block(Block::default().borders(Borders::ALL).title("Contents"));
    f.render_widget(Clear, area);
    f.render_widget(sidebar, area);
}

fn render_content(f: &mut Frame, app: &App, area: Rect, base: Style) {
    let content_area_height = (area.height as usize).saturating_sub(UI_BORDER_WIDTH);
    let lines = app.display.lines();
    let start_index = app.display.scroll().min(lines.len());
    let end_index = (start_index + content_area_height).min(lines.len());
    let viewport_content = lines[start_index..end_index].to_vec();

    let title = match &app.current_path {
        Some(path) => format!("Docs - {}", path),
        None => String::from("Docs"),
    };
    let content = Paragraph::new(viewport_content)
        .style(base)
        .block(Block::default().borders(Borders::ALL).title(title));

    f.render_widget(Clear, area);
    f.render_widget(content, area);
}

fn render_status(f: &mut Frame, app: &App, area: Rect, base: Style) {
    let palette = app.palette();
    let status_style = match app.status {
        LoadStatus::Failed => base.fg(palette.error),
        LoadStatus::Loading => base.fg(palette.accent),
        LoadStatus::Idle | LoadStatus::Loaded => base.fg(palette.muted),
    };
    let line = Line::from(vec![
        Span::styled(format!(" {} ", app.status_message), status_style),
        Span::styled(
            format!("| theme: {} ", app.theme.mode().as_str()),
            base.fg(palette.muted),
        ),
        Span::styled("| t theme  m sidebar  r reload  q quit", base.fg(palette.muted)),
    ]);
    f.render_widget(Paragraph::new(line).style(base), area);
}

/// Cuts `text` to at most `width` terminal columns, marking the cut with `…`.
pub fn truncate_to_width(text: &str, width: usize) -> String {
    let total: usize = text.chars().map(|c| c.width().unwrap_or(0)).sum();
    if total <= width {
        return text.to_string();
    }
    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w + 1 > width {
            break;
        }
        out.push(c);
        used += w;
    }
    if width > 0 {
        out.push('…');
    }
    out
}
