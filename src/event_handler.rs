use crate::app::App;
use crate::constants::{MOUSE_SCROLL_LINES, PAGE_SCROLL_LINES, SIDEBAR_WIDTH, STATUS_BAR_HEIGHT};
use crate::network::NetworkResponse;

use crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use std::io::Result;

/// Returns `Ok(true)` when the user asked to quit.
pub fn handle_key_event(app: &mut App, key: KeyEvent) -> Result<bool> {
    if key.kind != KeyEventKind::Press {
        return Ok(false);
    }

    match key.code {
        KeyCode::Char('q') => return Ok(true),
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => return Ok(true),

        // --- SIDEBAR ---
        KeyCode::Down | KeyCode::Char('j') => app.sidebar.move_cursor(1),
        KeyCode::Up | KeyCode::Char('k') => app.sidebar.move_cursor(-1),
        KeyCode::Enter | KeyCode::Char(' ') => app.activate_selected(),
        KeyCode::Char('m') => app.toggle_sidebar(),

        // --- CONTENT ---
        KeyCode::PageDown => app.display.scroll_by(PAGE_SCROLL_LINES as isize),
        KeyCode::PageUp => app.display.scroll_by(-(PAGE_SCROLL_LINES as isize)),
        KeyCode::Char('d') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.display.scroll_by(PAGE_SCROLL_LINES as isize)
        }
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.display.scroll_by(-(PAGE_SCROLL_LINES as isize))
        }
        KeyCode::Home | KeyCode::Char('g') => app.display.scroll_to_top(),
        KeyCode::Char('r') => app.reload(),

        // --- APPEARANCE ---
        KeyCode::Char('t') => app.toggle_theme(),

        _ => {}
    }
    Ok(false)
}

pub fn handle_mouse_event(app: &mut App, mouse: MouseEvent) -> Result<()> {
    let over_sidebar = app.sidebar_visible() && mouse.column < SIDEBAR_WIDTH;
    match mouse.kind {
        MouseEventKind::ScrollDown if !over_sidebar => {
            app.display.scroll_by(MOUSE_SCROLL_LINES as isize)
        }
        MouseEventKind::ScrollUp if !over_sidebar => {
            app.display.scroll_by(-(MOUSE_SCROLL_LINES as isize))
        }
        MouseEventKind::ScrollDown => app.sidebar.move_cursor(1),
        MouseEventKind::ScrollUp => app.sidebar.move_cursor(-1),
        MouseEventKind::Down(MouseButton::Left) if over_sidebar => {
            // Row 0 is the sidebar's top border.
            let body_bottom = app.terminal_height.saturating_sub(STATUS_BAR_HEIGHT + 1);
            if mouse.row == 0 || mouse.row >= body_bottom {
                return Ok(());
            }
            let row = app.sidebar.row_at((mouse.row - 1) as usize);
            if app.sidebar.set_cursor(row) {
                app.activate_selected();
            }
        }
        _ => {}
    }
    Ok(())
}

pub fn handle_network_event(app: &mut App, response: NetworkResponse) -> Result<()> {
    app.apply_response(response);
    Ok(())
}
