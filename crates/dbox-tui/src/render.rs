use std::time::Instant;

use dbox_core::config::theme::{parse_color, Theme};
use dbox_core::{ActionCategory, ActionRegistry, Controller, Keymap};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Modifier, Style},
    text::{Line, Span},
    Frame,
};

use crate::ui::breadcrumb::render_breadcrumb;
use crate::ui::panel::render_entry_list;
use crate::ui::popup::render_popup;
use crate::ui::statusbar::{render_statusbar, StatusBarProps};

/// Presentation settings that stay fixed for the whole session.
pub struct View {
    pub theme: Theme,
    pub keymap: Keymap,
    pub registry: ActionRegistry,
    pub show_icons: bool,
}

/// Main render function. Draws the whole screen for the current controller state.
pub fn render(f: &mut Frame, ctl: &Controller, view: &View, now: Instant) {
    let theme = &view.theme;
    let nav = ctl.nav();

    // breadcrumb (1 line) | entry list (fill) | statusbar (1 line)
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(f.area());

    render_breadcrumb(f, chunks[0], nav.current_path(), theme);
    render_entry_list(f, chunks[1], nav, ctl.is_loading(), theme, view.show_icons);

    let props = StatusBarProps {
        entry_count: nav.entries().len(),
        cursor: nav.cursor(),
        cursor_entry: nav.cursor_entry(),
        selected_count: nav.selected().len(),
        notice: ctl.notice(now),
    };
    render_statusbar(f, chunks[2], &props, theme);

    if ctl.is_downloading() {
        render_download_popup(f, theme);
    } else if ctl.show_help() {
        render_help_popup(f, view);
    }
}

fn render_download_popup(f: &mut Frame, theme: &Theme) {
    let lines = vec![
        Line::from("Downloading..."),
        Line::from(""),
        Line::from(Span::styled(
            "Ctrl+c aborts and quits",
            Style::default().fg(parse_color(&theme.panel.placeholder_fg)),
        )),
    ];
    render_popup(f, "Download", lines, (40, 20), theme);
}

fn render_help_popup(f: &mut Frame, view: &View) {
    render_popup(f, "Help", help_lines(view), (60, 80), &view.theme);
}

fn help_lines(view: &View) -> Vec<Line<'static>> {
    let key_fg = parse_color(&view.theme.popup.key_fg);
    let mut lines = Vec::new();
    let mut category: Option<ActionCategory> = None;

    for desc in view.registry.all() {
        if category != Some(desc.category) {
            if category.is_some() {
                lines.push(Line::from(""));
            }
            category = Some(desc.category);
            lines.push(Line::from(Span::styled(
                desc.category.label(),
                Style::default().add_modifier(Modifier::BOLD),
            )));
        }

        let keys = view
            .keymap
            .keys_for_action(desc.action)
            .map(|keys| keys.join("/"))
            .unwrap_or_else(|| "-".to_owned());
        lines.push(Line::from(vec![
            Span::styled(format!("  {keys:<16}"), Style::default().fg(key_fg)),
            Span::raw(desc.description),
        ]));
    }

    lines.push(Line::from(""));
    lines.push(Line::from("Press any key to close"));
    lines
}
