//! Entry list rendering with cursor and selection marks.
//!
//! Renders the current folder as a scrollable `List` widget. Each row is
//! `✓ <icon><name>` for selected entries and `  <icon><name>` otherwise;
//! the cursor row is highlighted.

use dbox_core::config::theme::{parse_color, Theme};
use dbox_core::{NavigationState, RemoteEntry};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::icons::icon_for_entry;

pub const LOADING_TEXT: &str = "Loading files...";
pub const EMPTY_TEXT: &str = "No files found";

/// Renders the entry list of `nav`, or a placeholder when there is nothing to show.
pub fn render_entry_list(
    f: &mut Frame,
    area: Rect,
    nav: &NavigationState,
    loading: bool,
    theme: &Theme,
    show_icons: bool,
) {
    let title = if loading { " Dropbox (loading) " } else { " Dropbox " };
    let block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .border_style(Style::default().fg(parse_color(&theme.popup.border_fg)));

    if nav.entries().is_empty() {
        let text = if loading { LOADING_TEXT } else { EMPTY_TEXT };
        let placeholder = Paragraph::new(Line::from(Span::styled(
            text,
            Style::default()
                .fg(parse_color(&theme.panel.placeholder_fg))
                .add_modifier(Modifier::ITALIC),
        )))
        .block(block);
        f.render_widget(placeholder, area);
        return;
    }

    let items: Vec<ListItem> = nav
        .entries()
        .iter()
        .enumerate()
        .map(|(i, entry)| entry_item(entry, nav.is_selected(i), theme, show_icons))
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(
            Style::default()
                .bg(parse_color(&theme.panel.cursor_bg))
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    let mut state = ListState::default();
    state.select(Some(nav.cursor()));
    f.render_stateful_widget(list, area, &mut state);
}

fn entry_item<'a>(
    entry: &'a RemoteEntry,
    selected: bool,
    theme: &Theme,
    show_icons: bool,
) -> ListItem<'a> {
    let mark = if selected { "✓ " } else { "  " };
    let icon = if show_icons {
        icon_for_entry(entry)
    } else if entry.is_folder() {
        "/"
    } else {
        " "
    };

    ListItem::new(Line::from(vec![
        Span::styled(
            mark,
            Style::default().fg(parse_color(&theme.panel.selected_fg)),
        ),
        Span::styled(format!("{icon}{}", entry.name()), entry_style(entry, selected, theme)),
    ]))
}

fn entry_style(entry: &RemoteEntry, selected: bool, theme: &Theme) -> Style {
    if selected {
        Style::default().fg(parse_color(&theme.panel.selected_fg))
    } else if entry.is_folder() {
        Style::default()
            .fg(parse_color(&theme.panel.folder_fg))
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(parse_color(&theme.panel.file_fg))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::style::Color;

    #[test]
    fn folder_style_is_bold_blue() {
        let entry = RemoteEntry::folder("docs", "/docs");
        let style = entry_style(&entry, false, &Theme::default());
        assert_eq!(style.fg, Some(Color::Blue));
        assert!(style.add_modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn selection_overrides_folder_style() {
        let entry = RemoteEntry::folder("docs", "/docs");
        let style = entry_style(&entry, true, &Theme::default());
        assert_eq!(style.fg, Some(Color::Yellow));
    }

    #[test]
    fn file_style_uses_theme() {
        let entry = RemoteEntry::file("a.txt", "/a.txt", 1, None);
        let style = entry_style(&entry, false, &Theme::default());
        assert_eq!(style.fg, Some(Color::Reset));
    }
}
