//! Status bar rendering with theme support.
//!
//! The status bar occupies a single row at the bottom of the terminal and
//! shows the cursor position, the selection count, the entry under the
//! cursor, and the current transient message.

use dbox_core::config::theme::{parse_color, Theme};
use dbox_core::{Notice, NoticeKind, RemoteEntry};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Data needed to render the status bar.
pub struct StatusBarProps<'a> {
    pub entry_count: usize,
    pub cursor: usize,
    pub cursor_entry: Option<&'a RemoteEntry>,
    pub selected_count: usize,
    pub notice: Option<&'a Notice>,
}

/// Renders the bottom status bar.
pub fn render_statusbar(f: &mut Frame, area: Rect, props: &StatusBarProps<'_>, theme: &Theme) {
    let bg = parse_color(&theme.statusbar.bg);
    let position_fg = parse_color(&theme.statusbar.position_fg);

    let position = if props.entry_count > 0 {
        format!(" {}/{}", props.cursor + 1, props.entry_count)
    } else {
        " 0/0".to_owned()
    };

    let selection = if props.selected_count > 0 {
        format!("  [{} selected]", props.selected_count)
    } else {
        String::new()
    };

    let file_info = props.cursor_entry.map(entry_info).unwrap_or_default();

    let line = Line::from(vec![
        Span::styled(
            position,
            Style::default()
                .fg(position_fg)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            selection,
            Style::default()
                .fg(parse_color(&theme.statusbar.selection_fg))
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(file_info, Style::default().fg(position_fg).bg(bg)),
        notice_span(props.notice, theme),
    ]);

    let bar = Paragraph::new(line).style(Style::default().bg(bg));
    f.render_widget(bar, area);
}

fn entry_info(entry: &RemoteEntry) -> String {
    if entry.is_folder() {
        format!("  [DIR] {}", entry.name())
    } else {
        format!("  {} ({})", entry.name(), format_size(entry.size()))
    }
}

fn notice_span(notice: Option<&Notice>, theme: &Theme) -> Span<'static> {
    let Some(notice) = notice else {
        return Span::raw("");
    };
    let bg = parse_color(&theme.statusbar.bg);
    let (fg, modifier) = match notice.kind {
        NoticeKind::Error => (parse_color(&theme.statusbar.error_fg), Modifier::BOLD),
        NoticeKind::Status => (parse_color(&theme.statusbar.message_fg), Modifier::ITALIC),
    };
    Span::styled(
        format!("  {}", notice.text),
        Style::default().fg(fg).bg(bg).add_modifier(modifier),
    )
}

fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.1} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{bytes} B")
    }
}
