use dbox_core::config::theme::{parse_color, Theme};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::Line,
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// Renders a centered popup dialog with the given title and content lines.
pub fn render_popup(
    f: &mut Frame,
    title: &str,
    lines: Vec<Line<'_>>,
    size: (u16, u16),
    theme: &Theme,
) {
    let area = centered_rect(size.0, size.1, f.area());
    let border_fg = parse_color(&theme.popup.border_fg);

    f.render_widget(Clear, area);

    let popup = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(title.to_owned())
            .border_style(Style::default().fg(border_fg)),
    );

    f.render_widget(popup, area);
}

/// Calculates a centered rectangle of the given percentage size within the parent area.
fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}
