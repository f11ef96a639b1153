use dbox_core::config::theme::{parse_color, Theme};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Renders a breadcrumb trail for the given remote path.
/// Example: " Dropbox / docs / reports"
pub fn render_breadcrumb(f: &mut Frame, area: Rect, remote_path: &str, theme: &Theme) {
    let bg = parse_color(&theme.breadcrumb.bg);
    let line = Line::from(breadcrumb_spans(remote_path, theme));
    let breadcrumb = Paragraph::new(line).style(Style::default().bg(bg));
    f.render_widget(breadcrumb, area);
}

fn breadcrumb_spans(remote_path: &str, theme: &Theme) -> Vec<Span<'static>> {
    let root_fg = parse_color(&theme.breadcrumb.root_fg);
    let sep_fg = parse_color(&theme.breadcrumb.separator_fg);
    let comp_fg = parse_color(&theme.breadcrumb.component_fg);

    let mut parts = vec![Span::styled(
        " Dropbox",
        Style::default().fg(root_fg).add_modifier(Modifier::BOLD),
    )];
    for component in remote_path.split('/').filter(|c| !c.is_empty()) {
        parts.push(Span::styled(" / ", Style::default().fg(sep_fg)));
        parts.push(Span::styled(
            component.to_owned(),
            Style::default().fg(comp_fg),
        ));
    }
    parts
}
