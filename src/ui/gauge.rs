use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::text::Line;
use ratatui::widgets::Paragraph;

/// Cells reserved between a gauge and its neighbor.
const PADDING: u16 = 2;

/// Bar cells lit for `value` percent of a `track`-cell bar:
/// floor(track / 100 × value).
pub fn fill_width(track: u16, value: u64) -> u16 {
    (f64::from(track) / 100.0 * value as f64) as u16
}

/// Width of the bar between the brackets, given the gauge's area width.
pub fn track_width(area_width: u16) -> u16 {
    area_width.saturating_sub(PADDING + 2)
}

/// Draws one bracketed gauge: centered title, `[|||   ]` bar, centered
/// label.
pub fn render(frame: &mut Frame, area: Rect, title: &str, value: u64, label: &str) {
    let track = track_width(area.width);
    let fill = usize::from(fill_width(track, value).min(track));
    let bar = format!("[{:<width$}]", "|".repeat(fill), width = usize::from(track));
    let lines = vec![
        Line::raw(title.to_string()).alignment(Alignment::Center),
        Line::raw(bar),
        Line::raw(label.to_string()).alignment(Alignment::Center),
    ];
    frame.render_widget(Paragraph::new(lines), area);
}
