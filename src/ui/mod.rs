pub mod gauge;
pub mod table;

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout};
use ratatui::text::Line;
use ratatui::widgets::Paragraph;

use crate::app::ViewState;

/// The memory gauge has no live "used" measurement to draw; it holds a fixed
/// reference fill against the sampled capacity.
const MEMORY_REFERENCE_FILL: u64 = 50;

/// Paints the whole frame: title bar, gauge row, then the process table.
pub fn draw(frame: &mut Frame, view: &ViewState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Min(1),
        ])
        .split(frame.area());

    let title = Paragraph::new(Line::raw("System Information & Processes"))
        .alignment(Alignment::Center);
    frame.render_widget(title, chunks[0]);

    let halves = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[1]);

    let load = view.load.map(|sample| u64::from(sample.percent)).unwrap_or(0);
    gauge::render(frame, halves[0], "Processor", load, &format!("{load}%"));

    let capacity_label = match view.capacity {
        Some(sample) => format!("? / {} GB", sample.gib),
        None => "? / ? GB".to_string(),
    };
    gauge::render(
        frame,
        halves[1],
        "Memory",
        MEMORY_REFERENCE_FILL,
        &capacity_label,
    );

    table::render(
        frame,
        chunks[3],
        view.tasklist.as_ref(),
        table::visible_rows(frame.area().height),
    );
}
