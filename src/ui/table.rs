use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::Paragraph;

use crate::format::{clip_pad, format_kib};
use crate::system::process::{ProcessRecord, Snapshot};

/// Fixed column widths: PID, Image Name, Mem Usage, CPU Time, User Name.
pub const COLUMN_WIDTHS: [usize; 5] = [10, 20, 15, 10, 25];

/// Lines the table may occupy given the full terminal height; the title,
/// gauges, and surrounding chrome take the rest.
pub fn visible_rows(terminal_rows: u16) -> usize {
    usize::from(terminal_rows.saturating_sub(6))
}

pub fn header_row() -> String {
    pack_cells(["PID", "Image Name", "Mem Usage", "CPU Time", "User Name"])
}

/// Packs one record into a fixed-width line. Memory is formatted here, at
/// draw time; the record keeps the numeric value.
pub fn pack_row(record: &ProcessRecord) -> String {
    pack_cells([
        record.pid.as_str(),
        record.image_name.as_str(),
        &format_kib(record.mem_usage_kib),
        &format!("{:.2}", record.cpu_share),
        record.user_name.as_str(),
    ])
}

fn pack_cells(cells: [&str; 5]) -> String {
    cells
        .into_iter()
        .zip(COLUMN_WIDTHS)
        .map(|(cell, width)| clip_pad(cell, width))
        .collect()
}

/// Draws the header row in reverse video and as many records as fit within
/// `max_rows` lines total. Overflow is simply not drawn.
pub fn render(frame: &mut Frame, area: Rect, snapshot: Option<&Snapshot>, max_rows: usize) {
    if max_rows == 0 {
        return;
    }
    let mut lines = vec![Line::styled(
        header_row(),
        Style::default().add_modifier(Modifier::REVERSED),
    )];
    if let Some(snapshot) = snapshot {
        for record in &snapshot.records {
            if lines.len() >= max_rows {
                break;
            }
            lines.push(Line::raw(pack_row(record)));
        }
    }
    frame.render_widget(Paragraph::new(lines), area);
}
