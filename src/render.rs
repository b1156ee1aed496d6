use crate::calendar::ViewWindow;
use crate::layout::{occupies_hour, DayColumn, MonthDay, WindowLayout, HOURS_PER_DAY};
use chrono::Datelike;
use std::fmt::Write as _;

/// Permet de customiser le rendu d'une fenêtre (texte, HTML, etc.).
pub trait GridRenderer {
    fn render(&self, window: &ViewWindow, layout: &WindowLayout<'_>) -> String;
}

/// Grille texte pour le terminal.
#[derive(Debug, Default, Clone, Copy)]
pub struct TextGrid;

const CELL: usize = 5;
const WEEKDAYS_FROM_SUNDAY: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

impl GridRenderer for TextGrid {
    fn render(&self, window: &ViewWindow, layout: &WindowLayout<'_>) -> String {
        let mut out = format!("{window}\n");
        match layout {
            WindowLayout::Columns(columns) => render_columns(&mut out, columns),
            WindowLayout::Month(days) => render_month(&mut out, days),
        }
        out
    }
}

fn push_line(out: &mut String, cells: &[String]) {
    let line: Vec<String> = cells
        .iter()
        .map(|c| format!("{c:>width$}", width = CELL))
        .collect();
    out.push_str(line.join(" ").trim_end());
    out.push('\n');
}

fn render_month(out: &mut String, days: &[MonthDay<'_>]) {
    let header: Vec<String> = WEEKDAYS_FROM_SUNDAY.iter().map(|d| d.to_string()).collect();
    push_line(out, &header);
    for week in days.chunks(7) {
        let cells: Vec<String> = week
            .iter()
            .map(|d| match (d.in_month, d.count()) {
                (false, _) => ".".to_string(),
                (true, 0) => d.date().day().to_string(),
                (true, n) => format!("{}*{n}", d.date().day()),
            })
            .collect();
        push_line(out, &cells);
    }
}

fn render_columns(out: &mut String, columns: &[DayColumn<'_>]) {
    let mut header = vec!["h".to_string()];
    header.extend(columns.iter().map(|c| {
        let wd = WEEKDAYS_FROM_SUNDAY[c.date.weekday().num_days_from_sunday() as usize];
        format!("{wd}{:>2}", c.date.day())
    }));
    push_line(out, &header);

    for hour in 0..HOURS_PER_DAY {
        let mut cells = vec![format!("{hour:02}")];
        cells.extend(columns.iter().map(|c| {
            let n = c
                .slots
                .iter()
                .filter(|p| occupies_hour(p.shift, hour))
                .count();
            if n == 0 {
                ".".to_string()
            } else {
                n.to_string()
            }
        }));
        push_line(out, &cells);
    }

    for column in columns {
        for p in &column.slots {
            let _ = writeln!(
                out,
                "{date} {start}-{end} {ty} {doctor} [{status}] top={top} height={height} {color}",
                date = column.date,
                start = p.shift.start_time.format("%H:%M"),
                end = p.shift.end_time.format("%H:%M"),
                ty = p.shift.shift_type,
                doctor = p.shift.doctor_name,
                status = p.shift.status,
                top = p.geometry.top,
                height = p.geometry.height,
                color = p.color.hex(),
            );
        }
    }
}
