use anyhow::Result;
use chrono::NaiveDate;
use crossterm::{
    execute,
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor},
};
use std::io::{self, Write};

use weekroster_core::roster::{RowStatus, RowView};
use weekroster_core::{RotationConfig, WeekPair};

/// Color scheme for terminal output.
struct Colors;

impl Colors {
    const HEADER: Color = Color::Magenta;
    const CURRENT: Color = Color::Cyan;
    const NEXT: Color = Color::Blue;
    const MEMBER: Color = Color::Yellow;
    const EMPHASIS: Color = Color::Green;
    const DIM: Color = Color::DarkGrey;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SpanStyle {
    Plain,
    Header,
    Current,
    Next,
    Member,
    Emphasis,
    Dim,
}

/// A run of text printed in one style.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Span {
    text: String,
    style: SpanStyle,
}

impl Span {
    fn new(text: impl Into<String>, style: SpanStyle) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }

    /// Text as shown without colors; highlights get ASCII markers instead.
    fn plain_text(&self) -> String {
        match self.style {
            SpanStyle::Member => format!("[{}]", self.text),
            SpanStyle::Emphasis => format!("*{}*", self.text),
            _ => self.text.clone(),
        }
    }

    fn width(&self, plain: bool) -> usize {
        if plain {
            self.plain_text().chars().count()
        } else {
            self.text.chars().count()
        }
    }
}

type Cell = Vec<Span>;

fn cell_width(cell: &Cell, plain: bool) -> usize {
    cell.iter().map(|s| s.width(plain)).sum()
}

// ── Status ──────────────────────────────────────────────────

/// Lines printed by `weekroster status`.
pub fn status_lines(config: &RotationConfig, date: NaiveDate) -> Vec<String> {
    let clock = config.clock();
    let pair = clock.current_and_next(date);
    let week_of = clock
        .week_start(date)
        .map(|d| format!(" (week of {})", d.format("%Y-%m-%d")))
        .unwrap_or_default();

    let mut lines = vec![
        format!(
            "Timezone: {} · Date: {} ({})",
            config.timezone,
            date.format("%Y-%m-%d"),
            date.format("%A")
        ),
        format!(
            "Current: {} · {}{}",
            pair.current,
            config.labels.get(pair.current),
            week_of
        ),
        format!("Next:    {} · {}", pair.next, config.labels.get(pair.next)),
    ];

    if let Some(member) = config.roster.member().filter(|_| !config.roster.is_empty()) {
        for (title, index) in [("this week", pair.current), ("next week", pair.next)] {
            let days = config.roster.days_for(index, member);
            let days = if days.is_empty() {
                "-".to_string()
            } else {
                days.join(", ")
            };
            lines.push(format!("{member} {title}: {days}"));
        }
    }

    lines
}

// ── Table ───────────────────────────────────────────────────

fn status_span(status: RowStatus) -> Span {
    let style = match status {
        RowStatus::Current => SpanStyle::Current,
        RowStatus::Next => SpanStyle::Next,
        RowStatus::Other => SpanStyle::Dim,
    };
    Span::new(status.label(), style)
}

fn row_cells(row: &RowView<'_>, label: &str) -> Vec<Cell> {
    let mut cells: Vec<Cell> = vec![
        vec![Span::new(format!("{} ({label})", row.index), SpanStyle::Plain)],
        vec![status_span(row.status)],
    ];
    for cell in &row.cells {
        // A member mention wins over whole-cell emphasis.
        let mentions_member = cell.segments.iter().any(|s| s.matched);
        let spans = if cell.emphasized && !mentions_member {
            vec![Span::new(cell.text, SpanStyle::Emphasis)]
        } else {
            cell.segments
                .iter()
                .filter(|s| !s.text.is_empty())
                .map(|s| {
                    let style = if s.matched {
                        SpanStyle::Member
                    } else {
                        SpanStyle::Plain
                    };
                    Span::new(s.text, style)
                })
                .collect()
        };
        cells.push(spans);
    }
    cells
}

/// Header plus one row per week type, ready to print.
fn table_cells(config: &RotationConfig, pair: WeekPair) -> Vec<Vec<Cell>> {
    let mut header: Vec<Cell> = vec![
        vec![Span::new("Week", SpanStyle::Header)],
        vec![Span::new("Status", SpanStyle::Header)],
    ];
    header.extend(
        config
            .roster
            .weekdays()
            .iter()
            .map(|d| vec![Span::new(d.as_str(), SpanStyle::Header)]),
    );

    let mut rows = vec![header];
    rows.extend(
        config
            .roster
            .rows(pair)
            .iter()
            .map(|row| row_cells(row, config.labels.get(row.index))),
    );
    rows
}

fn column_widths(rows: &[Vec<Cell>], plain: bool) -> Vec<usize> {
    let columns = rows.iter().map(Vec::len).max().unwrap_or(0);
    (0..columns)
        .map(|c| {
            rows.iter()
                .filter_map(|r| r.get(c))
                .map(|cell| cell_width(cell, plain))
                .max()
                .unwrap_or(0)
        })
        .collect()
}

/// The table as plain text lines, without colors.
pub fn table_lines(config: &RotationConfig, pair: WeekPair) -> Vec<String> {
    let rows = table_cells(config, pair);
    let widths = column_widths(&rows, true);
    rows.iter()
        .map(|row| {
            row.iter()
                .zip(&widths)
                .map(|(cell, width)| {
                    let text: String = cell.iter().map(Span::plain_text).collect();
                    format!("{text:<width$}")
                })
                .collect::<Vec<_>>()
                .join(" | ")
                .trim_end()
                .to_string()
        })
        .collect()
}

fn color_for(style: SpanStyle) -> Option<Color> {
    match style {
        SpanStyle::Plain => None,
        SpanStyle::Header => Some(Colors::HEADER),
        SpanStyle::Current => Some(Colors::CURRENT),
        SpanStyle::Next => Some(Colors::NEXT),
        SpanStyle::Member => Some(Colors::MEMBER),
        SpanStyle::Emphasis => Some(Colors::EMPHASIS),
        SpanStyle::Dim => Some(Colors::DIM),
    }
}

/// Print the table to stdout, colored unless `plain`.
pub fn print_table(config: &RotationConfig, pair: WeekPair, plain: bool) -> Result<()> {
    let mut stdout = io::stdout();

    if plain {
        for line in table_lines(config, pair) {
            writeln!(stdout, "{line}")?;
        }
        stdout.flush()?;
        return Ok(());
    }

    let rows = table_cells(config, pair);
    let widths = column_widths(&rows, false);
    for row in &rows {
        for (i, (cell, width)) in row.iter().zip(&widths).enumerate() {
            if i > 0 {
                execute!(stdout, SetForegroundColor(Colors::DIM), Print(" | "), ResetColor)?;
            }
            for span in cell {
                match color_for(span.style) {
                    Some(color) => {
                        let bold = matches!(span.style, SpanStyle::Member | SpanStyle::Current);
                        if bold {
                            execute!(stdout, SetAttribute(Attribute::Bold))?;
                        }
                        execute!(
                            stdout,
                            SetForegroundColor(color),
                            Print(&span.text),
                            ResetColor,
                            SetAttribute(Attribute::Reset)
                        )?;
                    }
                    None => execute!(stdout, Print(&span.text))?,
                }
            }
            let pad = width.saturating_sub(cell_width(cell, false));
            execute!(stdout, Print(" ".repeat(pad)))?;
        }
        execute!(stdout, Print("\n"))?;
    }
    stdout.flush()?;
    Ok(())
}
