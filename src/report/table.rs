//! Verdict table rendering.
//!
//! One row per test case, one column per group, cells centered. Rows are
//! split into sections by primary group, each introduced by a separator row.

use crate::analysis::{CellMark, DisplayMatrix};
use crate::problem::types::{ProblemData, SAMPLE_GROUP};
use crate::report::style::OutputStyle;
use crate::verdict::Verdict;

pub const INPUT_HEADER: &str = "INPUT";
const MIN_COLUMN_WIDTH: usize = 3;

fn text_width(text: &str) -> usize {
    text.chars().count()
}

/// Center `text` in `width`; `visible` is its printed width when it carries
/// escape codes
fn pad(text: &str, width: usize, visible: usize) -> String {
    let total = width.saturating_sub(visible);
    let left = total / 2;
    format!("{}{}{}", " ".repeat(left), text, " ".repeat(total - left))
}

fn color_mark(style: OutputStyle, mark: CellMark) -> String {
    let label = mark.label();
    match mark {
        CellMark::Verdict(Verdict::OkYes | Verdict::OkNo) => style.green(label, false),
        CellMark::Verdict(Verdict::Miss) => style.orange(label, false),
        CellMark::Verdict(Verdict::Bad) => style.red(label, false),
        CellMark::Verdict(Verdict::Unknown) => label.to_string(),
        CellMark::Skipped => style.gray(label),
    }
}

/// Width of every column, the input column first
fn column_widths(display: &DisplayMatrix) -> Vec<usize> {
    let first = display
        .rows
        .iter()
        .chain(display.columns.iter())
        .map(|name| text_width(name))
        .chain([text_width(INPUT_HEADER), MIN_COLUMN_WIDTH])
        .max()
        .unwrap_or(MIN_COLUMN_WIDTH);

    let mut widths = vec![first];
    for (column, name) in display.columns.iter().enumerate() {
        let widest_mark = display
            .marks
            .iter()
            .map(|row| text_width(row[column].label()))
            .max()
            .unwrap_or(0);
        widths.push(text_width(name).max(widest_mark).max(MIN_COLUMN_WIDTH));
    }
    widths
}

fn join_cells(cells: &[String]) -> String {
    format!("| {} |", cells.join(" | "))
}

fn group_row(style: OutputStyle, group: &str, widths: &[usize], fill: char) -> String {
    let label = match style {
        OutputStyle::Markdown => pad(&format!("#{group}"), widths[0], text_width(group) + 1),
        OutputStyle::Console => pad(&style.green(group, true), widths[0], text_width(group)),
    };
    let mut cells = vec![label];
    cells.extend(widths[1..].iter().map(|&w| fill.to_string().repeat(w)));
    join_cells(&cells)
}

pub fn render_table(display: &DisplayMatrix, problem: &ProblemData, style: OutputStyle) -> String {
    let widths = column_widths(display);
    let separator = join_cells(&widths.iter().map(|&w| "-".repeat(w)).collect::<Vec<_>>());

    let headers: Vec<String> = std::iter::once(INPUT_HEADER)
        .chain(display.columns.iter().map(String::as_str))
        .zip(&widths)
        .map(|(header, &w)| pad(header, w, text_width(header)))
        .collect();

    let mut lines = Vec::new();
    lines.push(if style.is_markdown() {
        String::new()
    } else {
        separator.clone()
    });
    lines.push(join_cells(&headers));
    lines.push(separator);

    if problem.has_sample() {
        lines.push(group_row(style, SAMPLE_GROUP, &widths, ' '));
    }

    let primary = |row: usize| {
        problem
            .cases
            .get(row)
            .and_then(|case| case.primary_group())
            .unwrap_or_default()
    };

    for (row, name) in display.rows.iter().enumerate() {
        let mut cells = vec![pad(name, widths[0], text_width(name))];
        for (column, &mark) in display.marks[row].iter().enumerate() {
            let width = widths[column + 1];
            cells.push(pad(&color_mark(style, mark), width, text_width(mark.label())));
        }
        lines.push(join_cells(&cells));

        if row + 1 < display.rows.len() && primary(row) != primary(row + 1) {
            lines.push(group_row(style, primary(row + 1), &widths, '-'));
        }
    }

    lines.join("\n")
}
