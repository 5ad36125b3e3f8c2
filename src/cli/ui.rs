use chrono::NaiveDate;
use ephi::calendar::MonthView;
use ephi::plan::{CARD_SEPARATOR, ProgressSummary, ReadingPlan, format_passages, ordinal_suffix};
use ephi::{DayPlan, core::Testament};
use std::fmt::Write;

const BAR_WIDTH: usize = 30;

pub fn progress_bar(summary: &ProgressSummary) -> String {
    let filled = if summary.total == 0 {
        0
    } else {
        summary.completed * BAR_WIDTH / summary.total
    };

    format!(
        "Progress: {}/{} days ({:.0}%)  [{}{}]",
        summary.completed,
        summary.total,
        summary.percentage,
        "#".repeat(filled),
        ".".repeat(BAR_WIDTH - filled)
    )
}

fn short_date(date: NaiveDate) -> String {
    date.format("%a, %b %-d").to_string()
}

fn day_label(day: u32) -> String {
    format!("{}{}", day, ordinal_suffix(day))
}

pub fn day_card(day: &DayPlan) -> String {
    let status = if day.completed { "[x] Read" } else { "[ ] Mark Read" };
    let current = if day.is_current { "  <- Current Reading" } else { "" };

    format!(
        "{:>5}  {:<12} {:<44} {}{}",
        day_label(day.day),
        short_date(day.date),
        format_passages(&day.passages, CARD_SEPARATOR),
        status,
        current
    )
}

pub fn reading_list(plan: &ReadingPlan) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", Testament::New.label());
    for day in plan.days() {
        let _ = writeln!(out, "{}", day_card(day));
    }
    let _ = write!(out, "{}", progress_bar(&plan.progress()));
    out
}

pub fn today_highlight(today: NaiveDate, reading: Option<&DayPlan>) -> String {
    let full_date = today.format("%A, %B %-d, %Y");

    match reading {
        Some(day) => {
            let action = if day.completed { "Completed Today" } else { "Mark as Read" };
            format!(
                "Today's Reading - {}\nDay {}: {}\n{} (ephi toggle {})",
                full_date,
                day.day,
                format_passages(&day.passages, CARD_SEPARATOR),
                action,
                day.day
            )
        }
        None => format!(
            "No Reading Today - {}\nYour reading plan continues tomorrow",
            full_date
        ),
    }
}

/// Sunday-first month grid. `*` marks a reading day, `+` a completed one and
/// brackets mark today.
pub fn calendar(view: &MonthView) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{:^35}", view.month.title());
    let _ = writeln!(out, " Su   Mo   Tu   We   Th   Fr   Sa");

    let mut column = 0;
    for _ in 0..view.leading_blanks {
        out.push_str("     ");
        column += 1;
    }

    for cell in &view.cells {
        let marker = match (cell.reading_day, cell.completed) {
            (Some(_), true) => '+',
            (Some(_), false) => '*',
            (None, _) => ' ',
        };
        let (open, close) = if cell.is_today { ('[', ']') } else { (' ', ' ') };
        let _ = write!(out, "{}{:>2}{}{}", open, cell.day_of_month, marker, close);

        column += 1;
        if column == 7 {
            out.push('\n');
            column = 0;
        }
    }
    if column != 0 {
        out.push('\n');
    }

    let readings: Vec<&str> = view
        .cells
        .iter()
        .filter_map(|cell| cell.tooltip.as_deref())
        .collect();
    if !readings.is_empty() {
        out.push('\n');
        for tooltip in readings {
            let _ = writeln!(out, "  {tooltip}");
        }
    }
    out
}
