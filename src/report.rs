use colored::{ColoredString, Colorize};
use comfy_table::{
    Cell, Color as TableColor, ColumnConstraint, ContentArrangement, Table, Width,
};

use crate::change::{Change, Severity};
use crate::compare::Comparison;
use crate::source::SchemaSource;

const TYPE_COLUMN_WIDTH: u16 = 35;
const DESCRIPTION_COLUMN_WIDTH: u16 = 125;
const EMOJI_WIDTH: usize = 8;

/// Double outer border, single inner rules.
const DOUBLE_BORDER: &str = "║║══╟─┼╢│─┼╟╢╤╧╔╗╚╝";

/// Render the whole comparison result, ready to be written to stdout.
pub fn render(comparison: &Comparison, color: bool) -> String {
    match comparison {
        Comparison::InSync => {
            let message = "👌  Schemas are in sync!";
            let message = if color {
                message.green().to_string()
            } else {
                message.to_string()
            };
            format!("\n{message}\n\n")
        }
        Comparison::Changed {
            dangerous,
            breaking,
        } => {
            let mut out = String::new();
            for (severity, changes) in [
                (Severity::Breaking, breaking),
                (Severity::Dangerous, dangerous),
            ] {
                if changes.is_empty() {
                    continue;
                }
                out.push_str(&banner(severity, changes.len(), color));
                out.push('\n');
                out.push_str(&change_table(changes, color).to_string());
                out.push_str("\n\n");
            }
            out
        }
    }
}

pub fn banner(severity: Severity, count: usize, color: bool) -> String {
    let (title, emoji) = match severity {
        Severity::Breaking => ("Breaking Changes", "💣 💣 💣"),
        Severity::Dangerous => ("Dangerous Changes", "🔪 🔪 🔪"),
    };
    let style = |text: String| -> String {
        if !color {
            return text;
        }
        let styled: ColoredString = match severity {
            Severity::Breaking => text.white().bold().on_red(),
            Severity::Dangerous => text.white().bold().on_magenta(),
        };
        styled.to_string()
    };

    let count_width = count.to_string().len();
    let line = " ".repeat(title.len() + 3 + 5 + count_width + EMOJI_WIDTH - 1);

    [
        String::new(),
        style(line.clone()),
        style(format!("  {emoji}  {title} ({count})   ")),
        style(line),
        String::new(),
    ]
    .join("\n")
}

/// Rows are ordered by change type, case-insensitively; equal types keep
/// detector order.
pub fn change_table(changes: &[Change], color: bool) -> Table {
    let mut rows: Vec<(&str, &str)> = changes
        .iter()
        .map(|c| (c.kind.as_str(), c.description.as_str()))
        .collect();
    rows.sort_by_key(|(kind, _)| kind.to_lowercase());

    let mut table = Table::new();
    table
        .load_preset(DOUBLE_BORDER)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(TYPE_COLUMN_WIDTH + DESCRIPTION_COLUMN_WIDTH + 3)
        .set_constraints(vec![
            ColumnConstraint::Absolute(Width::Fixed(TYPE_COLUMN_WIDTH)),
            ColumnConstraint::Absolute(Width::Fixed(DESCRIPTION_COLUMN_WIDTH)),
        ]);

    if color {
        table.enforce_styling();
        table.set_header(vec![
            Cell::new("Change Type").fg(TableColor::Red),
            Cell::new("Change Description").fg(TableColor::Red),
        ]);
    } else {
        table.force_no_tty();
        table.set_header(vec!["Change Type", "Change Description"]);
    }

    for (kind, description) in rows {
        table.add_row(vec![kind, description]);
    }
    table
}

/// The status line printed before the comparison starts.
pub fn comparing_line(from: &SchemaSource, to: &SchemaSource, color: bool) -> String {
    let side = |source: &SchemaSource| {
        let location = source.location();
        let location = if color {
            location.yellow().bold().to_string()
        } else {
            location
        };
        format!("schema from {location} ({})", source.label())
    };
    format!("Comparing {} to {}", side(from), side(to))
}

#[cfg(test)]
mod tests;
