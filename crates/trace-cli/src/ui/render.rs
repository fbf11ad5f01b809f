//! Rendering primitives for CLI output.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::{ASCII_MARKDOWN, UTF8_FULL};
use comfy_table::{Attribute, Cell, ContentArrangement, Table as ComfyTable};

use super::context::UiContext;
use super::theme::{styled, styles, Badge};

/// Render a header line for a command.
///
/// Pretty mode: "Trace · command (context)"
/// Plain mode: "trace command"
pub fn header(ctx: &UiContext, command: &str, context: Option<&str>) -> String {
    if ctx.mode.is_pretty() {
        let title = styled("Trace", styles::accent(ctx.palette), ctx.color);
        match context {
            Some(c) => format!("{} \u{00B7} {} ({})", title, command, c),
            None => format!("{} \u{00B7} {}", title, command),
        }
    } else if ctx.mode.is_json() {
        String::new()
    } else {
        format!("trace {}", command)
    }
}

/// Render a divider line.
pub fn divider(ctx: &UiContext) -> String {
    if ctx.mode.is_pretty() && ctx.unicode {
        "\u{2500}".repeat(ctx.width.min(60))
    } else {
        "---".to_string()
    }
}

/// Render a badge with optional message.
pub fn badge(ctx: &UiContext, kind: Badge, message: &str) -> String {
    let colored_badge = styled(kind.display(ctx.unicode), kind.style(), ctx.color);
    if message.is_empty() {
        colored_badge
    } else {
        format!("{} {}", colored_badge, message)
    }
}

/// Render a key-value pair.
///
/// Pretty mode: "Key: value" with dim key
/// Plain mode: "key=value"
pub fn kv(ctx: &UiContext, key: &str, value: &str) -> String {
    if ctx.mode.is_pretty() {
        let styled_key = styled(&format!("{}:", key), styles::dim(), ctx.color);
        format!("{} {}", styled_key, value)
    } else {
        format!("{}={}", key.to_lowercase().replace(' ', "_"), value)
    }
}

/// Render a hint line. A leading "Hint:" in `text` is not repeated.
pub fn hint(ctx: &UiContext, text: &str) -> String {
    let text = text.strip_prefix("Hint:").map(str::trim_start).unwrap_or(text);
    if ctx.mode.is_pretty() {
        let label = styled("Hint:", styles::dim(), ctx.color);
        format!("{} {}", label, text)
    } else {
        format!("hint={}", text)
    }
}

/// Render a receipt (summary block after an action).
///
/// Pretty mode: badge + indented key-value pairs
/// Plain mode: status=ok + key=value lines
pub fn receipt(ctx: &UiContext, title: &str, items: &[(&str, &str)]) -> String {
    let mut lines = Vec::new();

    if ctx.mode.is_pretty() {
        lines.push(badge(ctx, Badge::Ok, title));
        for (key, value) in items {
            lines.push(format!("  {}", kv(ctx, key, value)));
        }
    } else {
        lines.push("status=ok".to_string());
        for (key, value) in items {
            lines.push(kv(ctx, key, value));
        }
    }

    lines.join("\n")
}

/// Column definition for table rendering.
#[derive(Debug, Clone)]
pub struct Column {
    pub header: &'static str,
}

impl Column {
    pub const fn new(header: &'static str) -> Self {
        Self { header }
    }
}

/// Render a table.
///
/// Pretty mode: comfy-table with borders, sized to the terminal
/// Plain mode: tab-separated values, no header
pub fn table(ctx: &UiContext, columns: &[Column], rows: &[Vec<String>]) -> String {
    if !ctx.mode.is_pretty() {
        return rows
            .iter()
            .map(|row| row.join("\t"))
            .collect::<Vec<_>>()
            .join("\n");
    }

    let mut table = ComfyTable::new();
    if ctx.unicode {
        table
            .load_preset(UTF8_FULL)
            .apply_modifier(UTF8_ROUND_CORNERS);
    } else {
        table.load_preset(ASCII_MARKDOWN);
    }
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_width(ctx.width.min(u16::MAX as usize) as u16);

    let header_cells: Vec<Cell> = columns
        .iter()
        .map(|c| {
            let cell = Cell::new(c.header);
            if ctx.color {
                cell.add_attribute(Attribute::Bold)
            } else {
                cell
            }
        })
        .collect();
    table.set_header(header_cells);

    for row in rows {
        table.add_row(row);
    }

    table.to_string()
}

/// Print a message to stdout unless the output is JSON.
pub fn print(ctx: &UiContext, message: &str) {
    if !ctx.mode.is_json() {
        println!("{}", message);
    }
}

/// Print an empty line (only in pretty mode).
pub fn blank_line(ctx: &UiContext) {
    if ctx.mode.is_pretty() {
        println!();
    }
}

/// Format an error message with optional hint.
///
/// Pretty mode: "[ERR] message" with optional "Hint: ..." on next line
/// Plain mode: "error=message" with optional "hint=suggestion"
pub fn error_message(ctx: &UiContext, message: &str, error_hint: Option<&str>) -> String {
    let mut lines = Vec::new();

    if ctx.mode.is_pretty() {
        lines.push(badge(ctx, Badge::Err, message));
        if let Some(h) = error_hint {
            lines.push(hint(ctx, h));
        }
    } else {
        lines.push(format!("error={}", message));
        if let Some(h) = error_hint {
            lines.push(hint(ctx, h));
        }
    }

    lines.join("\n")
}

/// Print an error message to stderr with optional hint.
pub fn print_error(ctx: &UiContext, message: &str, error_hint: Option<&str>) {
    eprintln!("{}", error_message(ctx, message, error_hint));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::OutputMode;
    use trace_core::theme::ThemeMode;

    fn plain_ctx() -> UiContext {
        UiContext {
            is_tty: false,
            color: false,
            unicode: false,
            width: 80,
            mode: OutputMode::Plain,
            palette: ThemeMode::Light,
        }
    }

    fn pretty_ctx() -> UiContext {
        UiContext {
            is_tty: true,
            color: false,
            unicode: true,
            width: 80,
            mode: OutputMode::Pretty,
            palette: ThemeMode::Dark,
        }
    }

    #[test]
    fn test_header_modes() {
        assert_eq!(header(&plain_ctx(), "list", None), "trace list");
        assert_eq!(
            header(&pretty_ctx(), "search", Some("beach")),
            "Trace \u{00B7} search (beach)"
        );
    }

    #[test]
    fn test_kv_modes() {
        assert_eq!(kv(&plain_ctx(), "Updated At", "x"), "updated_at=x");
        assert_eq!(kv(&pretty_ctx(), "Date", "2024-01-05"), "Date: 2024-01-05");
    }

    #[test]
    fn test_receipt_plain() {
        let out = receipt(&plain_ctx(), "Saved", &[("Date", "2024-01-05")]);
        assert_eq!(out, "status=ok\ndate=2024-01-05");
    }

    #[test]
    fn test_table_plain_is_tab_separated() {
        let rows = vec![
            vec!["2024-01-05".to_string(), "Trip".to_string()],
            vec!["2024-01-04".to_string(), "Untitled".to_string()],
        ];
        let out = table(&plain_ctx(), &[Column::new("DATE"), Column::new("TITLE")], &rows);
        assert_eq!(out, "2024-01-05\tTrip\n2024-01-04\tUntitled");
    }

    #[test]
    fn test_table_pretty_has_headers() {
        let rows = vec![vec!["2024-01-05".to_string(), "Trip".to_string()]];
        let out = table(&pretty_ctx(), &[Column::new("DATE"), Column::new("TITLE")], &rows);
        assert!(out.contains("DATE"));
        assert!(out.contains("Trip"));
    }

    #[test]
    fn test_error_message_plain() {
        assert_eq!(
            error_message(&plain_ctx(), "Sync failed", Some("retry")),
            "error=Sync failed\nhint=retry"
        );
    }

    #[test]
    fn test_hint_label_not_repeated() {
        assert_eq!(
            hint(&plain_ctx(), "Hint: Run `trace register` first."),
            "hint=Run `trace register` first."
        );
        assert_eq!(
            hint(&pretty_ctx(), "Hint: Run `trace list`."),
            "Hint: Run `trace list`."
        );
    }
}
