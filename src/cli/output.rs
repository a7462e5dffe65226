//! Plain-text tables and JSON output for list commands

use serde::Serialize;

/// Render rows as left-aligned columns separated by two spaces
pub fn format_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if let Some(w) = widths.get_mut(i) {
                *w = (*w).max(cell.chars().count());
            }
        }
    }

    let separators: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    let mut out = render_row(headers.iter().copied(), &widths);
    out.push_str(&render_row(separators.iter().map(String::as_str), &widths));
    for row in rows {
        out.push_str(&render_row(row.iter().map(String::as_str), &widths));
    }
    out
}

fn render_row<'a>(cells: impl Iterator<Item = &'a str>, widths: &[usize]) -> String {
    let padded: Vec<String> = cells
        .zip(widths)
        .map(|(cell, width)| {
            let pad = width.saturating_sub(cell.chars().count());
            format!("{}{}", cell, " ".repeat(pad))
        })
        .collect();
    let mut line = padded.join("  ").trim_end().to_string();
    line.push('\n');
    line
}

pub fn print_table(headers: &[&str], rows: &[Vec<String>], empty: &str) {
    if rows.is_empty() {
        println!("{}", empty);
    } else {
        print!("{}", format_table(headers, rows));
    }
}

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_table_aligns_columns() {
        let rows = vec![
            vec!["s1".to_string(), "Reyes Lights".to_string()],
            vec!["s10".to_string(), "A".to_string()],
        ];
        let out = format_table(&["ID", "Business"], &rows);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "ID   Business");
        assert_eq!(lines[1], "---  ------------");
        assert_eq!(lines[2], "s1   Reyes Lights");
        assert_eq!(lines[3], "s10  A");
    }

    #[test]
    fn test_format_table_counts_chars_not_bytes() {
        let rows = vec![vec!["₱1,500.00".to_string(), "x".to_string()]];
        let out = format_table(&["Amount", "Y"], &rows);
        assert_eq!(out.lines().nth(2), Some("₱1,500.00  x"));
    }
}
