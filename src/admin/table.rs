use crate::admin::store::RsvpRow;

/// Column headers, in display order.
pub const ADMIN_COLUMNS: [&str; 5] = ["Name", "Guests", "Side", "Code", "Valid"];

const VALID_MARK: &str = "✅";
const INVALID_MARK: &str = "❌";

fn cells(row: &RsvpRow) -> [String; 5] {
    [
        row.name.clone(),
        row.guests.to_string(),
        row.side.clone(),
        row.code.clone(),
        if row.is_valid() { VALID_MARK } else { INVALID_MARK }.to_owned(),
    ]
}

/// Render rows as a left-aligned text table with a header and a rule.
///
/// Rows are printed in the order given; pass the output of `RsvpStore::list_recent`.
pub fn render_admin_table(rows: &[RsvpRow]) -> String {
    let body: Vec<[String; 5]> = rows.iter().map(cells).collect();

    let mut widths = ADMIN_COLUMNS.map(|h| h.chars().count());
    for r in &body {
        for (w, cell) in widths.iter_mut().zip(r.iter()) {
            *w = (*w).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_line(&mut out, ADMIN_COLUMNS.iter().copied(), &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    push_line(&mut out, rule.iter().map(String::as_str), &widths);
    for r in &body {
        push_line(&mut out, r.iter().map(String::as_str), &widths);
    }
    out
}

fn push_line<'a>(out: &mut String, cells: impl Iterator<Item = &'a str>, widths: &[usize; 5]) {
    let line: Vec<String> = cells
        .zip(widths.iter())
        .map(|(cell, &w)| format!("{cell:<w$}"))
        .collect();
    out.push_str(line.join(" | ").trim_end());
    out.push('\n');
}
