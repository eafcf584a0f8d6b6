/// Terminal rendering for `list` and `summary` output.
use chrono::Local;
use unicode_width::UnicodeWidthStr;

use crate::list::ListPage;
use crate::session::PracticeSession;
use crate::summary::Summary;

/// Render one page of sessions as an aligned table. `pretty` pads columns
/// for terminals; piped output gets tab-separated lines instead.
pub fn session_table(page: &ListPage, pretty: bool) -> String {
    let mut out = String::new();

    if page.sessions.is_empty() {
        out.push_str(&format!(
            "No sessions between {} and {}.\n",
            page.range.start, page.range.end
        ));
        return out;
    }

    let header = ["ID", "STARTED", "MIN", "PIECE", "NOTES"];
    let mut rows: Vec<[String; 5]> = Vec::with_capacity(page.sessions.len());
    for session in &page.sessions {
        rows.push(session_row(session));
    }

    if pretty {
        let mut widths: Vec<usize> = header.iter().map(|h| h.width()).collect();
        for row in &rows {
            for (width, cell) in widths.iter_mut().zip(row.iter()) {
                *width = (*width).max(cell.width());
            }
        }
        push_padded(&mut out, &header.map(String::from), &widths);
        for row in &rows {
            push_padded(&mut out, row, &widths);
        }
    } else {
        for row in &rows {
            out.push_str(&row.join("\t"));
            out.push('\n');
        }
    }

    let shown_to = page.offset + page.sessions.len();
    out.push_str(&format!(
        "\nShowing {}-{} of {} ({} to {})\n",
        page.offset + 1,
        shown_to,
        page.total,
        page.range.start,
        page.range.end
    ));
    out
}

fn session_row(session: &PracticeSession) -> [String; 5] {
    [
        session.id.to_string(),
        session.started_at.format_in(&Local),
        session.minutes.to_string(),
        session.piece.clone(),
        session.notes.clone().unwrap_or_default(),
    ]
}

fn push_padded(out: &mut String, cells: &[String; 5], widths: &[usize]) {
    for (i, (cell, width)) in cells.iter().zip(widths.iter()).enumerate() {
        if i > 0 {
            out.push_str("  ");
        }
        out.push_str(cell);
        // Pad by display width, not byte length.
        for _ in cell.width()..*width {
            out.push(' ');
        }
    }
    while out.ends_with(' ') {
        out.pop();
    }
    out.push('\n');
}

pub fn summary_text(summary: &Summary) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "Practice summary {} to {}\n\n",
        summary.range.start, summary.range.end
    ));
    out.push_str(&format!("  Sessions:       {}\n", summary.sessions));
    out.push_str(&format!("  Total minutes:  {}\n", summary.total_minutes));
    out.push_str(&format!("  Days practised: {}\n", summary.days_practised));
    out.push_str(&format!(
        "  Longest streak: {} day(s)\n",
        summary.longest_streak_days
    ));

    if !summary.minutes_by_piece.is_empty() {
        out.push_str("\n  By piece:\n");
        let width = summary
            .minutes_by_piece
            .keys()
            .map(|piece| piece.width())
            .max()
            .unwrap_or(0);
        for (piece, minutes) in &summary.minutes_by_piece {
            let pad = " ".repeat(width.saturating_sub(piece.width()));
            out.push_str(&format!("    {piece}{pad}  {minutes} min\n"));
        }
    }
    out
}
