//! Plain-text rendering of board views and notices.

use kanban_core::{BoardView, CardView, Column, Notice, NoticeKind};
use std::fmt::Write as _;

/// Formats the whole board, one column block after another.
pub fn board_text(view: &BoardView) -> String {
    let mut out = String::new();
    for column in &view.columns {
        let _ = writeln!(out, "== [{}] {} ==", column.id, column.heading());
        if column.cards.is_empty() {
            let _ = writeln!(out, "   (empty)");
        }
        for card in &column.cards {
            out.push_str(&card_text(card));
        }
        out.push('\n');
    }
    if !view.unplaced.is_empty() {
        let ids: Vec<String> = view.unplaced.iter().map(ToString::to_string).collect();
        let _ = writeln!(out, "Tasks in unknown columns: {}", ids.join(", "));
    }
    out
}

fn card_text(card: &CardView) -> String {
    let mut out = format!(
        "  #{:<4} {}  <{}>  comments:{} attachments:{}\n",
        card.task_id, card.title, card.priority_label, card.comments, card.attachments
    );
    if let Some(description) = &card.description {
        let _ = writeln!(out, "         {description}");
    }
    out
}

pub fn columns_text(columns: &[Column]) -> String {
    columns
        .iter()
        .map(|column| format!("{}  {}\n", column.id, column.title))
        .collect()
}

pub fn notice_text(notice: &Notice) -> String {
    let tag = match notice.kind {
        NoticeKind::Success => "ok",
        NoticeKind::Warning => "warning",
        NoticeKind::Error => "error",
    };
    format!("[{tag}] {}", notice.message)
}
