use chrono::{Local, LocalResult, TimeZone};

use crate::domain::Entry;

const SHORT_ID_LEN: usize = 8;

pub fn format_date_time(ms: i64) -> String {
    match Local.timestamp_millis_opt(ms) {
        LocalResult::Single(dt) | LocalResult::Ambiguous(dt, _) => {
            dt.format("%a, %b %d, %Y, %-I:%M %p").to_string()
        }
        LocalResult::None => "unknown time".to_string(),
    }
}

/// "Monday, October 19"
pub fn format_day(ms: i64) -> String {
    match Local.timestamp_millis_opt(ms) {
        LocalResult::Single(dt) | LocalResult::Ambiguous(dt, _) => {
            dt.format("%A, %B %-d").to_string()
        }
        LocalResult::None => "Today".to_string(),
    }
}

pub fn short_id(id: &str) -> &str {
    match id.char_indices().nth(SHORT_ID_LEN) {
        Some((idx, _)) => &id[..idx],
        None => id,
    }
}

/// At most `max_lines` lines of at most `max_width` characters each, with an
/// ellipsis when anything was cut.
pub fn preview(text: &str, max_lines: usize, max_width: usize) -> String {
    let lines: Vec<&str> = text.lines().filter(|l| !l.trim().is_empty()).collect();
    let mut out = Vec::new();
    let clipped = lines.len() > max_lines;

    for line in lines.iter().take(max_lines) {
        if line.chars().count() > max_width {
            let cut: String = line.chars().take(max_width.saturating_sub(1)).collect();
            out.push(format!("{}…", cut.trim_end()));
        } else {
            out.push(line.to_string());
        }
    }

    if clipped {
        if let Some(last) = out.last_mut().filter(|l| !l.ends_with('…')) {
            last.push('…');
        }
    }
    out.join("\n")
}

pub fn header_label(active_id: Option<&str>, active: Option<&Entry>) -> String {
    match (active_id, active) {
        (None, _) => "New entry (auto-saves)".to_string(),
        (Some(_), None) => "Editing (auto-saves)".to_string(),
        (Some(_), Some(entry)) => format!(
            "Editing • Started {} • Updated {}",
            format_date_time(entry.created_at),
            format_date_time(entry.updated_at)
        ),
    }
}

/// Finds an entry by 1-based list position (`#2` or `2`), full id, or unique id prefix.
pub fn resolve_entry<'a>(entries: &[&'a Entry], query: &str) -> Option<&'a Entry> {
    let query = query.trim();
    if query.is_empty() {
        return None;
    }

    let position = query.strip_prefix('#').unwrap_or(query);
    if let Ok(n) = position.parse::<usize>() {
        if n >= 1 && n <= entries.len() && position.len() < SHORT_ID_LEN {
            return Some(entries[n - 1]);
        }
    }

    if let Some(exact) = entries.iter().copied().find(|e| e.id == query) {
        return Some(exact);
    }

    let mut matches = entries.iter().copied().filter(|e| e.id.starts_with(query));
    match (matches.next(), matches.next()) {
        (Some(only), None) => Some(only),
        _ => None,
    }
}
