//! Markup rendering for the activity board.
//!
//! Everything here is plain string building, shared between the browser view
//! and the tests. The DOM layer only injects what these functions produce.

use crate::model::Activity;

/// Feedback tone of the message banner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Error,
}

/// Escape the five HTML-sensitive characters before interpolation, so
/// activity or participant data can never smuggle markup into the page.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#039;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Derive a 1-2 character avatar label from an email.
///
/// Takes the local part (before `@`), splits on whitespace, dot, underscore
/// and hyphen, strips anything non-alphanumeric from the pieces, and joins
/// the first letter of the first two pieces, uppercased. A single piece
/// falls back to its first two characters. Empty input yields `–`.
pub fn initials(text: &str) -> String {
    let local = text.split('@').next().unwrap_or("");
    let tokens: Vec<String> = local
        .split(|c: char| c.is_whitespace() || matches!(c, '.' | '_' | '-'))
        .map(|piece| piece.chars().filter(|c| c.is_alphanumeric()).collect())
        .filter(|piece: &String| !piece.is_empty())
        .collect();

    let raw: String = match tokens.as_slice() {
        [] => return "–".to_string(),
        [only] => only.chars().take(2).collect(),
        [first, second, ..] => first
            .chars()
            .take(1)
            .chain(second.chars().take(1))
            .collect(),
    };
    raw.to_uppercase()
}

/// Render one activity card. The card is replaced wholesale on every
/// refresh, so per-participant state lives in `data-*` attributes that the
/// delegated click handler reads back.
pub fn activity_card(name: &str, activity: &Activity) -> String {
    format!(
        concat!(
            r#"<div class="activity-card">"#,
            "<h4>{name}</h4>",
            "<p>{description}</p>",
            "<p><strong>Schedule:</strong> {schedule}</p>",
            "<p><strong>Availability:</strong> {spots} spots left</p>",
            r#"<div class="participants-section" aria-label="Participants for {name}">"#,
            r#"<div class="participants-title">Participants <span class="participants-count">({count})</span></div>"#,
            "{participants}",
            "</div>",
            "</div>"
        ),
        name = escape_html(name),
        description = escape_html(&activity.description),
        schedule = escape_html(&activity.schedule),
        spots = activity.spots_left(),
        count = activity.participants.len(),
        participants = participants_markup(name, activity),
    )
}

fn participants_markup(name: &str, activity: &Activity) -> String {
    if activity.participants.is_empty() {
        return r#"<div class="no-participants">No participants yet.</div>"#.to_string();
    }

    let items: String = activity
        .participants
        .iter()
        .map(|email| participant_item(name, email))
        .collect();
    format!(r#"<ul class="participants-list">{items}</ul>"#)
}

fn participant_item(name: &str, email: &str) -> String {
    format!(
        concat!(
            r#"<li class="participant-item" data-activity="{name}" data-email="{email}">"#,
            r#"<span class="participant-avatar">{avatar}</span>"#,
            r#"<span class="participant-email">{email}</span>"#,
            r#"<button type="button" class="participant-delete" title="Unregister {email}" aria-label="Unregister {email}">✖</button>"#,
            "</li>"
        ),
        name = escape_html(name),
        email = escape_html(email),
        avatar = initials(email),
    )
}
