//! Plain-text rendering of messages and conversation lists

use crate::types::{Conversation, Message, Role};
use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use std::fmt::Display;
use crossterm::style::Stylize;

/// Render one transcript entry, styled by role
pub fn message_line(message: &Message) -> String {
    let label = match message.role {
        Role::User => "You".bold().cyan().to_string(),
        Role::Assistant => "Assistant".bold().green().to_string(),
    };
    format!("{label}: {}", message.content)
}

/// Render the conversation list, marking the active one
pub fn conversation_list<Tz>(
    conversations: &[Conversation],
    current: Option<&str>,
    now: &DateTime<Tz>,
) -> Vec<String>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    if conversations.is_empty() {
        return vec![
            "No conversations yet".to_string(),
            "Start a new chat to begin!".to_string(),
        ];
    }

    conversations
        .iter()
        .map(|conv| {
            let marker = if current == Some(conv.id.as_str()) { '*' } else { ' ' };
            format!(
                "{marker} {}  {}  ({}, {} messages)",
                conv.id,
                conv.display_title(),
                format_relative(conv.last_activity(), now),
                conv.messages.len()
            )
        })
        .collect()
}

/// Time of day within 24 hours, weekday within a week, otherwise month and day.
///
/// Shown in the time zone of `now`. Timestamps without an offset are taken
/// as UTC. Unparseable input is returned unchanged.
pub fn format_relative<Tz>(timestamp: &str, now: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let Some(at) = parse_timestamp(timestamp) else {
        return timestamp.to_string();
    };
    let at = at.with_timezone(&now.timezone());

    let hours = now.clone().signed_duration_since(at.clone()).num_hours();
    if hours < 24 {
        at.format("%H:%M").to_string()
    } else if hours < 168 {
        at.format("%a").to_string()
    } else {
        at.format("%b %-d").to_string()
    }
}

fn parse_timestamp(timestamp: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(timestamp) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(timestamp, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}
