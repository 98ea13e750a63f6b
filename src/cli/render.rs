//! Terminal rendering of transcript messages and the settings form.

use crate::chat::{Message, Sender};
use crate::settings::SettingsForm;

/// Render one message as terminal lines.
#[must_use]
pub fn message(msg: &Message) -> String {
    let time = msg.timestamp.format("%H:%M");
    if msg.is_typing {
        return format!("[{time}] Advisor is typing... ({})", msg.content);
    }
    let who = match msg.sender {
        Sender::User => "You",
        Sender::Bot => "Advisor",
    };
    format!("[{time}] {who}: {}", msg.content)
}

/// Render the settings form with its draft values.
#[must_use]
pub fn settings_form(form: &SettingsForm) -> String {
    let draft = form.draft();
    let show = |v: &str| {
        if v.is_empty() {
            "(not set)".to_string()
        } else {
            v.to_string()
        }
    };
    format!(
        "--- Settings ---\n  league:   {}\n  user:     {}\n  brutal:   {}\n\
         Edit with /set league <id>, /set user <name>, /set brutal <on|off>; then /save or /cancel.",
        show(&draft.league_id),
        show(&draft.username),
        if draft.brutal_mode { "on" } else { "off" }
    )
}
