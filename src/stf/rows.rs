use crate::error::LocalizationError;
use crate::localization::KeyReference;
use crate::template::Template;

/// Trigger action whose screens contribute quest journal entries.
pub const TASK_ACTION: &str = "activateTask";

/// Collects the conversation strings of a localized template.
///
/// For each screen in order, the screen's own text comes first, followed by the
/// texts of its options. Keys are the key ids of the screens' and options'
/// localization references.
pub fn conversation_rows(template: &Template) -> Result<Vec<(String, String)>, LocalizationError> {
    if !template.is_localized() {
        return Err(LocalizationError::NotLocalized(template.name().to_string()));
    }

    let mut rows = Vec::new();
    for screen in template.screens() {
        let reference = screen.key().ok_or_else(|| LocalizationError::MissingKey {
            owner: format!("Screen '{}'", screen.name()),
        })?;
        rows.push((key_id(reference)?, screen.text().to_string()));

        for (position, option) in screen.options().iter().enumerate() {
            let reference = option.key().ok_or_else(|| LocalizationError::MissingKey {
                owner: format!("Option {} of screen '{}'", position + 1, screen.name()),
            })?;
            rows.push((key_id(reference)?, option.text().to_string()));
        }
    }
    Ok(rows)
}

/// Collects quest journal strings: a title and a description row for every
/// screen that activates a task, numbered from `00` in screen order.
pub fn task_rows(template: &Template) -> Vec<(String, String)> {
    template
        .screens()
        .iter()
        .filter_map(|screen| screen.trigger())
        .filter(|trigger| trigger.action() == TASK_ACTION)
        .enumerate()
        .flat_map(|(index, trigger)| {
            [
                (
                    format!("task{:02}_journal_entry_title", index),
                    trigger.title().unwrap_or_default().to_string(),
                ),
                (
                    format!("task{:02}_journal_entry_description", index),
                    trigger.description().unwrap_or_default().to_string(),
                ),
            ]
        })
        .collect()
}

fn key_id(reference: &str) -> Result<String, LocalizationError> {
    KeyReference::parse(reference)
        .map(|r| r.key().to_string())
        .ok_or_else(|| LocalizationError::MalformedKey {
            reference: reference.to_string(),
        })
}
