//! Switching templates between literal and localized texts.
//!
//! In localized mode every screen and option carries a reference of the form
//! `{prefix}{template name}:{key id}`, and the literal texts live in an STF
//! string table under their key ids.

use crate::stf::LocalizationTable;
use crate::template::Template;

/// A parsed localization reference such as `@conversation/vendor:s_1a2b3c4d`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyReference<'a> {
    file: &'a str,
    key: &'a str,
}

impl<'a> KeyReference<'a> {
    /// Splits a reference into its string file and key id. The key id is the
    /// segment between the first and second `:`.
    pub fn parse(reference: &'a str) -> Option<Self> {
        let mut parts = reference.split(':');
        let file = parts.next()?;
        let key = parts.next().filter(|k| !k.is_empty())?;
        Some(Self { file, key })
    }

    /// The string file path, prefix included.
    pub fn file(&self) -> &'a str {
        self.file
    }

    pub fn key(&self) -> &'a str {
        self.key
    }

    pub fn format(prefix: &str, template_name: &str, key: &str) -> String {
        format!("{}{}:{}", prefix, template_name, key)
    }
}

/// Source of fresh key ids for texts that do not have one yet.
pub trait KeyGenerator {
    fn next_key(&mut self) -> String;
}

/// Deterministic key ids: `s_00000001`, `s_00000002`, ...
#[derive(Debug, Clone, Default)]
pub struct SequentialKeys {
    next: u64,
}

impl SequentialKeys {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts numbering after `last`, e.g. to continue an existing table.
    pub fn starting_after(last: u64) -> Self {
        Self { next: last }
    }
}

impl KeyGenerator for SequentialKeys {
    fn next_key(&mut self) -> String {
        self.next += 1;
        format!("s_{:08}", self.next)
    }
}

fn existing_or_new(reference: Option<&str>, keys: &mut impl KeyGenerator) -> String {
    reference
        .and_then(KeyReference::parse)
        .map(|r| r.key().to_string())
        .unwrap_or_else(|| keys.next_key())
}

/// Converts a template to localized mode.
///
/// Texts keep their existing key ids where they have one; the rest get ids from
/// `keys`. Every reference is rewritten against the template's prefix and name.
/// Returns the converted template and the string table holding the literal texts
/// in emission order.
pub fn to_localized(template: &Template, keys: &mut impl KeyGenerator) -> (Template, LocalizationTable) {
    let mut converted = template.clone();
    let mut table = LocalizationTable::new();
    let prefix = converted.key_prefix.clone();
    let name = converted.name.clone();

    for screen in &mut converted.screens {
        let id = existing_or_new(screen.key.as_deref(), keys);
        table.push(id.clone(), screen.text.clone());
        screen.key = Some(KeyReference::format(&prefix, &name, &id));

        for option in &mut screen.options {
            let id = existing_or_new(option.key.as_deref(), keys);
            table.push(id.clone(), option.text.clone());
            option.key = Some(KeyReference::format(&prefix, &name, &id));
        }
    }
    converted.localized = true;

    tracing::debug!(template = %name, strings = table.len(), "template converted to localized mode");
    (converted, table)
}

/// Converts a template back to literal mode, pulling texts from `strings`.
///
/// A text is replaced only when the table has a non-empty value for its key id.
/// References are kept so a later round trip reuses the same ids.
pub fn to_literal(template: &Template, strings: &LocalizationTable) -> Template {
    let strings = strings.to_map();
    let lookup = |reference: Option<&str>| {
        reference
            .and_then(KeyReference::parse)
            .and_then(|r| strings.get(r.key()).copied())
            .filter(|text| !text.is_empty())
            .map(str::to_string)
    };

    let mut converted = template.clone();
    for screen in &mut converted.screens {
        if let Some(text) = lookup(screen.key.as_deref()) {
            screen.text = text;
        }
        for option in &mut screen.options {
            if let Some(text) = lookup(option.key.as_deref()) {
                option.text = text;
            }
        }
    }
    converted.localized = false;
    converted
}

/// Rewrites every reference to point at `{prefix}{template name}`, keeping key ids.
///
/// Used after the template is renamed or its prefix changes. References that do
/// not parse are left untouched.
pub fn rebase_keys(template: &Template, prefix: &str) -> Template {
    let mut converted = template.clone();
    let name = converted.name.clone();
    let rebase = |reference: &mut Option<String>| {
        if let Some(id) = reference
            .as_deref()
            .and_then(KeyReference::parse)
            .map(|r| r.key().to_string())
        {
            *reference = Some(KeyReference::format(prefix, &name, &id));
        }
    };

    for screen in &mut converted.screens {
        rebase(&mut screen.key);
        for option in &mut screen.options {
            rebase(&mut option.key);
        }
    }
    converted.key_prefix = prefix.to_string();
    converted
}
