use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::builder::TemplateBuilder;
use crate::error::ValidationError;

/// Key prefix used for localization references when a template does not set one.
pub const DEFAULT_KEY_PREFIX: &str = "@conversation/";

/// Identifier of a stored conversation template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TemplateId(pub u64);

/// Identifier of a screen, unique within its template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScreenId(pub u64);

impl fmt::Display for TemplateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl fmt::Display for ScreenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A complete conversation: an ordered set of screens plus the settings that
/// control how their texts are emitted.
///
/// A `Template` can only be obtained through [`TemplateBuilder`] (or the
/// [`IntoTemplate`](super::IntoTemplate) trait), so every instance has passed
/// validation. Screens are stored as an arena in declaration order and
/// addressed by [`ScreenId`] through a lookup index.
#[derive(Debug, Clone)]
pub struct Template {
    pub(crate) id: TemplateId,
    pub(crate) name: String,
    pub(crate) localized: bool,
    pub(crate) key_prefix: String,
    pub(crate) initial_screen: Option<ScreenId>,
    pub(crate) screens: Vec<Screen>,
    pub(crate) index: AHashMap<ScreenId, usize>,
}

impl Template {
    pub fn builder(name: impl Into<String>) -> TemplateBuilder {
        TemplateBuilder::new(name)
    }

    pub fn id(&self) -> TemplateId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether texts are emitted as localization references instead of literals.
    pub fn is_localized(&self) -> bool {
        self.localized
    }

    pub fn key_prefix(&self) -> &str {
        &self.key_prefix
    }

    /// The explicitly configured initial screen, if any.
    pub fn initial_screen_id(&self) -> Option<ScreenId> {
        self.initial_screen
    }

    pub fn screens(&self) -> &[Screen] {
        &self.screens
    }

    pub fn screen(&self, id: ScreenId) -> Option<&Screen> {
        self.index.get(&id).map(|&i| &self.screens[i])
    }

    /// The screen a conversation starts on.
    ///
    /// This is the configured initial screen when it resolves, otherwise the
    /// first screen in declaration order.
    pub fn entry_screen(&self) -> &Screen {
        self.initial_screen
            .and_then(|id| self.screen(id))
            .unwrap_or(&self.screens[0])
    }

    /// Looks up the screen an option leads to. `None` ends the conversation,
    /// whether the option has no target or its target is not in this template.
    pub fn resolve_target(&self, option: &DialogOption) -> Option<&Screen> {
        option.target.and_then(|id| self.screen(id))
    }

    /// Re-checks the structural invariants established at construction.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_parts(&self.name, &self.screens).map(|_| ())
    }
}

/// Checks the required fields and builds the id -> position index.
pub(crate) fn validate_parts(
    name: &str,
    screens: &[Screen],
) -> Result<AHashMap<ScreenId, usize>, ValidationError> {
    if name.trim().is_empty() {
        return Err(ValidationError::MissingName);
    }
    if screens.is_empty() {
        return Err(ValidationError::NoScreens(name.to_string()));
    }

    let mut index = AHashMap::with_capacity(screens.len());
    let mut names: AHashMap<&str, ScreenId> = AHashMap::with_capacity(screens.len());
    for (position, screen) in screens.iter().enumerate() {
        if screen.name.trim().is_empty() {
            return Err(ValidationError::MissingScreenName(screen.id));
        }
        // Screen names become Lua globals and resolver ids.
        if let Some(&first) = names.get(screen.name.as_str()) {
            return Err(ValidationError::DuplicateScreenName {
                name: screen.name.clone(),
                first,
                second: screen.id,
            });
        }
        names.insert(&screen.name, screen.id);
        if let Some(trigger) = &screen.trigger {
            if trigger.reaction.trim().is_empty() {
                return Err(ValidationError::MissingReaction {
                    screen: screen.name.clone(),
                    action: trigger.action.clone(),
                });
            }
        }
        if let Some(&previous) = index.get(&screen.id) {
            let first: &Screen = &screens[previous];
            return Err(ValidationError::DuplicateScreenId {
                id: screen.id,
                first: first.name.clone(),
                second: screen.name.clone(),
            });
        }
        index.insert(screen.id, position);
    }
    Ok(index)
}

/// One dialog state of a conversation.
#[derive(Debug, Clone, PartialEq)]
pub struct Screen {
    pub(crate) id: ScreenId,
    pub(crate) name: String,
    pub(crate) text: String,
    pub(crate) key: Option<String>,
    pub(crate) terminal: bool,
    pub(crate) trigger: Option<QuestTrigger>,
    pub(crate) options: Vec<DialogOption>,
}

impl Screen {
    pub fn new(id: ScreenId, name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            text: text.into(),
            key: None,
            terminal: false,
            trigger: None,
            options: Vec::new(),
        }
    }

    /// Sets the localization reference used in place of the literal text.
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    pub fn terminal(mut self, terminal: bool) -> Self {
        self.terminal = terminal;
        self
    }

    /// Attaches quest metadata. A trigger with a blank action is no trigger.
    pub fn with_trigger(mut self, trigger: QuestTrigger) -> Self {
        self.trigger = Some(trigger).filter(|t| !t.action.trim().is_empty());
        self
    }

    pub fn with_option(mut self, option: DialogOption) -> Self {
        self.options.push(option);
        self
    }

    pub fn with_options(mut self, options: impl IntoIterator<Item = DialogOption>) -> Self {
        self.options.extend(options);
        self
    }

    pub fn id(&self) -> ScreenId {
        self.id
    }

    /// The stable identifier the runtime addresses this screen by.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    pub fn is_terminal(&self) -> bool {
        self.terminal
    }

    pub fn trigger(&self) -> Option<&QuestTrigger> {
        self.trigger.as_ref()
    }

    pub fn options(&self) -> &[DialogOption] {
        &self.options
    }
}

/// Quest metadata attached to a screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestTrigger {
    pub(crate) action: String,
    pub(crate) reaction: String,
    pub(crate) title: Option<String>,
    pub(crate) description: Option<String>,
}

impl QuestTrigger {
    pub fn new(action: impl Into<String>, reaction: impl Into<String>) -> Self {
        Self {
            action: action.into(),
            reaction: reaction.into(),
            title: None,
            description: None,
        }
    }

    pub fn with_journal(mut self, title: impl Into<String>, description: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self.description = Some(description.into());
        self
    }

    /// Name of the quest manager function to call.
    pub fn action(&self) -> &str {
        &self.action
    }

    /// Quest the action applies to.
    pub fn reaction(&self) -> &str {
        &self.reaction
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}

/// A selectable response on a screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogOption {
    pub(crate) text: String,
    pub(crate) key: Option<String>,
    pub(crate) target: Option<ScreenId>,
}

impl DialogOption {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            key: None,
            target: None,
        }
    }

    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Links the option to another screen of the same template.
    pub fn leads_to(mut self, target: ScreenId) -> Self {
        self.target = Some(target);
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    pub fn target(&self) -> Option<ScreenId> {
        self.target
    }
}
