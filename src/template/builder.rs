use super::definition::{DEFAULT_KEY_PREFIX, Screen, ScreenId, Template, TemplateId, validate_parts};
use crate::error::ValidationError;

/// Assembles a [`Template`] and validates it on [`build`](Self::build).
#[derive(Debug, Clone)]
pub struct TemplateBuilder {
    id: TemplateId,
    name: String,
    localized: bool,
    key_prefix: String,
    initial_screen: Option<ScreenId>,
    screens: Vec<Screen>,
}

impl TemplateBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: TemplateId(0),
            name: name.into(),
            localized: false,
            key_prefix: DEFAULT_KEY_PREFIX.to_string(),
            initial_screen: None,
            screens: Vec::new(),
        }
    }

    pub fn id(mut self, id: TemplateId) -> Self {
        self.id = id;
        self
    }

    pub fn localized(mut self, localized: bool) -> Self {
        self.localized = localized;
        self
    }

    pub fn key_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.key_prefix = prefix.into();
        self
    }

    pub fn initial_screen(mut self, id: ScreenId) -> Self {
        self.initial_screen = Some(id);
        self
    }

    pub fn screen(mut self, screen: Screen) -> Self {
        self.screens.push(screen);
        self
    }

    pub fn screens(mut self, screens: impl IntoIterator<Item = Screen>) -> Self {
        self.screens.extend(screens);
        self
    }

    pub fn build(self) -> Result<Template, ValidationError> {
        let index = validate_parts(&self.name, &self.screens)?;
        tracing::debug!(
            template = %self.name,
            screens = self.screens.len(),
            "template validated"
        );
        Ok(Template {
            id: self.id,
            name: self.name,
            localized: self.localized,
            key_prefix: self.key_prefix,
            initial_screen: self.initial_screen,
            screens: self.screens,
            index,
        })
    }
}

impl From<&Template> for TemplateBuilder {
    fn from(template: &Template) -> Self {
        Self {
            id: template.id,
            name: template.name.clone(),
            localized: template.localized,
            key_prefix: template.key_prefix.clone(),
            initial_screen: template.initial_screen,
            screens: template.screens.clone(),
        }
    }
}
