use ahash::AHashMap;
use std::fs;
use std::path::PathBuf;

use crate::error::SourceError;
use crate::template::{IntoTemplate, Template, TemplateId, TemplateSchema};

/// Where fully populated templates come from.
///
/// A fetch returns the whole graph (screens and options included) in a single
/// call; generation never goes back to the source mid-way.
pub trait TemplateSource: Send + Sync {
    fn fetch_template_by_id(&self, id: TemplateId) -> Result<Template, SourceError>;
}

/// Keeps templates in memory, keyed by their id.
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    templates: AHashMap<TemplateId, Template>,
}

impl InMemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `template` under its own id, replacing any previous one.
    pub fn insert(&mut self, template: Template) -> Option<Template> {
        self.templates.insert(template.id(), template)
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

impl FromIterator<Template> for InMemorySource {
    fn from_iter<I: IntoIterator<Item = Template>>(iter: I) -> Self {
        Self {
            templates: iter.into_iter().map(|t| (t.id(), t)).collect(),
        }
    }
}

impl TemplateSource for InMemorySource {
    fn fetch_template_by_id(&self, id: TemplateId) -> Result<Template, SourceError> {
        self.templates
            .get(&id)
            .cloned()
            .ok_or(SourceError::NotFound(id))
    }
}

/// Reads templates stored as `{dir}/{id}.json` in the schema format.
#[derive(Debug, Clone)]
pub struct JsonDirSource {
    dir: PathBuf,
}

impl JsonDirSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, id: TemplateId) -> PathBuf {
        self.dir.join(format!("{}.json", id.0))
    }
}

impl TemplateSource for JsonDirSource {
    fn fetch_template_by_id(&self, id: TemplateId) -> Result<Template, SourceError> {
        let path = self.path_for(id);
        let json = match fs::read_to_string(&path) {
            Ok(json) => json,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(SourceError::NotFound(id));
            }
            Err(source) => return Err(SourceError::Io { id, source }),
        };

        let mut schema = TemplateSchema::from_json(&json)?;
        // The file name is authoritative for the id.
        schema.id = Some(id);
        tracing::debug!(path = %path.display(), "template loaded");
        Ok(schema.into_template()?)
    }
}
