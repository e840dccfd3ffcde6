use crate::error::WorkbenchError;
use crate::script::{ConversationScripts, ScriptEmitter};
use crate::source::TemplateSource;
use crate::stf::{LocalizationTable, conversation_rows, task_rows};
use crate::template::{Template, TemplateId};

/// Fetches templates from a source and runs the generators on them.
///
/// Each call performs one fetch and then works on that snapshot only. The
/// workbench holds no state besides the source, so it can be shared across
/// threads whenever the source can.
pub struct Workbench<S: TemplateSource> {
    source: S,
    probe_prefix: Option<String>,
}

impl<S: TemplateSource> Workbench<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            probe_prefix: None,
        }
    }

    /// Uses `prefix` instead of the default to recognise quest probes.
    pub fn with_probe_prefix(mut self, prefix: &str) -> Self {
        self.probe_prefix = Some(prefix.to_string());
        self
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn fetch(&self, id: TemplateId) -> Result<Template, WorkbenchError> {
        let template = self.source.fetch_template_by_id(id)?;
        tracing::info!(template = %template.name(), %id, "template fetched");
        Ok(template)
    }

    pub fn definition_script(&self, id: TemplateId) -> Result<String, WorkbenchError> {
        let template = self.fetch(id)?;
        Ok(self.emitter(&template).definition()?)
    }

    pub fn handler_script(&self, id: TemplateId) -> Result<String, WorkbenchError> {
        let template = self.fetch(id)?;
        Ok(self.emitter(&template).handler()?)
    }

    pub fn scripts(&self, id: TemplateId) -> Result<ConversationScripts, WorkbenchError> {
        let template = self.fetch(id)?;
        Ok(self.emitter(&template).emit()?)
    }

    /// The conversation's strings as STF bytes. The template must be localized.
    pub fn string_table(&self, id: TemplateId) -> Result<Vec<u8>, WorkbenchError> {
        let template = self.fetch(id)?;
        let table = LocalizationTable::from_rows(conversation_rows(&template)?);
        Ok(table.encode()?)
    }

    /// The quest journal strings of the conversation's task screens as STF bytes.
    pub fn task_table(&self, id: TemplateId) -> Result<Vec<u8>, WorkbenchError> {
        let template = self.fetch(id)?;
        let table = LocalizationTable::from_rows(task_rows(&template));
        Ok(table.encode()?)
    }

    fn emitter<'t>(&self, template: &'t Template) -> ScriptEmitter<'t> {
        let builder = ScriptEmitter::builder(template);
        match &self.probe_prefix {
            Some(prefix) => builder.with_probe_prefix(prefix).build(),
            None => builder.build(),
        }
    }
}
