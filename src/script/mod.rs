//! Lua script generation for conversation templates.
//!
//! A template compiles into two documents: the conversation *definition*, which
//! declares every screen and its options, and the *handler*, which picks the
//! entry screen from quest state and applies quest side effects when a screen
//! is shown.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::ValidationError;
use crate::template::Template;

mod definition;
mod handler;

/// Trigger actions with this prefix only read quest state.
pub const DEFAULT_PROBE_PREFIX: &str = "has";

/// Module the handler loads its quest manager from.
pub const DEFAULT_QUEST_MODULE: &str = "managers.quest.quest_manager";

/// Generates the conversation definition script with default settings.
pub fn generate_definition_script(template: &Template) -> Result<String, ValidationError> {
    ScriptEmitter::new(template).definition()
}

/// Generates the conversation handler script with default settings.
pub fn generate_handler_script(template: &Template) -> Result<String, ValidationError> {
    ScriptEmitter::new(template).handler()
}

/// The pair of scripts generated for one template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversationScripts {
    pub template_name: String,
    pub definition: String,
    pub handler: String,
}

impl ConversationScripts {
    pub fn definition_file_name(&self) -> String {
        format!("{}_conv.lua", self.template_name)
    }

    pub fn handler_file_name(&self) -> String {
        format!("{}_conv_handler.lua", self.template_name)
    }

    /// Writes both scripts into `dir`, returning the paths written.
    pub fn save_to_dir(&self, dir: &Path) -> io::Result<(PathBuf, PathBuf)> {
        fs::create_dir_all(dir)?;
        let definition_path = dir.join(self.definition_file_name());
        let handler_path = dir.join(self.handler_file_name());
        fs::write(&definition_path, &self.definition)?;
        fs::write(&handler_path, &self.handler)?;
        Ok((definition_path, handler_path))
    }
}

#[derive(Debug, Clone)]
struct EmitterOptions {
    probe_prefix: String,
    quest_module: String,
}

impl Default for EmitterOptions {
    fn default() -> Self {
        Self {
            probe_prefix: DEFAULT_PROBE_PREFIX.to_string(),
            quest_module: DEFAULT_QUEST_MODULE.to_string(),
        }
    }
}

/// Emits the Lua scripts for a single template.
///
/// The emitter borrows the template and never mutates it; every call produces
/// the complete document or an error, never partial output.
pub struct ScriptEmitter<'a> {
    template: &'a Template,
    options: EmitterOptions,
}

pub struct ScriptEmitterBuilder<'a> {
    template: &'a Template,
    options: EmitterOptions,
}

impl<'a> ScriptEmitterBuilder<'a> {
    pub fn new(template: &'a Template) -> Self {
        Self {
            template,
            options: EmitterOptions::default(),
        }
    }

    /// Overrides the prefix that marks read-only quest checks.
    pub fn with_probe_prefix(mut self, prefix: &str) -> Self {
        self.options.probe_prefix = prefix.to_string();
        self
    }

    pub fn with_quest_module(mut self, module: &str) -> Self {
        self.options.quest_module = module.to_string();
        self
    }

    pub fn build(self) -> ScriptEmitter<'a> {
        ScriptEmitter {
            template: self.template,
            options: self.options,
        }
    }
}

impl<'a> ScriptEmitter<'a> {
    pub fn new(template: &'a Template) -> Self {
        ScriptEmitterBuilder::new(template).build()
    }

    pub fn builder(template: &'a Template) -> ScriptEmitterBuilder<'a> {
        ScriptEmitterBuilder::new(template)
    }

    pub fn definition(&self) -> Result<String, ValidationError> {
        self.template.validate()?;
        let script = definition::emit_definition(self.template);
        tracing::debug!(
            template = %self.template.name(),
            bytes = script.len(),
            "definition script emitted"
        );
        Ok(script)
    }

    pub fn handler(&self) -> Result<String, ValidationError> {
        self.template.validate()?;
        let script = handler::emit_handler(
            self.template,
            &self.options.probe_prefix,
            &self.options.quest_module,
        );
        tracing::debug!(
            template = %self.template.name(),
            bytes = script.len(),
            "handler script emitted"
        );
        Ok(script)
    }

    pub fn emit(&self) -> Result<ConversationScripts, ValidationError> {
        Ok(ConversationScripts {
            template_name: self.template.name().to_string(),
            definition: self.definition()?,
            handler: self.handler()?,
        })
    }
}

/// Quotes `text` as a Lua string literal.
pub(crate) fn lua_string(text: &str) -> String {
    let mut quoted = String::with_capacity(text.len() + 2);
    quoted.push('"');
    for c in text.chars() {
        match c {
            '\\' => quoted.push_str("\\\\"),
            '"' => quoted.push_str("\\\""),
            '\n' => quoted.push_str("\\n"),
            '\r' => quoted.push_str("\\r"),
            other => quoted.push(other),
        }
    }
    quoted.push('"');
    quoted
}

/// Flattens `text` so it fits in a single-line Lua comment.
pub(crate) fn lua_comment(text: &str) -> String {
    text.replace("\r\n", " ").replace(['\n', '\r'], " ")
}
