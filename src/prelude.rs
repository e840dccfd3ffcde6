//! Prelude module for convenient imports
//!
//! This module re-exports the most commonly used types and functions from the
//! convoforge crate.
//!
//! # Example
//!
//! ```rust,no_run
//! use convoforge::prelude::*;
//!
//! # fn run_example() -> Result<()> {
//! let json = std::fs::read_to_string("path/to/template.json")?;
//! let template = TemplateSchema::from_json(&json)?.into_template()?;
//!
//! let scripts = ScriptEmitter::new(&template).emit()?;
//! println!("{}", scripts.definition);
//! # Ok(())
//! # }
//! ```

// Template model
pub use crate::template::{
    DialogOption, IntoTemplate, QuestTrigger, Screen, ScreenId, Template, TemplateBuilder,
    TemplateId, TemplateSchema,
};

// Generators
pub use crate::script::{
    ConversationScripts, ScriptEmitter, generate_definition_script, generate_handler_script,
};
pub use crate::stf::{LocalizationTable, conversation_rows, encode_localization_table, task_rows};

// Localization mode
pub use crate::localization::{KeyGenerator, KeyReference, SequentialKeys};

// Sources and orchestration
pub use crate::source::{InMemorySource, JsonDirSource, TemplateSource};
pub use crate::workbench::Workbench;

// Error types
pub use crate::error::{
    EncodingError, LocalizationError, SourceError, ValidationError, WorkbenchError,
};

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
