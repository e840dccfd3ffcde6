//! # convoforge - Conversation Template Compiler
//!
//! **convoforge** turns conversation templates (a dialog tree of screens and the
//! options that link them) into the artifacts a game server consumes: a Lua
//! conversation definition, a Lua handler that branches on quest state, and
//! binary STF string tables for localized text.
//!
//! ## Core Workflow
//!
//! The compiler works on a canonical, validated model of a conversation. The
//! primary workflow is:
//!
//! 1.  **Load Your Data**: Fetch the template from wherever it is stored, e.g. the editor's JSON via [`template::TemplateSchema`].
//! 2.  **Convert to the Model**: Implement [`template::IntoTemplate`] for your own types, or use [`template::TemplateBuilder`] directly. Validation happens here.
//! 3.  **Generate Scripts**: Call [`script::generate_definition_script`] and [`script::generate_handler_script`], or configure a [`script::ScriptEmitter`].
//! 4.  **Encode Strings**: Collect rows with [`stf::conversation_rows`] or [`stf::task_rows`] and encode them with [`stf::encode_localization_table`].
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use convoforge::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let template = Template::builder("vendor")
//!         .screen(
//!             Screen::new(ScreenId(1), "greet", "Need anything?")
//!                 .with_option(DialogOption::new("Show me your wares.").leads_to(ScreenId(2)))
//!                 .with_option(DialogOption::new("No thanks.")),
//!         )
//!         .screen(Screen::new(ScreenId(2), "wares", "Take a look.").terminal(true))
//!         .build()?;
//!
//!     let definition = generate_definition_script(&template)?;
//!     let handler = generate_handler_script(&template)?;
//!     println!("{definition}\n{handler}");
//!
//!     let table = encode_localization_table(&[("s_1", "Hi"), ("s_2", "Bye")])?;
//!     println!("{} bytes of STF", table.len());
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod localization;
pub mod prelude;
pub mod script;
pub mod source;
pub mod stf;
pub mod template;
pub mod workbench;
