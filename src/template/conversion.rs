use super::definition::Template;
use crate::error::ValidationError;

/// A trait for storage or wire models that can be converted into a validated [`Template`].
///
/// This is the seam between whatever persistence layer holds conversations and the
/// compiler. Implement it on your own row or document types; the conversion is
/// expected to produce the whole graph at once, with screens and options in their
/// authored order.
///
/// # Example
///
/// ```rust,no_run
/// use convoforge::prelude::*;
///
/// struct Row { id: u64, name: String, text: String }
/// struct Stored { name: String, rows: Vec<Row> }
///
/// impl IntoTemplate for Stored {
///     fn into_template(self) -> std::result::Result<Template, ValidationError> {
///         Template::builder(self.name)
///             .screens(
///                 self.rows
///                     .into_iter()
///                     .map(|r| Screen::new(ScreenId(r.id), r.name, r.text)),
///             )
///             .build()
///     }
/// }
/// ```
pub trait IntoTemplate {
    /// Consumes the object and converts it into a conversation template.
    fn into_template(self) -> Result<Template, ValidationError>;
}

impl IntoTemplate for Template {
    fn into_template(self) -> Result<Template, ValidationError> {
        Ok(self)
    }
}
