pub mod builder;
pub mod conversion;
pub mod definition;
pub mod schema;

pub use builder::*;
pub use conversion::*;
pub use definition::*;
pub use schema::*;
