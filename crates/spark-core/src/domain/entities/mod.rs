pub mod common;
pub mod project_context;
pub mod render_context;
pub mod template;

pub use crate::domain::DomainError;
pub use project_context::ProjectContext;
pub use render_context::RenderContext;
pub use template::TemplateBundle;
