pub mod resume;
pub mod step;
pub mod template;
pub mod user;

pub use resume::{Education, Experience, PersonalInfo, Project, ResumeDocument, Skills};
pub use step::Step;
pub use template::{TemplateCatalog, TemplateDescriptor};
pub use user::Identity;
