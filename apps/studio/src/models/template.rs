use serde::{Deserialize, Serialize};

/// A visual layout offered by the resume service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateDescriptor {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub popular: bool,
}

const BUILTIN: &[(&str, &str, &str, bool)] = &[
    (
        "modern",
        "Modern Professional",
        "Clean and contemporary design perfect for tech and creative roles.",
        true,
    ),
    (
        "classic",
        "Classic Executive",
        "Traditional layout ideal for corporate and formal positions.",
        false,
    ),
    (
        "elegant",
        "Elegant Minimalist",
        "Sophisticated simplicity that lets your experience shine.",
        true,
    ),
    (
        "compact",
        "Compact One-Page",
        "Efficiently organize all your information on a single page.",
        false,
    ),
    (
        "creative",
        "Creative Designer",
        "Bold and artistic layout for creative professionals.",
        true,
    ),
    (
        "technical",
        "Technical Expert",
        "Structured format highlighting technical skills and projects.",
        false,
    ),
    (
        "startup",
        "Startup Innovator",
        "Dynamic design for entrepreneurs and startup enthusiasts.",
        false,
    ),
    (
        "academic",
        "Academic Scholar",
        "Comprehensive layout for researchers and academics.",
        false,
    ),
];

/// An ordered list of templates, either fetched remotely or the built-in set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TemplateCatalog {
    templates: Vec<TemplateDescriptor>,
}

impl TemplateCatalog {
    pub fn new(templates: Vec<TemplateDescriptor>) -> Self {
        Self { templates }
    }

    /// The eight layouts shipped with the client.
    pub fn builtin() -> Self {
        Self::new(
            BUILTIN
                .iter()
                .map(|&(id, name, description, popular)| TemplateDescriptor {
                    id: id.to_string(),
                    name: name.to_string(),
                    description: description.to_string(),
                    popular,
                })
                .collect(),
        )
    }

    pub fn get(&self, id: &str) -> Option<&TemplateDescriptor> {
        self.templates.iter().find(|t| t.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TemplateDescriptor> {
        self.templates.iter()
    }

    pub fn popular(&self) -> impl Iterator<Item = &TemplateDescriptor> {
        self.templates.iter().filter(|t| t.popular)
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}
