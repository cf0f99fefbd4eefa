use crate::format::prompting::{Phi3Format, PlainFormat, PromptStrategy};
use crate::format::template::PromptTemplate;
use pocket_abi::backend::PromptFlavor;

/// Generic prompt kinds the host knows how to build.
#[derive(Debug, Clone)]
pub enum PromptKind {
    Phi3 {
        system: Option<String>,
        template: PromptTemplate,
    },
    Plain,
}

impl PromptKind {
    /// Best match for a generator's flavor hint. ChatML has no dedicated
    /// strategy yet and falls back to plain text.
    pub fn for_flavor(flavor: PromptFlavor, template: PromptTemplate) -> Self {
        match flavor {
            PromptFlavor::Phi3 => PromptKind::Phi3 {
                system: None,
                template,
            },
            PromptFlavor::ChatMl | PromptFlavor::Plain => PromptKind::Plain,
        }
    }
}

/// Factory: select a prompt strategy from a `PromptKind`.
pub fn select_prompt(kind: PromptKind) -> Box<dyn PromptStrategy> {
    match kind {
        PromptKind::Phi3 { system, template } => {
            Box::new(Phi3Format::with_template(template, system))
        }
        PromptKind::Plain => Box::new(PlainFormat),
    }
}
