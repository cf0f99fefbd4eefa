//! Stand-in generator for inspecting prompts without a model on hand.

use pocket_abi::backend::TextGenerator;
use pocket_core::PromptTemplate;

/// Replies with the user text of the newest turn in each prompt.
pub struct EchoGenerator {
    template: PromptTemplate,
    last_prompt: Option<String>,
}

impl EchoGenerator {
    pub fn new(template: PromptTemplate) -> Self {
        Self {
            template,
            last_prompt: None,
        }
    }

    /// Exact text of the most recent prompt received.
    pub fn last_prompt(&self) -> Option<&str> {
        self.last_prompt.as_deref()
    }

    fn last_user_text<'a>(&self, prompt: &'a str) -> &'a str {
        let t = &self.template;
        let Some(start) = prompt.rfind(t.user_prefix.as_str()) else {
            return "";
        };
        let body = &prompt[start + t.user_prefix.len()..];
        match body.rfind(t.end_marker.as_str()) {
            Some(end) => &body[..end],
            None => body,
        }
    }
}

impl TextGenerator for EchoGenerator {
    fn generate(
        &mut self,
        prompt: &str,
        on_delta: &mut dyn FnMut(&str),
    ) -> Result<String, String> {
        let reply = format!("echo: {}", self.last_user_text(prompt));
        self.last_prompt = Some(prompt.to_string());
        on_delta(&reply);
        Ok(reply)
    }

    fn reset(&mut self) {
        self.last_prompt = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn echoes_newest_user_turn() {
        let t = PromptTemplate::phi();
        let mut g = EchoGenerator::new(t.clone());
        let prompt = t.render_turn("ping", true);
        assert_eq!(g.generate(&prompt, &mut |_: &str| {}).unwrap(), "echo: ping");
        assert_eq!(g.last_prompt(), Some(prompt.as_str()));
    }

    #[test]
    fn prompt_without_user_tag_echoes_nothing() {
        let mut g = EchoGenerator::new(PromptTemplate::phi());
        assert_eq!(g.generate("raw", &mut |_: &str| {}).unwrap(), "echo: ");
    }
}
