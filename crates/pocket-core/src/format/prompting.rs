//! Multi-turn prompt strategies, used when a whole dialog has to be rendered
//! (transcripts, generators that don't keep their own context).

use crate::format::format::FormattedPrompt;
use crate::format::template::PromptTemplate;
use pocket_abi::backend::{ChatTurn, Role};

/// Format a user input or a full dialog into a complete prompt string for the generator.
pub trait PromptStrategy: Send + Sync {
    /// Single-turn helper.
    fn format(&self, user_input: &str) -> String {
        self.format_dialog(&[ChatTurn::user(user_input)], None).text
    }

    /// Multi-turn formatting. If `system` is Some(..), it overrides any embedded system.
    fn format_dialog(&self, turns: &[ChatTurn], system: Option<&str>) -> FormattedPrompt;
}

/// Phi instruction format over a whole dialog.
///
/// System precedence: the `system` argument, then embedded system turns,
/// then the strategy's own system text, then the template's system prompt.
#[derive(Debug, Clone, Default)]
pub struct Phi3Format {
    template: PromptTemplate,
    system: Option<String>,
}

impl Phi3Format {
    pub fn new(system: Option<String>) -> Self {
        Self::with_template(PromptTemplate::phi(), system)
    }

    pub fn with_template(template: PromptTemplate, system: Option<String>) -> Self {
        Self { template, system }
    }

    pub fn stop_sequences(&self) -> Vec<String> {
        [&self.template.system_suffix, &self.template.user_prefix]
            .into_iter()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect()
    }
}

impl PromptStrategy for Phi3Format {
    fn format_dialog(&self, turns: &[ChatTurn], system: Option<&str>) -> FormattedPrompt {
        let t = &self.template;
        let has_embedded = turns.iter().any(|turn| turn.role == Role::System);

        let mut text = String::new();
        match system {
            Some(sys) => text.push_str(&t.system_block(sys)),
            None if !has_embedded => {
                let sys = self.system.as_deref().unwrap_or(&t.system_prompt);
                text.push_str(&t.system_block(sys));
            }
            None => {}
        }

        for turn in turns {
            match turn.role {
                Role::System => {
                    if system.is_none() {
                        text.push_str(&t.system_block(&turn.content));
                    }
                }
                Role::User => {
                    text.push_str(&t.user_prefix);
                    text.push_str(&turn.content);
                    text.push_str(&t.end_marker);
                }
                Role::Assistant => {
                    text.push_str(&t.assistant_header);
                    text.push_str(&turn.content);
                    text.push_str(&t.end_marker);
                }
            }
        }

        if !matches!(turns.last().map(|turn| turn.role), Some(Role::Assistant)) {
            text.push_str(&t.assistant_header);
        }

        FormattedPrompt::new(text).with_stops(self.stop_sequences())
    }
}

/// No role tags at all: system text, then each turn on its own line.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainFormat;

impl PromptStrategy for PlainFormat {
    fn format_dialog(&self, turns: &[ChatTurn], system: Option<&str>) -> FormattedPrompt {
        let mut lines: Vec<&str> = Vec::with_capacity(turns.len() + 1);
        if let Some(sys) = system {
            lines.push(sys);
        }
        lines.extend(
            turns
                .iter()
                .filter(|turn| system.is_none() || turn.role != Role::System)
                .map(|turn| turn.content.as_str()),
        );
        let mut prompt = FormattedPrompt::new(lines.join("\n"));
        prompt.add_space_prefix = false;
        prompt
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::template::SYSTEM_PREAMBLE;

    #[test]
    fn single_user_equals_first_turn() {
        let f = Phi3Format::new(None);
        assert_eq!(
            f.format("Hello"),
            PromptTemplate::phi().render_turn("Hello", true)
        );
    }

    #[test]
    fn renders_history_and_opens_assistant() {
        let f = Phi3Format::new(None);
        let turns = [
            ChatTurn::user("Hi"),
            ChatTurn::assistant("Hello!"),
            ChatTurn::user("Bye"),
        ];
        let out = f.format_dialog(&turns, None);
        assert_eq!(
            out.text,
            format!(
                "{SYSTEM_PREAMBLE}<|user|>Hi\n<|end|>\n<|assistant|>\nHello!\n<|end|>\n<|user|>Bye\n<|end|>\n<|assistant|>\n"
            )
        );
        assert_eq!(out.stop_sequences, vec!["<|end|>", "<|user|>"]);
    }

    #[test]
    fn trailing_assistant_turn_is_closed_not_reopened() {
        let f = Phi3Format::new(None);
        let out = f.format_dialog(&[ChatTurn::user("a"), ChatTurn::assistant("b")], None);
        assert!(out.text.ends_with("<|assistant|>\nb\n<|end|>\n"));
    }

    #[test]
    fn system_argument_overrides_embedded() {
        let f = Phi3Format::new(Some("ignored".into()));
        let turns = [ChatTurn::system("embedded"), ChatTurn::user("q")];
        let out = f.format_dialog(&turns, Some("override"));
        assert!(out.text.starts_with("<|system|>\noverride<|end|>\n<|user|>q"));
        assert!(!out.text.contains("embedded"));
        assert!(!out.text.contains("ignored"));
    }

    #[test]
    fn embedded_system_beats_strategy_default() {
        let f = Phi3Format::new(Some("default".into()));
        let out = f.format_dialog(&[ChatTurn::system("embedded"), ChatTurn::user("q")], None);
        assert!(out.text.starts_with("<|system|>\nembedded<|end|>\n"));
        assert!(!out.text.contains("default"));
    }

    #[test]
    fn strategy_system_replaces_template_prompt() {
        let f = Phi3Format::new(Some("Be kind.".into()));
        assert!(f.format("q").starts_with("<|system|>\nBe kind.<|end|>\n"));
    }

    #[test]
    fn plain_joins_lines() {
        let out = PlainFormat.format_dialog(
            &[ChatTurn::system("s"), ChatTurn::user("u"), ChatTurn::assistant("a")],
            None,
        );
        assert_eq!(out.text, "s\nu\na");
        assert!(out.stop_sequences.is_empty());
        assert_eq!(PlainFormat.format("hi"), "hi");
    }
}
