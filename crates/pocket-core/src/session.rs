//! Chat session: one conversation against a text generator.

use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use pocket_abi::backend::{ChatTurn, PromptFlavor, TextGenerator};
use tracing::{debug, warn};

use crate::config::ChatConfig;
use crate::errors::{ChatError, Result};
use crate::format::{FormattedPrompt, PromptHandler, PromptKind, PromptTemplate, select_prompt};
use crate::memory::SessionMemory;

/// Session = {generator} + {per-session prompt handler} + {transcript}.
///
/// The generator keeps its own context, so each `send` hands it only the
/// newest turn. The handler makes sure the preamble rides on the first one.
pub struct ChatSession<G: TextGenerator> {
    generator: G,
    template: PromptTemplate,
    handler: PromptHandler,
    memory: SessionMemory,
    max_history: Option<usize>,
    stop_flag: Arc<AtomicBool>,
}

impl<G: TextGenerator> ChatSession<G> {
    pub fn new(generator: G) -> Self {
        Self::with_template(generator, PromptTemplate::phi())
    }

    pub fn with_template(generator: G, template: PromptTemplate) -> Self {
        if generator.prompt_flavor() != PromptFlavor::Phi3 {
            warn!(
                flavor = ?generator.prompt_flavor(),
                "generator does not advertise the Phi format; prompts may be misread"
            );
        }
        Self {
            generator,
            handler: PromptHandler::with_template(template.clone()),
            template,
            memory: SessionMemory::new(),
            max_history: None,
            stop_flag: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn from_config(generator: G, config: &ChatConfig) -> Self {
        let mut s = Self::with_template(generator, config.template.clone());
        s.max_history = config.max_history;
        s
    }

    /// Cap the transcript at `pairs` (user, assistant) pairs. `None` keeps everything.
    pub fn set_max_history(&mut self, pairs: Option<usize>) {
        self.max_history = pairs;
        self.enforce_history();
    }

    /// Handle you can keep and flip to cut a streaming reply short (`store(true)`).
    pub fn stop_handle(&self) -> Arc<AtomicBool> {
        self.stop_flag.clone()
    }

    /// True until the first prompt of this session has been sent.
    pub fn is_first_turn(&self) -> bool {
        self.handler.is_first_turn()
    }

    pub fn transcript(&self) -> &[ChatTurn] {
        self.memory.turns()
    }

    /// Whole dialog so far, in the format the generator advertises.
    pub fn render_transcript(&self) -> FormattedPrompt {
        let kind = PromptKind::for_flavor(self.generator.prompt_flavor(), self.template.clone());
        select_prompt(kind).format_dialog(self.memory.turns(), None)
    }

    pub fn generator(&self) -> &G {
        &self.generator
    }

    /// Start a new logical conversation on the same generator.
    pub fn reset(&mut self) {
        self.memory.clear();
        self.generator.reset();
        self.handler = PromptHandler::with_template(self.template.clone());
        debug!("session reset");
    }

    /// Send one user turn and wait for the whole reply.
    pub fn send(&mut self, user_text: &str) -> Result<String> {
        self.send_stream(user_text, |_| {})
    }

    /// Send one user turn, forwarding reply deltas as they arrive.
    ///
    /// Once the stop flag is raised no further deltas are forwarded and the
    /// text received so far becomes the reply.
    pub fn send_stream<F>(&mut self, user_text: &str, mut on_delta: F) -> Result<String>
    where
        F: FnMut(&str),
    {
        self.stop_flag.store(false, Ordering::Relaxed);

        let prompt = self.handler.format(user_text);
        debug!(prompt_len = prompt.len(), "sending prompt");

        let stop = Arc::clone(&self.stop_flag);
        let mut received = String::new();
        let mut stopped = false;
        let full = self
            .generator
            .generate(&prompt, &mut |delta: &str| {
                if stopped || stop.load(Ordering::Relaxed) {
                    stopped = true;
                    return;
                }
                received.push_str(delta);
                on_delta(delta);
            })
            .map_err(ChatError::Generator)?;

        let reply = if stopped {
            debug!(kept = received.len(), "stop requested; truncating reply");
            received
        } else {
            full
        };
        let reply = reply.trim().to_string();

        self.memory.push_user(user_text);
        self.memory.push_assistant(reply.clone());
        self.enforce_history();
        Ok(reply)
    }

    fn enforce_history(&mut self) {
        let Some(pairs) = self.max_history else {
            return;
        };
        while self.memory.dialog_len() > pairs * 2 {
            if !self.memory.drop_oldest_pair() {
                break;
            }
        }
    }
}
