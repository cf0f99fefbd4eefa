//! Pocketchat command line.
//!
//! ```sh
//! # Tag each stdin line as one turn of a single session
//! printf 'Hello\nHow are you?\n' | pocketchat prompt
//!
//! # Wordpiece tokens (or ids) for the embedding encoder
//! pocketchat tokenize --vocab vocab.txt --ids "The cats sat."
//!
//! # Copy a bundled asset tree into the data root
//! pocketchat install-assets --from ./bundle
//! ```

mod echo;

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use pocket_core::assets::ModelAssets;
use pocket_core::embeddings::tokenization::{FullTokenizer, Vocab};
use pocket_core::{ChatConfig, ChatSession, PromptHandler, paths};
use tracing::info;

use crate::echo::EchoGenerator;

#[derive(Parser)]
#[command(name = "pocketchat", version, about = "On-device chat prompt tooling")]
struct Cli {
    /// Config file. Defaults to <data root>/config.json.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Read stdin line by line and print each as a tagged prompt of one session.
    Prompt,
    /// Split text into embedding wordpieces.
    Tokenize {
        /// vocab.txt, one token per line. Falls back to the configured path.
        #[arg(long)]
        vocab: Option<PathBuf>,
        /// Keep case instead of lowercasing.
        #[arg(long)]
        no_lowercase: bool,
        /// Print token ids instead of pieces.
        #[arg(long)]
        ids: bool,
        text: String,
    },
    /// Copy a bundle's `models/` and `htp_config/` into the data root.
    InstallAssets {
        #[arg(long)]
        from: PathBuf,
        /// Destination root. Defaults to the data root.
        #[arg(long)]
        to: Option<PathBuf>,
    },
    /// Interactive loop over an echo generator, showing every prompt sent.
    Chat,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .init();

    let cli = Cli::parse();
    let config_path = cli.config.unwrap_or_else(paths::config_path);
    let config = ChatConfig::load_or_default(&config_path)
        .with_context(|| format!("load config {}", config_path.display()))?;

    match cli.command {
        Command::Prompt => run_prompt(&config),
        Command::Tokenize {
            vocab,
            no_lowercase,
            ids,
            text,
        } => run_tokenize(&config, vocab, no_lowercase, ids, &text),
        Command::InstallAssets { from, to } => {
            run_install(&config, &from, &to.unwrap_or_else(paths::pocket_home))
        }
        Command::Chat => run_chat(&config),
    }
}

fn run_prompt(config: &ChatConfig) -> Result<()> {
    let handler = PromptHandler::with_template(config.template.clone());
    let stdin = io::stdin();
    let mut out = io::stdout().lock();
    for line in stdin.lock().lines() {
        let line = line.context("read stdin")?;
        out.write_all(handler.format(&line).as_bytes())?;
    }
    out.flush()?;
    Ok(())
}

fn run_tokenize(
    config: &ChatConfig,
    vocab: Option<PathBuf>,
    no_lowercase: bool,
    ids: bool,
    text: &str,
) -> Result<()> {
    let mut tok_cfg = config.tokenizer.clone();
    if let Some(v) = vocab {
        tok_cfg.vocab_path = Some(v);
    }
    if no_lowercase {
        tok_cfg.lowercase = false;
    }
    let vocab_path = tok_cfg
        .vocab_path
        .clone()
        .context("no vocab given; pass --vocab or set tokenizer.vocab_path")?;
    let vocab = Vocab::load(&vocab_path)?;
    let tokenizer = FullTokenizer::new(vocab, &tok_cfg);

    let line = if ids {
        tokenizer
            .encode(text)?
            .into_iter()
            .map(|t| i32::from(t).to_string())
            .collect::<Vec<_>>()
            .join(" ")
    } else {
        tokenizer.tokenize(text).join(" ")
    };
    println!("{line}");
    Ok(())
}

fn run_install(config: &ChatConfig, bundle: &Path, root: &Path) -> Result<()> {
    let assets = ModelAssets::from_config(root, config);
    let report = assets
        .install(bundle)
        .with_context(|| format!("install {} → {}", bundle.display(), root.display()))?;
    assets.verify()?;
    println!(
        "Installed {} file(s), {} already present → {}",
        report.copied,
        report.skipped,
        root.display()
    );
    Ok(())
}

fn run_chat(config: &ChatConfig) -> Result<()> {
    let mut session =
        ChatSession::from_config(EchoGenerator::new(config.template.clone()), config);
    info!("chat started; /reset, /transcript, /quit");

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("> ");
        io::stdout().flush()?;
        let Some(line) = lines.next() else {
            break;
        };
        let line = line.context("read stdin")?;
        match line.trim() {
            "/quit" => break,
            "/reset" => {
                session.reset();
                println!("(new session)");
                continue;
            }
            "/transcript" => {
                print!("{}", session.render_transcript().text);
                continue;
            }
            _ => {}
        }

        let reply = session.send(&line)?;
        if let Some(prompt) = session.generator().last_prompt() {
            println!("--- prompt ---\n{prompt}--- reply ---");
        }
        println!("{reply}");
    }
    Ok(())
}
