//! Line-based composer: reads commands, drives the session, re-renders on
//! every session change.

use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;

use iris_ai::{IgnoreReason, Session, SubmitOutcome};
use iris_common::IrisError;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::task::{JoinError, JoinHandle};
use tracing::{debug, warn};

use crate::attachment::load_image;
use crate::render::Renderer;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Command {
    /// Replace the draft text and send it.
    Send(String),
    /// Send the draft as it stands.
    SendDraft,
    Attach(PathBuf),
    Detach,
    /// `None` lists the suggestions; `Some(n)` applies the 1-based `n`th.
    Suggest(Option<usize>),
    ClearBanner,
    Help,
    Quit,
    Unknown(String),
}

impl Command {
    pub(crate) fn parse(line: &str) -> Self {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return Command::SendDraft;
        }
        let Some(rest) = trimmed.strip_prefix('/') else {
            return Command::Send(line.to_string());
        };

        let (name, arg) = match rest.split_once(char::is_whitespace) {
            Some((name, arg)) => (name, arg.trim()),
            None => (rest, ""),
        };
        match name {
            "attach" if !arg.is_empty() => Command::Attach(PathBuf::from(arg)),
            "detach" => Command::Detach,
            "suggest" => Command::Suggest(arg.parse().ok()),
            "send" => Command::SendDraft,
            "banner" => Command::ClearBanner,
            "help" | "?" => Command::Help,
            "quit" | "exit" | "q" => Command::Quit,
            _ => Command::Unknown(trimmed.to_string()),
        }
    }

    /// Commands that only read or leave, and so are fine mid-request.
    fn allowed_in_flight(&self) -> bool {
        matches!(self, Command::Help | Command::Quit | Command::Suggest(None))
    }
}

enum Flow {
    Continue,
    Submitted(JoinHandle<SubmitOutcome>),
    Quit,
}

pub(crate) struct Composer<W: Write> {
    session: Arc<Session>,
    renderer: Renderer<W>,
    max_image_bytes: u64,
    thinking_shown: bool,
}

impl<W: Write> Composer<W> {
    pub(crate) fn new(session: Arc<Session>, out: W, max_image_bytes: u64) -> Self {
        Self {
            session,
            renderer: Renderer::new(out),
            max_image_bytes,
            thinking_shown: false,
        }
    }

    pub(crate) fn greet(&mut self, model: &str, configured: bool) -> io::Result<()> {
        self.renderer.greeting(model, configured)
    }

    /// Read commands until `/quit` or end of input. At end of input an
    /// in-flight submission is allowed to settle first; `/quit` abandons it.
    pub(crate) async fn run(&mut self, input: impl AsyncBufRead + Unpin) -> Result<(), IrisError> {
        let mut lines = input.lines();
        let mut updates = self.session.subscribe();
        let mut pending: Option<JoinHandle<SubmitOutcome>> = None;

        loop {
            tokio::select! {
                line = lines.next_line() => {
                    let Some(line) = line? else { break };
                    let busy = pending.as_ref().is_some_and(|task| !task.is_finished());
                    match self.handle(Command::parse(&line), busy).await? {
                        Flow::Continue => {}
                        Flow::Submitted(task) => {
                            if let Some(done) = pending.replace(task) {
                                let joined = done.await;
                                self.finish(joined)?;
                            }
                        }
                        Flow::Quit => {
                            if let Some(task) = pending.take() {
                                task.abort();
                            }
                            return Ok(());
                        }
                    }
                }
                Ok(()) = updates.changed() => self.refresh()?,
                joined = settled(&mut pending) => {
                    pending = None;
                    self.finish(joined)?;
                }
            }
        }

        if let Some(task) = pending.take() {
            let joined = task.await;
            self.finish(joined)?;
        }
        self.refresh()?;
        Ok(())
    }

    async fn handle(&mut self, command: Command, busy: bool) -> Result<Flow, IrisError> {
        if (busy || self.session.is_thinking()) && !command.allowed_in_flight() {
            self.renderer.notice("waiting for response…")?;
            return Ok(Flow::Continue);
        }

        match command {
            Command::Send(text) => {
                self.session.update_draft_text(text);
                return Ok(self.submit());
            }
            Command::SendDraft => return Ok(self.submit()),
            Command::Attach(path) => match load_image(&path, self.max_image_bytes).await {
                Ok((bytes, mime)) => {
                    let size = bytes.len();
                    if self.session.attach_image(bytes, mime) {
                        self.renderer.notice(format!(
                            "attached {} ({mime}, {size} bytes)",
                            path.display()
                        ))?;
                    } else {
                        self.renderer.notice("waiting for response…")?;
                    }
                }
                Err(e) => {
                    warn!("attach failed: {e}");
                    self.renderer.notice(e)?;
                }
            },
            Command::Detach => {
                if self.session.has_attachment() {
                    self.session.remove_attached_image();
                    self.renderer.notice("attachment removed")?;
                } else {
                    self.renderer.notice("nothing attached")?;
                }
            }
            Command::Suggest(None) => self.renderer.suggestions()?,
            Command::Suggest(Some(n)) => {
                if n >= 1 && self.session.apply_suggestion(n - 1) {
                    self.renderer.notice(format!(
                        "draft: {} (press enter or /send)",
                        self.session.draft_text()
                    ))?;
                } else {
                    self.renderer.notice("no such suggestion; /suggest lists them")?;
                }
            }
            Command::ClearBanner => self.session.clear_banner(),
            Command::Help => self.renderer.help()?,
            Command::Quit => return Ok(Flow::Quit),
            Command::Unknown(input) => {
                self.renderer
                    .notice(format!("unknown command {input}; /help lists commands"))?;
            }
        }
        Ok(Flow::Continue)
    }

    fn submit(&self) -> Flow {
        let session = Arc::clone(&self.session);
        Flow::Submitted(tokio::spawn(async move { session.submit().await }))
    }

    fn finish(&mut self, joined: Result<SubmitOutcome, JoinError>) -> io::Result<()> {
        match joined {
            Ok(SubmitOutcome::Ignored(IgnoreReason::EmptyDraft)) => {
                self.renderer.notice("nothing to send")?;
            }
            Ok(outcome) => debug!(?outcome, "submission finished"),
            Err(e) => warn!("submission task failed: {e}"),
        }
        self.refresh()
    }

    fn refresh(&mut self) -> io::Result<()> {
        self.renderer.sync(&self.session)?;
        let thinking = self.session.is_thinking();
        if thinking && !self.thinking_shown {
            self.renderer.thinking()?;
        }
        self.thinking_shown = thinking;
        Ok(())
    }

    #[cfg(test)]
    fn into_output(self) -> W {
        self.renderer.into_inner()
    }
}

/// Resolves when the pending submission task does; never, if there is none.
async fn settled(
    pending: &mut Option<JoinHandle<SubmitOutcome>>,
) -> Result<SubmitOutcome, JoinError> {
    match pending {
        Some(task) => task.await,
        None => std::future::pending().await,
    }
}
