//! Terminal rendering of the transcript and composer state.

use std::io::{self, Write};

use iris_ai::{ImageData, Message, MessagePart, Role, Session, SUGGESTIONS};

/// One transcript entry as terminal text. `resolve` looks up image references.
pub(crate) fn format_message(
    message: &Message,
    resolve: impl Fn(&str) -> Option<ImageData>,
) -> String {
    let prefix = match message.role() {
        Role::User => "you>",
        Role::Model => "iris>",
        Role::System => "!!",
    };
    let time = message
        .timestamp()
        .with_timezone(&chrono::Local)
        .format("%H:%M");

    let body: Vec<String> = message
        .parts()
        .iter()
        .map(|part| match part {
            MessagePart::Text { text } => text.clone(),
            MessagePart::Image { image_ref } => match resolve(image_ref) {
                Some(image) => format!("[image {}, {} bytes]", image.mime_type(), image.len()),
                None => "[image unavailable]".to_string(),
            },
        })
        .collect();

    format!("[{time}] {prefix} {}", body.join("\n"))
}

/// Writes transcript entries as they are appended, plus transient status.
pub(crate) struct Renderer<W: Write> {
    out: W,
    rendered: usize,
    shown_banner: Option<String>,
}

impl<W: Write> Renderer<W> {
    pub(crate) fn new(out: W) -> Self {
        Self {
            out,
            rendered: 0,
            shown_banner: None,
        }
    }

    pub(crate) fn greeting(&mut self, model: &str, configured: bool) -> io::Result<()> {
        writeln!(self.out, "Iris: multimodal chat ({model})")?;
        if !configured {
            writeln!(
                self.out,
                "!! No API key found; every message will fail until one is set."
            )?;
        }
        writeln!(
            self.out,
            "Type a message, /attach <image>, or /help. Try a suggestion:"
        )?;
        self.suggestions()
    }

    pub(crate) fn suggestions(&mut self) -> io::Result<()> {
        for (i, suggestion) in SUGGESTIONS.iter().enumerate() {
            writeln!(self.out, "  /suggest {}  {suggestion}", i + 1)?;
        }
        self.out.flush()
    }

    pub(crate) fn help(&mut self) -> io::Result<()> {
        writeln!(
            self.out,
            "  <text>            send text (with the attached image, if any)\n  \
             (empty line)      send the current draft, e.g. an attached image alone\n  \
             /attach <path>    attach an image (png, jpeg, webp, gif, heic, heif)\n  \
             /detach           remove the attached image\n  \
             /suggest [n]      list suggestions or put suggestion n in the draft\n  \
             /send             send the current draft\n  \
             /banner           dismiss the last error\n  \
             /quit             exit"
        )?;
        self.out.flush()
    }

    /// Print everything appended since the last call, then the banner if it
    /// changed.
    pub(crate) fn sync(&mut self, session: &Session) -> io::Result<()> {
        for message in session.messages_since(self.rendered) {
            let line = format_message(&message, |r| session.resolve_image(r));
            writeln!(self.out, "{line}")?;
            self.rendered += 1;
        }

        let banner = session.banner();
        if banner != self.shown_banner {
            if let Some(detail) = &banner {
                writeln!(self.out, "   (last error: {detail}; /banner to dismiss)")?;
            }
            self.shown_banner = banner;
        }
        self.out.flush()
    }

    pub(crate) fn thinking(&mut self) -> io::Result<()> {
        writeln!(self.out, "   iris is thinking…")?;
        self.out.flush()
    }

    pub(crate) fn notice(&mut self, text: impl std::fmt::Display) -> io::Result<()> {
        writeln!(self.out, "   {text}")?;
        self.out.flush()
    }

    #[cfg(test)]
    pub(crate) fn into_inner(self) -> W {
        self.out
    }
}
