use blackjack_lib::{PresentationSink, RoundEvent, SessionSummary};
use log::warn;
use serde::Serialize;
use std::io::Write;

/// Writes every round event to `writer` as one JSON object per line.
pub struct JsonSink<W: Write> {
    writer: W,
}

impl<W: Write> JsonSink<W> {
    pub fn new(writer: W) -> Self {
        JsonSink { writer }
    }
}

impl<W: Write> PresentationSink for JsonSink<W> {
    fn notify(&mut self, event: &RoundEvent) {
        if let Err(e) = write_json_line(&mut self.writer, event) {
            warn!("failed to write event: {e}");
        }
    }
}

fn write_json_line<W: Write, T: Serialize>(writer: &mut W, value: &T) -> std::io::Result<()> {
    serde_json::to_writer(&mut *writer, value)?;
    writer.write_all(b"\n")?;
    writer.flush()
}

#[derive(Serialize)]
struct SummaryLine<'a> {
    event: &'static str,
    #[serde(flatten)]
    summary: &'a SessionSummary,
}

/// A public function to write `summary` to a writer, either as the aligned text table or as a single JSON line.
pub fn write_summary(
    summary: &SessionSummary,
    json: bool,
    mut writer: impl Write,
) -> std::io::Result<()> {
    if json {
        write_json_line(
            &mut writer,
            &SummaryLine {
                event: "session_summary",
                summary,
            },
        )
    } else {
        writeln!(writer, "{summary}")
    }
}
