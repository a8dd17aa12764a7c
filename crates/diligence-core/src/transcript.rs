//! Transcript normalization.
//!
//! Transcripts arrive either as a raw text block with `speaker: message`
//! lines or as the ordered message records the voice-agent platform emits.
//! Both are normalized into one canonical line format before analysis.

use crate::error::AnalysisError;
use serde::{Deserialize, Serialize};

/// Offset spacing assigned to lines whose source carried no real timing.
pub const SYNTHETIC_SPACING_SECS: f64 = 30.0;

/// One line of who said what, in chronological speaking order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptLine {
    pub speaker: String,
    pub text: String,
    /// Seconds from call start. Synthetic when the source had no timing.
    pub offset_secs: f64,
}

/// One message record as delivered by the conversation platform.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpokenMessage {
    pub role: String,
    pub message: String,
    #[serde(default)]
    pub time_in_call_secs: Option<f64>,
}

/// An ordered pitch-call transcript. Construction goes through the
/// normalizer, so a `Transcript` always holds at least one line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transcript {
    lines: Vec<TranscriptLine>,
}

impl Transcript {
    /// Parse a raw text block of `speaker: message` lines.
    ///
    /// Lines without a speaker prefix continue the previous speaker's text.
    /// All offsets are synthetic (30-second increments) since plain text
    /// carries no timing.
    pub fn from_text(raw: &str) -> Result<Self, AnalysisError> {
        let mut lines: Vec<TranscriptLine> = Vec::new();
        for raw_line in raw.lines() {
            let trimmed = raw_line.trim();
            if trimmed.is_empty() {
                continue;
            }
            match split_speaker(trimmed) {
                Some((speaker, text)) => {
                    let offset_secs = lines.len() as f64 * SYNTHETIC_SPACING_SECS;
                    lines.push(TranscriptLine {
                        speaker: speaker.to_string(),
                        text: text.to_string(),
                        offset_secs,
                    });
                }
                None => {
                    // Continuation of the previous speaker; prose before the
                    // first speaker tag is dropped.
                    if let Some(last) = lines.last_mut() {
                        if !last.text.is_empty() {
                            last.text.push(' ');
                        }
                        last.text.push_str(trimmed);
                    }
                }
            }
        }
        if lines.is_empty() {
            return Err(AnalysisError::InvalidTranscript(
                "no speaker lines could be extracted".into(),
            ));
        }
        Ok(Self { lines })
    }

    /// Normalize an ordered sequence of platform message records.
    ///
    /// Records with a real `time_in_call_secs` keep it; records without one
    /// are placed 30 seconds after the previous line to preserve ordering
    /// without implying real timing.
    pub fn from_messages(messages: &[SpokenMessage]) -> Result<Self, AnalysisError> {
        let mut lines = Vec::with_capacity(messages.len());
        let mut last_offset = -SYNTHETIC_SPACING_SECS;
        for msg in messages {
            let text = msg.message.trim();
            if text.is_empty() {
                continue;
            }
            let offset_secs = match msg.time_in_call_secs {
                Some(t) => t,
                None => last_offset + SYNTHETIC_SPACING_SECS,
            };
            last_offset = offset_secs;
            let role = msg.role.trim();
            lines.push(TranscriptLine {
                speaker: if role.is_empty() { "unknown".into() } else { role.to_string() },
                text: text.to_string(),
                offset_secs,
            });
        }
        if lines.is_empty() {
            return Err(AnalysisError::InvalidTranscript(
                "message sequence contains no spoken text".into(),
            ));
        }
        Ok(Self { lines })
    }

    pub fn lines(&self) -> &[TranscriptLine] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Render the transcript as `speaker: text` lines for a prompt.
    pub fn to_prompt_text(&self) -> String {
        let rendered: Vec<String> = self
            .lines
            .iter()
            .map(|l| format!("{}: {}", l.speaker, l.text))
            .collect();
        rendered.join("\n")
    }
}

/// A colon only counts as a speaker tag when the prefix looks like a name:
/// short, no URL-ish slashes, at most a few words.
fn split_speaker(line: &str) -> Option<(&str, &str)> {
    let (speaker, rest) = line.split_once(':')?;
    let speaker = speaker.trim();
    if speaker.is_empty()
        || speaker.len() > 40
        || speaker.contains('/')
        || speaker.split_whitespace().count() > 4
    {
        return None;
    }
    Some((speaker, rest.trim()))
}
