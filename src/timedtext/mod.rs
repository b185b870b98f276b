//! Tolerant WebVTT/SRT cue parsing
//!
//! Caption files found in the wild mix the two formats freely, so one parser
//! handles both: blank lines separate cues, and everything that is structure
//! rather than speech (format banner, SRT indices, timing lines, NOTE blocks)
//! is discarded.

/// A single unit of spoken-text content, timing stripped
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cue {
    pub text: String,
}

/// Convert a WebVTT/SRT caption document into an ordered list of text cues.
///
/// Empty input yields an empty list, not an error; emptiness is a signal the
/// caller acts on.
pub fn parse_cues(document: &str) -> Vec<Cue> {
    let mut cues = Vec::new();
    let mut buffer: Vec<&str> = Vec::new();
    let mut skipping_note = false;

    for raw_line in document.lines() {
        // Strip BOM and surrounding whitespace
        let line = raw_line.trim_matches(|c| c == '\u{feff}' || c == ' ' || c == '\t');

        if line.is_empty() {
            flush(&mut buffer, &mut cues);
            skipping_note = false;
            continue;
        }

        let upper = line.to_uppercase();
        if upper.starts_with("WEBVTT") {
            continue;
        }
        if upper.starts_with("NOTE") {
            // Note bodies span until the next blank line
            skipping_note = true;
            continue;
        }
        if skipping_note {
            continue;
        }
        if line.contains("-->") {
            continue;
        }
        // Most SRT files number their cues; skip pure integers
        if line.chars().all(|c| c.is_ascii_digit()) {
            continue;
        }

        buffer.push(line);
    }

    // Tolerate a missing trailing blank line
    flush(&mut buffer, &mut cues);

    cues
}

fn flush(buffer: &mut Vec<&str>, cues: &mut Vec<Cue>) {
    if buffer.is_empty() {
        return;
    }
    let text = buffer.join(" ").trim().to_string();
    buffer.clear();
    if !text.is_empty() {
        cues.push(Cue { text });
    }
}
