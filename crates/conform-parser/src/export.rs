//! Grading-export reader.
//!
//! One record per line: the first whitespace-separated token is a storage
//! path, every following token is a frame number. Tokens that fail integer
//! parsing are dropped with a diagnostic; they never abort the record or
//! the run. Blank lines are ignored.

use std::io::BufRead;

use conform_common::Result;

/// One line of the grading export: a raw storage path and the frame
/// numbers recorded against it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameRecord {
    /// Storage path exactly as the grading tool wrote it.
    pub raw_path: String,
    /// Frame numbers that parsed as integers, in file order.
    pub frames: Vec<i64>,
}

/// Parse a full grading export.
///
/// Only I/O failures are errors; malformed frame tokens are skipped. A
/// record whose tokens all fail to parse is still returned (with empty
/// `frames`) so the caller can surface it for audit.
pub fn parse_export<R: BufRead>(reader: R) -> Result<Vec<FrameRecord>> {
    let mut records = Vec::new();
    for line in reader.lines() {
        if let Some(record) = parse_line(&line?) {
            records.push(record);
        }
    }
    Ok(records)
}

fn parse_line(line: &str) -> Option<FrameRecord> {
    let mut tokens = line.split_whitespace();
    let raw_path = tokens.next()?.to_string();

    let mut frames = Vec::new();
    for token in tokens {
        match token.parse::<i64>() {
            Ok(frame) => frames.push(frame),
            Err(_) => tracing::debug!(path = %raw_path, token, "skipping unparseable frame token"),
        }
    }

    Some(FrameRecord { raw_path, frames })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_path_and_frames() {
        let input = "/images1/dogman/reel1/partA/1920x1080 32 33 34 67\n";
        let records = parse_export(input.as_bytes()).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].raw_path, "/images1/dogman/reel1/partA/1920x1080");
        assert_eq!(records[0].frames, vec![32, 33, 34, 67]);
    }

    #[test]
    fn blank_lines_ignored() {
        let input = "\n/a/b 1 2\n\n   \n/c/d 3\n";
        let records = parse_export(input.as_bytes()).unwrap();
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn malformed_tokens_skipped_not_fatal() {
        let input = "/a/b 1 <err> 2 three 4\n";
        let records = parse_export(input.as_bytes()).unwrap();
        assert_eq!(records[0].frames, vec![1, 2, 4]);
    }

    #[test]
    fn record_with_no_valid_frames_is_kept() {
        let input = "/a/b <null> <null>\n";
        let records = parse_export(input.as_bytes()).unwrap();
        assert_eq!(records.len(), 1);
        assert!(records[0].frames.is_empty());
    }

    #[test]
    fn negative_frames_parse() {
        // The parser accepts any integer; bounds are a classification concern.
        let input = "/a/b -3 0 7\n";
        let records = parse_export(input.as_bytes()).unwrap();
        assert_eq!(records[0].frames, vec![-3, 0, 7]);
    }
}
