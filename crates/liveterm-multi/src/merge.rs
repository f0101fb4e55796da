//! Collapsing captured redraw streams into visible lines.
//!
//! Printers redraw in place by emitting `"\r" + line`. Captured off-screen,
//! a buffer therefore holds the whole history of redraws; only the latest
//! non-blank one is what a terminal would be showing.

/// The line a terminal would currently show for a captured stream.
///
/// Falls back to the last non-empty redraw when the stream ends in
/// carriage returns.
#[must_use]
pub fn visible_line(captured: &str) -> &str {
    let trimmed = captured.trim_matches('\n');
    trimmed
        .rsplit('\r')
        .find(|segment| !segment.is_empty())
        .unwrap_or("")
        .trim_matches(|c| c == '\n' || c == '\r')
}

/// Join the visible line of every stream, in order, one per line.
pub fn merge_streams<I, S>(streams: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut merged = String::new();
    for stream in streams {
        merged.push_str(visible_line(stream.as_ref()));
        merged.push('\n');
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn last_redraw_wins() {
        assert_eq!(visible_line("A\rB\rC"), "C");
    }

    #[test]
    fn trailing_blanks_fall_back() {
        assert_eq!(visible_line("A\r\r"), "A");
        assert_eq!(visible_line("\rA\rB\r\r\r"), "B");
    }

    #[test]
    fn surrounding_newlines_are_trimmed() {
        assert_eq!(visible_line("\n\rprogress 50%\n"), "progress 50%");
        assert_eq!(visible_line("\r50%\r100%\n"), "100%");
    }

    #[test]
    fn plain_text_passes_through() {
        assert_eq!(visible_line("hello"), "hello");
    }

    #[test]
    fn empty_and_blank_streams() {
        assert_eq!(visible_line(""), "");
        assert_eq!(visible_line("\r\r\n"), "");
    }

    #[test]
    fn merge_keeps_order() {
        let merged = merge_streams(["\ra1\ra2", "\rb1", "\rc1\rc2\rc3"]);
        assert_eq!(merged, "a2\nb1\nc3\n");
    }

    #[test]
    fn merge_of_nothing_is_empty() {
        assert_eq!(merge_streams(Vec::<String>::new()), "");
    }

    #[test]
    fn empty_stream_still_takes_a_line() {
        assert_eq!(merge_streams(["", "\rx"]), "\nx\n");
    }
}
