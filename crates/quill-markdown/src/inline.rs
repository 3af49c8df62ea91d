//! Inline formatting: code spans, emphasis, and marker stripping.
//!
//! Both formatters resolve markers in the same fixed priority: code spans,
//! then bold (`**`/`__`), then italic (`*`/`_`), all non-greedy. A span
//! claimed by a higher-priority pass is never re-scanned by a lower one.
//!
//! The two formatters are otherwise different on purpose:
//! - [`inline_html`] applies an ordered list of substitution passes, so
//!   nested orderings like `*_x_*` compose into nested `<em>` tags.
//! - [`parse_runs`] produces mutually exclusive runs for the document
//!   tree: it splits on bold markers first and only parses italic in a
//!   fragment that contains no bold match at all.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::block::InlineRun;

static CODE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"`([^`]+)`").unwrap());
static BOLD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*(.*?)\*\*|__(.*?)__").unwrap());
static ITALIC_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*(.*?)\*|_(.+?)_").unwrap());

/// Emphasis substitution passes for the HTML path, applied in order:
/// bold before italic, star form before underscore form.
static EMPHASIS_PASSES: LazyLock<[(Regex, &'static str); 4]> = LazyLock::new(|| {
    [
        (Regex::new(r"\*\*(.*?)\*\*").unwrap(), "<strong>$1</strong>"),
        (Regex::new(r"__(.*?)__").unwrap(), "<strong>$1</strong>"),
        (Regex::new(r"\*(.*?)\*").unwrap(), "<em>$1</em>"),
        (Regex::new(r"_(.+?)_").unwrap(), "<em>$1</em>"),
    ]
});

/// Marker-stripping passes, same priority order as formatting.
static STRIP_PASSES: LazyLock<[Regex; 5]> = LazyLock::new(|| {
    [
        Regex::new(r"`([^`]+)`").unwrap(),
        Regex::new(r"\*\*(.*?)\*\*").unwrap(),
        Regex::new(r"__(.*?)__").unwrap(),
        Regex::new(r"\*(.*?)\*").unwrap(),
        Regex::new(r"_(.+?)_").unwrap(),
    ]
});

/// Escape HTML special characters.
#[must_use]
pub fn escape_html(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#x27;"),
            _ => result.push(c),
        }
    }
    result
}

/// Format one line of text as inline HTML.
///
/// The text is entity-escaped, code spans are claimed and set aside so the
/// emphasis passes cannot touch their contents, the emphasis substitutions
/// run in order, and the code spans come back as `<code>` tags.
#[must_use]
pub fn inline_html(text: &str) -> String {
    let escaped = escape_html(text);

    // Code spans are parked behind control-character placeholders; the
    // emphasis patterns cannot produce or consume those characters.
    let mut code_spans: Vec<String> = Vec::new();
    let mut html = CODE_RE
        .replace_all(&escaped, |caps: &Captures<'_>| {
            code_spans.push(caps[1].to_owned());
            format!("\u{1}{}\u{2}", code_spans.len() - 1)
        })
        .into_owned();

    for (re, replacement) in EMPHASIS_PASSES.iter() {
        html = re.replace_all(&html, *replacement).into_owned();
    }

    for (index, span) in code_spans.iter().enumerate() {
        html = html.replace(
            &format!("\u{1}{index}\u{2}"),
            &format!("<code>{span}</code>"),
        );
    }
    html
}

/// Emphasis style applied by a run split.
enum Style {
    Bold,
    Italic,
}

/// Split a code-free fragment into runs.
///
/// Fragments are split on bold markers first; the text between bold
/// matches stays verbatim as plain runs, italic markers included. Italic
/// is parsed only when the fragment contains no bold match at all.
fn push_emphasis_runs(fragment: &str, runs: &mut Vec<InlineRun>) {
    if fragment.is_empty() {
        return;
    }
    if BOLD_RE.is_match(fragment) {
        split_styled(&BOLD_RE, Style::Bold, fragment, runs);
    } else if ITALIC_RE.is_match(fragment) {
        split_styled(&ITALIC_RE, Style::Italic, fragment, runs);
    } else {
        runs.push(InlineRun::plain(fragment));
    }
}

/// Split `fragment` on `re`, styling match contents and keeping the text
/// between matches as plain runs.
fn split_styled(re: &Regex, style: Style, fragment: &str, runs: &mut Vec<InlineRun>) {
    let mut cursor = 0;
    for caps in re.captures_iter(fragment) {
        let matched = caps.get(0).unwrap();
        if matched.start() > cursor {
            runs.push(InlineRun::plain(&fragment[cursor..matched.start()]));
        }
        let content = caps
            .get(1)
            .or_else(|| caps.get(2))
            .map_or("", |group| group.as_str());
        runs.push(match style {
            Style::Bold => InlineRun::bold(content),
            Style::Italic => InlineRun::italic(content),
        });
        cursor = matched.end();
    }
    if cursor < fragment.len() {
        runs.push(InlineRun::plain(&fragment[cursor..]));
    }
}

/// Parse one line of text into mutually exclusive runs for the document
/// tree.
///
/// Code spans are claimed first and become code runs; the remaining
/// fragments go through the bold-first split. An empty result degrades to
/// a single plain run of the stripped text, so a single odd line can never
/// fail a whole document.
#[must_use]
pub fn parse_runs(text: &str) -> Vec<InlineRun> {
    let mut runs = Vec::new();
    let mut cursor = 0;
    for caps in CODE_RE.captures_iter(text) {
        let matched = caps.get(0).unwrap();
        push_emphasis_runs(&text[cursor..matched.start()], &mut runs);
        runs.push(InlineRun::code(&caps[1]));
        cursor = matched.end();
    }
    push_emphasis_runs(&text[cursor..], &mut runs);

    if runs.is_empty() {
        return vec![InlineRun::plain(strip_markdown(text))];
    }
    runs
}

/// Remove inline markers, keeping their contents.
///
/// Idempotent: stripping already-stripped text is a no-op.
#[must_use]
pub fn strip_markdown(text: &str) -> String {
    let mut out = text.to_owned();
    for re in STRIP_PASSES.iter() {
        out = re.replace_all(&out, "$1").into_owned();
    }
    out
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_html_bold_and_italic() {
        assert_eq!(
            inline_html("Some *italic* and **bold** text."),
            "Some <em>italic</em> and <strong>bold</strong> text."
        );
    }

    #[test]
    fn test_html_underscore_forms() {
        assert_eq!(
            inline_html("__bold__ and _italic_"),
            "<strong>bold</strong> and <em>italic</em>"
        );
    }

    #[test]
    fn test_html_nested_emphasis_composes() {
        // Sequential substitution: the star pass wraps first, then the
        // underscore pass rewrites the inner markers.
        assert_eq!(inline_html("*_x_*"), "<em><em>x</em></em>");
    }

    #[test]
    fn test_html_bold_resolved_before_italic() {
        assert_eq!(inline_html("**a**"), "<strong>a</strong>");
        assert_eq!(
            inline_html("**a** *b*"),
            "<strong>a</strong> <em>b</em>"
        );
    }

    #[test]
    fn test_html_code_span_content_not_emphasized() {
        assert_eq!(
            inline_html("run `cargo *build*` now"),
            "run <code>cargo *build*</code> now"
        );
    }

    #[test]
    fn test_html_emphasis_around_code_span() {
        assert_eq!(inline_html("*see `x`*"), "<em>see <code>x</code></em>");
    }

    #[test]
    fn test_html_escapes_markup() {
        assert_eq!(
            inline_html("<script> & \"quotes\""),
            "&lt;script&gt; &amp; &quot;quotes&quot;"
        );
    }

    #[test]
    fn test_runs_bold_split_leaves_between_text_plain() {
        // The text before the bold match keeps its italic markers; italic
        // is never parsed once a bold match claimed the fragment.
        assert_eq!(
            parse_runs("Some *italic* and **bold** text."),
            vec![
                InlineRun::plain("Some *italic* and "),
                InlineRun::bold("bold"),
                InlineRun::plain(" text."),
            ]
        );
    }

    #[test]
    fn test_runs_italic_without_bold() {
        assert_eq!(
            parse_runs("an _emphasised_ word"),
            vec![
                InlineRun::plain("an "),
                InlineRun::italic("emphasised"),
                InlineRun::plain(" word"),
            ]
        );
    }

    #[test]
    fn test_runs_plain_line() {
        assert_eq!(
            parse_runs("nothing special"),
            vec![InlineRun::plain("nothing special")]
        );
    }

    #[test]
    fn test_runs_code_claimed_first() {
        assert_eq!(
            parse_runs("call `f(**x**)` here"),
            vec![
                InlineRun::plain("call "),
                InlineRun::code("f(**x**)"),
                InlineRun::plain(" here"),
            ]
        );
    }

    #[test]
    fn test_runs_are_never_composed() {
        for run in parse_runs("**a** _b_ `c` d") {
            let styles = usize::from(run.bold) + usize::from(run.italic) + usize::from(run.code);
            assert!(styles <= 1, "composed run: {run:?}");
        }
    }

    #[test]
    fn test_runs_empty_input_falls_back_to_plain() {
        assert_eq!(parse_runs(""), vec![InlineRun::plain("")]);
    }

    #[test]
    fn test_strip_removes_marker_pairs() {
        assert_eq!(
            strip_markdown("**bold** and *italic* and `code`"),
            "bold and italic and code"
        );
        assert_eq!(strip_markdown("__b__ _i_"), "b i");
    }

    #[test]
    fn test_strip_keeps_unpaired_markers() {
        assert_eq!(strip_markdown("a * b"), "a * b");
        assert_eq!(strip_markdown("lone_underscore"), "lone_underscore");
    }

    #[test]
    fn test_strip_is_idempotent() {
        for input in [
            "**bold** and *italic*",
            "`code` _i_ __b__",
            "plain text",
            "a * b _ c",
            "***a***",
        ] {
            let once = strip_markdown(input);
            assert_eq!(strip_markdown(&once), once);
        }
    }
}
