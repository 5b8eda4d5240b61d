//! Result rendering: type-name localisation, terminal view, text and HTML
//! snapshots

use lazy_static::lazy_static;
use regex::{NoExpand, Regex};
use std::fmt::Write;

use crate::core::i18n::TranslationStore;
use crate::types::{PersonalityType, Theme, TypeResult};

/// Line-break markup produced by `localize`
pub const LINE_BREAK: &str = "<br>";

lazy_static! {
    /// Case-insensitive matchers, in `PersonalityType::ALL` order
    static ref TYPE_PATTERNS: Vec<(PersonalityType, Regex)> = PersonalityType::ALL
        .iter()
        .map(|t| {
            let pattern = format!("(?i){}", regex::escape(t.id()));
            (*t, Regex::new(&pattern).expect("type pattern is a valid regex"))
        })
        .collect();
}

/// Replace every type identifier (any case) with its localised name
fn replace_type_names(text: &str, i18n: &TranslationStore) -> String {
    let mut out = text.to_string();
    for (kind, pattern) in TYPE_PATTERNS.iter() {
        let name = i18n.get_or(&kind.name_key(), kind.id());
        out = pattern.replace_all(&out, NoExpand(&name)).into_owned();
    }
    out
}

/// Localise type names in `text`, then turn newlines into `<br>`.
///
/// `kind` is the result's own type; an empty text renders as empty.
pub fn localize(text: &str, kind: PersonalityType, i18n: &TranslationStore) -> String {
    if text.is_empty() {
        return String::new();
    }
    tracing::trace!(%kind, "localizing result text");
    replace_type_names(text, i18n).replace('\n', LINE_BREAK)
}

/// Undo the markup added by `localize`
pub fn strip_markup(html: &str) -> String {
    html.replace("<br />", "\n")
        .replace("<br/>", "\n")
        .replace(LINE_BREAK, "\n")
}

/// HTML-escape a string into the output buffer
fn html_escape_into(out: &mut String, s: &str) {
    for c in s.chars() {
        match c {
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
}

/// A labelled block of result text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub label: String,
    /// Localised text with `<br>` line breaks
    pub html: String,
}

impl Section {
    pub fn plain(&self) -> String {
        strip_markup(&self.html)
    }
}

/// A result bound to the strings it is displayed with
pub struct ResultView<'a> {
    result: &'a TypeResult,
    i18n: &'a TranslationStore,
}

impl<'a> ResultView<'a> {
    pub fn new(result: &'a TypeResult, i18n: &'a TranslationStore) -> Self {
        Self { result, i18n }
    }

    pub fn result(&self) -> &TypeResult {
        self.result
    }

    /// `result.{type}-title`, then `result.title`, then "Your Type"
    pub fn title(&self) -> String {
        self.i18n
            .lookup(&self.result.kind.title_key())
            .or_else(|| self.i18n.lookup("result.title"))
            .unwrap_or("Your Type")
            .to_string()
    }

    /// Explanation, advice and romance, in display order
    pub fn sections(&self) -> Vec<Section> {
        let kind = self.result.kind;
        [
            ("result.explanation_label", "Explanation", &self.result.explanation),
            ("result.advice_label", "Advice", &self.result.advice),
            ("result.romance_label", "Romance", &self.result.love_chain_info),
        ]
        .into_iter()
        .map(|(key, fallback, text)| Section {
            label: self.i18n.get_or(key, fallback),
            html: localize(text, kind, self.i18n),
        })
        .collect()
    }

    /// Clipboard text: title and labelled sections separated by blank lines
    pub fn plain_text(&self) -> String {
        let mut blocks = vec![self.title()];
        for section in self.sections() {
            blocks.push(format!("[{}]\n{}", section.label, section.plain()));
        }
        blocks.join("\n\n")
    }

    /// Terminal rendering
    pub fn to_terminal_string(&self, no_color: bool) -> String {
        let accent = if no_color { "" } else { self.result.kind.color_code() };
        let bold = if no_color { "" } else { "\x1b[1m" };
        let reset = if no_color { "" } else { "\x1b[0m" };

        let mut out = String::new();
        let _ = writeln!(out, "{}{}{}{}", bold, accent, self.title(), reset);
        let _ = writeln!(out, "{}({}){}", accent, self.result.kind, reset);
        for section in self.sections() {
            let _ = writeln!(out);
            let _ = writeln!(out, "{}[{}]{}", bold, section.label, reset);
            let _ = writeln!(out, "{}", section.plain());
        }
        out
    }

    /// Standalone HTML document of the result panel
    pub fn to_html(&self, theme: Theme) -> String {
        let (background, card, text, heading) = theme.palette();
        let title = self.title();
        let kind = self.result.kind;

        let mut out = String::new();
        out.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>");
        html_escape_into(&mut out, &title);
        out.push_str("</title>\n");
        let _ = writeln!(
            out,
            "<meta name=\"generator\" content=\"tetotype {} at {}\">",
            crate::VERSION,
            chrono::Utc::now().to_rfc3339()
        );
        let _ = writeln!(
            out,
            "<style>body{{background:{bg};font-family:sans-serif;margin:0;padding:2rem;}}\
             .card{{max-width:42rem;margin:auto;background:{card};color:{text};padding:2rem;\
             border-radius:0.5rem;box-shadow:0 10px 15px rgba(0,0,0,0.1);}}\
             h2{{color:{heading};text-align:center;}}h3{{text-align:center;}}\
             img{{display:block;max-width:100%;margin:0 auto 1.5rem;}}</style>",
            bg = background,
            card = card,
            text = text,
            heading = heading,
        );
        out.push_str("</head>\n<body>\n<div class=\"card\">\n");

        out.push_str("<img src=\"");
        html_escape_into(&mut out, &kind.image_path());
        out.push_str("\" alt=\"");
        html_escape_into(&mut out, &title);
        out.push_str("\">\n<h2>");
        html_escape_into(&mut out, &title);
        out.push_str("</h2>\n");

        for section in self.sections() {
            out.push_str("<h3>[");
            html_escape_into(&mut out, &section.label);
            out.push_str("]</h3>\n<p>");
            let lines: Vec<String> = section
                .plain()
                .split('\n')
                .map(|line| {
                    let mut escaped = String::new();
                    html_escape_into(&mut escaped, line);
                    escaped
                })
                .collect();
            out.push_str(&lines.join(LINE_BREAK));
            out.push_str("</p>\n");
        }

        out.push_str("</div>\n</body>\n</html>\n");
        out
    }
}
