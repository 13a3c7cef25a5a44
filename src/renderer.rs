use crate::theme::Palette;

use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use scraper::{Html, Node};

/// Lays out rendered document HTML as styled terminal lines.
pub struct DomRenderer {
    pub lines: Vec<Line<'static>>,
    current_line: Vec<Span<'static>>,
    current_style: Style,
    palette: Palette,
    max_width: usize,
    current_line_width: usize,
    preserve_whitespace: bool,
    list_depth: usize,
    quote_depth: usize,
}

impl DomRenderer {
    pub fn new(width: usize, palette: Palette) -> Self {
        Self {
            lines: Vec::new(),
            current_line: Vec::new(),
            current_style: Style::default().fg(palette.fg),
            palette,
            max_width: width.saturating_sub(2),
            current_line_width: 0,
            preserve_whitespace: false,
            list_depth: 0,
            quote_depth: 0,
        }
    }

    pub fn render(&mut self, document: &Html) {
        for node in document.tree.root().children() {
            self.walk(node);
        }
        self.flush_line();
        while self.lines.last().is_some_and(|l| l.spans.is_empty()) {
            self.lines.pop();
        }
    }

    fn flush_line(&mut self) {
        if !self.current_line.is_empty() {
            self.lines.push(Line::from(std::mem::take(&mut self.current_line)));
            self.current_line_width = 0;
        }
    }

    /// Like `flush_line`, but an empty pending line still produces a blank line.
    fn break_line(&mut self) {
        if self.current_line.is_empty() {
            self.lines.push(Line::default());
        } else {
            self.flush_line();
        }
    }

    fn add_vertical_space(&mut self) {
        self.flush_line();
        if let Some(last) = self.lines.last() {
            if !last.spans.is_empty() {
                self.lines.push(Line::default());
            }
        }
    }

    fn start_line_prefix(&mut self) {
        if self.quote_depth > 0 {
            let bar = "│ ".repeat(self.quote_depth);
            self.current_line_width += bar.chars().count();
            self.current_line
                .push(Span::styled(bar, Style::default().fg(self.palette.muted)));
        }
        if self.list_depth > 0 {
            let indent = "  ".repeat(self.list_depth);
            self.current_line_width += indent.len();
            self.current_line.push(Span::from(indent));
        }
    }

    /// True when the pending line is empty or already ends in a space.
    fn ends_with_space(&self) -> bool {
        self.current_line
            .last()
            .is_none_or(|span| span.content.ends_with(' '))
    }

    fn push_word(&mut self, word: &str) {
        let span = Span::styled(word.to_string(), self.current_style);
        let word_len = span.width();

        if self.current_line_width + word_len > self.max_width && !self.current_line.is_empty() {
            self.flush_line();
            // Maintain indentation for lists and quotes when wrapping
            self.start_line_prefix();
        } else if self.current_line.is_empty() && self.quote_depth > 0 {
            self.start_line_prefix();
        }

        self.current_line.push(span);
        self.current_line_width += word_len;
    }

    fn push_text(&mut self, text: &str) {
        for word in text.split_inclusive(char::is_whitespace) {
            let trimmed = word.trim_end();
            if trimmed.is_empty() {
                continue;
            }
            let piece = if word.len() != trimmed.len() {
                format!("{} ", trimmed)
            } else {
                trimmed.to_string()
            };
            self.push_word(&piece);
        }
    }

    fn walk(&mut self, node: ego_tree::NodeRef<scraper::node::Node>) {
        match node.value() {
            Node::Text(text) => {
                if self.preserve_whitespace {
                    // Only a newline ends a line inside code blocks
                    for (i, piece) in text.text.split('\n').enumerate() {
                        if i > 0 {
                            self.break_line();
                        }
                        if !piece.is_empty() {
                            self.push_word(piece);
                        }
                    }
                } else {
                    let content = text.text.split_whitespace().collect::<Vec<_>>().join(" ");
                    if !content.is_empty() {
                        if text.text.starts_with(char::is_whitespace) && !self.ends_with_space() {
                            self.push_word(" ");
                        }
                        let trailing = if text.text.ends_with(char::is_whitespace) {
                            " "
                        } else {
                            ""
                        };
                        self.push_text(&format!("{}{}", content, trailing));
                    }
                }
            }
            Node::Element(elem) => {
                let tag = elem.name();

                if matches!(tag, "script" | "style" | "head" | "meta" | "link") {
                    return;
                }
                if elem.attr("hidden").is_some() || elem.attr("aria-hidden") == Some("true") {
                    return;
                }

                let old_style = self.current_style;
                let old_preserve = self.preserve_whitespace;

                if elem
                    .attr("style")
                    .is_some_and(|s| s.replace(' ', "").contains("color:red"))
                {
                    self.current_style = self.current_style.fg(self.palette.error);
                }

                match tag {
                    "b" | "strong" => {
                        self.current_style = self.current_style.add_modifier(Modifier::BOLD)
                    }
                    "i" | "em" => {
                        self.current_style = self.current_style.add_modifier(Modifier::ITALIC)
                    }
                    "del" | "s" => {
                        self.current_style = self.current_style.add_modifier(Modifier::CROSSED_OUT)
                    }
                    "a" => {
                        self.current_style = self
                            .current_style
                            .fg(self.palette.link)
                            .add_modifier(Modifier::UNDERLINED);
                    }
                    "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => {
                        self.add_vertical_space();
                        self.current_style = self
                            .current_style
                            .fg(self.palette.heading)
                            .add_modifier(Modifier::BOLD);
                        if tag == "h1" {
                            self.current_style = self.current_style.add_modifier(Modifier::UNDERLINED);
                        }
                    }
                    "pre" => {
                        self.add_vertical_space();
                        self.preserve_whitespace = true;
                        self.current_style = self.current_style.fg(self.palette.code);
                    }
                    "code" => {
                        self.current_style = self.current_style.fg(self.palette.code);
                    }
                    "blockquote" => {
                        self.add_vertical_space();
                        self.quote_depth += 1;
                        self.current_style = self.current_style.add_modifier(Modifier::ITALIC);
                    }
                    "ul" | "ol" => {
                        self.flush_line();
                        self.list_depth += 1;
                    }
                    "li" => {
                        self.flush_line();
                        self.start_line_prefix();
                        self.push_word("• ");
                    }
                    "img" => {
                        let alt = elem.attr("alt").unwrap_or("IMAGE");
                        self.current_style = self.current_style.fg(self.palette.muted);
                        self.push_word(&format!("[{}] ", alt));
                        self.current_style = old_style;
                    }
                    "input" if elem.attr("type") == Some("checkbox") => {
                        let mark = if elem.attr("checked").is_some() { "[x] " } else { "[ ] " };
                        self.push_word(mark);
                    }
                    "br" => self.flush_line(),
                    "p" | "main" | "article" | "section" | "table" | "aside" => {
                        self.add_vertical_space()
                    }
                    "div" | "header" | "footer" | "nav" | "tr" => self.flush_line(),
                    "td" | "th" => self.push_word("  "),
                    "hr" => {
                        self.add_vertical_space();
                        let rule = "-".repeat(self.max_width);
                        self.current_style = self.current_style.fg(self.palette.muted);
                        self.push_word(&rule);
                        self.current_style = old_style;
                        self.add_vertical_space();
                    }
                    _ => {}
                }

                for child in node.children() {
                    self.walk(child);
                }

                // Restore state
                self.current_style = old_style;
                self.preserve_whitespace = old_preserve;

                match tag {
                    "ul" | "ol" => {
                        self.list_depth = self.list_depth.saturating_sub(1);
                        self.flush_line();
                    }
                    "blockquote" => {
                        self.flush_line();
                        self.quote_depth = self.quote_depth.saturating_sub(1);
                        self.add_vertical_space();
                    }
                    "h1" | "h2" | "h3" | "h4" | "h5" | "h6" | "p" | "main" | "article"
                    | "section" | "table" | "aside" | "pre" => self.add_vertical_space(),
                    "div" | "li" | "header" | "footer" | "nav" | "tr" => self.flush_line(),
                    _ => {}
                }
            }
            _ => {}
        }
    }
}
