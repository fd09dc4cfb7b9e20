use pulldown_cmark::{Event, HeadingLevel, Options, Parser, Tag, TagEnd};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

use crate::ui::wrap::text_width;

/// Cells of a GFM table, collected until the table ends so columns can be
/// padded to a common width.
#[derive(Default)]
struct TableBuf {
    rows: Vec<Vec<String>>,
    header_rows: usize,
    row: Vec<String>,
    cell: String,
}

impl TableBuf {
    /// Feed one event. Returns true once the table is complete.
    fn feed(&mut self, event: &Event) -> bool {
        match event {
            Event::Start(Tag::TableHead) | Event::Start(Tag::TableRow) => self.row.clear(),
            Event::End(TagEnd::TableHead) => {
                self.rows.push(std::mem::take(&mut self.row));
                self.header_rows = self.rows.len();
            }
            Event::End(TagEnd::TableRow) => self.rows.push(std::mem::take(&mut self.row)),
            Event::Start(Tag::TableCell) => self.cell.clear(),
            Event::End(TagEnd::TableCell) => {
                self.row.push(self.cell.trim().to_string());
                self.cell.clear();
            }
            Event::Text(t) | Event::Code(t) => self.cell.push_str(t),
            Event::SoftBreak | Event::HardBreak => self.cell.push(' '),
            Event::End(TagEnd::Table) => return true,
            _ => {}
        }
        false
    }

    fn render(&self) -> Vec<Line<'static>> {
        let cols = self.rows.iter().map(|r| r.len()).max().unwrap_or(0);
        if cols == 0 {
            return Vec::new();
        }
        let mut widths = vec![3usize; cols];
        for row in &self.rows {
            for (i, cell) in row.iter().enumerate() {
                widths[i] = widths[i].max(text_width(cell));
            }
        }

        let border = Style::default().fg(Color::DarkGray);
        let mut lines = Vec::new();
        for (r, row) in self.rows.iter().enumerate() {
            let is_header = r < self.header_rows;
            let style = if is_header {
                Style::default().add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            let mut spans = Vec::new();
            for (i, width) in widths.iter().enumerate() {
                if i > 0 {
                    spans.push(Span::styled(" │ ", border));
                }
                let cell = row.get(i).map(String::as_str).unwrap_or("");
                let pad = width.saturating_sub(text_width(cell));
                spans.push(Span::styled(format!("{}{}", cell, " ".repeat(pad)), style));
            }
            lines.push(Line::from(spans));

            if is_header && r + 1 == self.header_rows {
                let rule: Vec<String> = widths.iter().map(|w| "─".repeat(*w)).collect();
                lines.push(Line::from(Span::styled(rule.join("─┼─"), border)));
            }
        }
        lines
    }
}

fn flush(lines: &mut Vec<Line<'static>>, spans: &mut Vec<Span<'static>>) {
    if !spans.is_empty() {
        lines.push(Line::from(std::mem::take(spans)));
    }
}

fn push_style(stack: &mut Vec<Style>, modifier: Modifier) {
    let current = *stack.last().unwrap_or(&Style::default());
    stack.push(current.add_modifier(modifier));
}

pub fn markdown_to_lines(text: &str) -> Vec<Line<'static>> {
    let mut opts = Options::empty();
    opts.insert(Options::ENABLE_STRIKETHROUGH);
    opts.insert(Options::ENABLE_TABLES);

    let parser = Parser::new_ext(text, opts);
    let mut lines: Vec<Line<'static>> = Vec::new();
    let mut current_spans: Vec<Span<'static>> = Vec::new();
    let mut style_stack: Vec<Style> = vec![Style::default()];
    // One entry per open list: the next number for ordered lists.
    let mut lists: Vec<Option<u64>> = Vec::new();
    let mut in_code_block = false;
    let mut table: Option<TableBuf> = None;

    for event in parser {
        if let Some(buf) = table.as_mut() {
            if buf.feed(&event) {
                lines.extend(buf.render());
                lines.push(Line::from(""));
                table = None;
            }
            continue;
        }

        match event {
            Event::Start(Tag::Table(_)) => {
                flush(&mut lines, &mut current_spans);
                table = Some(TableBuf::default());
            }
            Event::Start(Tag::Paragraph) => {}
            Event::End(TagEnd::Paragraph) => {
                flush(&mut lines, &mut current_spans);
                if lists.is_empty() {
                    lines.push(Line::from(""));
                }
            }
            Event::Start(Tag::Strong) => push_style(&mut style_stack, Modifier::BOLD),
            Event::Start(Tag::Emphasis) => push_style(&mut style_stack, Modifier::ITALIC),
            Event::Start(Tag::Strikethrough) => {
                push_style(&mut style_stack, Modifier::CROSSED_OUT)
            }
            Event::Start(Tag::Link { .. }) => push_style(&mut style_stack, Modifier::UNDERLINED),
            Event::End(TagEnd::Strong)
            | Event::End(TagEnd::Emphasis)
            | Event::End(TagEnd::Strikethrough)
            | Event::End(TagEnd::Link) => {
                if style_stack.len() > 1 {
                    style_stack.pop();
                }
            }
            Event::Start(Tag::List(start)) => {
                flush(&mut lines, &mut current_spans);
                lists.push(start);
            }
            Event::End(TagEnd::List(_)) => {
                flush(&mut lines, &mut current_spans);
                lists.pop();
                if lists.is_empty() {
                    lines.push(Line::from(""));
                }
            }
            Event::Start(Tag::Item) => {
                flush(&mut lines, &mut current_spans);
                let indent = "  ".repeat(lists.len().max(1));
                let marker = match lists.last_mut() {
                    Some(Some(n)) => {
                        let m = format!("{}. ", n);
                        *n += 1;
                        m
                    }
                    _ => "• ".to_string(),
                };
                current_spans.push(Span::raw(format!("{}{}", indent, marker)));
            }
            Event::End(TagEnd::Item) => flush(&mut lines, &mut current_spans),
            Event::Start(Tag::CodeBlock(_)) => {
                flush(&mut lines, &mut current_spans);
                in_code_block = true;
            }
            Event::End(TagEnd::CodeBlock) => {
                in_code_block = false;
                lines.push(Line::from(""));
            }
            Event::Start(Tag::Heading { level, .. }) => {
                flush(&mut lines, &mut current_spans);
                let prefix = match level {
                    HeadingLevel::H1 => "# ",
                    HeadingLevel::H2 => "## ",
                    HeadingLevel::H3 => "### ",
                    _ => "",
                };
                current_spans.push(Span::styled(
                    prefix.to_string(),
                    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
                ));
                push_style(&mut style_stack, Modifier::BOLD);
            }
            Event::End(TagEnd::Heading(_)) => {
                if style_stack.len() > 1 {
                    style_stack.pop();
                }
                flush(&mut lines, &mut current_spans);
                lines.push(Line::from(""));
            }
            Event::Text(text) => {
                if in_code_block {
                    for code_line in text.lines() {
                        lines.push(Line::from(Span::styled(
                            format!("  {}", code_line),
                            Style::default().fg(Color::Green),
                        )));
                    }
                } else {
                    let style = *style_stack.last().unwrap_or(&Style::default());
                    current_spans.push(Span::styled(text.to_string(), style));
                }
            }
            Event::Code(code) => {
                current_spans.push(Span::styled(
                    format!("`{}`", code),
                    Style::default().fg(Color::Yellow),
                ));
            }
            Event::SoftBreak => current_spans.push(Span::raw(" ")),
            Event::HardBreak => flush(&mut lines, &mut current_spans),
            Event::Rule => {
                flush(&mut lines, &mut current_spans);
                lines.push(Line::from(Span::styled(
                    "─".repeat(40),
                    Style::default().fg(Color::DarkGray),
                )));
            }
            _ => {}
        }
    }

    flush(&mut lines, &mut current_spans);
    while lines.last().is_some_and(|l| l.spans.iter().all(|s| s.content.is_empty())) {
        lines.pop();
    }

    lines
}

/// Flatten rendered lines back into text, for non-terminal output.
pub fn lines_to_plain(lines: &[Line<'_>]) -> String {
    lines
        .iter()
        .map(|l| {
            l.spans
                .iter()
                .map(|s| s.content.as_ref())
                .collect::<String>()
                .trim_end()
                .to_string()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain(md: &str) -> Vec<String> {
        lines_to_plain(&markdown_to_lines(md))
            .lines()
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn heading_and_paragraph() {
        let out = plain("## Preamble\n\nWe, the people of India");
        assert_eq!(out, vec!["## Preamble", "", "We, the people of India"]);
    }

    #[test]
    fn strong_text_is_bold() {
        let lines = markdown_to_lines("Article **21** applies");
        let bold = lines[0]
            .spans
            .iter()
            .find(|s| s.content == "21")
            .expect("bold span");
        assert!(bold.style.add_modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn bullets_and_numbers() {
        let out = plain("* Equality\n* Freedom\n\n1. Justice\n2. Liberty\n");
        assert!(out.contains(&"  • Equality".to_string()));
        assert!(out.contains(&"  • Freedom".to_string()));
        assert!(out.contains(&"  1. Justice".to_string()));
        assert!(out.contains(&"  2. Liberty".to_string()));
    }

    #[test]
    fn nested_list_is_indented() {
        let out = plain("- Rights\n  - Article 14\n  - Article 21\n- Duties\n");
        assert_eq!(
            out,
            vec!["  • Rights", "    • Article 14", "    • Article 21", "  • Duties"]
        );
    }

    #[test]
    fn table_columns_align() {
        let md = "| Article | Right |\n|---|---|\n| 14 | Equality |\n| 21 | Life |\n";
        let out = plain(md);
        assert_eq!(out[0], "Article │ Right");
        assert!(out[1].starts_with("───────"));
        assert!(out[1].contains('┼'));
        assert_eq!(out[2], "14      │ Equality");
        assert_eq!(out[3], "21      │ Life");
    }

    #[test]
    fn table_pads_wide_cells_by_cell_width() {
        let md = "| 条 | Right |\n|---|---|\n| 第十四条 | Equality |\n";
        let lines = markdown_to_lines(md);
        assert_eq!(lines[0].width(), lines[2].width());
        let out = plain(md);
        assert_eq!(out[0], "条       │ Right");
        assert_eq!(out[2], "第十四条 │ Equality");
    }

    #[test]
    fn code_block_lines_are_indented() {
        let out = plain("```\nfn main() {}\n```\n");
        assert_eq!(out, vec!["  fn main() {}"]);
    }

    #[test]
    fn soft_break_joins_lines() {
        let out = plain("first\nsecond");
        assert_eq!(out, vec!["first second"]);
    }
}
