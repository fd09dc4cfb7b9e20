use ratatui::style::Style;
use ratatui::text::{Line, Span};

/// Terminal cells taken by `s`. Wide glyphs count two.
pub fn text_width(s: &str) -> usize {
    Span::raw(s).width()
}

fn char_width(c: char) -> usize {
    let mut buf = [0u8; 4];
    text_width(c.encode_utf8(&mut buf))
}

#[derive(Clone, Copy)]
struct Cell {
    ch: char,
    style: Style,
    width: usize,
}

/// Wrap a styled Line so no row is wider than `width` cells.
///
/// Breaks at the last space that fits; a word longer than a row is split.
/// Each row keeps the span styles plus the line's own style and alignment.
pub fn wrap_styled_line(line: Line<'static>, width: usize) -> Vec<Line<'static>> {
    if width == 0 || line.width() <= width {
        return vec![line];
    }

    let cells: Vec<Cell> = line
        .spans
        .iter()
        .flat_map(|span| {
            span.content.chars().map(move |ch| Cell {
                ch,
                style: span.style,
                width: char_width(ch),
            })
        })
        .collect();

    let mut rows: Vec<Line<'static>> = Vec::new();
    let mut start = 0;
    while start < cells.len() {
        let mut used = 0;
        let mut end = start;
        while end < cells.len() && used + cells[end].width <= width {
            used += cells[end].width;
            end += 1;
        }
        // A single glyph wider than the row still has to go somewhere.
        if end == start {
            end = start + 1;
        }
        if end == cells.len() {
            rows.push(cells_to_line(&cells[start..]));
            break;
        }

        let break_at = if cells[end].ch == ' ' {
            end
        } else {
            match cells[start..end].iter().rposition(|c| c.ch == ' ') {
                Some(sp) if sp > 0 => start + sp,
                _ => end,
            }
        };
        rows.push(cells_to_line(&cells[start..break_at]));
        start = break_at;
        if start < cells.len() && cells[start].ch == ' ' {
            start += 1;
        }
    }

    if rows.is_empty() {
        rows.push(Line::from(""));
    }
    rows.into_iter()
        .map(|row| {
            let row = row.style(line.style);
            match line.alignment {
                Some(alignment) => row.alignment(alignment),
                None => row,
            }
        })
        .collect()
}

pub fn wrap_lines(lines: Vec<Line<'static>>, width: usize) -> Vec<Line<'static>> {
    lines
        .into_iter()
        .flat_map(|l| wrap_styled_line(l, width))
        .collect()
}

/// Group runs of equally styled cells back into spans.
fn cells_to_line(cells: &[Cell]) -> Line<'static> {
    let mut spans: Vec<Span<'static>> = Vec::new();
    let mut text = String::new();
    let mut style = cells.first().map(|c| c.style).unwrap_or_default();

    for cell in cells {
        if cell.style != style && !text.is_empty() {
            spans.push(Span::styled(std::mem::take(&mut text), style));
        }
        style = cell.style;
        text.push(cell.ch);
    }
    if !text.is_empty() {
        spans.push(Span::styled(text, style));
    }

    Line::from(spans)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::layout::Alignment;
    use ratatui::style::{Color, Modifier};

    fn text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn short_line_untouched() {
        let out = wrap_styled_line(Line::from("Article 21"), 20);
        assert_eq!(out.len(), 1);
        assert_eq!(text(&out[0]), "Article 21");
    }

    #[test]
    fn breaks_at_spaces() {
        let out = wrap_styled_line(Line::from("equality before the law"), 12);
        let rows: Vec<String> = out.iter().map(text).collect();
        assert_eq!(rows, vec!["equality", "before the", "law"]);
    }

    #[test]
    fn long_word_is_split() {
        let out = wrap_styled_line(Line::from("abcdefghij"), 4);
        let rows: Vec<String> = out.iter().map(text).collect();
        assert_eq!(rows, vec!["abcd", "efgh", "ij"]);
    }

    #[test]
    fn styles_survive_breaks() {
        let bold = Style::default().add_modifier(Modifier::BOLD);
        let line = Line::from(vec![
            Span::styled("Right to", bold),
            Span::styled(" equality", Style::default().fg(Color::Green)),
        ]);
        let out = wrap_styled_line(line, 9);
        assert_eq!(text(&out[0]), "Right to");
        assert_eq!(out[0].spans[0].style, bold);
        assert_eq!(text(&out[1]), "equality");
        assert_eq!(out[1].spans[0].style.fg, Some(Color::Green));
    }

    #[test]
    fn wide_glyphs_fit_the_row() {
        let input = format!("भारत {} END", "📜".repeat(20));
        let out = wrap_lines(vec![Line::from(input.clone())], 20);
        assert!(out.len() > 1);
        for row in &out {
            assert!(row.width() <= 20, "row {:?} is {} cells", text(row), row.width());
        }
        let joined: String = out.iter().map(text).collect::<Vec<_>>().join(" ");
        assert_eq!(joined.replace(' ', ""), input.replace(' ', ""));
    }

    #[test]
    fn cjk_text_is_not_lost() {
        let input = "法律面前人人平等，国家不得拒绝任何人在法律面前的平等";
        let out = wrap_styled_line(Line::from(input), 11);
        for row in &out {
            assert!(row.width() <= 11);
        }
        let joined: String = out.iter().map(text).collect();
        assert_eq!(joined, input);
    }

    #[test]
    fn alignment_and_line_style_carry_over() {
        let style = Style::default().fg(Color::Blue);
        let line = Line::from("You got 3 / 5 correct")
            .style(style)
            .alignment(Alignment::Center);
        let out = wrap_styled_line(line, 10);
        assert!(out.len() > 1);
        for row in &out {
            assert_eq!(row.alignment, Some(Alignment::Center));
            assert_eq!(row.style, style);
        }
    }
}
