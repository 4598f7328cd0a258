use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Tabs, Wrap},
};
use unicode_width::UnicodeWidthStr;

use crate::books::BookSummary;
use crate::catalog::CATEGORIES;
use crate::rating::{StarKind, star_line, summary_text};
use crate::review::{ReadingStatus, ReviewField};
use crate::tui::app::TuiApp;
use crate::tui::state::{DetailFocus, DetailState, HomeFocus, Screen, Status, lock, truncate_display};
use crate::tui::theme::Theme;

const SPINNER: &str = "…";

impl TuiApp {
    pub fn view(&self, f: &mut Frame) {
        let size = f.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Header
                Constraint::Min(1),    // Screen
                Constraint::Length(1), // Footer
            ])
            .split(size);

        self.render_header(f, chunks[0]);
        match self.screen {
            Screen::Home => self.render_home(f, chunks[1]),
            Screen::Results => self.render_results(f, chunks[1]),
            Screen::Detail => self.render_detail(f, chunks[1]),
        }
        self.render_footer(f, chunks[2]);
    }

    fn render_header(&self, f: &mut Frame, area: Rect) {
        let status = match self.status {
            Status::Idle => "",
            Status::Loading => SPINNER,
            Status::Error => "!",
        };
        let screen = match self.screen {
            Screen::Home => "Home".to_string(),
            Screen::Results => format!("Results for \"{}\"", self.results.query),
            Screen::Detail => "Book".to_string(),
        };
        let text = format!("{} · {screen} {status}", self.title);
        let header = Paragraph::new(truncate_display(&text, area.width as usize))
            .style(self.theme.header_style);
        f.render_widget(header, area);
    }

    fn render_footer(&self, f: &mut Frame, area: Rect) {
        let (text, style) = match &self.notice {
            Some(n) => (n.clone(), self.theme.notice_style),
            None => (self.key_help().to_string(), self.theme.footer_style),
        };
        f.render_widget(
            Paragraph::new(truncate_display(&text, area.width as usize)).style(style),
            area,
        );
    }

    fn key_help(&self) -> &'static str {
        match self.screen {
            Screen::Home => match self.home_focus {
                HomeFocus::Search => "type to search · ↑↓ pick · Enter open/search · Tab next · Ctrl+C quit",
                HomeFocus::Categories => "←→ category · Enter browse · Tab next · Ctrl+C quit",
                HomeFocus::Shelf => "↑↓ move · Enter open · Tab next · Ctrl+C quit",
            },
            Screen::Results => "↑↓ move · Enter open · Esc back · Ctrl+C quit",
            Screen::Detail => "Tab next field · ←→/1-5 rate · Enter choose/save · Esc back",
        }
    }

    fn focus_block<'a>(&self, title: &'a str, focused: bool) -> Block<'a> {
        let block = Block::default().borders(Borders::ALL).title(title);
        if focused {
            block.border_style(self.theme.focus_border_style)
        } else {
            block.border_style(self.theme.muted_style)
        }
    }

    fn render_home(&self, f: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Search box
                Constraint::Length(3), // Categories
                Constraint::Min(1),    // Shelf
            ])
            .split(area);

        let search_focused = self.home_focus == HomeFocus::Search;
        let text = lock(&self.search_text).clone();
        let input = Paragraph::new(format!("> {text}"))
            .style(self.theme.input_style)
            .block(self.focus_block("Search books", search_focused));
        f.render_widget(input, chunks[0]);
        if search_focused {
            f.set_cursor_position((input_cursor_x(chunks[0], &text), chunks[0].y + 1));
        }

        let titles: Vec<Line> = CATEGORIES.iter().map(|c| Line::from(c.name)).collect();
        let tabs = Tabs::new(titles)
            .select(self.category_index)
            .style(self.theme.text_style)
            .highlight_style(self.theme.completion_selected_style)
            .block(self.focus_block("Categories", self.home_focus == HomeFocus::Categories));
        f.render_widget(tabs, chunks[1]);

        self.render_shelf(f, chunks[2]);

        // popup last so it overlays the shelf
        let (items, visible, selected) = self.suggestion_snapshot();
        if visible && !items.is_empty() {
            render_suggestions(f, chunks[0], area, &items, selected, &self.theme);
        }
    }

    fn render_shelf(&self, f: &mut Frame, area: Rect) {
        let focused = self.home_focus == HomeFocus::Shelf;
        let Some(shelf) = &self.shelf else {
            let p = Paragraph::new(format!("Loading{SPINNER}"))
                .style(self.theme.muted_style)
                .block(self.focus_block("Books", focused));
            f.render_widget(p, area);
            return;
        };
        let block = self.focus_block(&shelf.heading, focused);
        if let Some(msg) = &shelf.message {
            f.render_widget(
                Paragraph::new(msg.as_str())
                    .style(self.theme.muted_style)
                    .block(block),
                area,
            );
            return;
        }
        let selected = focused.then_some(self.shelf_index);
        render_book_list(f, area, block, &shelf.books, selected, &self.theme);
    }

    fn render_results(&self, f: &mut Frame, area: Rect) {
        let block = self.focus_block("Search results", true);
        if self.results.loading {
            let p = Paragraph::new(format!("Searching{SPINNER}"))
                .style(self.theme.muted_style)
                .block(block);
            f.render_widget(p, area);
            return;
        }
        if self.results.books.is_empty() {
            let p = Paragraph::new(format!("No books found for \"{}\".", self.results.query))
                .style(self.theme.muted_style)
                .block(block);
            f.render_widget(p, area);
            return;
        }
        render_book_list(
            f,
            area,
            block,
            &self.results.books,
            Some(self.results.selected),
            &self.theme,
        );
    }

    fn render_detail(&self, f: &mut Frame, area: Rect) {
        let Some(detail) = &self.detail else {
            return;
        };
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(6),    // Book info
                Constraint::Length(3), // Your rating
                Constraint::Length(3), // Reading status
                Constraint::Length(8), // Review form
            ])
            .split(area);

        self.render_book_info(f, chunks[0], detail);

        let own: String = detail.rating.stars().into_iter().map(StarKind::glyph).collect();
        let stars = Paragraph::new(Line::from(vec![
            Span::styled(own, self.theme.star_style),
            Span::raw(format!("  {}/5", detail.rating.committed())),
        ]))
        .block(self.focus_block("Your rating", detail.focus == DetailFocus::Stars));
        f.render_widget(stars, chunks[1]);

        let status_spans: Vec<Span> = ReadingStatus::ALL
            .iter()
            .enumerate()
            .flat_map(|(i, s)| {
                let mut style = self.theme.text_style;
                if detail.status == Some(*s) {
                    style = style.add_modifier(Modifier::BOLD | Modifier::UNDERLINED);
                }
                if detail.focus == DetailFocus::Status && detail.status_cursor == i {
                    style = self.theme.completion_selected_style;
                }
                [Span::styled(format!("[{}]", s.label()), style), Span::raw("  ")]
            })
            .collect();
        f.render_widget(
            Paragraph::new(Line::from(status_spans))
                .block(self.focus_block("Reading status", detail.focus == DetailFocus::Status)),
            chunks[2],
        );

        self.render_review_form(f, chunks[3], detail);
    }

    fn render_book_info(&self, f: &mut Frame, area: Rect, detail: &DetailState) {
        let block = self.focus_block("Book", false);
        let Some(book) = &detail.book else {
            let msg = detail
                .error
                .clone()
                .unwrap_or_else(|| format!("Loading{SPINNER}"));
            f.render_widget(
                Paragraph::new(msg).style(self.theme.muted_style).block(block),
                area,
            );
            return;
        };
        let mut lines = vec![
            Line::styled(book.title.clone(), self.theme.header_style),
            Line::from(book.authors.clone()),
            Line::styled(
                format!("Year: {}   Categories: {}", book.year, book.categories),
                self.theme.muted_style,
            ),
            Line::from(vec![
                Span::styled(star_line(book.average_rating), self.theme.star_style),
                Span::raw(" "),
                Span::raw(summary_text(book.average_rating, book.ratings_count)),
            ]),
        ];
        if let Some(cover) = &book.cover {
            lines.push(Line::styled(format!("Cover: {cover}"), self.theme.muted_style));
        }
        lines.push(Line::from(""));
        lines.push(Line::from(book.description.clone()));
        f.render_widget(
            Paragraph::new(lines)
                .style(self.theme.text_style)
                .wrap(Wrap { trim: true })
                .block(block),
            area,
        );
    }

    fn render_review_form(&self, f: &mut Frame, area: Rect, detail: &DetailState) {
        let mut lines: Vec<Line> = ReviewField::ALL
            .iter()
            .map(|field| {
                let focused = detail.focus == DetailFocus::Review(*field);
                let value = detail.draft.field(*field).replace('\n', " ⏎ ");
                let marker = if focused { "▸ " } else { "  " };
                let style = if focused {
                    self.theme.input_style.add_modifier(Modifier::BOLD)
                } else {
                    self.theme.text_style
                };
                Line::styled(format!("{marker}{}: {value}", field.label()), style)
            })
            .collect();
        let save_style = if detail.focus == DetailFocus::Save {
            self.theme.completion_selected_style
        } else {
            self.theme.text_style
        };
        lines.push(Line::styled("[ Save review ]", save_style));
        let focused = matches!(detail.focus, DetailFocus::Review(_) | DetailFocus::Save);
        f.render_widget(
            Paragraph::new(lines).block(self.focus_block("Review", focused)),
            area,
        );
    }
}

/// Column after the last typed cell, inside the bordered `> ` prompt.
fn input_cursor_x(area: Rect, text: &str) -> u16 {
    let col = u16::try_from(UnicodeWidthStr::width(text)).unwrap_or(u16::MAX);
    let x = area.x.saturating_add(3).saturating_add(col);
    x.min(area.right().saturating_sub(2))
}

fn book_line(b: &BookSummary, width: usize) -> String {
    truncate_display(
        &format!("{} by {}", b.display_title(), b.display_authors()),
        width,
    )
}

fn render_book_list(
    f: &mut Frame,
    area: Rect,
    block: Block,
    books: &[BookSummary],
    selected: Option<usize>,
    theme: &Theme,
) {
    let width = area.width.saturating_sub(5) as usize;
    let items: Vec<ListItem> = books
        .iter()
        .map(|b| ListItem::new(book_line(b, width)).style(theme.text_style))
        .collect();
    let list = List::new(items)
        .block(block)
        .highlight_style(theme.completion_selected_style)
        .highlight_symbol("> ");
    let mut state = ListState::default().with_selected(selected);
    f.render_stateful_widget(list, area, &mut state);
}

/// Popup directly under the search box, clipped to `bounds`.
fn render_suggestions(
    f: &mut Frame,
    anchor: Rect,
    bounds: Rect,
    items: &[BookSummary],
    selected: Option<usize>,
    theme: &Theme,
) {
    let height = (items.len() as u16 + 2).min(bounds.bottom().saturating_sub(anchor.bottom()));
    if height < 3 {
        return;
    }
    let popup = Rect {
        x: anchor.x + 2,
        y: anchor.bottom(),
        width: anchor.width.saturating_sub(4),
        height,
    };
    let width = popup.width.saturating_sub(2) as usize;
    let rows: Vec<ListItem> = items
        .iter()
        .enumerate()
        .map(|(i, b)| {
            let style = if Some(i) == selected {
                theme.completion_selected_style
            } else {
                theme.completion_style
            };
            ListItem::new(book_line(b, width)).style(style)
        })
        .collect();
    f.render_widget(Clear, popup);
    f.render_widget(
        List::new(rows).block(Block::default().borders(Borders::ALL).title("Suggestions")),
        popup,
    );
}
