//! The UI renders the application state into something visible and navigable.
//!
//! The draw function dispatches based on the current view. The page view shows the navigation
//! bar on top, the one visible section below it, and a help bar; the dropdown view additionally
//! overlays the option list.

use crate::app_state::{AppState, View};
use crate::page::{NavControl, Page, SectionContent, SectionView};
use crate::section::Block as ContentBlock;
use crate::text::achievement_marker;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap},
    Frame,
};

/// Renders the active view based on current application state.
pub fn draw(f: &mut Frame, app: &AppState) {
    match app.current_view {
        View::FileList => draw_file_list(f, app),
        View::Page => draw_page(f, app),
        View::Dropdown => {
            draw_page(f, app);
            draw_dropdown(f, app);
        }
    }
}

fn bordered(title: impl Into<Line<'static>>) -> Block<'static> {
    Block::default().borders(Borders::ALL).title(title)
}

fn draw_file_list(f: &mut Frame, app: &AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(3)])
        .split(f.area());

    let items: Vec<ListItem> = app
        .files
        .iter()
        .enumerate()
        .map(|(i, path)| {
            let style = if i == app.current_file_index {
                Style::default().add_modifier(Modifier::REVERSED)
            } else {
                Style::default()
            };
            ListItem::new(format!("📄 {}", path.display())).style(style)
        })
        .collect();

    let list = List::new(items).block(bordered(format!("Documents ({})", app.files.len())));
    f.render_widget(list, chunks[0]);

    let help = app
        .message
        .clone()
        .unwrap_or_else(|| "↑/↓: Navigate | Enter: Open | q: Quit".to_string());
    f.render_widget(Paragraph::new(help).block(bordered("")), chunks[1]);
}

fn draw_page(f: &mut Frame, app: &AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Navigation
            Constraint::Min(0),    // Visible section
            Constraint::Length(3), // Help
        ])
        .split(f.area());

    let Some(navigator) = app.navigator.as_deref() else {
        f.render_widget(Paragraph::new("No document open").block(bordered("")), chunks[1]);
        return;
    };
    let page = navigator.page();

    f.render_widget(
        Paragraph::new(nav_line(page, app.focus)).block(bordered(page.title.clone())),
        chunks[0],
    );

    let content = match page.visible() {
        Some(section) => {
            let title = if section.header_hidden {
                section.title.clone()
            } else {
                String::new()
            };
            Paragraph::new(section_lines(section))
                .block(bordered(title))
                .wrap(Wrap { trim: false })
                .scroll((page.scroll_offset, 0))
        }
        None => Paragraph::new("Nothing to show").block(bordered("")),
    };
    f.render_widget(content, chunks[1]);

    let help = if let Some(ref msg) = app.message {
        msg.clone()
    } else if app.current_view == View::Dropdown {
        "↑/↓: Choose | Enter: Select | Esc: Close".to_string()
    } else {
        "←/→: Focus | Enter: Open | t: Toggle section | ↑/↓/PgUp/PgDn: Scroll | q: Quit"
            .to_string()
    };
    f.render_widget(Paragraph::new(help).block(bordered("")), chunks[2]);
}

fn nav_line(page: &Page, focus: usize) -> Line<'static> {
    let mut spans = Vec::new();

    for (i, control) in page.nav.controls.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw(" "));
        }

        let (text, mut style) = match control {
            NavControl::Button(button) => {
                let style = if button.active {
                    Style::default()
                        .fg(Color::Black)
                        .bg(Color::Cyan)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default()
                };
                (format!(" {} ", button.label), style)
            }
            NavControl::Dropdown(dropdown) => {
                let mut style = if dropdown.selected > 0 {
                    Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(Color::DarkGray)
                };
                if dropdown.focused {
                    style = style.add_modifier(Modifier::REVERSED);
                }
                (format!(" {} ▾ ", dropdown.label()), style)
            }
        };

        if i == focus {
            style = style.add_modifier(Modifier::UNDERLINED);
        }
        spans.push(Span::styled(text, style));
    }

    Line::from(spans)
}

fn section_lines(section: &SectionView) -> Vec<Line<'static>> {
    let mut lines = Vec::new();

    if !section.header_hidden {
        let icon = if section.collapsed { "▶ " } else { "▼ " };
        lines.push(Line::from(vec![
            Span::styled(icon, Style::default().fg(Color::Cyan)),
            Span::styled(
                section.title.clone(),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
        ]));
        lines.push(Line::raw(""));
    }

    if section.collapsed {
        return lines;
    }

    match &section.content {
        SectionContent::Blocks(blocks) => push_blocks(&mut lines, blocks),
        SectionContent::Panels(panels) => {
            if let Some(panel) = panels.iter().find(|p| p.active) {
                push_blocks(&mut lines, &panel.blocks);
            }
        }
    }

    lines
}

fn push_blocks(lines: &mut Vec<Line<'static>>, blocks: &[ContentBlock]) {
    for block in blocks {
        match block {
            ContentBlock::Heading { level, title } => lines.push(Line::styled(
                format!("{} {title}", "#".repeat(*level)),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )),
            ContentBlock::Text(text) => lines.extend(text.lines().map(text_line)),
        }
        lines.push(Line::raw(""));
    }
}

fn text_line(line: &str) -> Line<'static> {
    match achievement_marker(line) {
        Some((before, marker)) => Line::from(vec![
            Span::raw(before.to_string()),
            Span::styled(
                format!("★ {marker}"),
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        None => Line::raw(line.to_string()),
    }
}

fn draw_dropdown(f: &mut Frame, app: &AppState) {
    let Some(dropdown) = app
        .navigator
        .as_deref()
        .and_then(|nav| nav.page().nav.dropdown())
    else {
        return;
    };

    let widest = dropdown
        .options
        .iter()
        .map(|o| o.label.chars().count())
        .chain(std::iter::once(dropdown.placeholder.chars().count()))
        .max()
        .unwrap_or(0);
    let width = u16::try_from(widest + 4).unwrap_or(u16::MAX);
    let height = u16::try_from(dropdown.options.len() + 2).unwrap_or(u16::MAX);
    let area = popup_area(f.area(), width, height);

    let items: Vec<ListItem> = dropdown
        .options
        .iter()
        .enumerate()
        .map(|(i, option)| {
            let style = if i == app.dropdown_cursor {
                Style::default().add_modifier(Modifier::REVERSED)
            } else {
                Style::default()
            };
            ListItem::new(option.label.clone()).style(style)
        })
        .collect();

    f.render_widget(Clear, area);
    f.render_widget(
        List::new(items).block(bordered(dropdown.placeholder.clone())),
        area,
    );
}

/// Rectangle just below the navigation bar, centred horizontally.
fn popup_area(area: Rect, width: u16, height: u16) -> Rect {
    let top = area.y.saturating_add(3);
    let width = width.min(area.width);
    let height = height.min(area.height.saturating_sub(3));
    Rect {
        x: area.x + (area.width - width) / 2,
        y: top,
        width,
        height,
    }
}
