use ratatui::{
    layout::Flex,
    prelude::*,
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Tabs},
};
use tasklist_core::{
    form::Field, list::EmptyState, Filter, NotificationKind, Todo, TodoApp, TodoForm,
};

use crate::input::Screen;

const GRAY_TEXT: Style = Style::new().fg(Color::DarkGray);
const WHITE_TEXT: Style = Style::new().fg(Color::White);
const BLACK_ON_WHITE: Style = Style::new().fg(Color::Black).bg(Color::White);
const TIME_FORMAT: &str = "%b %-d, %Y %H:%M";
const FIELD_PREFIX_WIDTH: u16 = 13;

pub fn draw(frame: &mut Frame, screen: &Screen) {
    let app = &screen.app;
    let [header, bar, body, footer] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Length(4),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    frame.render_widget(header_ui(app), header);
    draw_filter_bar(frame, bar, screen);
    draw_list(frame, body, app);
    frame.render_widget(footer_ui(app), footer);

    if let Some(form) = app.form() {
        draw_form(frame, form, app.is_submitting());
    } else if app.list.confirming().is_some() {
        draw_confirm(frame);
    }
}

fn header_ui(app: &TodoApp) -> Paragraph<'static> {
    let stats = app.stats();
    let mut spans = vec![
        Span::raw(format!("Total: {}  ", stats.total)),
        Span::styled(format!("Completed: {}  ", stats.completed), Style::new().green()),
        Span::styled(format!("Pending: {}", stats.pending()), Style::new().yellow()),
    ];
    if stats.total > 0 {
        spans.push(Span::raw(format!("  Done: {}%", stats.completion_rate())));
    }
    Paragraph::new(Line::from(spans))
        .block(Block::new().title("Todo List").borders(Borders::ALL))
}

fn draw_filter_bar(frame: &mut Frame, area: Rect, screen: &Screen) {
    let app = &screen.app;
    let block = Block::new().borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);
    let [tabs_area, search_area] =
        Layout::vertical([Constraint::Length(1), Constraint::Length(1)]).areas(inner);

    let selected = Filter::ALL
        .iter()
        .position(|&f| f == app.filter())
        .unwrap_or_default();
    let tabs = Tabs::new(["1 All", "2 Pending", "3 Completed"])
        .select(selected)
        .highlight_style(Style::new().bold().reversed());
    frame.render_widget(tabs, tabs_area);

    let mut spans = vec![Span::styled("Search: ", WHITE_TEXT)];
    if app.search().is_empty() && !screen.searching {
        spans.push(Span::styled("press / to search", GRAY_TEXT));
    } else {
        spans.push(Span::raw(app.search().to_string()));
        if screen.searching {
            spans.push(Span::styled(" ", BLACK_ON_WHITE));
        }
    }
    if app.is_narrowed() {
        spans.push(Span::styled(
            format!("   Showing {} of {} todos", app.visible().len(), app.todos().len()),
            GRAY_TEXT,
        ));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), search_area);
}

fn draw_list(frame: &mut Frame, area: Rect, app: &TodoApp) {
    let block = Block::new().title("Todos").borders(Borders::ALL);

    if app.is_loading() {
        let loading = Paragraph::new("Loading todos...")
            .alignment(Alignment::Center)
            .block(block);
        frame.render_widget(loading, area);
        return;
    }

    let visible = app.visible();
    if visible.is_empty() {
        let lines = match app.empty_state() {
            EmptyState::NoTodos => vec![
                Line::from("No todos yet!").bold(),
                Line::styled("Create your first todo to get started", GRAY_TEXT),
            ],
            EmptyState::NoResults(message) => vec![
                Line::from("No todos found").bold(),
                Line::styled(message, GRAY_TEXT),
            ],
        };
        let empty = Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let items: Vec<ListItem> = visible
        .iter()
        .map(|todo| list_item(todo, app.list.is_deleting(todo.id)))
        .collect();
    let list = List::new(items)
        .block(block)
        .highlight_style(Style::new().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
        .highlight_symbol(">> ");

    let mut state = ListState::default().with_selected(app.list.selected());
    frame.render_stateful_widget(list, area, &mut state);
}

fn list_item(todo: &Todo, deleting: bool) -> ListItem<'_> {
    let mut title = vec![Span::raw(if todo.completed { "[x] " } else { "[ ] " })];
    if todo.completed {
        title.push(Span::styled(
            todo.title.as_str(),
            Style::new().add_modifier(Modifier::CROSSED_OUT).fg(Color::DarkGray),
        ));
    } else {
        title.push(Span::raw(todo.title.as_str()));
    }
    if deleting {
        title.push(Span::styled("  deleting...", Style::new().red()));
    }

    let mut lines = vec![Line::from(title)];
    if !todo.description.is_empty() {
        lines.push(Line::from(format!("    {}", todo.description)));
    }
    let mut times = format!("    Created: {}", todo.created_at.format(TIME_FORMAT));
    if todo.was_updated() {
        times.push_str(&format!("  Updated: {}", todo.updated_at.format(TIME_FORMAT)));
    }
    lines.push(Line::styled(times, GRAY_TEXT));

    let style = if deleting { GRAY_TEXT } else { WHITE_TEXT };
    ListItem::new(lines).style(style)
}

fn footer_ui(app: &TodoApp) -> Paragraph<'_> {
    match app.notification() {
        Some(n) => {
            let style = match n.kind {
                NotificationKind::Success => Style::new().black().on_green(),
                NotificationKind::Error => Style::new().white().on_red(),
            };
            Paragraph::new(Line::styled(format!(" {} ", n.message), style))
        }
        None => Paragraph::new(Line::styled(
            "a add  e edit  space toggle  x delete  / search  tab filter  r reload  q quit",
            GRAY_TEXT,
        )),
    }
}

/// A `width` x `height` rect centred in `area`.
fn popup_area(area: Rect, width: u16, height: u16) -> Rect {
    let [area] = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .areas(area);
    let [area] = Layout::horizontal([Constraint::Length(width)])
        .flex(Flex::Center)
        .areas(area);
    area
}

fn draw_form(frame: &mut Frame, form: &TodoForm, submitting: bool) {
    let title = if form.is_editing() { "Edit Todo" } else { "Add New Todo" };
    let area = popup_area(frame.area(), 70, if form.is_editing() { 8 } else { 7 });
    // Borders and prefix take part of the row; fields scroll within the rest.
    let width = usize::from(area.width.saturating_sub(2 + FIELD_PREFIX_WIDTH)).max(1);

    let mut lines = vec![
        field_line(
            "Title:       ",
            "What needs to be done?",
            &form.title,
            form,
            Field::Title,
            width,
        ),
        field_line(
            "Description: ",
            "Add some details (optional)",
            &form.description,
            form,
            Field::Description,
            width,
        ),
    ];
    if form.is_editing() {
        let mark = if form.completed { "[x]" } else { "[ ]" };
        let style = if form.focus() == Field::Completed { BLACK_ON_WHITE } else { WHITE_TEXT };
        lines.push(Line::from(vec![
            Span::styled("Completed:   ", WHITE_TEXT),
            Span::styled(mark, style),
        ]));
    }
    lines.push(Line::default());
    if let Some(err) = form.error() {
        lines.push(Line::styled(err.to_string(), Style::new().red()));
    } else {
        lines.push(Line::default());
    }
    if submitting {
        lines.push(Line::styled("Saving...", Style::new().yellow()));
    } else {
        let action = if form.is_editing() { "update" } else { "create" };
        let enter = if form.can_submit() { WHITE_TEXT } else { GRAY_TEXT };
        lines.push(Line::from(vec![
            Span::styled(format!("enter {action}"), enter),
            Span::styled("  tab next field  esc cancel", GRAY_TEXT),
        ]));
    }

    let popup = Paragraph::new(lines)
        .block(Block::new().title(title).borders(Borders::ALL));
    frame.render_widget(Clear, area);
    frame.render_widget(popup, area);
}

/// One text field on a single row. The focused field shows the character
/// under the cursor inverted and scrolls so the cursor stays within `width`;
/// an empty field shows its placeholder in gray.
fn field_line<'a>(
    prefix: &'a str,
    placeholder: &'a str,
    value: &'a str,
    form: &TodoForm,
    field: Field,
    width: usize,
) -> Line<'a> {
    let mut spans = vec![Span::styled(prefix, WHITE_TEXT)];
    let focused = form.focus() == field;

    if value.is_empty() {
        if focused {
            let first_len = placeholder.chars().next().map_or(0, char::len_utf8);
            let (first, rest) = placeholder.split_at(first_len);
            spans.push(Span::styled(first, BLACK_ON_WHITE));
            spans.push(Span::styled(rest, GRAY_TEXT));
        } else {
            spans.push(Span::styled(placeholder, GRAY_TEXT));
        }
        return Line::from(spans);
    }

    let len = value.chars().count();
    let cursor = if focused { form.cursor().min(len) } else { 0 };
    // One cell is kept for the cursor past the last char.
    let start = (cursor + 1).saturating_sub(width);
    let end = (start + width).min(len);
    let byte = |n: usize| value.char_indices().nth(n).map_or(value.len(), |(i, _)| i);
    let shown = &value[byte(start)..byte(end)];

    if !focused {
        spans.push(Span::styled(shown, WHITE_TEXT));
        return Line::from(spans);
    }

    let at = shown
        .char_indices()
        .nth(cursor - start)
        .map_or(shown.len(), |(i, _)| i);
    let (before, after) = shown.split_at(at);
    spans.push(Span::styled(before, WHITE_TEXT));
    match after.chars().next() {
        Some(ch) => {
            let (under, rest) = after.split_at(ch.len_utf8());
            spans.push(Span::styled(under, BLACK_ON_WHITE));
            spans.push(Span::styled(rest, WHITE_TEXT));
        }
        None => spans.push(Span::styled(" ", BLACK_ON_WHITE)),
    }
    Line::from(spans)
}

fn draw_confirm(frame: &mut Frame) {
    let area = popup_area(frame.area(), 36, 3);
    let confirm = Paragraph::new(Line::from(vec![
        Span::raw("Delete this todo? "),
        Span::styled("y", Style::new().bold()),
        Span::raw("/"),
        Span::styled("n", Style::new().bold()),
    ]))
    .alignment(Alignment::Center)
    .block(Block::new().borders(Borders::ALL).red());
    frame.render_widget(Clear, area);
    frame.render_widget(confirm, area);
}

#[cfg(test)]
mod tests {
    use std::time::Instant;

    use ratatui::backend::TestBackend;
    use tasklist_core::ApiReply;

    use super::*;

    fn todo(id: i64, title: &str, description: &str, completed: bool, updated: &str) -> Todo {
        serde_json::from_value(serde_json::json!({
            "id": id, "title": title, "description": description, "completed": completed,
            "createdAt": "2024-05-01T10:00:00", "updatedAt": updated
        }))
        .unwrap()
    }

    fn render(screen: &Screen) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|f| draw(f, screen)).unwrap();
        let buffer = terminal.backend().buffer();
        buffer
            .content
            .chunks(buffer.area.width as usize)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn loaded(todos: Vec<Todo>) -> Screen {
        let mut screen = Screen::default();
        let call = screen.app.load();
        screen.app.apply(call, Ok(ApiReply::Loaded(todos)), Instant::now());
        screen
    }

    #[test]
    fn loading_placeholder() {
        let text = render(&Screen::default());
        assert!(text.contains("Loading todos..."));
    }

    #[test]
    fn empty_states() {
        let mut screen = loaded(Vec::new());
        let text = render(&screen);
        assert!(text.contains("No todos yet!"));
        assert!(!text.contains("Done:"));

        screen.app.set_filter(Filter::Completed);
        let text = render(&screen);
        assert!(text.contains("No todos found"));
        assert!(text.contains("No completed todos found"));
    }

    #[test]
    fn items_and_stats() {
        let screen = loaded(vec![
            todo(2, "Walk dog", "park", true, "2024-05-02T08:30:00"),
            todo(1, "Buy milk", "", false, "2024-05-01T10:00:00"),
        ]);
        let text = render(&screen);
        assert!(text.contains("Total: 2"));
        assert!(text.contains("Done: 50%"));
        assert!(text.contains("[x] Walk dog"));
        assert!(text.contains("park"));
        assert!(text.contains("Updated: May 2, 2024 08:30"));
        assert!(text.contains("[ ] Buy milk"));
        assert_eq!(text.matches("Updated:").count(), 1);
        assert!(!text.contains("Showing"));
    }

    #[test]
    fn narrowed_view_shows_counts() {
        let mut screen = loaded(vec![
            todo(2, "Walk dog", "", true, "2024-05-01T10:00:00"),
            todo(1, "Buy milk", "", false, "2024-05-01T10:00:00"),
        ]);
        screen.app.set_search("milk");
        let text = render(&screen);
        assert!(text.contains("Showing 1 of 2 todos"));
        assert!(!text.contains("Walk dog"));
    }

    #[test]
    fn edit_form_has_completed_checkbox() {
        let mut screen = loaded(vec![todo(1, "Buy milk", "", false, "2024-05-01T10:00:00")]);
        screen.app.open_create_form();
        let text = render(&screen);
        assert!(text.contains("Add New Todo"));
        assert!(!text.contains("Completed:   "));

        screen.app.close_form();
        screen.app.open_edit_form(1);
        let text = render(&screen);
        assert!(text.contains("Edit Todo"));
        assert!(text.contains("Completed:   [ ]"));

        let call = screen.app.submit_form().unwrap();
        assert!(render(&screen).contains("Saving..."));
        let saved = todo(1, "Buy milk", "", false, "2024-05-01T10:00:00");
        screen.app.apply(call, Ok(ApiReply::Saved(saved)), Instant::now());
        assert!(render(&screen).contains("Todo updated successfully!"));
    }

    #[test]
    fn long_description_scrolls_and_keeps_error_visible() {
        let mut screen = loaded(Vec::new());
        screen.app.open_create_form();
        let form = screen.app.form_mut().unwrap();
        form.next_field();
        for _ in 0..300 {
            form.input('d');
        }
        assert_eq!(screen.app.submit_form(), None);

        let text = render(&screen);
        assert!(text.contains("Please enter a title"));
        assert!(text.contains("enter create"));
        let row = text.lines().find(|l| l.contains("Description: ")).unwrap();
        let field = row.split("Description: ").nth(1).unwrap();
        let field = field.split('│').next().unwrap();
        // 55 columns: the last 54 chars plus the cursor cell.
        assert_eq!(field.matches('d').count(), 54);
    }

    #[test]
    fn deleting_marker_and_confirmation() {
        let mut screen = loaded(vec![todo(1, "Buy milk", "", false, "2024-05-01T10:00:00")]);
        screen.app.select_next();
        screen.app.request_delete_selected();
        assert!(render(&screen).contains("Delete this todo? y/n"));

        screen.app.confirm_delete();
        assert!(render(&screen).contains("deleting..."));
    }
}
