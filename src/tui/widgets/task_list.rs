use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{
    Block, Borders, List, ListItem, ListState, Scrollbar, ScrollbarOrientation, ScrollbarState,
    StatefulWidget,
};

use crate::Config;
use crate::models::{Priority, Task};
use crate::tui::widgets::color::{get_contrast_text_color, parse_color};
use crate::utils::{format_date, now_millis};
use crate::views::{DueStatus, SortDirection, SortMode, due_status};

fn priority_color(priority: Priority) -> ratatui::style::Color {
    match priority {
        Priority::High => ratatui::style::Color::Red,
        Priority::Medium => ratatui::style::Color::Yellow,
        Priority::Low => ratatui::style::Color::Gray,
    }
}

fn due_color(status: DueStatus) -> ratatui::style::Color {
    match status {
        DueStatus::Overdue => ratatui::style::Color::Red,
        DueStatus::Today => ratatui::style::Color::Yellow,
        DueStatus::Soon => ratatui::style::Color::Cyan,
        DueStatus::Later | DueStatus::Completed => ratatui::style::Color::DarkGray,
    }
}

/// One rendered task row: completion marker, title, then priority and due
/// badges. Completed tasks are struck through and dimmed.
pub fn task_row<'a>(task: &Task, fg: ratatui::style::Color, max_width: usize) -> Line<'a> {
    let marker = if task.completed { "✓ " } else { "○ " };

    let mut title = task.title.clone();
    let badges_width = 24; // rough space kept for badges
    let title_max = max_width.saturating_sub(badges_width).max(8);
    if title.chars().count() > title_max {
        title = title
            .chars()
            .take(title_max.saturating_sub(3))
            .collect::<String>()
            + "...";
    }

    let title_style = if task.completed {
        Style::default()
            .fg(ratatui::style::Color::DarkGray)
            .add_modifier(Modifier::CROSSED_OUT)
    } else {
        Style::default().fg(fg)
    };

    let mut spans = vec![
        Span::styled(marker.to_string(), Style::default().fg(fg)),
        Span::styled(title, title_style),
    ];

    if let Some(priority) = task.priority {
        spans.push(Span::raw(" "));
        spans.push(Span::styled(
            format!("[{}]", priority.label()),
            Style::default().fg(priority_color(priority)),
        ));
    }

    if let Some(due) = task.due_date {
        let status = due_status(due, now_millis(), task.completed);
        spans.push(Span::raw(" "));
        spans.push(Span::styled(
            format!("[{}]", format_date(due)),
            Style::default().fg(due_color(status)),
        ));
    }

    Line::from(spans)
}

/// Render the active list's tasks with a scrollbar when they overflow
#[allow(clippy::too_many_arguments)]
pub fn render_task_list(
    f: &mut Frame,
    area: Rect,
    tasks: &[Task],
    list_title: &str,
    list_state: &mut ListState,
    sort_mode: SortMode,
    sort_direction: SortDirection,
    show_completed: bool,
    config: &Config,
) {
    let active_theme = config.get_active_theme();
    let fg_color = parse_color(&active_theme.fg);
    let highlight_bg = parse_color(&active_theme.highlight_bg);
    let highlight_fg = if active_theme.highlight_fg.is_empty() {
        get_contrast_text_color(highlight_bg)
    } else {
        parse_color(&active_theme.highlight_fg)
    };

    let max_width = area.width.saturating_sub(4) as usize;
    let open_count = tasks.iter().filter(|t| !t.completed).count();

    let items: Vec<ListItem> = if tasks.is_empty() {
        vec![ListItem::new(Span::styled(
            "No tasks here. Press n to create one.",
            Style::default().fg(ratatui::style::Color::DarkGray),
        ))]
    } else {
        tasks
            .iter()
            .map(|task| ListItem::new(task_row(task, fg_color, max_width)))
            .collect()
    };

    // Reserve the rightmost column for the scrollbar
    let list_areas = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(area);
    let list_area = list_areas[0];
    let scrollbar_area = list_areas[1];

    let completed_note = if show_completed { "" } else { " [hiding done]" };
    let title = format!(
        "{} - {} open ({} {}){}",
        list_title,
        open_count,
        sort_mode.label(),
        sort_direction.label(),
        completed_note
    );

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(title))
        .style(Style::default().fg(fg_color))
        .highlight_style(Style::default().fg(highlight_fg).bg(highlight_bg));

    StatefulWidget::render(list, list_area, f.buffer_mut(), list_state);

    render_scrollbar(f, list_area, scrollbar_area, tasks.len(), list_state);
}

/// Scrollbar helper shared by the scrolling lists
pub fn render_scrollbar(
    f: &mut Frame,
    list_area: Rect,
    scrollbar_area: Rect,
    total_items: usize,
    list_state: &ListState,
) {
    let visible_items = list_area.height.saturating_sub(2) as usize;
    if total_items <= visible_items || scrollbar_area.width == 0 || list_area.height <= 2 {
        return;
    }

    let scrollbar_inner_area = Rect::new(
        scrollbar_area.x,
        list_area.y + 1,
        scrollbar_area.width,
        list_area.height.saturating_sub(2),
    );
    if scrollbar_inner_area.height == 0 {
        return;
    }

    let selected_index = list_state.selected().unwrap_or(0);
    let scroll_position = if selected_index < visible_items {
        0
    } else {
        selected_index.saturating_sub(visible_items - 1)
    };

    let mut scrollbar_state = ScrollbarState::new(total_items)
        .viewport_content_length(visible_items)
        .position(scroll_position);

    let scrollbar = Scrollbar::default()
        .orientation(ScrollbarOrientation::VerticalRight)
        .begin_symbol(Some("↑"))
        .end_symbol(Some("↓"))
        .track_symbol(Some("│"))
        .thumb_symbol("█");

    f.render_stateful_widget(scrollbar, scrollbar_inner_area, &mut scrollbar_state);
}
