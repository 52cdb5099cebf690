use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::Span;
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, StatefulWidget};

use crate::Config;
use crate::tui::widgets::color::{get_contrast_text_color, parse_color};
use crate::tui::widgets::task_list::task_row;
use crate::views::TodayView;

/// Render the Today tab: the overdue bucket, then today's bucket, with one
/// shared selection across both. `selected_index` counts tasks only; section
/// header rows are skipped when mapping it onto rendered rows.
pub fn render_today(
    f: &mut Frame,
    area: Rect,
    view: &TodayView,
    selected_index: usize,
    config: &Config,
) {
    let active_theme = config.get_active_theme();
    let fg_color = parse_color(&active_theme.fg);
    let highlight_bg = parse_color(&active_theme.highlight_bg);
    let highlight_fg = get_contrast_text_color(highlight_bg);
    let section_style = Style::default().fg(parse_color(&active_theme.tab_bg));
    let max_width = area.width.saturating_sub(4) as usize;

    let mut items: Vec<ListItem> = Vec::new();
    // Rendered row index of the selected task (headers shift it down)
    let mut highlight_row = None;
    let mut task_counter = 0usize;

    if view.is_empty() {
        items.push(ListItem::new(Span::styled(
            "All clear! Nothing overdue or due today.",
            Style::default().fg(ratatui::style::Color::Green),
        )));
    }

    if !view.overdue.is_empty() {
        items.push(ListItem::new(Span::styled(
            format!("Overdue ({})", view.overdue.len()),
            section_style,
        )));
        for task in &view.overdue {
            if task_counter == selected_index {
                highlight_row = Some(items.len());
            }
            task_counter += 1;
            items.push(ListItem::new(task_row(task, fg_color, max_width)));
        }
    }

    if !view.today.is_empty() {
        items.push(ListItem::new(Span::styled(
            format!("Due Today ({})", view.today.len()),
            section_style,
        )));
        for task in &view.today {
            if task_counter == selected_index {
                highlight_row = Some(items.len());
            }
            task_counter += 1;
            items.push(ListItem::new(task_row(task, fg_color, max_width)));
        }
    }

    let title = format!("Today - {} pending", view.total());
    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(title))
        .style(Style::default().fg(fg_color))
        .highlight_style(Style::default().fg(highlight_fg).bg(highlight_bg));

    let mut list_state = ListState::default();
    list_state.select(highlight_row);
    StatefulWidget::render(list, area, f.buffer_mut(), &mut list_state);
}
