use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem};

use crate::Config;
use crate::models::{List as TaskList, Task};
use crate::tui::widgets::color::{get_contrast_text_color, parse_color};

/// Render the sidebar with every list, marking the active one. Each row shows
/// the list title and its open-task count.
pub fn render_lists_sidebar(
    f: &mut Frame,
    area: Rect,
    lists: &[TaskList],
    tasks: &[Task],
    active_list_id: &str,
    config: &Config,
) {
    let active_theme = config.get_active_theme();
    let fg_color = parse_color(&active_theme.fg);
    let highlight_bg = parse_color(&active_theme.highlight_bg);
    let highlight_fg = get_contrast_text_color(highlight_bg);
    let max_width = area.width.saturating_sub(4) as usize;

    let items: Vec<ListItem> = lists
        .iter()
        .map(|list| {
            let open_count = tasks
                .iter()
                .filter(|task| task.list_id == list.id && !task.completed)
                .count();

            let marker = if list.id == active_list_id { "> " } else { "  " };
            let mut label = format!("{}{}", marker, list.title);
            if label.chars().count() > max_width.saturating_sub(4) {
                label = label
                    .chars()
                    .take(max_width.saturating_sub(7))
                    .collect::<String>()
                    + "...";
            }

            let title_style = match list.color.as_deref() {
                Some(color) => Style::default().fg(parse_color(color)),
                None => Style::default().fg(fg_color),
            };
            let row_style = if list.id == active_list_id {
                title_style.fg(highlight_fg).bg(highlight_bg).add_modifier(Modifier::BOLD)
            } else {
                title_style
            };

            ListItem::new(Line::from(vec![
                Span::styled(label, row_style),
                Span::styled(format!(" ({})", open_count), Style::default().fg(fg_color)),
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!("My Lists ({})", lists.len())),
        )
        .style(Style::default().fg(fg_color));

    f.render_widget(list, area);
}
