use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Flex, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, Paragraph};

use crate::models::DEFAULT_LIST_ID;
use crate::tui::App;
use crate::tui::app::{LIST_ACTIONS, ListsModalField, ListsModalMode};
use crate::tui::widgets::color::{get_contrast_text_color, parse_color};

/// Centered rect taking a percentage of the available area
fn popup_area(area: Rect, percent_x: u16, percent_y: u16) -> Rect {
    let vertical = Layout::vertical([Constraint::Percentage(percent_y)]).flex(Flex::Center);
    let horizontal = Layout::horizontal([Constraint::Percentage(percent_x)]).flex(Flex::Center);
    let [area] = vertical.areas(area);
    let [area] = horizontal.areas(area);
    area
}

/// Render the list-management modal: the lists on the left, actions on the
/// right, with an inline name prompt for Add and Rename.
pub fn render_list_modal(f: &mut Frame, area: Rect, app: &App) {
    let active_theme = app.config.get_active_theme();
    let fg_color = parse_color(&active_theme.fg);
    let bg_color = parse_color(&active_theme.bg);
    let highlight_bg = parse_color(&active_theme.highlight_bg);
    let highlight_fg = get_contrast_text_color(highlight_bg);

    let popup_area = popup_area(area, 70, 60);

    f.render_widget(Clear, popup_area);

    let outer_block = Block::default()
        .borders(Borders::ALL)
        .title("Manage Lists")
        .title_alignment(Alignment::Center)
        .style(Style::default().fg(fg_color).bg(bg_color));
    f.render_widget(outer_block, popup_area);

    let inner_area = Rect::new(
        popup_area.x + 1,
        popup_area.y + 1,
        popup_area.width.saturating_sub(2),
        popup_area.height.saturating_sub(2),
    );

    let Some(state) = app.lists_modal.as_ref() else {
        return;
    };

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(inner_area);
    let list_area = horizontal[0];
    let actions_area = horizontal[1];

    // Left panel: every list, the Inbox marked as permanent
    let list_items: Vec<ListItem> = app
        .store
        .lists()
        .iter()
        .map(|list| {
            let suffix = if list.id == DEFAULT_LIST_ID { " (inbox)" } else { "" };
            let marker = if list.id == app.store.active_list_id() {
                "> "
            } else {
                "  "
            };
            ListItem::new(format!("{}{}{}", marker, list.title, suffix))
        })
        .collect();

    let lists_active = state.current_field == ListsModalField::Lists;
    let lists_border = if lists_active {
        Style::default().fg(highlight_bg)
    } else {
        Style::default().fg(fg_color)
    };
    let list = List::new(list_items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Lists")
                .border_style(lists_border),
        )
        .style(Style::default().fg(fg_color).bg(bg_color))
        .highlight_style(
            Style::default()
                .fg(highlight_fg)
                .bg(highlight_bg)
                .add_modifier(Modifier::BOLD),
        );

    let mut list_state = state.list_state.clone();
    f.render_stateful_widget(list, list_area, &mut list_state);

    // Right panel: actions, plus the name prompt in Add/Rename mode
    let actions_active = state.current_field == ListsModalField::Actions;
    let mut action_lines: Vec<Line> = Vec::new();
    for (index, action) in LIST_ACTIONS.iter().enumerate() {
        let style = if actions_active && state.actions_selected_index == index {
            Style::default()
                .fg(highlight_fg)
                .bg(highlight_bg)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(fg_color).bg(bg_color)
        };
        action_lines.push(Line::from(Span::styled(*action, style)));
    }

    let mut name_line_index = None;
    if matches!(state.mode, ListsModalMode::Add | ListsModalMode::Rename) {
        action_lines.push(Line::from(""));
        name_line_index = Some(action_lines.len());
        action_lines.push(Line::from(vec![
            Span::styled("Name: ", Style::default().fg(fg_color)),
            Span::styled(
                state.name_input.value().to_string(),
                Style::default().fg(highlight_fg).bg(highlight_bg),
            ),
        ]));
    }

    let actions_border = if actions_active {
        Style::default().fg(highlight_bg)
    } else {
        Style::default().fg(fg_color)
    };
    let actions_paragraph = Paragraph::new(action_lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Actions")
            .border_style(actions_border),
    );
    f.render_widget(actions_paragraph, actions_area);

    // Cursor inside the name prompt while typing
    if let Some(line_idx) = name_line_index {
        let prefix_len = "Name: ".chars().count();
        let cursor_col = prefix_len + state.name_input.cursor();
        let max_col = actions_area.width.saturating_sub(3) as usize;
        let x = actions_area.x + 1 + cursor_col.min(max_col) as u16;
        let y = actions_area.y + 1 + line_idx as u16;
        if x < actions_area.x + actions_area.width && y < actions_area.y + actions_area.height {
            f.set_cursor_position((x, y));
        }
    }
}
