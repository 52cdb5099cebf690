use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::Config;
use crate::tui::app::{PRIORITY_OPTIONS, TaskField, TaskForm};
use crate::tui::widgets::color::{get_contrast_text_color, parse_color};
use crate::tui::widgets::input::Input;

/// Render the task form in the main pane. The active field gets a highlighted
/// border and, for text fields, the terminal cursor.
pub fn render_task_form(f: &mut Frame, area: Rect, form: &TaskForm, config: &Config) {
    let active_theme = config.get_active_theme();
    let fg_color = parse_color(&active_theme.fg);
    let highlight_bg = parse_color(&active_theme.highlight_bg);
    let highlight_fg = get_contrast_text_color(highlight_bg);

    let title = if form.editing_task_id.is_some() {
        "Edit Task"
    } else {
        "New Task"
    };
    let outer = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .style(Style::default().fg(fg_color));
    let inner_area = outer.inner(area);
    f.render_widget(outer, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Length(3), // Description
            Constraint::Length(3), // Due date
            Constraint::Length(3), // Priority
            Constraint::Min(0),
        ])
        .split(inner_area);

    render_text_field(
        f,
        rows[0],
        "Title",
        &form.title,
        form.current_field == TaskField::Title,
        fg_color,
        highlight_bg,
    );
    render_text_field(
        f,
        rows[1],
        "Description",
        &form.description,
        form.current_field == TaskField::Description,
        fg_color,
        highlight_bg,
    );
    render_text_field(
        f,
        rows[2],
        "Due date (YYYY-MM-DD)",
        &form.due_date,
        form.current_field == TaskField::DueDate,
        fg_color,
        highlight_bg,
    );

    // Priority selector: one option highlighted, Left/Right to change
    let priority_active = form.current_field == TaskField::Priority;
    let mut spans: Vec<Span> = Vec::new();
    for (i, option) in PRIORITY_OPTIONS.iter().enumerate() {
        let label = match option {
            None => "None".to_string(),
            Some(p) => p.label().to_string(),
        };
        let style = if i == form.priority_index {
            Style::default()
                .fg(highlight_fg)
                .bg(highlight_bg)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(fg_color)
        };
        if i > 0 {
            spans.push(Span::raw("  "));
        }
        spans.push(Span::styled(format!(" {} ", label), style));
    }
    let border_style = if priority_active {
        Style::default().fg(highlight_bg)
    } else {
        Style::default().fg(fg_color)
    };
    let priority = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Priority")
            .border_style(border_style),
    );
    f.render_widget(priority, rows[3]);
}

fn render_text_field(
    f: &mut Frame,
    area: Rect,
    label: &str,
    input: &Input,
    active: bool,
    fg_color: ratatui::style::Color,
    highlight_bg: ratatui::style::Color,
) {
    let border_style = if active {
        Style::default().fg(highlight_bg)
    } else {
        Style::default().fg(fg_color)
    };

    let paragraph = Paragraph::new(input.value().to_string())
        .style(Style::default().fg(fg_color))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(label)
                .border_style(border_style),
        );
    f.render_widget(paragraph, area);

    if active {
        // Keep the cursor inside the field even for long values
        let max_col = area.width.saturating_sub(2) as usize;
        let cursor_col = input.cursor().min(max_col);
        f.set_cursor_position((area.x + 1 + cursor_col as u16, area.y + 1));
    }
}
