use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Flex, Layout, Rect};
use ratatui::style::Style;
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::Config;
use crate::tui::widgets::color::parse_color;
use crate::utils::format_key_binding_for_display as key;

pub fn render_help(f: &mut Frame, area: Rect, config: &Config) {
    let active_theme = config.get_active_theme();
    let fg_color = parse_color(&active_theme.fg);
    let bg_color = parse_color(&active_theme.bg);

    let popup_area = popup_area(area, 60, 70);

    // Clear the background first so content does not show through
    f.render_widget(Clear, popup_area);

    let help_text = build_help_text(config);

    let paragraph = Paragraph::new(help_text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Help - Key Bindings")
                .title_alignment(Alignment::Center)
                .style(Style::default().fg(fg_color).bg(bg_color)),
        )
        .style(Style::default().fg(fg_color).bg(bg_color))
        .wrap(ratatui::widgets::Wrap { trim: true });

    f.render_widget(paragraph, popup_area);
}

/// Centered rect taking a percentage of the available area
/// Based on the ratatui popup example
fn popup_area(area: Rect, percent_x: u16, percent_y: u16) -> Rect {
    let vertical = Layout::vertical([Constraint::Percentage(percent_y)]).flex(Flex::Center);
    let horizontal = Layout::horizontal([Constraint::Percentage(percent_x)]).flex(Flex::Center);
    let [area] = vertical.areas(area);
    let [area] = horizontal.areas(area);
    area
}

fn build_help_text(config: &Config) -> String {
    let kb = &config.key_bindings;
    let mut text = String::new();

    text.push_str("Navigation:\n");
    text.push_str(&format!(
        "  {} / {}: Switch tabs\n",
        key(&kb.tab_left),
        key(&kb.tab_right)
    ));
    text.push_str(&format!(
        "  {} / {}: Jump to Lists / Today\n",
        key(&kb.tab_1),
        key(&kb.tab_2)
    ));
    text.push_str(&format!(
        "  {} / {}: Move up/down\n",
        key(&kb.list_up),
        key(&kb.list_down)
    ));
    text.push('\n');

    text.push_str("Tasks:\n");
    text.push_str(&format!("  {}: New task\n", key(&kb.new)));
    text.push_str(&format!("  {}: Edit selected task\n", key(&kb.edit)));
    text.push_str(&format!("  {}: Delete selected task\n", key(&kb.delete)));
    text.push_str(&format!(
        "  {}: Toggle task done\n",
        key(&kb.toggle_task_status)
    ));
    text.push_str(&format!("  {}: Cycle priority\n", key(&kb.cycle_priority)));
    text.push('\n');

    text.push_str("View (Lists tab):\n");
    text.push_str(&format!(
        "  {}: Toggle sort mode (created / alpha)\n",
        key(&kb.sort_mode)
    ));
    text.push_str(&format!(
        "  {}: Toggle sort direction\n",
        key(&kb.sort_direction)
    ));
    text.push_str(&format!(
        "  {}: Show or hide completed tasks\n",
        key(&kb.toggle_completed)
    ));
    text.push_str(&format!("  {}: Manage lists\n", key(&kb.lists_modal)));
    text.push('\n');

    text.push_str("Forms:\n");
    text.push_str("  Tab / Shift+Tab: Next / previous field\n");
    text.push_str(&format!("  {}: Save\n", key(&kb.save)));
    text.push_str("  Esc: Cancel\n");
    text.push('\n');

    text.push_str("General:\n");
    text.push_str(&format!("  {}: Quit\n", key(&kb.quit)));
    text.push_str(&format!("  {}: Show/hide help\n", key(&kb.help)));

    text
}
