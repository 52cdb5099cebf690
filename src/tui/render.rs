use ratatui::Frame;
use ratatui::style::Style;
use ratatui::widgets::{Block, Borders};

use crate::tui::app::{Mode, Tab};
use crate::tui::widgets::{
    color::parse_color,
    confirm_delete::render_confirm_delete,
    form::render_task_form,
    help::render_help,
    list_modal::render_list_modal,
    lists_sidebar::render_lists_sidebar,
    status_bar::render_status_bar,
    tabs::render_tabs,
    task_list::render_task_list,
    today::render_today,
};
use crate::tui::{App, Layout};
use crate::utils::format_key_binding_for_display as key;

pub fn render(f: &mut Frame, app: &mut App, layout: &Layout) {
    // Outer border with the application name centered in the top border
    let active_theme = app.config.get_active_theme();
    let fg_color = parse_color(&active_theme.fg);
    let bg_color = parse_color(&active_theme.bg);
    let outer_block = Block::default()
        .borders(Borders::ALL)
        .title("SimpleList")
        .title_alignment(ratatui::layout::Alignment::Center)
        .style(Style::default().fg(fg_color).bg(bg_color));
    f.render_widget(outer_block, f.area());

    render_tabs(f, layout.tabs_area, app.tab, &app.config);

    // Sidebar only accompanies the per-list view
    if app.tab == Tab::Lists && layout.sidebar_area.width > 0 {
        render_lists_sidebar(
            f,
            layout.sidebar_area,
            app.store.lists(),
            app.store.tasks(),
            app.store.active_list_id(),
            &app.config,
        );
    }

    // Main pane
    match app.mode {
        Mode::TaskForm => {
            if let Some(form) = app.form.clone() {
                render_task_form(f, layout.main_area, &form, &app.config);
            }
        }
        _ => match app.tab {
            Tab::Lists => {
                let tasks = app.current_tasks();
                let list_title = app
                    .store
                    .active_list()
                    .map(|list| list.title.clone())
                    .unwrap_or_else(|| "Tasks".to_string());
                let mut list_state = app.list_state.clone();
                render_task_list(
                    f,
                    layout.main_area,
                    &tasks,
                    &list_title,
                    &mut list_state,
                    app.sort_mode,
                    app.sort_direction,
                    app.show_completed,
                    &app.config,
                );
                app.list_state = list_state;
            }
            Tab::Today => {
                let view = app.today_view();
                render_today(f, layout.main_area, &view, app.selected_index, &app.config);
            }
        },
    }

    // Overlays render after normal content
    if app.mode == Mode::Help {
        render_help(f, f.area(), &app.config);
    }
    if app.mode == Mode::ListsModal {
        render_list_modal(f, f.area(), app);
    }
    if let Some(ref task) = app.delete_confirmation {
        render_confirm_delete(f, f.area(), task, app.delete_modal_selection, &app.config);
    }

    let key_hints = get_key_hints(app);
    render_status_bar(
        f,
        layout.status_area,
        app.status_message.as_ref(),
        &key_hints,
        &app.config,
    );
}

fn get_key_hints(app: &App) -> Vec<String> {
    let kb = &app.config.key_bindings;
    match app.mode {
        Mode::Help => vec![format!("Esc or {}: Exit help", key(&kb.help))],
        Mode::TaskForm => vec![
            "Tab/Enter: Next field".to_string(),
            "Shift+Tab: Previous field".to_string(),
            format!("{}: Save", key(&kb.save)),
            "Esc: Cancel".to_string(),
        ],
        Mode::ListsModal => vec![
            "Tab: Lists/Actions".to_string(),
            "Enter: Apply".to_string(),
            "Esc: Close".to_string(),
        ],
        Mode::View => {
            let mut hints = vec![
                format!("{}: Quit", key(&kb.quit)),
                format!("{}: New", key(&kb.new)),
                format!("{}: Edit", key(&kb.edit)),
                format!("{}: Delete", key(&kb.delete)),
                format!("{}: Done", key(&kb.toggle_task_status)),
            ];
            if app.tab == Tab::Lists {
                hints.push(format!("{}: Sort", key(&kb.sort_mode)));
                hints.push(format!("{}: Direction", key(&kb.sort_direction)));
                hints.push(format!("{}: Completed", key(&kb.toggle_completed)));
                hints.push(format!("{}: Lists", key(&kb.lists_modal)));
            }
            hints.push(format!("{}: Help", key(&kb.help)));
            hints
        }
    }
}
