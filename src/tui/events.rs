use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
    size as terminal_size,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use std::io;

use crate::tui::App;
use crate::tui::app::{ListsModalField, ListsModalMode, Mode, Tab, TaskField};
use crate::tui::error::TuiError;
use crate::tui::layout::Layout;
use crate::utils::{has_primary_modifier, parse_key_binding};

/// Guard that ensures terminal state is restored even on panic
/// If the terminal is left in raw mode or the alternate screen, the user's
/// terminal is unusable afterwards.
struct TerminalGuard {
    raw_mode_enabled: bool,
    alternate_screen_enabled: bool,
}

impl TerminalGuard {
    fn new() -> Result<Self, TuiError> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;

        Ok(Self {
            raw_mode_enabled: true,
            alternate_screen_enabled: true,
        })
    }

    /// Manually restore terminal state (called on normal exit)
    fn restore(&mut self) -> Result<(), TuiError> {
        if self.raw_mode_enabled {
            disable_raw_mode()?;
            self.raw_mode_enabled = false;
        }
        if self.alternate_screen_enabled {
            execute!(io::stdout(), LeaveAlternateScreen)?;
            self.alternate_screen_enabled = false;
        }
        Ok(())
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        // Ignore errors, this is already a cleanup path
        if self.raw_mode_enabled {
            let _ = disable_raw_mode();
        }
        if self.alternate_screen_enabled {
            let _ = execute!(io::stdout(), LeaveAlternateScreen);
        }
    }
}

/// True when the key event matches the configured binding string
fn matches_binding(key_event: &KeyEvent, binding: &str) -> bool {
    match parse_key_binding(binding) {
        Ok(parsed) => {
            key_event.code == parsed.key_code
                && parsed.requires_ctrl == has_primary_modifier(key_event.modifiers)
        }
        Err(_) => false,
    }
}

pub fn run_event_loop(mut app: App) -> Result<(), TuiError> {
    // Check terminal size before entering the alternate screen so the error
    // message lands in the normal terminal
    let (width, height) = terminal_size()?;
    let min_width = Layout::MIN_WIDTH + 2;
    let min_height = Layout::MIN_HEIGHT + 2;
    if width < min_width || height < min_height {
        return Err(TuiError::RenderError(format!(
            "Terminal size too small. Current: {}x{}, minimum required: {}x{}.",
            width, height, min_width, min_height
        )));
    }

    let mut guard = TerminalGuard::new()?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)?;

    loop {
        app.check_status_message_timeout();

        let terminal_size = terminal.size()?;
        let terminal_rect =
            ratatui::layout::Rect::new(0, 0, terminal_size.width, terminal_size.height);
        terminal.draw(|f| {
            let layout = Layout::calculate(
                terminal_rect,
                app.config.sidebar_width_percent,
                app.tab == Tab::Lists,
            );
            crate::tui::render::render(f, &mut app, &layout);
        })?;

        if event::poll(std::time::Duration::from_millis(100))? {
            match event::read()? {
                Event::Key(key_event) => {
                    // Only Press events; Release would double-process on Windows
                    if key_event.kind == KeyEventKind::Press && handle_key_event(&mut app, key_event)
                    {
                        break;
                    }
                }
                Event::Resize(_, _) => {
                    // Next draw picks up the new size
                }
                _ => {}
            }
        }
    }

    guard.restore()?;

    Ok(())
}

/// Dispatch a key event to the active mode. Returns true to quit.
fn handle_key_event(app: &mut App, key_event: KeyEvent) -> bool {
    // The delete confirmation overlays every mode
    if app.delete_confirmation.is_some() {
        handle_delete_confirmation(app, key_event);
        return false;
    }

    match app.mode {
        Mode::Help => {
            if key_event.code == KeyCode::Esc
                || matches_binding(&key_event, &app.config.key_bindings.help)
            {
                app.mode = Mode::View;
            }
            false
        }
        Mode::TaskForm => {
            handle_task_form(app, key_event);
            false
        }
        Mode::ListsModal => {
            handle_lists_modal(app, key_event);
            false
        }
        Mode::View => handle_view_mode(app, key_event),
    }
}

fn handle_delete_confirmation(app: &mut App, key_event: KeyEvent) {
    match key_event.code {
        KeyCode::Up | KeyCode::Down => {
            // Two options, so any vertical move flips the selection
            app.delete_modal_selection = 1 - app.delete_modal_selection.min(1);
        }
        KeyCode::Enter => {
            if app.delete_modal_selection == 0 {
                app.confirm_delete_task();
            } else {
                app.delete_confirmation = None;
            }
        }
        KeyCode::Esc => {
            app.delete_confirmation = None;
        }
        _ => {}
    }
}

fn handle_view_mode(app: &mut App, key_event: KeyEvent) -> bool {
    let kb = app.config.key_bindings.clone();

    if matches_binding(&key_event, &kb.quit) {
        return true;
    }

    if matches_binding(&key_event, &kb.help) {
        app.mode = Mode::Help;
    } else if matches_binding(&key_event, &kb.tab_left) || matches_binding(&key_event, &kb.tab_right)
    {
        app.next_tab();
    } else if matches_binding(&key_event, &kb.tab_1) {
        app.switch_tab(Tab::Lists);
    } else if matches_binding(&key_event, &kb.tab_2) {
        app.switch_tab(Tab::Today);
    } else if matches_binding(&key_event, &kb.list_up) || key_event.code == KeyCode::Up {
        app.select_previous();
    } else if matches_binding(&key_event, &kb.list_down) || key_event.code == KeyCode::Down {
        app.select_next();
    } else if matches_binding(&key_event, &kb.toggle_task_status)
        || matches_binding(&key_event, &kb.select)
    {
        app.toggle_selected_task();
    } else if matches_binding(&key_event, &kb.new) {
        if app.tab == Tab::Lists {
            app.open_new_task_form();
        }
    } else if matches_binding(&key_event, &kb.edit) {
        app.open_edit_task_form();
    } else if matches_binding(&key_event, &kb.delete) {
        app.request_delete_selected_task();
    } else if matches_binding(&key_event, &kb.cycle_priority) {
        app.cycle_selected_priority();
    } else if matches_binding(&key_event, &kb.sort_mode) {
        if app.tab == Tab::Lists {
            app.sort_mode = app.sort_mode.toggled();
            app.adjust_selected_index();
        }
    } else if matches_binding(&key_event, &kb.sort_direction) {
        if app.tab == Tab::Lists {
            app.sort_direction = app.sort_direction.toggled();
            app.adjust_selected_index();
        }
    } else if matches_binding(&key_event, &kb.toggle_completed) {
        if app.tab == Tab::Lists {
            app.show_completed = !app.show_completed;
            app.adjust_selected_index();
        }
    } else if matches_binding(&key_event, &kb.lists_modal) {
        if app.tab == Tab::Lists {
            app.open_lists_modal();
        }
    }

    false
}

fn handle_task_form(app: &mut App, key_event: KeyEvent) {
    if matches_binding(&key_event, &app.config.key_bindings.save) {
        app.save_task_form();
        return;
    }

    let Some(form) = app.form.as_mut() else {
        return;
    };

    match key_event.code {
        KeyCode::Esc => app.cancel_task_form(),
        KeyCode::Tab | KeyCode::Enter | KeyCode::Down => form.next_field(),
        KeyCode::BackTab | KeyCode::Up => form.prev_field(),
        KeyCode::Left => {
            if form.current_field == TaskField::Priority {
                form.cycle_priority_backward();
            } else if let Some(input) = form.current_input_mut() {
                input.move_left();
            }
        }
        KeyCode::Right => {
            if form.current_field == TaskField::Priority {
                form.cycle_priority_forward();
            } else if let Some(input) = form.current_input_mut() {
                input.move_right();
            }
        }
        KeyCode::Home => {
            if let Some(input) = form.current_input_mut() {
                input.move_home();
            }
        }
        KeyCode::End => {
            if let Some(input) = form.current_input_mut() {
                input.move_end();
            }
        }
        KeyCode::Backspace => {
            if let Some(input) = form.current_input_mut() {
                input.delete_char();
            }
        }
        KeyCode::Delete => {
            if let Some(input) = form.current_input_mut() {
                input.delete_forward();
            }
        }
        KeyCode::Char(c) => {
            if !has_primary_modifier(key_event.modifiers) {
                if let Some(input) = form.current_input_mut() {
                    input.insert_char(c);
                }
            }
        }
        _ => {}
    }
}

fn handle_lists_modal(app: &mut App, key_event: KeyEvent) {
    let lists_len = app.store.lists().len();
    let Some(state) = app.lists_modal.as_mut() else {
        return;
    };

    // Name prompt (Add / Rename) captures every key
    if matches!(state.mode, ListsModalMode::Add | ListsModalMode::Rename) {
        match key_event.code {
            KeyCode::Esc => state.mode = ListsModalMode::View,
            KeyCode::Enter => app.submit_lists_modal_name(),
            KeyCode::Backspace => state.name_input.delete_char(),
            KeyCode::Delete => state.name_input.delete_forward(),
            KeyCode::Left => state.name_input.move_left(),
            KeyCode::Right => state.name_input.move_right(),
            KeyCode::Home => state.name_input.move_home(),
            KeyCode::End => state.name_input.move_end(),
            KeyCode::Char(c) => {
                if !has_primary_modifier(key_event.modifiers) {
                    state.name_input.insert_char(c);
                }
            }
            _ => {}
        }
        return;
    }

    match key_event.code {
        KeyCode::Esc => app.close_lists_modal(),
        KeyCode::Tab | KeyCode::Left | KeyCode::Right => {
            state.current_field = match state.current_field {
                ListsModalField::Lists => ListsModalField::Actions,
                ListsModalField::Actions => ListsModalField::Lists,
            };
        }
        KeyCode::Up | KeyCode::Char('k') => match state.current_field {
            ListsModalField::Lists => {
                state.selected_index = state.selected_index.saturating_sub(1);
                state.list_state.select(Some(state.selected_index));
            }
            ListsModalField::Actions => {
                state.actions_selected_index = state.actions_selected_index.saturating_sub(1);
            }
        },
        KeyCode::Down | KeyCode::Char('j') => match state.current_field {
            ListsModalField::Lists => {
                if state.selected_index + 1 < lists_len {
                    state.selected_index += 1;
                }
                state.list_state.select(Some(state.selected_index));
            }
            ListsModalField::Actions => {
                if state.actions_selected_index + 1 < crate::tui::app::LIST_ACTIONS.len() {
                    state.actions_selected_index += 1;
                }
            }
        },
        KeyCode::Enter => match state.current_field {
            ListsModalField::Lists => {
                // Enter on a list is a shortcut for Switch
                let switch_index = state.selected_index;
                if let Some(list) = app.store.lists().get(switch_index).cloned() {
                    app.store.set_active_list(&list.id);
                    app.close_lists_modal();
                    app.selected_index = 0;
                    app.adjust_selected_index();
                }
            }
            ListsModalField::Actions => app.apply_lists_modal_action(),
        },
        _ => {}
    }
}
