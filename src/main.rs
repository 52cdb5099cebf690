use clap::Parser;
use color_eyre::Result;
use simplelist::cli::{Cli, Commands};
use simplelist::{Config, Profile, Storage, Store, logging};

fn main() -> Result<()> {
    // Set up error reporting with color-eyre
    color_eyre::install()?;

    // Parse CLI arguments
    let cli = Cli::parse();

    // Determine profile: --dev flag enables dev mode, otherwise use prod
    let profile = if cli.dev { Profile::Dev } else { Profile::Prod };

    // Load configuration with the determined profile
    let config = Config::load_with_profile(profile)?;

    // File logging is best-effort: a broken log setup should not keep the
    // application from running
    let _logger = match logging::init(profile) {
        Ok(handle) => Some(handle),
        Err(e) => {
            eprintln!("WARNING: failed to initialize logging: {}", e);
            None
        }
    };

    // Open the persisted data set and build the store
    let storage = Storage::new(config.get_data_path());
    let mut store = Store::new(storage);

    // Dispatch to appropriate command handler
    match cli.command.unwrap_or(Commands::Tui) {
        Commands::Tui => {
            let app = simplelist::tui::App::new(config, store);
            simplelist::tui::run_event_loop(app)?;
        }
        Commands::AddTask {
            title,
            list,
            due,
            priority,
            description,
        } => {
            simplelist::cli::handle_add_task(title, list, due, priority, description, &mut store)?;
        }
        Commands::AddList { title } => {
            simplelist::cli::handle_add_list(title, &mut store)?;
        }
    }

    Ok(())
}
