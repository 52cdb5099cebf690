use flexi_logger::{Cleanup, Criterion, FileSpec, Logger, LoggerHandle, Naming, WriteMode};

use crate::utils::{self, Profile};

const LOG_FILE_BASENAME: &str = "simplelist";
const MAX_LOG_FILE_SIZE_BYTES: u64 = 5 * 1024 * 1024;
const MAX_LOG_FILES: usize = 3;

/// Default log level for the current build mode
pub fn default_log_level() -> &'static str {
    if cfg!(debug_assertions) {
        "debug"
    } else {
        "info"
    }
}

/// Start file-based logging under the profile's data directory.
///
/// Returns the logger handle, which the caller must keep alive for the
/// lifetime of the process; dropping it stops the logger.
pub fn init(profile: Profile) -> Result<LoggerHandle, String> {
    let log_dir = utils::get_data_dir(profile)
        .ok_or_else(|| "could not determine data directory for logs".to_string())?
        .join("logs");

    std::fs::create_dir_all(&log_dir)
        .map_err(|e| format!("failed to create log directory {}: {}", log_dir.display(), e))?;

    let handle = Logger::try_with_str(default_log_level())
        .map_err(|e| format!("invalid log level: {}", e))?
        .log_to_file(
            FileSpec::default()
                .directory(&log_dir)
                .basename(LOG_FILE_BASENAME),
        )
        .rotate(
            Criterion::Size(MAX_LOG_FILE_SIZE_BYTES),
            Naming::Numbers,
            Cleanup::KeepLogFiles(MAX_LOG_FILES),
        )
        .write_mode(WriteMode::BufferAndFlush)
        .append()
        .format_for_files(flexi_logger::detailed_format)
        .start()
        .map_err(|e| format!("failed to start logger: {}", e))?;

    log::info!(
        "simplelist {} started (profile {:?})",
        env!("CARGO_PKG_VERSION"),
        profile
    );

    Ok(handle)
}
