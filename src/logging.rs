use std::path::Path;

pub const LOG_FILE_BASENAME: &str = "todo-notebook";
pub const LOG_FILE_SUFFIX: &str = "log";
pub const LOG_ROTATE_SIZE_BYTES: u64 = 10 * 1024 * 1024;
pub const LOG_ROTATE_KEEP_FILES: usize = 5;
pub const LOG_ENV_VAR: &str = "TODO_NOTEBOOK_LOG";

/// Log files live next to the persisted records.
pub fn log_directory(data_dir: &Path) -> &Path {
    data_dir
}

fn default_spec() -> &'static str {
    if cfg!(debug_assertions) {
        "warn,todo_notebook=debug"
    } else {
        "warn,todo_notebook=info"
    }
}

/// Picks the level spec: our own variable, then `RUST_LOG`, then the default.
/// Blank values are skipped.
pub fn resolve_log_spec(own: Option<String>, rust_log: Option<String>) -> String {
    own.filter(|value| !value.trim().is_empty())
        .or_else(|| rust_log.filter(|value| !value.trim().is_empty()))
        .unwrap_or_else(|| default_spec().to_string())
}

/// Starts the file logger for the process. Hosts call this once at startup,
/// before `open_data_dir`; the library never installs a logger on its own.
#[cfg(feature = "app")]
pub fn init_logging(data_dir: &Path) -> Result<(), flexi_logger::FlexiLoggerError> {
    use flexi_logger::{
        detailed_format, Cleanup, Criterion, Duplicate, FileSpec, Logger, Naming, WriteMode,
    };

    std::fs::create_dir_all(data_dir)?;

    let spec = resolve_log_spec(
        std::env::var(LOG_ENV_VAR).ok(),
        std::env::var("RUST_LOG").ok(),
    );

    Logger::try_with_str(spec)?
        .log_to_file(
            FileSpec::default()
                .directory(log_directory(data_dir))
                .basename(LOG_FILE_BASENAME)
                .suffix(LOG_FILE_SUFFIX),
        )
        .write_mode(WriteMode::BufferAndFlush)
        .format_for_files(detailed_format)
        .rotate(
            Criterion::Size(LOG_ROTATE_SIZE_BYTES),
            Naming::Numbers,
            Cleanup::KeepLogFiles(LOG_ROTATE_KEEP_FILES),
        )
        .duplicate_to_stdout(if cfg!(debug_assertions) {
            Duplicate::Info
        } else {
            Duplicate::None
        })
        .start()?;

    install_panic_hook();

    log::info!(
        "logger initialized dir={} rotate_size_bytes={} keep_files={}",
        log_directory(data_dir).display(),
        LOG_ROTATE_SIZE_BYTES,
        LOG_ROTATE_KEEP_FILES
    );
    Ok(())
}

#[cfg(feature = "app")]
fn install_panic_hook() {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info: &std::panic::PanicHookInfo<'_>| {
        let payload = info
            .payload()
            .downcast_ref::<&str>()
            .copied()
            .or_else(|| info.payload().downcast_ref::<String>().map(|s| s.as_str()))
            .unwrap_or("<non-string panic payload>");
        let location = info
            .location()
            .map(|loc| format!("{loc}"))
            .unwrap_or_else(|| "<unknown>".to_string());
        let backtrace = std::backtrace::Backtrace::force_capture();

        log::error!("panic: payload={payload} location={location}\nbacktrace:\n{backtrace}");
        default_hook(info);
    }));
}
