// src/logger.rs
use std::{fs, io, path::Path, sync::OnceLock};
use tracing_subscriber::{EnvFilter, fmt};

/// Where the command-line shell writes its log unless told otherwise.
pub const DEFAULT_LOG_PATH: &str = "logs/chess-law.log";
/// Filter used when `RUST_LOG` is not set.
pub const DEFAULT_FILTER: &str = "chess_law=info";

static GUARD: OnceLock<tracing_appender::non_blocking::WorkerGuard> = OnceLock::new();

/// Initialize logging once for the whole process.
/// - `path`: e.g. "logs/chess-law.log"
/// - `filter`: e.g. "chess_law::moves::perft=debug", ignored when `RUST_LOG` is set
///
/// Later calls are no-ops. Fails only if the log file cannot be opened.
pub fn init_logging<P: AsRef<Path>>(path: P, filter: &str) -> io::Result<()> {
    if GUARD.get().is_some() {
        return Ok(());
    }
    let path = path.as_ref();

    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }
    let file = fs::OpenOptions::new().create(true).append(true).open(path)?;

    let (non_blocking, guard) = tracing_appender::non_blocking(file);
    // Keep the guard alive for the program lifetime; a racing second
    // initialiser just drops its own.
    if GUARD.set(guard).is_err() {
        return Ok(());
    }

    let env_filter = if std::env::var_os("RUST_LOG").is_some() {
        EnvFilter::from_default_env()
    } else {
        EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
    };

    let subscriber = fmt()
        .with_env_filter(env_filter)
        .with_ansi(false) // plain text in files
        .with_target(true) // module path, e.g. chess_law::moves::validate
        .with_line_number(true)
        .with_writer(non_blocking)
        .finish();

    // Someone else may already own the global subscriber (tests).
    let _ = tracing::subscriber::set_global_default(subscriber);
    Ok(())
}
