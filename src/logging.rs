//! Log output setup.

use log::LevelFilter;

/// Installs the global logger, writing timestamped records to stderr.
pub fn init(level: LevelFilter) -> Result<(), log::SetLoggerError> {
    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{} {:<5} {}] {}",
                chrono::Local::now().format("%H:%M:%S%.3f"),
                record.level(),
                record.target(),
                message
            ))
        })
        .level(level)
        .level_for("sdl2", LevelFilter::Warn)
        .chain(std::io::stderr())
        .apply()
}
