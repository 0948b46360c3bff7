use std::path::PathBuf;

use crate::{
    manager::{Manager, ManagerConfig},
    models::Config,
};

/// Initialize logger.
pub fn init_logger() {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_env("RUST_LOG")
        .format(|buf, record| {
            use std::io::Write;
            let level = if record.level() != log::Level::Info {
                format!("[{}] ", record.level())
            } else {
                String::new()
            };
            writeln!(
                buf,
                "{} {}:{} {}{}",
                chrono::Local::now().format("%Y-%m-%dT%H:%M:%S%.3f"),
                record.file().unwrap_or("unknown"),
                record.line().unwrap_or(0),
                level,
                record.args()
            )
        })
        .init();
}

/// Build the recipe library from the corpus. `data` overrides the path in
/// the config. An unreadable corpus yields an empty (but working) library.
pub fn init_manager(config: &Config, data: Option<PathBuf>) -> Manager {
    let data_path = data.unwrap_or_else(|| PathBuf::from(&config.app.data_path));

    let start = std::time::Instant::now();
    let mgr = Manager::load(ManagerConfig {
        data_path,
        min_query_len: config.index.min_query_len,
    });

    if mgr.library().autocomplete.is_empty() {
        log::warn!("ingredient index is empty. autocomplete will return no results");
    }

    let stats = mgr.stats();
    log::info!(
        "loaded {} recipes and {} ingredients in {:?}",
        stats.recipes,
        stats.ingredients,
        start.elapsed()
    );

    mgr
}
