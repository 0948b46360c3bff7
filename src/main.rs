mod autocomplete;
mod cli;
mod config;
mod handlers;
mod http;
mod importer;
mod init;
mod manager;
mod matcher;
mod models;

use std::sync::Arc;

use clap::Parser;

use cli::Commands;
use handlers::Ctx;

#[cfg(target_env = "musl")]
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[tokio::main]
async fn main() {
    init::init_logger();

    let cli = cli::Cli::parse();

    // Generate a new config file.
    if let Some(Commands::NewConfig { path }) = &cli.command {
        match config::generate_sample(path) {
            Ok(_) => {
                log::info!("config file generated: {}", path.display());
            }
            Err(e) => {
                log::error!("error generating config: {}", e);
                std::process::exit(1);
            }
        }
        return;
    }

    // Load config.
    let config = config::load_all(&cli.config).unwrap_or_else(|e| {
        log::error!("error loading config: {}", e);
        std::process::exit(1);
    });
    let consts = config::consts(&config);

    // Build the recipe library and ingredient index. This completes before
    // any query is served.
    let mgr = Arc::new(init::init_manager(&config, cli.data.clone()));

    // Handle one-off query commands.
    if let Some(cmd) = cli.command {
        match cmd {
            Commands::Suggest { query, limit } => {
                let num = handlers::limit(limit, consts.max_suggestions);
                print_names(&mgr, mgr.autocomplete(&query, num));
            }

            Commands::Popular { limit } => {
                let num = handlers::limit(limit, consts.num_popular);
                print_names(&mgr, mgr.popular(num));
            }

            Commands::Match { ingredients } => {
                for r in mgr.match_recipes(&ingredients, consts.max_recipe_matches) {
                    println!("{}\t{}\t{}", r.id, r.score, r.name);
                }
            }

            Commands::NewConfig { .. } => {}
        }
        return;
    }

    // Setup the global app context used in HTTP handlers.
    let ctx = Arc::new(Ctx { mgr, consts });

    // Start the HTTP server.
    let routes = http::init_handlers(ctx);
    let addr = config.app.address;

    log::info!("starting server on {}", addr);

    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(l) => l,
        Err(e) => {
            log::error!("error listening on {}: {}", addr, e);
            std::process::exit(1);
        }
    };

    if let Err(e) = axum::serve(listener, routes).await {
        log::error!("server error: {}", e);
        std::process::exit(1);
    }
}

/// Print ingredient names with their corpus counts.
fn print_names(mgr: &manager::Manager, names: Vec<String>) {
    let lib = mgr.library();
    for name in names {
        let count = lib.autocomplete.get(&name).map(|e| e.count).unwrap_or(0);
        println!("{}\t{}", name, count);
    }
}
