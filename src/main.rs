use clap::Parser;

use task_cli::cli::Cli;
use task_cli::cmd::{completions_script, dispatch, Commands, Outcome};
use task_cli::config::{init_logging, resolve_store_path};
use task_cli::store::Store;

fn main() {
    let cli = Cli::parse();
    init_logging();

    // Completion scripts don't need a task file.
    if let Some(Commands::Completions { shell }) = &cli.command {
        print!("{}", completions_script(*shell));
        return;
    }

    let db_path = resolve_store_path(cli.db);
    let mut store = match Store::load(&db_path) {
        Ok(store) => store,
        Err(e) => {
            eprintln!("Failed to load tasks: {e}");
            std::process::exit(1);
        }
    };

    match dispatch(&mut store, cli.command) {
        Ok(Outcome::Success(msg)) => {
            if !msg.is_empty() {
                println!("{msg}");
            }
        }
        Ok(Outcome::Failure(msg)) => {
            eprintln!("{msg}");
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(2);
        }
    }
}
