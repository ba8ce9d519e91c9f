use clap::Parser;
use titanium::cli::commands::add::NewEntry;
use titanium::cli::commands::edit::EntryChanges;
use titanium::cli::commands::get::GetAction;
use titanium::cli::{Cli, Commands};
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Init => titanium::cli::commands::init::execute(&cli),
        Commands::Add {
            ref title,
            ref username,
            ref url,
            ref notes,
            ref category,
            ref tags,
        } => titanium::cli::commands::add::execute(
            &cli,
            NewEntry {
                title,
                username,
                url,
                notes: notes.as_deref(),
                category: category.as_deref(),
                tags,
            },
        ),
        Commands::List { ref search } => {
            titanium::cli::commands::list::execute(&cli, search.as_deref())
        }
        Commands::Get {
            ref entry,
            details,
            copy,
            copy_username,
        } => titanium::cli::commands::get::execute(
            &cli,
            entry,
            GetAction::from_flags(details, copy, copy_username),
        ),
        Commands::Edit {
            ref entry,
            ref title,
            ref username,
            ref url,
            ref notes,
            ref category,
            ref tags,
            password,
        } => titanium::cli::commands::edit::execute(
            &cli,
            entry,
            EntryChanges {
                title: title.as_deref(),
                username: username.as_deref(),
                url: url.as_deref(),
                notes: notes.as_deref(),
                category: category.as_deref(),
                tags,
                password,
            },
        ),
        Commands::Delete { ref entry, force } => {
            titanium::cli::commands::delete::execute(&cli, entry, force)
        }
        Commands::RotatePassword {
            ref new_hardware_token,
        } => titanium::cli::commands::rotate::execute(&cli, new_hardware_token.as_deref()),
        Commands::Export { ref output } => titanium::cli::commands::export::execute(&cli, output),
        Commands::Import {
            ref file,
            verify,
            force,
        } => titanium::cli::commands::import_cmd::execute(&cli, file, verify, force),
        Commands::Version => titanium::cli::commands::version::execute(),
        Commands::Completions { shell } => titanium::cli::commands::completions::execute(shell),
    };

    if let Err(e) = result {
        titanium::cli::output::error(&e.to_string());
        std::process::exit(1);
    }
}

/// Log to stderr.  `TITANIUM_LOG` wins; otherwise `-v` selects debug.
fn init_tracing(verbose: bool) {
    let fallback = if verbose { "titanium=debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_env("TITANIUM_LOG").unwrap_or_else(|_| EnvFilter::new(fallback));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
