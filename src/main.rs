use clap::{
    crate_authors, crate_description, crate_name, crate_version, Arg, ArgAction, ArgMatches,
    Command,
};
use std::path::PathBuf;

// The CLI layer should only parse inputs and forward them to library code.
fn main() -> miette::Result<()> {
    let matches = Command::new(crate_name!())
        .about(crate_description!())
        .author(crate_authors!())
        .version(crate_version!())
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable verbose output")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("dry-run")
                .long("dry-run")
                .help("Print the tree that would be generated without writing anything")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("blueprint")
                .short('b')
                .long("blueprint")
                .value_name("FILE")
                .help("Blueprint toml to use instead of the built-in one"),
        )
        .get_matches();

    init_logger(matches.get_flag("verbose"));

    handle_generate(&matches)?;

    Ok(())
}

fn init_logger(is_verbose: bool) {
    let default_filter = if is_verbose { "debug" } else { "warn" };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();
}

fn handle_generate(args: &ArgMatches) -> Result<(), hinagata::HinagataError> {
    let options = hinagata::RunOptions {
        blueprint: args.get_one::<String>("blueprint").map(PathBuf::from),
        dry_run: args.get_flag("dry-run"),
    };

    hinagata::generate(&options)
}
