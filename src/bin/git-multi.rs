use anyhow::Result;
use clap::Parser;

use git_plus::cli::multi::{group_by_output_default, normalize_args, run_multi, MultiArgs};
use git_plus::multi::GitRunner;
use git_plus::{logging, ui};

fn main() -> Result<()> {
    let args = MultiArgs::parse_from(normalize_args(std::env::args()));
    logging::init(args.verbose);

    let root = std::env::current_dir()?;
    let group_by_output = group_by_output_default(&root);

    let mut stdout = std::io::stdout();
    if let Err(e) = run_multi(&root, &args, group_by_output, &GitRunner, &mut stdout) {
        ui::display_error(&e.to_string());
        std::process::exit(1);
    }

    Ok(())
}
