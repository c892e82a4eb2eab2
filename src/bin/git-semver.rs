use anyhow::Result;
use clap::Parser;

use git_plus::cli::semver::{run_semver, SemverArgs};
use git_plus::git::Git2Repository;
use git_plus::{logging, ui, GitPlusError};

fn main() -> Result<()> {
    let args = SemverArgs::parse();
    logging::init(args.verbose);

    let repo = match Git2Repository::open(".") {
        Ok(repo) => repo,
        Err(e) => {
            ui::display_error(&e.to_string());
            std::process::exit(1);
        }
    };

    let mut stdout = std::io::stdout();
    match run_semver(&repo, &args.increment(), &args.suffix, &mut stdout) {
        Ok(_) => Ok(()),
        Err(GitPlusError::Tag(message)) => {
            ui::display_error(&format!("Error creating tag: {}", message));
            std::process::exit(1);
        }
        Err(e @ GitPlusError::Version(_)) => {
            ui::display_error(&e.to_string());
            std::process::exit(1);
        }
        Err(e) => Err(e.into()),
    }
}
