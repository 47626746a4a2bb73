//! thumbclean - remove orphaned thumbnails
//!
//! Scans `~/.thumbnails`, reads the source URI stored in every thumbnail and
//! deletes the ones whose source file is gone.

use anyhow::Result;
use clap::{CommandFactory, Parser};

use thumbclean::cli::{Cli, Command};
use thumbclean::commands;
use thumbclean::ui::{self, Log};

fn main() -> Result<()> {
	let cli = Cli::parse();

	Log::set_verbose(cli.verbose);

	match cli.command {
		Command::Scan { list, json } => commands::scan::run(list, json),
		Command::Clean { auto_confirm } => commands::clean::run(auto_confirm),
		Command::Help { subcommand } => {
			let mut cmd = Cli::command();
			match subcommand {
				Some(sub) => match cmd.find_subcommand_mut(&sub) {
					Some(sub_cmd) => sub_cmd.print_help()?,
					None => {
						ui::error(&format!("Unknown subcommand: {}", sub));
						cmd.print_help()?;
					}
				},
				None => cmd.print_help()?,
			}
			Ok(())
		}
	}
}
