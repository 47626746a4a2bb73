use clap::{builder::Styles, Parser, Subcommand};
use colored::Colorize;

fn styles() -> Styles {
	Styles::styled()
		.header(anstyle::Style::new().bold().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Blue))))
		.usage(anstyle::Style::new().bold().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Blue))))
		.literal(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Blue))))
		.placeholder(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow))))
		.valid(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Blue))))
		.invalid(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))))
}

#[derive(Parser, Debug)]
#[command(
	name = "thumbclean",
	author,
	version,
	about = "Remove thumbnails whose source file no longer exists",
	styles = styles(),
	subcommand_required = true,
	disable_help_subcommand = true,
	after_help = format!(
		"{title}
  {bin} {scan}   {scan_args}        {scan_desc}
  {bin} {scan}   {json_args}      {json_desc}
  {bin} {clean}  {clean_args}          {clean_desc}
  {bin} {help}   {help_args}       {help_desc}",
		title = "Examples:".bright_blue().bold(),
		bin = "thumbclean".bright_blue(),
		scan = "scan".yellow(),
		scan_args = "--list",
		scan_desc = "Report orphaned thumbnails".dimmed(),
		json_args = "--json",
		json_desc = "Machine-readable report".dimmed(),
		clean = "clean".yellow(),
		clean_args = "-y",
		clean_desc = "Delete orphans without asking".dimmed(),
		help = "help".yellow(),
		help_args = "clean",
		help_desc = "Show help for clean".dimmed(),
	),
)]
pub struct Cli {
	/// Enable verbose debug output
	#[arg(short = 'v', long = "verbose", global = true)]
	pub verbose: bool,

	#[command(subcommand)]
	pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
	/// Scan the thumbnail cache and report orphaned thumbnails
	Scan {
		/// Print the path of every orphaned thumbnail
		#[arg(short = 'l', long = "list")]
		list: bool,

		/// Print the final statistics as JSON
		#[arg(long = "json", conflicts_with = "list")]
		json: bool,
	},

	/// Scan the thumbnail cache and delete orphaned thumbnails
	Clean {
		/// Delete without asking for confirmation
		#[arg(short = 'y', long = "yes")]
		auto_confirm: bool,
	},

	/// Show help for a subcommand
	Help {
		/// Subcommand name
		subcommand: Option<String>,
	},
}
