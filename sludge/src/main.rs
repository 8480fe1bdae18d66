use std::{io::Write, path::PathBuf};

use clap::{CommandFactory, Parser};
use colored::Colorize;
use sludge::{RenderArgs, SceneArgs, Session, SummaryArgs, TemplateArgs};

fn main() {
	env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

	if std::env::args().len() > 1 {
		cli()
	} else {
		interactive()
	};
}

fn interactive() {
	let mut c = InteractiveCommand::command();
	_ = c.print_help();

	let mut session = Session::new();
	loop {
		print!("{}", "\n=> ".bold().green());
		_ = std::io::stdout().flush();

		let mut line = String::from("sludge ");
		match std::io::stdin().read_line(&mut line) {
			Ok(0) => break,
			Ok(_) => {},
			Err(err) => {
				println!("Error: {}", err);
				break;
			},
		}
		let res = match InteractiveCommand::try_parse_from(line.split_whitespace()) {
			Ok(InteractiveCommand::Load { input }) => session.load(&input),
			Ok(InteractiveCommand::Set { row, x, y, z }) => session.set(row, x, y, z),
			Ok(InteractiveCommand::Show) => {
				print!("{}", session.show());
				Ok(())
			},
			Ok(InteractiveCommand::Summary) => {
				sludge::print_summary(session.table());
				Ok(())
			},
			Ok(InteractiveCommand::Render(args)) => session.render(&args).map(|_| ()),
			Ok(InteractiveCommand::Export { output }) => session.export(&output),
			Ok(InteractiveCommand::Clear) => {
				session.clear();
				Ok(())
			},
			Ok(InteractiveCommand::Quit) => break,
			Err(err) => {
				_ = err.print();
				Ok(())
			},
		};
		if let Err(err) = res {
			println!("Error: {}", err);
		}
	}
}

fn cli() {
	let res = match Command::parse() {
		Command::Render(args) => sludge::render(args),
		Command::Summary(args) => sludge::summary(args),
		Command::Template(args) => sludge::template(args),
	};
	if let Err(err) = res {
		println!("Error: {}", err);
		std::process::exit(if err.is_input() { 2 } else { 1 });
	}
}

#[derive(clap::Parser)]
#[command(arg_required_else_help = false)]
enum InteractiveCommand {
	/// Replace the table with a spreadsheet or delimited text file
	Load { input: PathBuf },
	/// Set one row of the table, rows start at 1
	Set {
		row: usize,
		#[arg(allow_negative_numbers = true)]
		x: f64,
		#[arg(allow_negative_numbers = true)]
		y: f64,
		#[arg(allow_negative_numbers = true)]
		z: f64,
	},
	/// Print the table
	Show,
	/// Print the value ranges of the table
	Summary,
	/// Interpolate the table and write the scene
	Render(SceneArgs),
	/// Write the table as CSV
	Export {
		#[arg(long, short, default_value = "samples.csv")]
		output: PathBuf,
	},
	/// Reset the table to blank rows
	Clear,
	/// Quit application
	Quit,
}

#[derive(clap::Parser)]
#[command(version, about)]
enum Command {
	/// Interpolate a sample file and write the scene
	Render(RenderArgs),
	/// Print the value ranges of a sample file
	Summary(SummaryArgs),
	/// Write a blank table to fill in
	Template(TemplateArgs),
}
