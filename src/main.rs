use std::io::IsTerminal;
use std::path::PathBuf;
use anyhow::Result;
use clap::Parser;
use rustyline::{DefaultEditor, error::ReadlineError};
use tracing::{debug, info, warn};
use rpncalc::{Capacity, DisplayMode, Engine, EngineConfig, Prompt, Reply, config::{self, ConfigFile}, prompt, session, stdio};

///Interactive RPN calculator
#[derive(Parser)]
#[command(name = "rpncalc", version)]
#[command(about = "RPN calculator with a bounded stack, user-defined words and a templated prompt")]
#[command(after_help = "prompt format specifiers:\n    &l  : stack limit\n    &c  : current stack size\n    &Nt : top N stack values\n    &s  : current stash value")]
struct Args {
	///Entering something that is not a number, operator or defined word is an error
	#[arg(short, long)]
	strict: bool,

	///Do not display the stack after operations (useful with '&Nt' in the prompt)
	#[arg(short, long)]
	no_display: bool,

	///Stack size limit, no limit if negative
	#[arg(short, long, default_value_t = 8, allow_negative_numbers = true)]
	limit: i64,

	///Path to config file, default locations are searched if not provided
	#[arg(short, long)]
	config: Option<PathBuf>,

	///Format string for the interactive prompt [default: " &c > "]
	#[arg(short, long)]
	prompt: Option<String>,

	///Maximum word expansion depth
	#[arg(short, long, default_value_t = 256)]
	depth: usize,

	///Log filter for diagnostics on stderr
	#[arg(long, default_value = "warn")]
	log_level: String,

	///Programs to run instead of entering interactive mode
	programs: Vec<String>,
}

fn main() -> Result<()> {
	let args = Args::parse();

	tracing_subscriber::fmt()
		.with_env_filter(&args.log_level)
		.with_writer(std::io::stderr)
		.init();

	let piped = !std::io::stdin().is_terminal();
	let interactive = args.programs.is_empty() && !piped;
	let mut engine = Engine::with_defaults(EngineConfig {
		capacity: Capacity::from_limit(args.limit),
		display: if args.no_display {DisplayMode::Hidden}
			else if interactive {DisplayMode::Interactive}
			else {DisplayMode::Script},
		strict: args.strict,
		max_depth: args.depth
	});

	let cfg_path = args.config.clone().or_else(|| config::discover(&config::default_paths()));
	let cfg = match cfg_path {
		Some(path) => {
			info!("parsing config file... {}", path.display());
			match ConfigFile::load(&path) {
				Ok(cfg) => {
					let failed = cfg.apply(&mut engine, &mut std::io::stderr())?;
					if failed>0 {warn!("{failed} config line(s) failed, enter 'help' to see operators that cannot be used as words");}
					else {info!("successfully parsed config file");}
					cfg
				}
				Err(e) => {
					warn!("could not open config file {} : {e}", path.display());	//carry on with defaults
					ConfigFile::default()
				}
			}
		}
		None => {
			debug!("no config file found");
			ConfigFile::default()
		}
	};

	if piped && args.programs.is_empty() {
		debug!("reading script from stdin");
		session::run_script(&mut engine, &mut stdio!())?;
		return Ok(());
	}
	if !interactive {
		session::run_programs(&mut engine, args.programs.as_slice(), &mut std::io::stdout(), &mut std::io::stderr())?;
		return Ok(());
	}

	let fmt = args.prompt.or(cfg.prompt).unwrap_or_else(|| prompt::DEFAULT_FORMAT.to_string());
	let prompt = Prompt::parse(&fmt, &engine)?;
	eprintln!("rpncalc v{}", env!("CARGO_PKG_VERSION"));
	interactive_mode(&mut engine, &prompt)
}

fn interactive_mode(engine: &mut Engine, prompt: &Prompt) -> Result<()> {
	let mut rl = DefaultEditor::new()?;
	loop {
		match rl.readline(&prompt.render(engine)) {
			Ok(line) => {
				if !line.trim().is_empty() {
					let _ = rl.add_history_entry(line.as_str());
				}
				match engine.evaluate(&line) {
					Ok(Reply::Text(t)) => {print!("{t}");}
					Ok(Reply::Quit) => {break;}
					Err(e) => {eprintln!("{e}");}
				}
			}
			Err(ReadlineError::Interrupted|ReadlineError::Eof) => {break;}
			Err(e) => {return Err(e.into());}
		}
	}
	println!();
	Ok(())
}
