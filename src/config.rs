use std::io::Write;
use std::path::{Path, PathBuf};
use crate::Engine;

///file name looked for in the working and home directories
pub const FILE_NAME: &str = ".rpncalc";

///Candidate config locations, in lookup order.
pub fn default_paths() -> Vec<PathBuf> {
	let mut paths = vec![PathBuf::from(FILE_NAME)];
	let home = std::env::var_os("HOME").map(PathBuf::from).unwrap_or_else(|| PathBuf::from("."));
	paths.push(home.join(FILE_NAME));
	paths.push(home.join(".config").join("rpncalc").join("rpncalc.conf"));
	paths
}

///first of `paths` that exists
pub fn discover(paths: &[PathBuf]) -> Option<PathBuf> {
	paths.iter().find(|p| p.is_file()).cloned()
}

///Contents of a config file: the prompt format on the first line, then program lines run at startup.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ConfigFile {
	///`None` if the first line was empty
	pub prompt: Option<String>,
	pub program: Vec<String>
}
impl ConfigFile {
	pub fn parse(text: &str) -> Self {
		let mut lines = text.lines();
		let prompt = lines.next()
			.map(|l| l.strip_prefix('"').unwrap_or(l))
			.map(|l| l.strip_suffix('"').unwrap_or(l))
			.filter(|l| !l.is_empty())
			.map(String::from);
		let program = lines
			.map(|l| l.split_once('#').map_or(l, |(code, _)| code).trim())	//remove comments
			.filter(|l| !l.is_empty())
			.map(String::from)
			.collect();
		Self {prompt, program}
	}

	pub fn load(path: &Path) -> std::io::Result<Self> {
		Ok(Self::parse(&std::fs::read_to_string(path)?))
	}

	///Runs the program lines on `engine`, writing error messages to `error`.
	///
	///Returns the number of lines that failed.
	pub fn apply(&self, engine: &mut Engine, error: &mut dyn Write) -> std::io::Result<usize> {
		let mut failed = 0;
		for line in &self.program {
			if let Err(e) = engine.evaluate(line) {
				writeln!(error, "{e}")?;
				failed += 1;
			}
		}
		Ok(failed)
	}
}
