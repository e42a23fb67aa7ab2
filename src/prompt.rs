use phf::phf_map;
use regex::Regex;
use crate::{Engine, error::CalcError, stack::format_value};

///default escape character of prompt templates
pub const ESCAPE: char = '&';
///default prompt template
pub const DEFAULT_FORMAT: &str = " &c > ";
///placeholder for a missing stack slot
pub const MISSING: &str = "N";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Spec {
	Limit,
	Count,
	Stash,
	Top
}

///specifier letters
static SPECS: phf::Map<char, Spec> = phf_map! {
	'l' => Spec::Limit,
	'c' => Spec::Count,
	's' => Spec::Stash,
	't' => Spec::Top,
};

lazy_static! {
	///optional count, then the specifier itself
	static ref SEQUENCE: Regex = Regex::new(r"(?s)^([0-9]*)(.)").unwrap();
}

type Render = Box<dyn Fn(&Engine) -> String>;

///the `n` topmost values, most recent last, missing ones as `MISSING`
fn top(n: usize) -> Render {
	Box::new(move |e: &Engine| {
		let vals = e.stack().values();
		let l = vals.len();
		(0..n).rev()
			.map(|i| if i<l {format_value(vals[l-1-i])} else {MISSING.to_string()})
			.collect::<Vec<String>>()
			.join(" ")
	})
}

fn renderer(spec: Spec, count: usize) -> Render {
	match spec {
		Spec::Limit => Box::new(|e: &Engine| e.stack().capacity().to_string()),
		Spec::Count => Box::new(|e: &Engine| e.stack().len().to_string()),
		Spec::Stash => Box::new(|e: &Engine| format_value(e.stack().stash)),
		Spec::Top => top(count)
	}
}

///Compiled prompt template.
///
///Rendering yields `segments[0] + renderers[0](engine) + segments[1] + ... + segments[n]`.
pub struct Prompt {
	segments: Vec<String>,
	renderers: Vec<Render>
}
impl Prompt {
	///Compiles `format` against the current state of `engine`.
	///
	///Every `escape` that is not the last character may be followed by a decimal count and a specifier:
	///- `l`: stack capacity
	///- `c`: current stack size
	///- `s`: stash value
	///- `Nt`: top N stack values (N defaults to the stack capacity)
	///
	///Unknown specifiers are left as they are. Errors only if the scan itself went wrong.
	pub fn compile(format: &str, escape: char, engine: &Engine) -> Result<Self, CalcError> {
		let default_count = engine.stack().capacity();
		let mut segments = Vec::new();
		let mut renderers = Vec::new();
		let mut lit = String::new();
		let mut rest = format;
		while let Some(pos) = rest.find(escape) {
			lit.push_str(&rest[..pos]);
			let after = &rest[pos+escape.len_utf8()..];
			if let Some(caps) = SEQUENCE.captures(after) {
				let spec = caps[2].chars().next().and_then(|c| SPECS.get(&c));
				if let Some(&spec) = spec {
					let count = caps[1].parse::<usize>().unwrap_or(default_count);
					segments.push(std::mem::take(&mut lit));
					renderers.push(renderer(spec, count));
					rest = &after[caps[0].len()..];
					continue;
				}
			}
			lit.push(escape);	//not a sequence, rescan right after the escape
			rest = after;
		}
		lit.push_str(rest);
		segments.push(lit);

		if segments.len() != renderers.len()+1 {
			return Err(CalcError::Prompt {segments: segments.len(), renderers: renderers.len()});
		}
		Ok(Self {segments, renderers})
	}

	///default escape character
	pub fn parse(format: &str, engine: &Engine) -> Result<Self, CalcError> {
		Self::compile(format, ESCAPE, engine)
	}

	///number of substituted specifiers
	pub fn specifiers(&self) -> usize {self.renderers.len()}

	pub fn render(&self, engine: &Engine) -> String {
		let mut out = String::new();
		for (seg, r) in self.segments.iter().zip(self.renderers.iter()) {
			out.push_str(seg);
			out.push_str(&r(engine));
		}
		if let Some(last) = self.segments.last() {
			out.push_str(last);
		}
		out
	}
}
