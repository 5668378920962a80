use clap::Parser;
use interpret_js::globals::install_default_globals;
use interpret_js::EvalError;
use interpret_js::Interpreter;
use interpret_js::InterpreterOptions;
use std::fs;
use std::path::PathBuf;
use std::process::exit;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Run JavaScript-subset programs")]
struct Cli {
  /// Evaluate the given source text (repeatable; each source runs in its own interpreter).
  #[arg(short = 'e', long = "execute")]
  execute: Vec<String>,

  /// Print the parsed syntax tree as JSON instead of evaluating.
  #[arg(long)]
  dump_ast: bool,

  /// Evaluate unsupported constructs to undefined instead of failing.
  #[arg(long)]
  skip_unsupported: bool,

  /// Path to a script file; a shebang line is stripped.
  file: Option<PathBuf>,
}

fn main() {
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::from_default_env())
    .with_writer(std::io::stderr)
    .init();

  let cli = Cli::parse();
  if cli.execute.is_empty() && cli.file.is_none() {
    eprintln!("error: provide a script file or --execute source");
    exit(2);
  };

  let options = InterpreterOptions {
    skip_unsupported: cli.skip_unsupported,
  };

  for source in &cli.execute {
    if !run(source, options, cli.dump_ast) {
      exit(1);
    };
  }

  if let Some(path) = &cli.file {
    let source = match fs::read_to_string(path) {
      Ok(source) => source,
      Err(err) => {
        eprintln!("error: failed to read {}: {err}", path.display());
        exit(1);
      }
    };
    if !run(strip_shebang(&source), options, cli.dump_ast) {
      exit(1);
    };
  };
}

fn strip_shebang(source: &str) -> &str {
  match source.strip_prefix("#!") {
    Some(rest) => match rest.find('\n') {
      Some(i) => &rest[i + 1..],
      None => "",
    },
    None => source,
  }
}

/// Evaluate one source and print its final value. Returns false on any error, after reporting it.
fn run(source: &str, options: InterpreterOptions, dump_ast: bool) -> bool {
  let mut top = match syntax_js::parse(source) {
    Ok(top) => top,
    Err(err) => {
      eprintln!("SyntaxError: {err}");
      return false;
    }
  };

  if dump_ast {
    match serde_json::to_string_pretty(&top) {
      Ok(json) => {
        println!("{json}");
        return true;
      }
      Err(err) => {
        eprintln!("error: failed to serialise syntax tree: {err}");
        return false;
      }
    }
  };

  scope_js::compute_symbols(&mut top);
  let mut interp = Interpreter::new(&top, options);
  install_default_globals(&mut interp);
  match interp.run() {
    Ok(value) => {
      println!("{}", interp.render_value(&value));
      true
    }
    Err(EvalError::Throw(value)) => {
      eprintln!("Uncaught {}", interp.render_value(&value));
      false
    }
    Err(err) => {
      eprintln!("{err}");
      false
    }
  }
}
