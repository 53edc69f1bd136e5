use std::fs;
use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use anyhow::Context;
use clap::{Args, Parser, Subcommand, ValueEnum};
use ode_client::surface::{self, Toast, ToastKind, EXAMPLE_APPLIED_MESSAGE};
use ode_client::{
  catalog, logging, ConditionSet, HtmlPolicy, HttpTransport, Normalizer,
  Notation, Orchestrator, Renderer, Session, DEFAULT_ENDPOINT,
};
use simplelog::LevelFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
  /// Log verbosity
  #[arg(
    long,
    global = true,
    env = "ODE_CLIENT_LOG",
    value_enum,
    default_value_t = LogLevel::Warn
  )]
  log_level: LogLevel,

  /// Also write log lines to this file
  #[arg(long, global = true)]
  log_file: Option<PathBuf>,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Normalize an equation and send it to the solving service
  Solve(SolveArgs),
  /// Print the canonical form of an equation without sending it
  Normalize {
    /// Equation in informal notation, e.g. "y'' + y = 0"
    equation: String,
    #[command(flatten)]
    notation: NotationArgs,
  },
  /// Turn solution text from a file (or stdin) into markup
  Render {
    path: Option<PathBuf>,
    /// Escape HTML in the text outside math spans
    #[arg(long)]
    escape_html: bool,
  },
  /// List the built-in example equations
  Examples,
}

#[derive(Args)]
struct SolveArgs {
  /// Equation in informal notation, e.g. "y'' + y = 0"
  #[arg(conflicts_with = "example")]
  equation: Option<String>,

  /// Solve the numbered equation from `examples` instead
  #[arg(long)]
  example: Option<usize>,

  /// Initial condition such as "y(0)=1"; may be given up to three times
  #[arg(short, long = "condition")]
  conditions: Vec<String>,

  /// Solving service endpoint
  #[arg(long, env = "ODE_SOLVER_URL", default_value = DEFAULT_ENDPOINT)]
  endpoint: String,

  /// Abort the request after this many seconds
  #[arg(long, env = "ODE_SOLVER_TIMEOUT")]
  timeout: Option<u64>,

  /// Escape HTML in the solution text outside math spans
  #[arg(long)]
  escape_html: bool,

  /// Also write the solution as a standalone HTML page
  #[arg(long)]
  html: Option<PathBuf>,

  #[command(flatten)]
  notation: NotationArgs,
}

#[derive(Args)]
struct NotationArgs {
  /// Function being differentiated
  #[arg(long, default_value = "y")]
  dependent: String,
  /// Variable of differentiation
  #[arg(long, default_value = "x")]
  independent: String,
}

impl NotationArgs {
  fn normalizer(self) -> anyhow::Result<Normalizer> {
    let notation = Notation::new(self.dependent, self.independent)?;
    Ok(Normalizer::new(notation)?)
  }
}

#[derive(Clone, Copy, ValueEnum)]
enum LogLevel {
  Off,
  Error,
  Warn,
  Info,
  Debug,
  Trace,
}

impl From<LogLevel> for LevelFilter {
  fn from(level: LogLevel) -> Self {
    match level {
      LogLevel::Off => LevelFilter::Off,
      LogLevel::Error => LevelFilter::Error,
      LogLevel::Warn => LevelFilter::Warn,
      LogLevel::Info => LevelFilter::Info,
      LogLevel::Debug => LevelFilter::Debug,
      LogLevel::Trace => LevelFilter::Trace,
    }
  }
}

fn html_policy(escape_html: bool) -> HtmlPolicy {
  if escape_html {
    HtmlPolicy::EscapeText
  } else {
    HtmlPolicy::Trusted
  }
}

fn show_toast(toast: &Toast) {
  let icon = match toast.kind {
    ToastKind::Success => '✔',
    ToastKind::Error => '✖',
  };
  eprintln!("{icon} {}", toast.message);
}

fn solve(args: SolveArgs) -> anyhow::Result<ExitCode> {
  let normalizer = args.notation.normalizer()?;
  let renderer = Renderer::new(html_policy(args.escape_html));
  let transport = HttpTransport::new(
    &args.endpoint,
    args.timeout.map(Duration::from_secs),
  )?;
  let orchestrator =
    Orchestrator::with_pipeline(transport, normalizer, renderer);
  let mut session =
    Session::with_conditions(ConditionSet::from_inputs(args.conditions)?);

  let equation = match args.example {
    Some(number) => {
      let example = catalog::example(number)
        .with_context(|| format!("there is no example number {number}"))?;
      show_toast(&Toast::success(EXAMPLE_APPLIED_MESSAGE));
      example.equation.to_string()
    }
    None => args.equation.unwrap_or_default(),
  };

  let outcome = tokio::runtime::Runtime::new()?
    .block_on(orchestrator.submit(&mut session, &equation));

  let presentation = surface::present(&outcome);
  println!("{}", presentation.markup);
  show_toast(&presentation.toast);

  match (&outcome, &args.html) {
    (Ok(solution), Some(path)) => {
      let page = surface::page(&solution.payload.equation, &solution.markup);
      fs::write(path, page)
        .with_context(|| format!("writing {}", path.display()))?;
    }
    (Err(_), _) => return Ok(ExitCode::FAILURE),
    _ => {}
  }

  Ok(ExitCode::SUCCESS)
}

fn render(path: Option<PathBuf>, escape_html: bool) -> anyhow::Result<()> {
  let text = match path {
    Some(path) => fs::read_to_string(&path)
      .with_context(|| format!("reading {}", path.display()))?,
    None => {
      let mut text = String::new();
      std::io::stdin()
        .read_to_string(&mut text)
        .context("reading stdin")?;
      text
    }
  };
  println!("{}", Renderer::new(html_policy(escape_html)).render(&text));
  Ok(())
}

fn list_examples() {
  let mut current = "";
  for (number, category, example) in catalog::numbered() {
    if category.name != current {
      current = category.name;
      println!("{current}");
    }
    println!("  {number:>2}. {:<36} {}", example.equation, example.description);
  }
}

fn main() -> anyhow::Result<ExitCode> {
  let cli = Cli::parse();
  logging::init(cli.log_level.into(), cli.log_file.as_deref())?;

  match cli.command {
    Commands::Solve(args) => return solve(args),
    Commands::Normalize { equation, notation } => {
      println!("{}", notation.normalizer()?.normalize(&equation));
    }
    Commands::Render { path, escape_html } => render(path, escape_html)?,
    Commands::Examples => list_examples(),
  }

  Ok(ExitCode::SUCCESS)
}
