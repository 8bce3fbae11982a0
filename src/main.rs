use std::io::{self, Read};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use flowline_config::FlowDef;
use flowline_graph::{Flow, Resolver, ValidationMode, reachable_in_order};

/// Flowline - resolve the order in which a flow's steps run
#[derive(Parser)]
#[command(name = "flowline")]
#[command(version, about, long_about = None)]
struct Cli {
  /// Log filter, e.g. "debug" or "flowline_graph=debug"
  #[arg(long, global = true, env = "FLOWLINE_LOG", default_value = "warn")]
  log_level: String,

  #[command(subcommand)]
  command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
  /// Print the execution order of a flow
  Order {
    /// Path to the flow file (JSON); reads stdin when omitted or "-"
    flow_file: Option<PathBuf>,

    /// Reject duplicate ids, dangling edges and multiple start nodes
    #[arg(long)]
    strict: bool,

    /// Fail instead of appending nodes caught in a cycle
    #[arg(long)]
    require_acyclic: bool,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
  },

  /// Print the nodes reachable from a node, in discovery order
  Reachable {
    /// Path to the flow file (JSON); reads stdin when omitted or "-"
    flow_file: Option<PathBuf>,

    /// The node ID to start from
    #[arg(long)]
    from: String,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
  },

  /// Report structural problems in a flow
  Validate {
    /// Path to the flow file (JSON); reads stdin when omitted or "-"
    flow_file: Option<PathBuf>,
  },
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
  Text,
  Json,
}

fn main() -> Result<()> {
  let cli = Cli::parse();
  init_tracing(&cli.log_level);

  let rt = tokio::runtime::Runtime::new()?;
  rt.block_on(async move {
    match cli.command {
      Some(Commands::Order {
        flow_file,
        strict,
        require_acyclic,
        format,
      }) => {
        let mode = if strict {
          ValidationMode::Strict
        } else {
          ValidationMode::Lenient
        };
        print_order(flow_file, mode, require_acyclic, format).await
      }
      Some(Commands::Reachable {
        flow_file,
        from,
        format,
      }) => print_reachable(flow_file, from, format).await,
      Some(Commands::Validate { flow_file }) => validate(flow_file).await,
      None => {
        println!("flowline - use --help to see available commands");
        Ok(())
      }
    }
  })
}

fn init_tracing(filter: &str) {
  let filter = EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new("warn"));
  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(io::stderr)
    .init();
}

async fn print_order(
  flow_file: Option<PathBuf>,
  mode: ValidationMode,
  require_acyclic: bool,
  format: OutputFormat,
) -> Result<()> {
  let def = read_flow(flow_file.as_deref()).await?;
  info!(flow_id = %def.flow_id, nodes = def.nodes.len(), "loaded flow");

  let order = Resolver::new(mode)
    .resolve(&def.nodes, &def.edges)
    .with_context(|| format!("flow '{}' failed validation", def.flow_id))?;

  if require_acyclic {
    order
      .clone()
      .into_complete()
      .with_context(|| format!("flow '{}' has no complete execution order", def.flow_id))?;
  } else if !order.is_complete() {
    warn!(
      cyclic_nodes = ?order.cyclic_nodes(),
      "some nodes were placed without dependency resolution"
    );
  }

  match format {
    OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&order)?),
    OutputFormat::Text => {
      for id in order.ordered() {
        println!("{}", id);
      }
      for id in order.cyclic_nodes() {
        println!("{} (cycle)", id);
      }
    }
  }

  Ok(())
}

async fn print_reachable(
  flow_file: Option<PathBuf>,
  from: String,
  format: OutputFormat,
) -> Result<()> {
  let flow = Flow::new(read_flow(flow_file.as_deref()).await?);
  let graph = flow.graph();
  if !graph.contains(&from) {
    bail!("node '{}' not found in flow '{}'", from, flow.def().flow_id);
  }

  let reachable = reachable_in_order(&from, &graph);
  debug!(from = %from, count = reachable.len(), "computed reachable nodes");

  match format {
    OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&reachable)?),
    OutputFormat::Text => {
      for id in &reachable {
        println!("{}", id);
      }
    }
  }

  Ok(())
}

async fn validate(flow_file: Option<PathBuf>) -> Result<()> {
  let flow = Flow::new(read_flow(flow_file.as_deref()).await?);
  let def = flow.def();

  let problems = Resolver::strict().diagnostics(&def.nodes, &def.edges);
  for problem in &problems {
    println!("error: {}", problem);
  }

  let order = flow.execution_order();
  if !order.is_complete() {
    println!(
      "warning: nodes in or behind a cycle: {}",
      order.cyclic_nodes().join(", ")
    );
  }

  if !problems.is_empty() {
    bail!(
      "flow '{}' has {} structural problem(s)",
      def.flow_id,
      problems.len()
    );
  }

  eprintln!("Flow '{}' is valid ({} nodes)", def.flow_id, def.nodes.len());
  Ok(())
}

async fn read_flow(flow_file: Option<&Path>) -> Result<FlowDef> {
  match flow_file {
    Some(path) if path != Path::new("-") => {
      let content = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("failed to read flow file: {}", path.display()))?;

      FlowDef::from_json(&content)
        .with_context(|| format!("failed to parse flow file: {}", path.display()))
    }
    _ => {
      let content = read_stdin()?;
      FlowDef::from_json(&content).context("failed to parse flow from stdin")
    }
  }
}

fn read_stdin() -> Result<String> {
  use std::io::IsTerminal;

  if io::stdin().is_terminal() {
    bail!("no flow file given and stdin is a terminal");
  }

  let mut input = String::new();
  io::stdin()
    .read_to_string(&mut input)
    .context("failed to read flow from stdin")?;
  Ok(input)
}
