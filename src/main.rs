use anyhow::Result;
use clap::{Parser, Subcommand};
use ledgerflow_config::StartParams;
use ledgerflow_runtime::{ChannelNotifier, RunEvent, WorkflowRuntime};
use tokio::sync::mpsc;

/// Ledgerflow - simulated ledger workflows for document sharing and licensing
#[derive(Parser)]
#[command(name = "ledgerflow")]
#[command(version, about, long_about = None)]
struct Cli {
  #[command(subcommand)]
  command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
  /// Drive one sharing workflow to settlement
  Run {
    #[command(subcommand)]
    target: RunTarget,
  },
}

#[derive(Subcommand)]
enum RunTarget {
  /// Share a document privately with named recipients
  Share {
    /// Recipient email address (repeatable)
    #[arg(long = "email", required = true)]
    emails: Vec<String>,
  },

  /// Offer a paid license to named recipients
  License {
    /// Recipient email address (repeatable)
    #[arg(long = "email", required = true)]
    emails: Vec<String>,

    /// Monthly fee in whole USDC
    #[arg(long, default_value_t = 50)]
    monthly_fee: u64,

    /// License template to record on the ledger
    #[arg(long, default_value = "standard-v1")]
    template: String,
  },

  /// Share firm-wide behind a group access token
  Firm {
    /// Firm admin to notify
    #[arg(long)]
    admin_email: Option<String>,

    /// Monthly fee in whole USDC
    #[arg(long, default_value_t = 120)]
    monthly_fee: u64,

    /// License template to record on the ledger
    #[arg(long, default_value = "firm-v1")]
    template: String,

    /// Number of firm members to grant access
    #[arg(long, default_value_t = 10)]
    members: u32,
  },

  /// Publish a data co-op listing
  Coop {
    /// One-time listing price in whole USDC
    #[arg(long, default_value_t = 250)]
    price: u64,

    /// Number of co-op members in the revenue split
    #[arg(long, default_value_t = 3)]
    members: u32,
  },
}

impl RunTarget {
  fn into_params(self) -> StartParams {
    match self {
      RunTarget::Share { emails } => StartParams::Share {
        shared_emails: emails,
      },
      RunTarget::License {
        emails,
        monthly_fee,
        template,
      } => StartParams::License {
        licensed_emails: emails,
        monthly_fee,
        license_template: template,
      },
      RunTarget::Firm {
        admin_email,
        monthly_fee,
        template,
        members,
      } => StartParams::FirmShare {
        admin_email,
        monthly_fee,
        license_template: template,
        member_count: members,
      },
      RunTarget::Coop { price, members } => StartParams::CoopShare {
        price_usdc: price,
        member_count: members,
      },
    }
  }
}

fn main() -> Result<()> {
  let cli = Cli::parse();

  match cli.command {
    Some(Commands::Run { target }) => {
      let rt = tokio::runtime::Runtime::new()?;
      rt.block_on(run_workflow(target.into_params()))
    }
    None => {
      println!("ledgerflow - use --help to see available commands");
      Ok(())
    }
  }
}

async fn run_workflow(params: StartParams) -> Result<()> {
  let (tx, mut rx) = mpsc::unbounded_channel();
  let runtime = WorkflowRuntime::with_notifier(params.mode(), ChannelNotifier::new(tx));

  // Progress goes to stderr; the summary document goes to stdout.
  let printer = tokio::spawn(async move {
    while let Some(event) = rx.recv().await {
      match event {
        RunEvent::RunStarted { run_id, mode } => {
          eprintln!("run {run_id} started ({mode})");
        }
        RunEvent::EventProcessing { id, name, .. } => {
          eprintln!("  [{id}] {name} ...");
        }
        RunEvent::EventCompleted { id, name, .. } => {
          eprintln!("  [{id}] {name} completed");
        }
        RunEvent::Toast { title, description } => {
          eprintln!("  * {title}: {description}");
        }
        RunEvent::RunFailed { error, .. } => {
          eprintln!("run failed: {error}");
          break;
        }
        RunEvent::RunSettled { .. } => {
          eprintln!("run settled");
        }
        RunEvent::SummaryReady { .. } => break,
        RunEvent::ClipboardCopy { .. } => {}
      }
    }
  });

  let handle = runtime.start(params).await?;
  handle.settled().await?;
  printer.await?;

  println!("{}", runtime.summary_json());
  Ok(())
}
