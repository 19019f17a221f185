use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use console::style;
use dialoguer::Confirm;
use std::collections::BTreeMap;
use vsadmin::config::Config;
use vsadmin::csv::{export_csv, export_import_layout, template_csv};
use vsadmin::import::{run_import, ImportSummary};
use vsadmin::vstore::extract::guess_mime_type;
use vsadmin::vstore::{AttributeSet, ColumnLayout, FileStorage, OpenAiClient, VectorStoreApi};
use vsadmin::{logging, Notice, NoticeKind, Session};

#[derive(Parser, Debug)]
#[command(name = "vsadmin", version, about = "Manage files and attributes in a hosted vector store")]
struct Cli {
    /// Config file (defaults to the platform config dir).
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<String>,

    /// Vector store to operate on (overrides `vector_store_id` in config).
    #[arg(long, short = 's', global = true, value_name = "ID")]
    store: Option<String>,

    /// Debug logging on stderr.
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List vector stores visible to the API key.
    Stores,
    /// Show the store's files as a table.
    List {
        /// Override a column width, e.g. `--width Name=40`. Repeatable.
        #[arg(long = "width", value_name = "COLUMN=WIDTH")]
        widths: Vec<String>,
        /// Print JSON instead of a table.
        #[arg(long)]
        json: bool,
    },
    /// Show one file's metadata and attributes.
    Show { file_id: String },
    /// Replace a file's attributes with a JSON object.
    Update {
        file_id: String,
        #[arg(long, value_name = "JSON")]
        attributes: String,
    },
    /// Remove a file from the store and delete it.
    Delete {
        file_id: String,
        /// Skip the confirmation prompt.
        #[arg(long, short = 'y')]
        yes: bool,
    },
    /// Upload a local file and attach it to the store.
    Upload {
        path: String,
        #[arg(long, value_name = "JSON")]
        attributes: Option<String>,
    },
    /// Export the store's files and attributes as CSV.
    Export {
        /// Output file (stdout when omitted).
        #[arg(long, short = 'o', value_name = "PATH")]
        out: Option<String>,
        #[arg(long, value_enum, default_value_t = ExportLayout::Full)]
        layout: ExportLayout,
    },
    /// Write a starter CSV describing the attribute schema.
    Template {
        #[arg(long, short = 'o', value_name = "PATH")]
        out: Option<String>,
    },
    /// Apply attributes from a `File Name,Attributes` CSV.
    Import {
        csv_path: String,
        /// Print the summary as JSON.
        #[arg(long)]
        json: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ExportLayout {
    /// Every column: name, id, size, created, purpose, store, attributes.
    Full,
    /// Only `File Name,Attributes`, ready to edit and re-import.
    Import,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref())?;
    logging::init(cli.verbose, &config.log_level);
    let storage = FileStorage::current_dir();

    match cli.command {
        Command::Template { out } => {
            let written = storage.write_text(out.as_deref(), &template_csv()?).await?;
            if let Some(path) = written {
                eprintln!("{} Template written to {}", style("✓").green(), path.display());
            }
            Ok(())
        }
        Command::Stores => {
            let client = build_client(&config)?;
            let stores = client.list_vector_stores().await?;
            for s in stores {
                let files = s.file_counts.map(|c| c.total).unwrap_or_default();
                println!(
                    "{}\t{}\t{} files",
                    s.id,
                    s.name.unwrap_or_default(),
                    files
                );
            }
            Ok(())
        }
        command => {
            let store = cli
                .store
                .or_else(|| config.vector_store_id.clone())
                .context("No vector store selected: pass --store or set vector_store_id in config")?;
            let mut session = Session::new(build_client(&config)?, store);
            let result = run_store_command(&mut session, command, &config, &storage).await;
            print_notices(&notices_to_print(session.take_notices(), result.is_err()));
            result
        }
    }
}

fn build_client(config: &Config) -> Result<OpenAiClient> {
    let key = config.api_key.as_deref().unwrap_or_default();
    OpenAiClient::new(&config.base_url, key, config.timeout()).context("Failed to create API client")
}

async fn run_store_command<A: VectorStoreApi>(
    session: &mut Session<A>,
    command: Command,
    config: &Config,
    storage: &FileStorage,
) -> Result<()> {
    match command {
        Command::List { widths, json } => {
            let files = session.refresh().await?;
            if json {
                println!("{}", serde_json::to_string_pretty(files)?);
                return Ok(());
            }
            let mut overrides = config.table.column_widths.clone();
            overrides.extend(parse_widths(&widths)?);
            let (layout, unknown) = ColumnLayout::with_widths(&overrides);
            for title in unknown {
                eprintln!("{} Unknown column {title:?}", style("!").yellow());
            }
            print!("{}", layout.render(files));
        }
        Command::Show { file_id } => {
            session.refresh().await?;
            let details = session.describe(&file_id).await?;
            println!("{}", serde_json::to_string_pretty(&details)?);
        }
        Command::Update { file_id, attributes } => {
            let attributes = parse_attributes(&attributes)?;
            session.update_attributes(&file_id, attributes).await?;
        }
        Command::Delete { file_id, yes } => {
            if !yes {
                let confirmed = Confirm::new()
                    .with_prompt(format!("Delete {file_id} from {}?", session.vector_store_id()))
                    .default(false)
                    .interact()?;
                if !confirmed {
                    eprintln!("Cancelled");
                    return Ok(());
                }
            }
            session.delete_file(&file_id).await?;
        }
        Command::Upload { path, attributes } => {
            let attributes = attributes.as_deref().map(parse_attributes).transpose()?;
            let (name, data) = storage.read(&path).await?;
            let mime = guess_mime_type(&name);
            session.upload_file(&name, mime, data, attributes).await?;
        }
        Command::Export { out, layout } => {
            let files = session.refresh().await?;
            let csv = match layout {
                ExportLayout::Full => export_csv(files)?,
                ExportLayout::Import => export_import_layout(files)?,
            };
            let count = files.len();
            if let Some(path) = storage.write_text(out.as_deref(), &csv).await? {
                eprintln!("{} Exported {count} files to {}", style("✓").green(), path.display());
            }
        }
        Command::Import { csv_path, json } => {
            let text = storage.read_text(&csv_path).await?;
            session.refresh().await?;
            let summary = run_import(session, &text).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                print_summary(&summary);
            }
        }
        Command::Stores | Command::Template { .. } => {
            bail!("this command does not operate on a vector store")
        }
    }
    Ok(())
}

fn parse_attributes(text: &str) -> Result<AttributeSet> {
    serde_json::from_str(text).context("Attributes must be a JSON object")
}

fn parse_widths(args: &[String]) -> Result<BTreeMap<String, usize>> {
    let mut widths = BTreeMap::new();
    for arg in args {
        let Some((title, width)) = arg.split_once('=') else {
            bail!("Invalid width {arg:?}, expected COLUMN=WIDTH");
        };
        let width = width
            .trim()
            .parse()
            .with_context(|| format!("Invalid width {arg:?}"))?;
        widths.insert(title.trim().to_string(), width);
    }
    Ok(widths)
}

/// When the command fails, anyhow reports the error itself, so its error
/// notice is dropped.
fn notices_to_print(notices: Vec<Notice>, failed: bool) -> Vec<Notice> {
    notices
        .into_iter()
        .filter(|n| !failed || n.kind != NoticeKind::Error)
        .collect()
}

fn print_notices(notices: &[Notice]) {
    for notice in notices {
        match notice.kind {
            NoticeKind::Success => eprintln!("{} {}", style("✓").green(), notice.message),
            NoticeKind::Error => eprintln!("{} {}", style("✗").red(), notice.message),
        }
    }
}

fn print_summary(summary: &ImportSummary) {
    println!(
        "Import complete: {} updated, {} not found, {} failed",
        style(summary.succeeded_count()).green(),
        style(summary.not_found_count()).yellow(),
        style(summary.failed_count()).red(),
    );
    for name in &summary.succeeded {
        println!("  {} {name}", style("updated").green());
    }
    for name in &summary.not_found {
        println!("  {} {name}", style("not found").yellow());
    }
    for row in &summary.failed {
        println!("  {} {}: {}", style("failed").red(), row.file_name, row.reason);
    }
    if let Some(err) = &summary.refresh_error {
        println!("  {} could not reload file list: {err}", style("warning").yellow());
    }
}
