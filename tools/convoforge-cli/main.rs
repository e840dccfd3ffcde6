use clap::{Parser, Subcommand};
use convoforge::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::Level;

/// Compiles conversation templates into Lua scripts and STF string tables
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Increase log verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate the conversation definition script
    Lua {
        /// Path to the template JSON file
        template: PathBuf,
        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Generate the conversation handler script
    Handler {
        /// Path to the template JSON file
        template: PathBuf,
        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Trigger action prefix that marks read-only quest checks
        #[arg(long, default_value = "has")]
        probe_prefix: String,
    },
    /// Encode the conversation strings of a localized template as STF
    Stf {
        /// Path to the template JSON file
        template: PathBuf,
        /// Output file [default: <template name>.stf]
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Encode the quest journal strings of task screens as STF
    TaskStf {
        /// Path to the template JSON file
        template: PathBuf,
        /// Output file [default: <template name>_tasks.stf]
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Generate every artifact into a directory
    All {
        /// Path to the template JSON file
        template: PathBuf,
        /// Output directory
        #[arg(short, long, default_value = "out")]
        out_dir: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    let start = Instant::now();
    if let Err(e) = run(cli.command) {
        exit_with_error(&e.to_string());
    }
    tracing::info!("done in {:?}", start.elapsed());
}

fn run(command: Command) -> Result<()> {
    match command {
        Command::Lua { template, output } => {
            let template = load_template(&template)?;
            let script = generate_definition_script(&template)?;
            write_text(output.as_deref(), &script)
        }
        Command::Handler {
            template,
            output,
            probe_prefix,
        } => {
            let template = load_template(&template)?;
            let script = ScriptEmitter::builder(&template)
                .with_probe_prefix(&probe_prefix)
                .build()
                .handler()?;
            write_text(output.as_deref(), &script)
        }
        Command::Stf { template, output } => {
            let template = load_template(&template)?;
            let table = LocalizationTable::from_rows(conversation_rows(&template)?);
            let path = output.unwrap_or_else(|| PathBuf::from(format!("{}.stf", template.name())));
            table.save(&path)?;
            println!("Wrote {} strings to '{}'", table.len(), path.display());
            Ok(())
        }
        Command::TaskStf { template, output } => {
            let template = load_template(&template)?;
            let table = LocalizationTable::from_rows(task_rows(&template));
            let path = output
                .unwrap_or_else(|| PathBuf::from(format!("{}_tasks.stf", template.name())));
            table.save(&path)?;
            println!("Wrote {} strings to '{}'", table.len(), path.display());
            Ok(())
        }
        Command::All { template, out_dir } => {
            let template = load_template(&template)?;
            let scripts = ScriptEmitter::new(&template).emit()?;
            let (definition_path, handler_path) = scripts.save_to_dir(&out_dir)?;
            println!("Wrote '{}'", definition_path.display());
            println!("Wrote '{}'", handler_path.display());

            if template.is_localized() {
                let table = LocalizationTable::from_rows(conversation_rows(&template)?);
                let path = out_dir.join(format!("{}.stf", template.name()));
                table.save(&path)?;
                println!("Wrote '{}' ({} strings)", path.display(), table.len());
            }

            let tasks = LocalizationTable::from_rows(task_rows(&template));
            if !tasks.is_empty() {
                let path = out_dir.join(format!("{}_tasks.stf", template.name()));
                tasks.save(&path)?;
                println!("Wrote '{}' ({} strings)", path.display(), tasks.len());
            }
            Ok(())
        }
    }
}

fn load_template(path: &Path) -> Result<Template> {
    let json = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read template file '{}': {}", path.display(), e))?;
    let schema = TemplateSchema::from_json(&json)
        .map_err(|e| format!("Failed to parse template JSON: {}", e))?;
    let template = schema.into_template()?;
    tracing::info!(
        template = %template.name(),
        screens = template.screens().len(),
        "template loaded"
    );
    Ok(template)
}

fn write_text(output: Option<&Path>, text: &str) -> Result<()> {
    match output {
        Some(path) => {
            fs::write(path, text)?;
            println!("Wrote '{}'", path.display());
        }
        None => print!("{}", text),
    }
    Ok(())
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}
