use clap::{Parser, Subcommand};
use share_core::*;
use std::path::PathBuf;
use uuid::Uuid;

#[derive(Parser)]
#[command(name = "repshare")]
#[command(about = "Fitness content sharing toolkit", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Override data directory
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Share a completed session (whole, or picked highlights)
    Share {
        /// Path to a session JSON file
        session_file: PathBuf,

        /// Package the whole session with highlights embedded
        #[arg(long)]
        full: bool,

        /// Highlight a whole exercise (repeatable)
        #[arg(long = "exercise")]
        exercises: Vec<Uuid>,

        /// Highlight one set, as exercise-uuid:set-uuid (repeatable)
        #[arg(long = "set")]
        sets: Vec<String>,
    },

    /// Share a plain text post
    Post {
        /// Message text
        text: String,
    },

    /// Render the local share feed
    Feed,

    /// Decode a raw snapshot payload and show its summary
    Describe {
        /// Path to a file holding snapshot bytes
        payload_file: PathBuf,
    },
}

fn main() -> Result<()> {
    share_core::logging::init();

    let cli = Cli::parse();

    let config = Config::load()?;
    let data_dir = cli.data_dir.unwrap_or_else(|| config.data.data_dir.clone());

    match cli.command {
        Commands::Share {
            session_file,
            full,
            exercises,
            sets,
        } => cmd_share(data_dir, session_file, full, exercises, sets, &config),
        Commands::Post { text } => cmd_post(data_dir, text),
        Commands::Feed => cmd_feed(data_dir),
        Commands::Describe { payload_file } => cmd_describe(payload_file),
    }
}

fn outbox_path(data_dir: &std::path::Path) -> PathBuf {
    data_dir.join("outbox.jsonl")
}

fn cmd_share(
    data_dir: PathBuf,
    session_file: PathBuf,
    full: bool,
    exercises: Vec<Uuid>,
    sets: Vec<String>,
    config: &Config,
) -> Result<()> {
    let contents = std::fs::read_to_string(&session_file)?;
    let session: Session = serde_json::from_str(&contents)?;
    let unit = config.display.distance_unit.as_str();

    let shares = if exercises.is_empty() && sets.is_empty() {
        // No highlights picked: plain whole-session share
        vec![share_session(&session, unit)?]
    } else {
        let mut selection = HighlightSelection::new(session, unit);
        for exercise_id in exercises {
            selection.toggle_exercise(exercise_id)?;
        }
        for spec in sets {
            let (exercise_id, set_id) = parse_set_spec(&spec)?;
            selection.toggle_set(exercise_id, set_id)?;
        }
        selection.set_share_entire_session(full);
        selection.confirm()?
    };

    let mut sink = JsonlOutbox::new(outbox_path(&data_dir));
    for content in &shares {
        let record = ShareRecord::new(content.clone());
        sink.append(&record)?;
        display_summary(&describe_content(content));
    }
    println!("Shared {} item(s)", shares.len());

    Ok(())
}

fn cmd_post(data_dir: PathBuf, text: String) -> Result<()> {
    let content = share_text(text);
    let mut sink = JsonlOutbox::new(outbox_path(&data_dir));
    sink.append(&ShareRecord::new(content.clone()))?;
    display_summary(&describe_content(&content));
    println!("Shared 1 item(s)");
    Ok(())
}

fn cmd_feed(data_dir: PathBuf) -> Result<()> {
    let records = read_records(&outbox_path(&data_dir))?;
    if records.is_empty() {
        println!("Feed is empty");
        return Ok(());
    }

    // Newest first, like the app's feed
    for record in records.iter().rev() {
        println!("── {} ──", record.created_at.format("%b %-d, %Y %H:%M"));
        display_summary(&describe_content(&record.content));
    }
    Ok(())
}

fn cmd_describe(payload_file: PathBuf) -> Result<()> {
    let bytes = std::fs::read(&payload_file)?;
    // Decode failure is a renderable state, not an error exit
    let decoded = decode_content(&bytes);
    display_summary(&describe(&decoded));
    Ok(())
}

/// Parse an `exercise-uuid:set-uuid` argument
fn parse_set_spec(spec: &str) -> Result<(Uuid, Uuid)> {
    let (exercise, set) = spec.split_once(':').ok_or_else(|| {
        Error::Validation(format!("expected exercise-uuid:set-uuid, got `{}`", spec))
    })?;
    let exercise_id = Uuid::parse_str(exercise)
        .map_err(|e| Error::Validation(format!("bad exercise id `{}`: {}", exercise, e)))?;
    let set_id = Uuid::parse_str(set)
        .map_err(|e| Error::Validation(format!("bad set id `{}`: {}", set, e)))?;
    Ok((exercise_id, set_id))
}

fn display_summary(summary: &ContentSummary) {
    println!("[{}] {}  {}", summary.icon.as_str(), summary.label, summary.title);
    if !summary.stats.is_empty() {
        println!("    {}", summary.stat_line());
    }
}
