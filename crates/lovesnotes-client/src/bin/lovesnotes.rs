//! lovesnotes: command-line client for the LovesNotes service.

use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};
use uuid::Uuid;

use lovesnotes_client::{ClientConfig, HttpNotesApi, Note, NoteController, NoteField};

#[derive(Parser)]
#[command(name = "lovesnotes")]
#[command(author, version, about = "Manage LovesNotes from the terminal")]
#[command(propagate_version = true)]
struct Cli {
    /// Service base URL (overrides LOVESNOTES_API_URL)
    #[arg(long, global = true)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List all notes
    List,

    /// Show one note
    Show {
        /// Note id
        id: Uuid,
    },

    /// Create a note
    New {
        #[arg(short, long, default_value = "")]
        title: String,

        #[arg(short, long, default_value = "")]
        content: String,
    },

    /// Change a note's title and/or content
    Edit {
        /// Note id
        id: Uuid,

        #[arg(short, long)]
        title: Option<String>,

        #[arg(short, long)]
        content: Option<String>,
    },

    /// Permanently delete a note
    Delete {
        /// Note id
        id: Uuid,
    },

    /// Generate text from a prompt
    Generate {
        /// Prompt for the model
        prompt: String,

        /// Save the generated text as a new note
        #[arg(long)]
        save: bool,

        /// Title for the saved note
        #[arg(short, long, requires = "save")]
        title: Option<String>,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = ClientConfig::from_env();
    if let Some(url) = cli.api_url {
        config.base_url = url;
    }
    let api = HttpNotesApi::new(&config)?;
    let mut controller = NoteController::new(api);

    match cli.command {
        Commands::List => {
            controller.load().await.context("failed to load notes")?;
            if controller.notes().is_empty() {
                println!("No notes yet.");
            }
            for note in controller.notes() {
                println!("{}  {}", note.id, note.display_title());
            }
        }
        Commands::Show { id } => {
            controller.load().await.context("failed to load notes")?;
            controller.select_by_id(id)?;
            let active = controller.active();
            println!("{}\n\n{}", active.display_title(), active.content());
        }
        Commands::New { title, content } => {
            controller.edit_field(NoteField::Title, title);
            controller.edit_field(NoteField::Content, content);
            let note = controller.save().await.context("failed to create note")?;
            print_saved("Created", &note);
        }
        Commands::Edit { id, title, content } => {
            if title.is_none() && content.is_none() {
                anyhow::bail!("nothing to change: pass --title and/or --content");
            }
            controller.load().await.context("failed to load notes")?;
            controller.select_by_id(id)?;
            if let Some(title) = title {
                controller.edit_field(NoteField::Title, title);
            }
            if let Some(content) = content {
                controller.edit_field(NoteField::Content, content);
            }
            let note = controller.save().await.context("failed to update note")?;
            print_saved("Updated", &note);
        }
        Commands::Delete { id } => {
            controller.load().await.context("failed to load notes")?;
            controller.select_by_id(id)?;
            controller.delete().await.context("failed to delete note")?;
            println!("Deleted {}", id);
        }
        Commands::Generate {
            prompt,
            save,
            title,
        } => {
            controller.set_prompt(prompt);
            let text = controller
                .generate()
                .await
                .context("failed to generate text")?;
            println!("{}", text);

            if save {
                controller.adopt_generated();
                if let Some(title) = title {
                    controller.edit_field(NoteField::Title, title);
                }
                let note = controller.save().await.context("failed to save note")?;
                print_saved("Created", &note);
            }
        }
    }
    Ok(())
}

fn print_saved(verb: &str, note: &Note) {
    println!("{} {}  {}", verb, note.id, note.display_title());
}
