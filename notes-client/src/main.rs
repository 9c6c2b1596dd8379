mod api;
mod dto;
mod form;
mod list;
mod page;

use std::io::{self, BufRead, Write};

use chrono::Local;
use clap::{Parser, Subcommand};

use api::HttpNotesApi;
use dto::Note;
use form::Submitted;
use page::NotesPage;

#[derive(Debug, Parser)]
#[command(name = "notes-client", about = "Create, list, edit and delete notes")]
struct Cli {
    /// Base URL of the notes server
    #[arg(
        long,
        env = "NOTES_API_URL",
        default_value = "http://127.0.0.1:8000",
        global = true
    )]
    base_url: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Show all notes, newest first
    List,
    /// Create a note
    Add {
        #[arg(long)]
        title: String,
        #[arg(long)]
        content: String,
        /// Comma separated tags
        #[arg(long, default_value = "")]
        tags: String,
    },
    /// Replace a note's title, content and tags. Omitted fields keep their value.
    Edit {
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        content: Option<String>,
        /// Comma separated tags
        #[arg(long)]
        tags: Option<String>,
    },
    /// Delete a note
    Delete {
        id: String,
        /// Skip the confirmation prompt
        #[arg(long, short)]
        yes: bool,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt().with_writer(io::stderr).init();

    let cli = Cli::parse();
    let api = HttpNotesApi::new(&cli.base_url)?;
    let mut page = NotesPage::new();

    match cli.command {
        Command::List => {
            page.open(&api).await;
            print_list(&page);
        }
        Command::Add {
            title,
            content,
            tags,
        } => {
            page.form.title = title;
            page.form.content = content;
            page.form.tags = tags;
            report(page.submit_form(&api).await?);
            print_list(&page);
        }
        Command::Edit {
            id,
            title,
            content,
            tags,
        } => {
            page.open(&api).await;
            let note = find_note(&page, &id)?;
            page.edit(&note);

            if let Some(title) = title {
                page.form.title = title;
            }
            if let Some(content) = content {
                page.form.content = content;
            }
            if let Some(tags) = tags {
                page.form.tags = tags;
            }

            report(page.submit_form(&api).await?);
            print_list(&page);
        }
        Command::Delete { id, yes } => {
            if !yes && !confirm("Are you sure you want to delete this note?")? {
                println!("Cancelled");
                return Ok(());
            }

            page.open(&api).await;
            if let Err(e) = page.delete(&api, &id).await {
                eprintln!("Failed to delete note");
                return Err(e.into());
            }
            println!("Deleted note {id}\n");
            print_list(&page);
        }
    }

    Ok(())
}

fn find_note(page: &NotesPage, id: &str) -> Result<Note, Box<dyn std::error::Error>> {
    if let Some(error) = page.list.error() {
        return Err(error.into());
    }

    page.list
        .notes()
        .iter()
        .find(|note| note.id == id)
        .cloned()
        .ok_or_else(|| format!("Note {id} not found").into())
}

fn confirm(question: &str) -> io::Result<bool> {
    print!("{question} [y/N] ");
    io::stdout().flush()?;

    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim(), "y" | "Y" | "yes"))
}

fn report(submitted: Submitted) {
    match submitted {
        Submitted::Created(note) => println!("Created note {}\n", note.id),
        Submitted::Updated(note) => println!("Updated note {}\n", note.id),
    }
}

fn print_list(page: &NotesPage) {
    if let Some(error) = page.list.error() {
        println!("{error}. Run the command again to retry.");
        return;
    }

    let notes = page.list.notes();
    if notes.is_empty() {
        println!("No notes yet. Create your first note!");
        return;
    }

    for note in notes {
        println!("{}", render_card(note));
    }
}

fn render_card(note: &Note) -> String {
    let mut card = format!("[{}] {}\n", note.id, note.title);

    if !note.content.is_empty() {
        card.push_str(&note.content);
        card.push('\n');
    }

    card.push_str(&format!(
        "Created: {}",
        note.created_at.with_timezone(&Local).format("%Y-%m-%d")
    ));
    if let Some(updated_at) = note.updated_at {
        card.push_str(&format!(
            "  Updated: {}",
            updated_at.with_timezone(&Local).format("%Y-%m-%d")
        ));
    }
    card.push('\n');

    if !note.tags.is_empty() {
        card.push_str(&format!("Tags: {}\n", form::format_tags(&note.tags)));
    }

    card
}
