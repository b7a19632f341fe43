use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};

use sanad_core::draft::Field;
use sanad_core::i18n::{translate, Language};
use sanad_core::validate::{validate_all, FieldError};
use sanad_core::{GuestSession, SqliteKv, WizardStore};

/// Sanad: bilingual social-support application wizard
#[derive(Parser, Debug)]
#[command(name = "sanad")]
#[command(about = "Social support application wizard", long_about = None)]
struct Cli {
    /// Directory holding the saved draft database
    #[arg(long, default_value = ".")]
    state_dir: PathBuf,

    /// Message language (en or ar)
    #[arg(long, default_value = "en")]
    lang: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the saved draft, current step and validation status
    Show,
    /// Write a single field, as the form does when a field loses focus
    Set {
        /// Field name (camelCase, e.g. nationalId)
        field: String,
        value: String,
    },
    /// Merge a JSON object of fields into the draft
    Fill {
        /// Path to a JSON file of field values
        file: PathBuf,
    },
    /// Move one step forward
    Next,
    /// Move one step backward
    Prev,
    /// Go to a specific step
    Goto { step: i64 },
    /// Validate all data-entry steps
    Validate,
    /// Submit the application to a running sanad server
    Submit(SubmitArgs),
    /// Clear the draft and erase the saved mirror
    Reset,
}

#[derive(Parser, Debug)]
struct SubmitArgs {
    /// Base URL of the sanad server
    #[arg(long, default_value = "http://localhost:3000")]
    server: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let lang = Language::from_tag(&cli.lang);

    let db_path = cli.state_dir.join("sanad-wizard.db");
    let kv = Arc::new(SqliteKv::new(&db_path).context("Failed to open draft database")?);
    let store = WizardStore::with_default_timing(kv.clone());
    store.initialize().await?;

    match cli.command {
        Commands::Show => show(&store, lang).await,
        Commands::Set { field, value } => {
            let field = parse_field(&field)?;
            store.update_field(field, value).await;
            println!("{}: {}", field, store.draft().await.get(field));
            Ok(())
        }
        Commands::Fill { file } => fill(&store, &file).await,
        Commands::Next => {
            store.advance().await;
            store.settled().await;
            print_step(&store, lang).await;
            Ok(())
        }
        Commands::Prev => {
            store.retreat().await;
            store.settled().await;
            print_step(&store, lang).await;
            Ok(())
        }
        Commands::Goto { step } => {
            store.jump_to_step(step).await;
            store.settled().await;
            print_step(&store, lang).await;
            Ok(())
        }
        Commands::Validate => {
            let errors = validate_all(&store.draft().await);
            print_errors(&errors, lang);
            if errors.is_empty() {
                println!("{}", translate(lang, "readyToSubmit"));
                Ok(())
            } else {
                Err(anyhow!("{} field(s) need attention", errors.len()))
            }
        }
        Commands::Submit(args) => submit(&store, kv, lang, &args.server).await,
        Commands::Reset => {
            store.reset_draft().await;
            println!("draft cleared");
            Ok(())
        }
    }
}

fn parse_field(name: &str) -> Result<Field> {
    Field::parse(name).ok_or_else(|| {
        let known: Vec<_> = Field::ALL.iter().map(|f| f.as_str()).collect();
        anyhow!("unknown field {name:?}; known fields: {}", known.join(", "))
    })
}

async fn print_step(store: &WizardStore, lang: Language) {
    let step = store.current_step().await;
    println!(
        "{} {} {} 4",
        translate(lang, "step"),
        step,
        translate(lang, "of")
    );
}

async fn show(store: &WizardStore, lang: Language) -> Result<()> {
    println!("{}", translate(lang, "applicationTitle"));
    print_step(store, lang).await;
    println!();

    let draft = store.draft().await;
    for field in Field::ALL {
        let value = draft.get(field);
        let label = translate(lang, field.as_str());
        if value.is_empty() {
            println!("  {label}: -");
        } else {
            println!("  {label}: {value}");
        }
    }

    let errors = validate_all(&draft);
    println!();
    if errors.is_empty() {
        println!("{}", translate(lang, "readyToSubmit"));
    } else {
        println!("{} field(s) incomplete or invalid", errors.len());
    }
    Ok(())
}

async fn fill(store: &WizardStore, file: &PathBuf) -> Result<()> {
    let raw = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;
    let values: serde_json::Value =
        serde_json::from_str(&raw).context("Fill file must be a JSON object")?;
    let object = values
        .as_object()
        .ok_or_else(|| anyhow!("Fill file must be a JSON object of field values"))?;

    let mut patch = Vec::new();
    for (key, value) in object {
        let field = parse_field(key)?;
        let value = value
            .as_str()
            .ok_or_else(|| anyhow!("value for {key:?} must be a string"))?;
        patch.push((field, value.to_string()));
    }

    let count = patch.len();
    store.update_fields(patch).await;
    println!("merged {count} field(s)");
    Ok(())
}

async fn submit(
    store: &WizardStore,
    kv: Arc<SqliteKv>,
    lang: Language,
    server: &str,
) -> Result<()> {
    let draft = store.draft().await;

    let errors = validate_all(&draft);
    if !errors.is_empty() {
        print_errors(&errors, lang);
        return Err(anyhow!("fix the draft before submitting"));
    }

    let session = GuestSession::new(kv);
    let token = session.get_or_create()?;

    println!("{}", translate(lang, "submitting"));
    let client = reqwest::Client::new();
    let response = client
        .post(format!("{server}/api/submit-application"))
        .bearer_auth(&token)
        .json(&draft)
        .send()
        .await
        .context("Failed to reach the server")?;

    if !response.status().is_success() {
        let status = response.status();
        let body: serde_json::Value = response.json().await.unwrap_or_default();
        let message = body["error"].as_str().unwrap_or("unknown error");
        // The draft is left untouched so the submission can be retried.
        return Err(anyhow!("submission failed ({status}): {message}"));
    }

    let receipt: serde_json::Value = response
        .json()
        .await
        .context("Failed to parse the submission receipt")?;
    let reference = receipt["referenceNumber"]
        .as_str()
        .ok_or_else(|| anyhow!("receipt is missing the reference number"))?;

    println!("{}", translate(lang, "applicationSubmitted"));
    println!("{} {}", translate(lang, "applicationNumber"), reference);
    if let Some(eta) = receipt["estimatedProcessingTime"].as_str() {
        println!("estimated processing time: {eta}");
    }

    store.mark_submitted();
    store.reset_draft().await;
    session.refresh()?;
    Ok(())
}

fn print_errors(errors: &[FieldError], lang: Language) {
    for error in errors {
        println!(
            "  {}: {}",
            translate(lang, error.field.as_str()),
            translate(lang, error.kind.message_key())
        );
    }
}
