use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use serde::Deserialize;

use folio_core::store::{JournalStore, UserGroupStore, UserStore};
use folio_core::{
    ArticleDocument, ArticleImporter, FsFileStore, ImportRequest, Journal, LocalizedString,
    Messages, NoopSearchIndex, Role, SqliteStore, User, UserGroup, WorkflowStage,
};

// ─── CLI Definition ─────────────────────────────────────────────────────────

#[derive(Parser)]
#[command(
    name = "folio",
    about = "Import bepress-exported journal content into a journal store",
    version,
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to the SQLite database (overrides folio.toml).
    #[arg(long, global = true)]
    db: Option<String>,

    /// Root directory for managed galley files (overrides folio.toml).
    #[arg(long, global = true)]
    files: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create (or migrate) the database.
    Init,

    /// Journal management.
    Journal {
        #[command(subcommand)]
        action: JournalAction,
    },

    /// User management.
    User {
        #[command(subcommand)]
        action: UserAction,
    },

    /// User-group management.
    Group {
        #[command(subcommand)]
        action: GroupAction,
    },

    /// Import one article: a metadata XML document plus its PDF(s).
    Import {
        /// Journal path the article belongs to.
        #[arg(long)]
        journal: String,
        /// Username running the import.
        #[arg(long)]
        user: String,
        /// Username of the editor to assign to the production stage.
        #[arg(long)]
        editor: String,
        /// Email used for authors without one.
        #[arg(long)]
        default_email: String,
        /// Volume identifier (from the export's directory layout).
        #[arg(long)]
        volume: String,
        /// Issue number identifier.
        #[arg(long)]
        number: String,
        /// metadata.xml followed by one or more PDF paths.
        #[arg(required = true, num_args = 2..)]
        paths: Vec<PathBuf>,
    },
}

#[derive(Subcommand)]
enum JournalAction {
    /// Register a journal.
    Add {
        #[arg(long)]
        path: String,
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "en_US")]
        locale: String,
        #[arg(long)]
        default_license_url: Option<String>,
        #[arg(long)]
        default_copyright_holder: Option<String>,
    },
    /// List registered journals.
    List,
}

#[derive(Subcommand)]
enum UserAction {
    /// Register a user.
    Add {
        #[arg(long)]
        username: String,
        #[arg(long)]
        email: String,
        #[arg(long, default_value = "")]
        given: String,
        #[arg(long, default_value = "")]
        family: String,
    },
}

#[derive(Subcommand)]
enum GroupAction {
    /// Register a user group for a journal.
    Add {
        #[arg(long)]
        journal: String,
        #[arg(long, value_parser = parse_role)]
        role: Role,
        #[arg(long)]
        name: String,
        /// Workflow stages the group participates in.
        #[arg(long = "stage", value_parser = parse_stage)]
        stages: Vec<WorkflowStage>,
    },
}

fn parse_role(raw: &str) -> Result<Role, String> {
    raw.parse()
}

fn parse_stage(raw: &str) -> Result<WorkflowStage, String> {
    raw.parse()
}

// ─── Config ─────────────────────────────────────────────────────────────────

/// Optional `folio.toml` beside the working directory.
#[derive(Debug, Deserialize)]
#[serde(default)]
struct CliConfig {
    database: String,
    files_dir: String,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            database: "folio.db".to_string(),
            files_dir: "files".to_string(),
        }
    }
}

impl CliConfig {
    fn load() -> Result<Self> {
        let path = Path::new("folio.toml");
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = fs::read_to_string(path).context("reading folio.toml")?;
        toml::from_str(&raw).context("parsing folio.toml")
    }
}

// ─── Entry point ────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "folio=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = CliConfig::load()?;
    let db_path = cli.db.clone().unwrap_or(config.database);
    let files_dir = cli.files.clone().unwrap_or(config.files_dir);

    let store = SqliteStore::open(Path::new(&db_path))
        .with_context(|| format!("opening database {db_path}"))?;

    match cli.command {
        Commands::Init => {
            println!("Database ready at {db_path}");
        }

        Commands::Journal { action } => match action {
            JournalAction::Add {
                path,
                name,
                locale,
                default_license_url,
                default_copyright_holder,
            } => {
                let id = store.insert_journal(&Journal {
                    id: 0,
                    path: path.clone(),
                    name: LocalizedString::with(&locale, name),
                    primary_locale: locale,
                    default_license_url,
                    default_copyright_holder,
                    default_copyright_year: None,
                })?;
                println!("Added journal {path} (id {id})");
            }
            JournalAction::List => {
                for journal in store.journals()? {
                    println!(
                        "{}\t{}\t{}",
                        journal.id,
                        journal.path,
                        journal.display_name()
                    );
                }
            }
        },

        Commands::User { action } => match action {
            UserAction::Add {
                username,
                email,
                given,
                family,
            } => {
                let id = store.insert_user(&User {
                    id: 0,
                    username: username.clone(),
                    email,
                    given_name: given,
                    family_name: family,
                })?;
                println!("Added user {username} (id {id})");
            }
        },

        Commands::Group { action } => match action {
            GroupAction::Add {
                journal,
                role,
                name,
                stages,
            } => {
                let journal = store
                    .journal_by_path(&journal)?
                    .with_context(|| format!("unknown journal: {journal}"))?;
                let id = store.insert_user_group(&UserGroup {
                    id: 0,
                    journal_id: journal.id,
                    role,
                    name: name.clone(),
                    stages,
                })?;
                println!("Added group {name} (id {id})");
            }
        },

        Commands::Import {
            journal,
            user,
            editor,
            default_email,
            volume,
            number,
            paths,
        } => {
            import_article(
                &store, &files_dir, &journal, &user, &editor, &default_email, &volume, &number,
                &paths,
            )?;
        }
    }

    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn import_article(
    store: &SqliteStore,
    files_dir: &str,
    journal_path: &str,
    username: &str,
    editor_name: &str,
    default_email: &str,
    volume: &str,
    number: &str,
    paths: &[PathBuf],
) -> Result<()> {
    let journal = store
        .journal_by_path(journal_path)?
        .with_context(|| format!("unknown journal: {journal_path}"))?;
    let user = store
        .user_by_username(username)?
        .with_context(|| format!("unknown user: {username}"))?;
    let editor = store
        .user_by_username(editor_name)?
        .with_context(|| format!("unknown user: {editor_name}"))?;
    if !default_email.contains('@') {
        bail!("invalid default email: {default_email}");
    }

    let (xml_path, pdf_paths) = paths
        .split_first()
        .context("expected a metadata XML path and at least one PDF")?;
    if pdf_paths.is_empty() {
        bail!("expected at least one PDF after the metadata XML");
    }
    let document = ArticleDocument::from_file(xml_path)
        .with_context(|| format!("parsing {}", xml_path.display()))?;

    let files = FsFileStore::new(files_dir);
    let search = NoopSearchIndex;
    let importer = ArticleImporter::new(store, &files, &search);
    let catalog = Messages::new();

    match importer.import(&ImportRequest {
        journal: &journal,
        user: &user,
        editor: &editor,
        document: &document,
        pdf_paths,
        volume,
        number,
        default_email,
    }) {
        Ok(outcome) => {
            println!("Imported issue: {}", outcome.issue.identification());
            println!(
                "Imported section: {}",
                outcome
                    .section
                    .title
                    .localized(&journal.primary_locale)
                    .unwrap_or("?")
            );
            println!(
                "Imported article: {}",
                outcome
                    .publication
                    .title
                    .localized(&journal.primary_locale)
                    .unwrap_or("?")
            );
            Ok(())
        }
        Err(error) => {
            for message in error.messages(&catalog) {
                eprintln!("{message}");
            }
            Err(error.into())
        }
    }
}
