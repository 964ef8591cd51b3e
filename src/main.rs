use clap::{ArgGroup, Parser, Subcommand};
use site_content::config;
use site_content::load::{self, LoadedContent};
use site_content::locale::Language;
use site_content::model::{ContentType, NewsCategory};
use site_content::output;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "site-content")]
#[command(about = "Query and validate localized marketing-site content")]
#[command(long_about = "\
Query and validate localized marketing-site content

The content directory is the data source. Each content type has a base
catalog directory; a `custom/` sub-directory holds override records that
replace base records with the same id.

Content structure:

  content/
  ├── content.toml                 # Config (optional)
  ├── authors.json                 # Author directory
  ├── articles/
  │   ├── 010-lean-production.json # Base record (number = catalog order)
  │   └── custom/
  │       └── 010-lean-production.json  # Override (replaces the whole record)
  ├── news/
  ├── case-studies/
  └── updates/

Text is shown in --lang (default from content.toml). Text missing in that
language falls back to English.

Run 'site-content gen-config' to generate a documented content.toml.")]
#[command(version)]
struct Cli {
    /// Content directory
    #[arg(long, default_value = "content", global = true)]
    source: PathBuf,

    /// Display language (en, hu, de)
    #[arg(long, global = true)]
    lang: Option<Language>,

    /// Log loading details to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Load and validate the content tree, then print an inventory
    Check,
    /// List items of one content type
    #[command(group(ArgGroup::new("filter").args(["featured", "tag", "recent", "category"])))]
    List {
        /// article, news, case-study or update
        content_type: ContentType,
        /// Only featured items
        #[arg(long)]
        featured: bool,
        /// Only items carrying this exact tag
        #[arg(long)]
        tag: Option<String>,
        /// Newest items first; optional count (default from content.toml)
        #[arg(long, num_args = 0..=1)]
        recent: Option<Option<usize>>,
        /// News category (news only)
        #[arg(long)]
        category: Option<NewsCategory>,
    },
    /// Show one item by slug, or by id with --id
    Show {
        content_type: ContentType,
        #[arg(required_unless_present = "id")]
        slug: Option<String>,
        #[arg(long, conflicts_with = "slug")]
        id: Option<String>,
    },
    /// Case-insensitive search over titles, descriptions, excerpts and tags
    Search { content_type: ContentType, query: String },
    /// Items sharing a tag with the given item, newest first
    Related {
        content_type: ContentType,
        id: String,
        /// Maximum number of items (default from content.toml)
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Every tag used by a content type
    Tags { content_type: ContentType },
    /// Write the merged content as JSON
    Export {
        /// Output file (stdout when omitted)
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Print a stock content.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_tracing(cli.verbose)?;

    if matches!(cli.command, Command::GenConfig) {
        print!("{}", config::stock_config_toml());
        return Ok(());
    }

    let LoadedContent { config, repository } = load::load(&cli.source)?;
    let lang = cli.lang.unwrap_or(config.locale.default_language);
    info!(source = %cli.source.display(), %lang, "content loaded");

    match cli.command {
        Command::Check => {
            println!("==> Checking {}", cli.source.display());
            output::print_inventory(&repository);
            println!("==> Content is valid");
        }
        Command::List {
            content_type,
            featured,
            tag,
            recent,
            category,
        } => {
            let items = if featured {
                repository.featured(content_type)
            } else if let Some(tag) = &tag {
                repository.by_tag(content_type, tag)
            } else if let Some(limit) = recent {
                repository.recent(content_type, limit.unwrap_or(config.queries.recent_limit))
            } else if let Some(category) = category {
                if content_type != ContentType::News {
                    return Err(format!("--category only applies to news, not {content_type}").into());
                }
                repository.news_by_category(category)
            } else {
                repository.all(content_type)
            };
            output::print_item_list(&items, lang);
        }
        Command::Show {
            content_type,
            slug,
            id,
        } => {
            let (item, key) = match (&id, &slug) {
                (Some(id), _) => (repository.by_id(content_type, id), id),
                (None, Some(slug)) => (repository.by_slug(content_type, slug), slug),
                (None, None) => return Err("either a slug or --id is required".into()),
            };
            let Some(item) = item else {
                return Err(format!("{content_type} '{key}' not found").into());
            };
            output::print_item_detail(item, repository.author_of(item), lang);
        }
        Command::Search {
            content_type,
            query,
        } => {
            output::print_item_list(&repository.search(content_type, &query), lang);
        }
        Command::Related {
            content_type,
            id,
            limit,
        } => {
            if repository.by_id(content_type, &id).is_none() {
                return Err(format!("{content_type} '{id}' not found").into());
            }
            let limit = limit.unwrap_or(config.queries.related_limit);
            output::print_item_list(&repository.related(content_type, &id, limit), lang);
        }
        Command::Tags { content_type } => {
            output::print_tags(&repository.all_tags(content_type));
        }
        Command::Export { output: target } => {
            let json = serde_json::to_string_pretty(&repository.snapshot())?;
            match target {
                Some(path) => {
                    std::fs::write(&path, json)?;
                    println!("==> Exported to {}", path.display());
                }
                None => println!("{json}"),
            }
        }
        Command::GenConfig => {}
    }

    Ok(())
}

/// Log to stderr. `RUST_LOG` wins; otherwise warnings only, or debug with
/// `--verbose`.
fn init_tracing(verbose: bool) -> Result<(), Box<dyn std::error::Error>> {
    let default = if verbose {
        "site_content=debug"
    } else {
        "site_content=warn"
    };
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) if !verbose => filter,
        Ok(filter) => filter.add_directive(default.parse()?),
        Err(_) => EnvFilter::new(default),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}
