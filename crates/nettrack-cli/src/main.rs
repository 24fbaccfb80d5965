//! `nettrack` — command-line front end for the nettrack API.
//!
//! # Usage
//!
//! ```
//! nettrack --url http://localhost:3000 lists
//! nettrack contacts --query sarah --page 2
//! nettrack --config ~/.config/nettrack/config.toml stats
//! ```

use std::{path::PathBuf, sync::Arc};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use nettrack_cli::{
  client::{ApiClient, ApiConfig},
  hooks::{ContactsHook, DashboardHook, HookState, ListsHook},
};
use nettrack_core::{
  contact::{Contact, NewContact},
  list::{ContactList, NewList},
  store::ContactQuery,
  view::{
    filter_favorite_lists, format_contact_count, format_timestamp, initials,
    sort_lists_by_favorite,
  },
};
use serde::{Deserialize, Serialize};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

const DEFAULT_URL: &str = "http://127.0.0.1:3000";

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "nettrack", about = "Command-line front end for nettrack")]
struct Args {
  /// Path to a TOML config file (url).
  #[arg(short, long, value_name = "FILE")]
  config: Option<PathBuf>,

  /// Base URL of the nettrack server (default: http://127.0.0.1:3000).
  #[arg(long, env = "NETTRACK_URL")]
  url: Option<String>,

  /// Print raw JSON instead of formatted text.
  #[arg(long, global = true)]
  json: bool,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
  /// All lists, favorites first.
  Lists,
  /// Favorite lists only.
  Favorites,
  /// Search and page through contacts.
  Contacts {
    #[arg(short, long)]
    query: Option<String>,
    /// Only contacts in this list.
    #[arg(short, long, value_name = "LIST_ID")]
    list:  Option<Uuid>,
    #[arg(long)]
    page:  Option<u32>,
    #[arg(long)]
    limit: Option<u32>,
  },
  /// One contact with the lists it belongs to.
  Show { id: Uuid },
  AddList {
    name:        String,
    #[arg(long)]
    description: Option<String>,
    /// Color name (blue, green, ...) or palette hex.
    #[arg(long)]
    color:       Option<String>,
    #[arg(long)]
    icon:        Option<String>,
  },
  AddContact {
    first_name: String,
    last_name:  Option<String>,
    #[arg(long)]
    company:    Option<String>,
    #[arg(long)]
    email:      Option<String>,
    #[arg(long)]
    phone:      Option<String>,
    /// Attach to this list; repeatable.
    #[arg(long = "list", value_name = "LIST_ID")]
    lists:      Vec<Uuid>,
  },
  /// Put a contact in a list.
  Join { list_id: Uuid, contact_id: Uuid },
  /// Take a contact out of a list.
  Leave { list_id: Uuid, contact_id: Uuid },
  /// Dashboard counts.
  Stats,
}

// ─── Config file ──────────────────────────────────────────────────────────────

/// Shape of the optional TOML config file.
#[derive(Deserialize, Default)]
struct ConfigFile {
  #[serde(default)]
  url: String,
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
  tracing_subscriber::fmt()
    .with_writer(std::io::stderr)
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let args = Args::parse();

  let file_cfg: ConfigFile = if let Some(path) = &args.config {
    let raw = std::fs::read_to_string(path)
      .with_context(|| format!("reading config file {}", path.display()))?;
    toml::from_str(&raw).context("parsing config file")?
  } else {
    ConfigFile::default()
  };

  // CLI flag (or env) overrides config file, which overrides the default.
  let api_config = ApiConfig {
    base_url: args
      .url
      .or_else(|| (!file_cfg.url.is_empty()).then(|| file_cfg.url.clone()))
      .unwrap_or_else(|| DEFAULT_URL.to_owned()),
  };
  tracing::debug!(base_url = %api_config.base_url, "using API");

  let client = Arc::new(ApiClient::new(api_config)?);
  run(client, args.command, args.json).await
}

async fn run(client: Arc<ApiClient>, command: Command, json: bool) -> Result<()> {
  match command {
    Command::Lists => {
      let lists = fetch_lists(client).await?;
      emit(json, &sort_lists_by_favorite(&lists), |l| print_lists(l))
    }
    Command::Favorites => {
      let lists = fetch_lists(client).await?;
      emit(json, &filter_favorite_lists(&lists), |l| print_lists(l))
    }
    Command::Contacts { query, list, page, limit } => {
      let base = ContactQuery { text: None, list_id: list, page, page_size: limit };
      let hook = ContactsHook::new(client, base, query.is_none());
      match query {
        Some(text) => hook.search(&text).await,
        None => hook.mount().await,
      }
      let contacts = settled(hook.state())?;
      emit(json, &contacts, |c| print_contacts(c))
    }
    Command::Show { id } => {
      let contact = client.get_contact(id).await?;
      emit(json, &contact, print_contact)
    }
    Command::AddList { name, description, color, icon } => {
      let hook = ListsHook::new(client);
      let input = NewList { description, color, icon, ..NewList::named(name) };
      let list = hook.create_list(input).await?;
      emit(json, &list, |l| print_lists(std::slice::from_ref(l)))
    }
    Command::AddContact { first_name, last_name, company, email, phone, lists } => {
      let hook = ContactsHook::new(client, ContactQuery::default(), false);
      let input = NewContact {
        last_name,
        company,
        email,
        phone,
        list_ids: lists,
        ..NewContact::named(first_name)
      };
      let contact = hook.create_contact(input).await?;
      emit(json, &contact, print_contact)
    }
    Command::Join { list_id, contact_id } => {
      let done = client.add_to_list(list_id, contact_id).await?;
      emit(json, &done, |_| println!("Added {contact_id} to {list_id}"))
    }
    Command::Leave { list_id, contact_id } => {
      let done = client.remove_from_list(list_id, contact_id).await?;
      emit(json, &done, |_| println!("Removed {contact_id} from {list_id}"))
    }
    Command::Stats => {
      let hook = DashboardHook::new(client);
      hook.mount().await;
      let stats = settled(hook.state())?;
      emit(json, &stats, |s| {
        println!("Lists           {}", s.total_lists);
        println!("Favorite lists  {}", s.favorite_lists);
        println!("Contacts        {}", s.total_contacts);
        println!("Added this week {}", s.recently_added);
      })
    }
  }
}

async fn fetch_lists(client: Arc<ApiClient>) -> Result<Vec<ContactList>> {
  let hook = ListsHook::new(client);
  hook.mount().await;
  settled(hook.state())
}

/// Unwrap a mounted hook's data, turning its error into a failure.
fn settled<T>(state: HookState<T>) -> Result<T> {
  match state.error {
    Some(e) => bail!(e),
    None => Ok(state.data),
  }
}

fn emit<T: Serialize>(json: bool, value: &T, text: impl FnOnce(&T)) -> Result<()> {
  if json {
    println!("{}", serde_json::to_string_pretty(value)?);
  } else {
    text(value);
  }
  Ok(())
}

// ─── Output ───────────────────────────────────────────────────────────────────

fn print_lists(lists: &[ContactList]) {
  if lists.is_empty() {
    println!("No lists");
  }
  for l in lists {
    let star = if l.is_favorite { '*' } else { ' ' };
    println!(
      "{star} {:<28} {:<14} {:<7} {}",
      l.name,
      format_contact_count(l.contact_count),
      l.color.to_string(),
      l.id
    );
  }
}

fn print_contacts(contacts: &[Contact]) {
  if contacts.is_empty() {
    println!("No contacts");
  }
  for c in contacts {
    println!(
      "{:<3} {:<28} {:<24} {}",
      initials(&c.first_name, &c.last_name),
      c.display_name(),
      c.company.as_deref().unwrap_or(""),
      c.id
    );
  }
}

fn print_contact(c: &Contact) {
  println!("{} ({})", c.display_name(), initials(&c.first_name, &c.last_name));
  let fields = [
    ("Company", c.company.as_deref()),
    ("Title", c.job_title.as_deref()),
    ("Email", c.email.as_deref()),
    ("Phone", c.phone.as_deref()),
    ("LinkedIn", c.linkedin.as_deref()),
    ("Notes", c.notes.as_deref()),
  ];
  for (label, value) in fields {
    if let Some(value) = value {
      println!("  {label:<10} {value}");
    }
  }
  if !c.tags.is_empty() {
    println!("  {:<10} {}", "Tags", c.tags.join(", "));
  }
  println!("  {:<10} {}/5", "Strength", c.relationship_strength);
  println!("  {:<10} {}", "Added", format_timestamp(c.created_at));
  println!("  {:<10} {}", "Lists", c.list_ids.len());
  println!("  {:<10} {}", "Id", c.id);
}
