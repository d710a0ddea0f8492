//! Hearthsheet - command line entry point.

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use hearthsheet_domain::{CharacterId, SavedCharacter};
use hearthsheet_engine::{App, EngineConfig};

const USAGE: &str = "Usage: hearthsheet <command>

Commands:
  list                      List saved characters
  new <name>                Create and save a blank character
  roll <modifier> [label]   Roll the duality dice
  gold <id> <total>         Set a saved character's gold
  class <id> <class>        Change a saved character's class
  delete <id>               Delete a saved character
  ask <question>            Ask a rules question";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is fine.
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "hearthsheet_engine=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let mut args = std::env::args().skip(1);
    let Some(command) = args.next() else {
        anyhow::bail!(USAGE);
    };
    let rest: Vec<String> = args.collect();

    let config = EngineConfig::from_env().context("reading configuration")?;
    let app = App::from_config(&config)
        .await
        .context("opening the character store")?;

    match command.as_str() {
        "list" => list(&app).await,
        "new" => new_character(&app, &rest).await,
        "roll" => roll(&app, &rest).await,
        "gold" => set_gold(&app, &rest).await,
        "class" => set_class(&app, &rest).await,
        "delete" => delete(&app, &rest).await,
        "ask" => ask(&app, &rest).await,
        other => anyhow::bail!("Unknown command: {other}\n\n{USAGE}"),
    }
}

fn print_characters(characters: &[SavedCharacter]) {
    if characters.is_empty() {
        println!("No saved characters.");
        return;
    }
    for saved in characters {
        let sheet = &saved.sheet;
        println!(
            "{}  {} (level {} {}), {}g",
            saved.id, sheet.name, sheet.level, sheet.class_name, sheet.gold
        );
    }
}

fn parse_id(arg: Option<&String>) -> anyhow::Result<CharacterId> {
    let raw = arg.context("missing character id")?;
    raw.parse::<CharacterId>()
        .with_context(|| format!("invalid character id: {raw}"))
}

async fn list(app: &App) -> anyhow::Result<()> {
    let characters = app.store.list_all().await?;
    print_characters(&characters);
    Ok(())
}

async fn new_character(app: &App, args: &[String]) -> anyhow::Result<()> {
    let name = args.join(" ");
    if name.trim().is_empty() {
        anyhow::bail!("Usage: hearthsheet new <name>");
    }

    let mut session = app.blank_session();
    session.edit(|sheet| sheet.name = name.trim().to_string());
    let id = session.flush().await?;
    println!("Created {} ({})", session.sheet().name, id);
    Ok(())
}

async fn roll(app: &App, args: &[String]) -> anyhow::Result<()> {
    let modifier: i32 = match args.first() {
        Some(raw) => raw
            .parse()
            .with_context(|| format!("modifier must be an integer, got {raw}"))?,
        None => anyhow::bail!("Usage: hearthsheet roll <modifier> [label]"),
    };
    let label = if args.len() > 1 {
        args[1..].join(" ")
    } else {
        "Duality".to_string()
    };

    let session = app.blank_session();
    let check = session.roll_with_modifier(&label, modifier).await?;
    println!("{}", check.roll.breakdown());
    println!("{}", check.roll.verdict());
    if !check.flavor.is_empty() {
        println!("{}", check.flavor);
    }
    Ok(())
}

async fn set_gold(app: &App, args: &[String]) -> anyhow::Result<()> {
    let id = parse_id(args.first())?;
    let raw_total = args.get(1).context("missing gold total")?;
    let total: u64 = raw_total
        .parse()
        .with_context(|| format!("gold must be a non-negative integer, got {raw_total}"))?;

    let mut session = app.blank_session();
    session.load(id).await?;
    let gold = session.set_gold(total);
    session.flush().await?;
    println!(
        "{}: {} chests, {} bags, {} handfuls, {} coins ({}g)",
        session.sheet().name,
        gold.chests,
        gold.bags,
        gold.handfuls,
        gold.coins,
        total
    );
    Ok(())
}

async fn set_class(app: &App, args: &[String]) -> anyhow::Result<()> {
    let id = parse_id(args.first())?;
    let class_name = args.get(1..).map(|rest| rest.join(" ")).unwrap_or_default();
    if class_name.trim().is_empty() {
        anyhow::bail!("Usage: hearthsheet class <id> <class>");
    }

    let mut session = app.blank_session();
    session.load(id).await?;
    session.set_class(&class_name)?;
    session.flush().await?;
    let sheet = session.sheet();
    println!(
        "{}: {} ({}), domains {}",
        sheet.name,
        sheet.class_name,
        sheet.subclass,
        sheet.class_domains().join(" & ")
    );
    Ok(())
}

async fn delete(app: &App, args: &[String]) -> anyhow::Result<()> {
    let id = parse_id(args.first())?;
    let mut session = app.blank_session();
    let remaining = session.delete_saved(id).await?;
    println!("Deleted {id}");
    print_characters(&remaining);
    Ok(())
}

async fn ask(app: &App, args: &[String]) -> anyhow::Result<()> {
    let question = args.join(" ");
    if question.trim().is_empty() {
        anyhow::bail!("Usage: hearthsheet ask <question>");
    }
    println!("{}", app.advisor.ask_rules(&question).await);

    let usage = app.usage.snapshot();
    tracing::debug!(calls = usage.calls, tokens = usage.tokens, "Text generation usage");
    Ok(())
}
