use agni_site::config::cli::{Command, ThemeAction};
use agni_site::utils::{logger, validation::Validate};
use agni_site::{
    CliConfig, Document, Element, FileStore, HttpTransport, IntersectionEntry, MemoryDocument,
    MemoryStore, PageEvent, SiteConfig, SiteError, SiteScript,
};
use clap::Parser;
use std::time::Duration;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    if cli.log_json {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }
    tracing::debug!("CLI config: {:?}", cli);

    let config = match cli.validate().and_then(|_| cli.site_config()) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("❌ Configuration validation failed: {}", e);
            fail(&e);
        }
    };

    let result = match cli.command {
        Command::Theme { store, action } => run_theme(config, FileStore::new(store), action),
        Command::Submit {
            action,
            method,
            fields,
        } => run_submit(config, &action, &method, &fields).await,
        Command::Counter { target, fps } => run_counter(config, &target, fps),
    };

    if let Err(e) = result {
        tracing::error!("❌ {}", e);
        fail(&e);
    }
    Ok(())
}

fn fail(e: &SiteError) -> ! {
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());
    std::process::exit(1);
}

fn run_theme(config: SiteConfig, store: FileStore, action: ThemeAction) -> agni_site::Result<()> {
    let path = store.path().display().to_string();
    let mut site = SiteScript::boot(MemoryDocument::new(), store, config)?;

    let theme = match action {
        ThemeAction::Show => site.theme_store().stored_theme(),
        ThemeAction::Toggle => site.toggle_theme(),
    };
    tracing::info!("Theme store: {}", path);
    println!("{}", theme);
    Ok(())
}

async fn run_submit(
    config: SiteConfig,
    action: &str,
    method: &str,
    fields: &[(String, String)],
) -> agni_site::Result<()> {
    let transport = HttpTransport::new(config.contact.timeout())?;

    let mut doc = MemoryDocument::new();
    let form = doc.append_to_body(
        Element::new("form")
            .id("contactForm")
            .attr("action", action)
            .attr("method", method),
    );
    for (name, value) in fields {
        let input = doc.append(form, Element::new("input").attr("name", name));
        doc.set_value(input, value);
    }
    doc.append_to_body(Element::new("p").id("formStatus"));

    let mut site = SiteScript::boot(doc, MemoryStore::new(), config)?;
    let outcome = site.submit_contact(&transport).await;

    if let Some(contact) = site.contact() {
        println!("{}", contact.status(site.document()).message);
    }
    match outcome {
        Some(outcome) if outcome.is_delivered() => Ok(()),
        _ => std::process::exit(2),
    }
}

fn run_counter(config: SiteConfig, target: &str, fps: u32) -> agni_site::Result<()> {
    let mut doc = MemoryDocument::new();
    let stat = doc.append_to_body(
        Element::new("span")
            .attr("data-counter", "")
            .attr("data-target", target)
            .text("0"),
    );

    let mut config = config;
    config.capabilities.intersection_observer = true;
    let mut site = SiteScript::boot(doc, MemoryStore::new(), config)?;

    site.dispatch(PageEvent::Intersection(vec![IntersectionEntry::new(
        stat,
        1.0,
        Duration::ZERO,
    )]));

    let frame = Duration::from_secs(1) / fps;
    let mut now = Duration::ZERO;
    loop {
        now += frame;
        site.dispatch(PageEvent::AnimationFrame(now));
        println!("{:>6} ms  {}", now.as_millis(), site.document().text_content(stat));
        if site.counters().map_or(true, |c| c.is_idle()) {
            break;
        }
    }
    Ok(())
}
