//! `oe-scrap`: the barcode scrap dashboard in a terminal.
//!
//! Usage:
//!   oe-scrap [--server <url>] [--db <name>] [--login <user>]
//!
//! Settings come from `~/.openerp/scrap.toml`; flags override them.
//! Scan into the terminal, type `:help` for commands.

mod bell;
mod config;
mod terminal;

use std::sync::Arc;

use clap::Parser;
use openerp_flux::{Flux, I18nStore};
use openerp_rpc::{PasswordLogin, RpcClient, SessionSource, StaticSession};
use openerp_scrap::request::{CloseReq, DismissNoticeReq, InitializeReq};
use openerp_scrap::state::{HostActionState, Notices};
use openerp_scrap::{i18n_strings, register_handlers, OrmScrapService, ScrapBff, Silent, SoundPlayer};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;

use config::ScrapConfig;
use terminal::{Command, Screen};

/// Barcode scrap dashboard.
#[derive(Parser, Debug)]
#[command(name = "oe-scrap", about = "Barcode scrap dashboard")]
struct Cli {
    /// Path to config file (default: ~/.openerp/scrap.toml).
    #[arg(long = "config")]
    config: Option<String>,

    /// ERP base URL.
    #[arg(long)]
    server: Option<String>,

    /// Database name.
    #[arg(long = "db")]
    database: Option<String>,

    /// Login name.
    #[arg(long)]
    login: Option<String>,

    /// Password. Prompted for when neither this nor the config file has one.
    #[arg(long)]
    password: Option<String>,

    /// Reuse an existing web session instead of logging in.
    #[arg(long = "session-id")]
    session_id: Option<String>,

    /// UI language: en or cs.
    #[arg(long)]
    locale: Option<String>,

    /// Currency code shown after amounts.
    #[arg(long)]
    currency: Option<String>,

    /// No terminal bells.
    #[arg(long)]
    quiet: bool,

    /// Write the merged settings (without password) back to the config file.
    #[arg(long)]
    save: bool,
}

impl Cli {
    fn apply(&self, config: &mut ScrapConfig) {
        let overrides = [
            (&self.server, &mut config.server),
            (&self.database, &mut config.database),
            (&self.login, &mut config.login),
            (&self.locale, &mut config.locale),
            (&self.currency, &mut config.currency),
        ];
        for (flag, field) in overrides {
            if let Some(value) = flag {
                *field = value.clone();
            }
        }
        if self.password.is_some() {
            config.password = self.password.clone();
        }
    }
}

fn session_source(cli: &Cli, config: &ScrapConfig) -> anyhow::Result<Arc<dyn SessionSource>> {
    if let Some(id) = &cli.session_id {
        return Ok(Arc::new(StaticSession::new(id.clone())));
    }
    let password = match &config.password {
        Some(p) => p.clone(),
        None => rpassword::prompt_password(format!("Password for {}: ", config.login))?,
    };
    if password.is_empty() {
        anyhow::bail!("Password cannot be empty.");
    }
    Ok(Arc::new(PasswordLogin::new(
        &config.server,
        &config.database,
        &config.login,
        password,
    )))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr; stdout is the screen.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config_path = cli
        .config
        .as_ref()
        .map(std::path::PathBuf::from)
        .unwrap_or_else(ScrapConfig::default_path);
    let mut config = ScrapConfig::load(&config_path)?;
    cli.apply(&mut config);
    config.validate(cli.session_id.is_some())?;

    if cli.save {
        let stored = ScrapConfig { password: None, ..config.clone() };
        stored.save(&config_path)?;
        info!("settings saved to {}", config_path.display());
    }

    // Remote service.
    let session = session_source(&cli, &config)?;
    let client = Arc::new(RpcClient::new(&config.server, session));
    let service = Arc::new(OrmScrapService::new(client));

    // Dashboard.
    let i18n = Arc::new(I18nStore::new(&config.locale));
    i18n_strings::register_all(&i18n);
    let sound: Arc<dyn SoundPlayer> = if cli.quiet {
        Arc::new(Silent)
    } else {
        Arc::new(bell::TerminalBell)
    };
    let bff = ScrapBff::new(service, sound, Arc::clone(&i18n))
        .with_refocus_delay(config.refocus_delay());

    let flux = Flux::new();
    register_handlers(&flux, Arc::new(bff));

    let server = config.server.clone();
    flux.subscribe(HostActionState::PATH, move |_, value| {
        if let Some(action) = value
            .downcast_ref::<HostActionState>()
            .and_then(|a| a.action.as_ref())
        {
            println!("{}", terminal::render_action(&server, action));
        }
    });

    info!(server = %config.server, db = %config.database, login = %config.login, "connecting");
    flux.emit(InitializeReq::PATH, InitializeReq).await;

    let screen = Screen { i18n: &i18n, currency: &config.currency };
    refresh(&flux, &screen).await;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let cmd = match terminal::parse(&line) {
            Ok(cmd) => cmd,
            Err(e) => {
                eprintln!("{e:#}");
                continue;
            }
        };
        match cmd {
            Command::Quit => break,
            Command::Help => println!("{}", terminal::HELP),
            cmd => {
                terminal::dispatch(&flux, cmd).await;
                refresh(&flux, &screen).await;
            }
        }
    }

    flux.emit(CloseReq::PATH, CloseReq).await;
    Ok(())
}

/// Print the view, then any notices, which are dismissed once shown.
async fn refresh(flux: &Flux, screen: &Screen<'_>) {
    print!("{}", screen.render(flux));
    let notices = flux.get_cloned::<Notices>(Notices::PATH).unwrap_or_default();
    for notice in notices.items {
        println!("{}", terminal::render_notice(&notice));
        flux.emit(DismissNoticeReq::PATH, DismissNoticeReq { id: notice.id })
            .await;
    }
}
