//! `maestranza` command-line client.

mod cli;

use std::io::BufRead;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::Parser;

use cli::{Cli, Commands};
use maestranza::api::ApiClient;
use maestranza::config::{Config, SecureString};
use maestranza::logging::init_tracing;
use maestranza::model::canonical_role;
use maestranza::repository::{
    AuthRepository, HttpAuthRepository, HttpInventoryRepository, HttpMovementRepository,
    HttpRoleRepository, HttpUserRepository,
};
use maestranza::screens::{AuthScreen, InventoryScreen, MovementsScreen, UsersScreen};
use maestranza::session::{FileSessionStore, SessionStore};
use maestranza::state::Submission;

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let config = load_config(&cli)?;
    let store: Arc<dyn SessionStore> = Arc::new(
        FileSessionStore::open(config.session_path()).context("Failed to open session store")?,
    );
    let api = ApiClient::new(&config.api, store.token()).context("Failed to build API client")?;

    match cli.command {
        Commands::Login { username, password } => {
            let password = match password {
                Some(p) => SecureString::new(p),
                None => read_password()?,
            };
            let auth = AuthScreen::new(Arc::new(HttpAuthRepository::new(api, store)));
            match auth.login(&username, &password).await {
                Submission::Accepted(user) => {
                    println!("Bienvenido {} ({})", user.nombre, user.username);
                }
                _ => bail!(auth.state().error.unwrap_or_default()),
            }
        }

        Commands::Logout => {
            let auth = AuthScreen::new(Arc::new(HttpAuthRepository::new(api, store)));
            let state = auth.logout().await;
            println!("{}", state.success_message.unwrap_or_default());
        }

        Commands::Whoami => {
            let repo = HttpAuthRepository::new(api, store);
            match repo.session().await {
                Some(session) => println!(
                    "{} <{}> {}",
                    session.user.username,
                    session.user.email,
                    session.user.roles.join(",")
                ),
                None => println!("Sin sesión"),
            }
        }

        Commands::Inventory {
            search,
            category,
            stock,
        } => {
            let screen = InventoryScreen::new(
                Arc::new(HttpInventoryRepository::new(api)),
                &config.screens,
            );
            let state = screen.load().await;
            if let Some(message) = state.fetch.error() {
                bail!(message.to_string());
            }
            if let Some(search) = search {
                screen.on_query_change(&search);
                screen.flush_search().await;
            }
            screen.select_category(category);
            screen.set_stock_filter(stock.into());

            let state = screen.settle().await;
            println!("{:<10} {:<32} {:<20} {:>6} {:>10}", "CODIGO", "NOMBRE", "CATEGORIA", "STOCK", "PRECIO");
            for p in &state.view {
                println!(
                    "{:<10} {:<32} {:<20} {:>6} {:>10.0}",
                    p.code, p.name, p.category, p.stock, p.price
                );
            }
            println!("{} de {} productos", state.view.len(), state.items.len());
        }

        Commands::Movements {
            search,
            kind,
            from,
            to,
        } => {
            let screen = MovementsScreen::new(
                Arc::new(HttpMovementRepository::new(api)),
                &config.screens,
            );
            let state = screen.load().await;
            if let Some(message) = state.fetch.error() {
                bail!(message.to_string());
            }
            if let Some(search) = search {
                screen.on_query_change(&search);
                screen.flush_search().await;
            }
            screen.set_type_filter(kind.into());
            screen.set_date_range(from, to);

            let state = screen.settle().await;
            println!("{:<19} {:<8} {:<10} {:<28} {:>6} {:<12}", "FECHA", "TIPO", "CODIGO", "PRODUCTO", "CANT", "USUARIO");
            for m in &state.view {
                println!(
                    "{:<19} {:<8} {:<10} {:<28} {:>6} {:<12}",
                    m.timestamp.format("%Y-%m-%d %H:%M:%S"),
                    m.kind,
                    m.product.code,
                    m.product.name,
                    m.quantity,
                    m.actor
                );
            }
            println!(
                "Total {} | Entradas {} | Salidas {}",
                state.kpis.total, state.kpis.entradas, state.kpis.salidas
            );
            if state.rejected_rows > 0 {
                eprintln!("{} movimientos ignorados por datos inválidos", state.rejected_rows);
            }
        }

        Commands::Users {
            search,
            roles,
            status,
        } => {
            let screen = UsersScreen::new(
                Arc::new(HttpUserRepository::new(api.clone())),
                Arc::new(HttpRoleRepository::new(api)),
                &config.screens,
            );
            let state = screen.load().await;
            if let Some(message) = state.fetch.error() {
                bail!(message.to_string());
            }
            if let Some(search) = search {
                screen.on_query_change(&search);
                screen.flush_search().await;
            }
            for role in &roles {
                screen.toggle_role_filter(&canonical_role(role));
            }
            screen.set_status_filter(status.into());

            let state = screen.settle().await;
            println!("{:<16} {:<28} {:<32} {:<8} ROLES", "USUARIO", "NOMBRE", "EMAIL", "ESTADO");
            for u in &state.view {
                println!(
                    "{:<16} {:<28} {:<32} {:<8} {}",
                    u.username,
                    u.full_name(),
                    u.email,
                    if u.active { "activo" } else { "inactivo" },
                    u.roles.iter().cloned().collect::<Vec<_>>().join(",")
                );
            }
        }
    }

    Ok(())
}

fn load_config(cli: &Cli) -> Result<Config> {
    let path = cli.config.clone().unwrap_or_else(Config::config_path);
    let mut config = Config::load_from(&path)?.with_env_overrides()?;
    if let Some(url) = &cli.api_url {
        config.api.base_url = url.clone();
        config.validate()?;
    }
    tracing::debug!(base_url = %config.api.base_url, "Configuration loaded");
    Ok(config)
}

fn read_password() -> Result<SecureString> {
    eprint!("Contraseña: ");
    let mut line = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut line)
        .context("Failed to read password")?;
    Ok(SecureString::new(line.trim_end_matches(['\r', '\n'])))
}
