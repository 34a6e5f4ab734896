use crate::commands::Context;
use clap::Subcommand;
use comfy_table::{presets::UTF8_FULL, Table};
use dialoguer::{Confirm, Input};
use roulette_core::{GatewayState, Result};

#[derive(Subcommand)]
pub enum SessionCommands {
    /// Sign in through the wallet
    Login {
        /// Account the wallet approved (will prompt if not provided)
        #[arg(short, long)]
        account: Option<String>,
    },
    /// Forget the signed-in account
    Logout {
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },
    /// Show the signed-in account
    Whoami,
    /// List sign-ins stored for every network and contract
    List,
}

pub async fn handle_session_command(cmd: SessionCommands, ctx: &Context) -> Result<()> {
    match cmd {
        SessionCommands::Login { account } => {
            if let Some(current) = ctx.gateway.account_id() {
                println!("Already signed in as '{}'", current);
                return Ok(());
            }

            let account = match account {
                Some(account) => account,
                None => {
                    let request = ctx
                        .gateway
                        .sign_in(&ctx.gateway.config().app_name)
                        .await?;

                    println!("Open this page to approve '{}':", request.contract_id);
                    println!("  {}", request.redirect_url);
                    println!();

                    Input::<String>::new()
                        .with_prompt("Account id approved in the wallet")
                        .interact_text()?
                }
            };

            tracing::info!("Completing sign-in for '{}'", account.trim());
            let session = ctx.session.complete_sign_in(account.trim()).await?;
            println!(
                "Signed in as '{}' on {}",
                session.account_id, session.network_id
            );
        }

        SessionCommands::Logout { force } => {
            let account = match ctx.gateway.account_id() {
                Some(account) => account,
                None => {
                    println!("Not signed in.");
                    return Ok(());
                }
            };

            if !force {
                let confirmed = Confirm::new()
                    .with_prompt(format!("Sign out '{}'?", account))
                    .default(false)
                    .interact()?;

                if !confirmed {
                    println!("Sign-out cancelled.");
                    return Ok(());
                }
            }

            tracing::info!("Signing out '{}'", account);
            ctx.gateway.sign_out().await?;
            println!("Signed out '{}'", account);
        }

        SessionCommands::Whoami => match ctx.gateway.state() {
            GatewayState::Authenticated { account_id } => {
                println!("Account: {}", account_id);
                println!("Contract: {}", ctx.gateway.contract_id());
                println!("Network: {}", ctx.gateway.config().network.network_id);
                if let Some(session) = ctx.session.session() {
                    println!(
                        "Since: {}",
                        session.created_at.format("%Y-%m-%d %H:%M:%S UTC")
                    );
                }
            }
            GatewayState::Unauthenticated => {
                println!("Not signed in.");
                println!("Sign in with: roulette session login");
            }
        },

        SessionCommands::List => {
            let sessions = ctx.session.saved_sessions().await?;

            if sessions.is_empty() {
                println!("No saved sessions.");
                println!("Sign in with: roulette session login");
                return Ok(());
            }

            let mut table = Table::new();
            table.load_preset(UTF8_FULL);
            table.set_header(vec!["Network", "Contract", "Account", "Since", "Active"]);

            let active = ctx.session.session();
            for session in sessions {
                let is_active = active.as_ref().map_or(false, |a| {
                    a.network_id == session.network_id && a.contract_id == session.contract_id
                });
                table.add_row(vec![
                    session.network_id.clone(),
                    session.contract_id.clone(),
                    session.account_id.clone(),
                    session.created_at.format("%Y-%m-%d %H:%M").to_string(),
                    if is_active { "*".to_string() } else { String::new() },
                ]);
            }

            println!("{}", table);
        }
    }

    Ok(())
}
