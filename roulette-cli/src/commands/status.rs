use crate::commands::Context;
use clap::Subcommand;
use comfy_table::{presets::UTF8_FULL, Table};
use roulette_core::units::{format_display_amount, minimal_to_chips, DEFAULT_DISPLAY_DIGITS};
use roulette_core::{BetType, GatewayError, MinimalAmount, Result, TransactionHandle};

#[derive(Subcommand)]
pub enum StatusCommands {
    /// Balance, open bets and stakes of the signed-in account
    Account,
    /// The current round
    Round,
    /// House totals
    Contract,
}

fn display(amount: &MinimalAmount) -> String {
    format_display_amount(amount.as_u128(), DEFAULT_DISPLAY_DIGITS)
}

fn bet_type_name(code: u8) -> String {
    BetType::try_from(code)
        .map(|t| format!("{:?}", t))
        .unwrap_or_else(|_| format!("#{}", code))
}

pub async fn handle_status_command(cmd: StatusCommands, ctx: &Context) -> Result<()> {
    let gateway = &ctx.gateway;

    match cmd {
        StatusCommands::Account => {
            let status = gateway.get_account_status().await?;
            let account = gateway.account_id().unwrap_or_default();

            println!("Account '{}':", account);
            println!(
                "  Balance: {} ({} chips)",
                display(&status.balance),
                minimal_to_chips(status.balance.as_u128())
            );

            if status.bets.is_empty() {
                println!("  No open bets.");
            } else {
                println!();
                println!("Open bets:");
                let mut table = Table::new();
                table.load_preset(UTF8_FULL);
                table.set_header(vec!["Type", "Number", "Amount", "Chips"]);

                for bet in &status.bets {
                    table.add_row(vec![
                        bet_type_name(bet.bet_type),
                        bet.number.to_string(),
                        display(&bet.chips),
                        minimal_to_chips(bet.chips.as_u128()).to_string(),
                    ]);
                }

                println!("{}", table);
            }

            if !status.stakes.is_empty() {
                println!();
                println!("Stakes:");
                let mut table = Table::new();
                table.load_preset(UTF8_FULL);
                table.set_header(vec!["Index", "Amount", "Profit", "Loss", "Since"]);

                for (index, stake) in status.stakes.iter().enumerate() {
                    table.add_row(vec![
                        index.to_string(),
                        display(&stake.amount),
                        display(&stake.profit),
                        display(&stake.loss),
                        stake.staked_at().format("%Y-%m-%d %H:%M").to_string(),
                    ]);
                }

                println!("{}", table);
            }
        }

        StatusCommands::Round => {
            let round = gateway.get_round_status().await?;

            println!("Round {}:", round.round_index);
            println!(
                "  Blocks: {} -> {}",
                round.current_round_block_index, round.next_round_block_index
            );
            println!("  Bets: {} totalling {}", round.bet_count, display(&round.bet_amount));
            println!("  Spinning: {}", if round.spinning { "yes" } else { "no" });
            println!("  Last winning number: {}", round.last_round_win_number);
        }

        StatusCommands::Contract => {
            let status = gateway.get_contract_status().await?;

            println!("Contract '{}':", gateway.contract_id());
            println!("  Balance: {}", display(&status.balance));
            println!("  Max bet: {}", display(&status.max_bet_amount));
            println!("  Staked: {}", display(&status.stake_amount));
            println!("  Profit: {}", display(&status.profit_amount));
            println!("  Loss: {}", display(&status.loss_amount));
        }
    }

    Ok(())
}

/// Print what a finalized transaction returned.
pub async fn handle_result_command(hash: String, ctx: &Context) -> Result<()> {
    let signer_id = ctx
        .gateway
        .account_id()
        .ok_or_else(|| GatewayError::not_signed_in("sign in to look up transactions"))?;

    let handle = TransactionHandle { hash, signer_id };
    let value = ctx.gateway.get_result(&handle).await?;

    println!("Result of {}:", handle.hash);
    println!("{}", serde_json::to_string_pretty(&value)?);
    Ok(())
}
