use crate::commands::Context;
use clap::Subcommand;
use roulette_core::{Bet, BetType, GatewayError, Result, TransactionHandle};

#[derive(Subcommand)]
pub enum PlayCommands {
    /// Place bets on a round
    Bet {
        /// Bets as TYPE:NUMBER:CHIPS, e.g. number:17:10 or 1:2:100
        #[arg(required = true)]
        bets: Vec<String>,
        /// Round index (defaults to the current round)
        #[arg(short, long)]
        round: Option<u64>,
    },
    /// Move chips into the contract balance
    Deposit { chips: u64 },
    /// Withdraw chips from the contract balance
    Withdraw { chips: u64 },
    /// Stake an amount into the house pool
    Stake { amount: String },
    /// Take back part of a stake
    Unstake {
        amount: String,
        /// Stake index as listed by 'roulette status account'
        #[arg(short, long)]
        index: usize,
    },
    /// Collect the profit of a stake
    Harvest { index: usize },
    /// Resolve the current round
    Spin,
}

fn parse_bet_type(raw: &str) -> Result<BetType> {
    match raw.to_lowercase().as_str() {
        "color" | "colour" => Ok(BetType::Color),
        "column" => Ok(BetType::Column),
        "dozen" => Ok(BetType::Dozen),
        "eighteen" => Ok(BetType::Eighteen),
        "modulus" => Ok(BetType::Modulus),
        "number" => Ok(BetType::Number),
        code => {
            let code: u8 = code
                .parse()
                .map_err(|_| GatewayError::invalid_input(format!("unknown bet type '{}'", raw)))?;
            BetType::try_from(code)
        }
    }
}

/// Parse `TYPE:NUMBER:CHIPS`.
pub fn parse_bet(raw: &str) -> Result<Bet> {
    let parts: Vec<&str> = raw.split(':').map(str::trim).collect();
    let [bet_type, number, chips] = parts.as_slice() else {
        return Err(GatewayError::invalid_input(format!(
            "expected TYPE:NUMBER:CHIPS, got '{}'",
            raw
        )));
    };

    let bet_type = parse_bet_type(bet_type)?;
    let number: u8 = number
        .parse()
        .map_err(|_| GatewayError::invalid_input(format!("invalid number in '{}'", raw)))?;
    let chips: u64 = chips
        .parse()
        .map_err(|_| GatewayError::invalid_input(format!("invalid chips in '{}'", raw)))?;

    if number > bet_type.max_number() {
        tracing::warn!(
            "{:?} bets take numbers up to {}; the contract will likely reject {}",
            bet_type,
            bet_type.max_number(),
            number
        );
    }

    Ok(Bet::new(bet_type, number, chips))
}

fn print_submitted(action: &str, handle: &TransactionHandle) {
    println!("{} submitted: {}", action, handle.hash);
    println!("Check the outcome with: roulette result {}", handle.hash);
}

pub async fn handle_play_command(cmd: PlayCommands, ctx: &Context) -> Result<()> {
    let gateway = &ctx.gateway;

    match cmd {
        PlayCommands::Bet { bets, round } => {
            let bets = bets
                .iter()
                .map(|raw| parse_bet(raw))
                .collect::<Result<Vec<Bet>>>()?;

            let round = match round {
                Some(round) => round,
                None => gateway.get_round_status().await?.round_index,
            };

            let handle = gateway.bet(&bets, round).await?;
            print_submitted(&format!("{} bet(s) on round {}", bets.len(), round), &handle);
        }

        PlayCommands::Deposit { chips } => {
            let handle = gateway.deposit(chips).await?;
            print_submitted(&format!("Deposit of {} chips", chips), &handle);
        }

        PlayCommands::Withdraw { chips } => match gateway.withdraw(chips).await? {
            Some(handle) => print_submitted(&format!("Withdrawal of {} chips", chips), &handle),
            None => {
                println!("Withdrawal of {} chips skipped: more than your balance.", chips);
                println!("Check it with: roulette status account");
            }
        },

        PlayCommands::Stake { amount } => {
            let handle = gateway.stake(&amount).await?;
            print_submitted(&format!("Stake of {}", amount), &handle);
        }

        PlayCommands::Unstake { amount, index } => {
            let handle = gateway.unstake(&amount, index).await?;
            print_submitted(&format!("Unstake of {} from stake {}", amount, index), &handle);
        }

        PlayCommands::Harvest { index } => {
            let handle = gateway.harvest(index).await?;
            print_submitted(&format!("Harvest of stake {}", index), &handle);
        }

        PlayCommands::Spin => {
            let handle = gateway.spin_wheel().await?;
            print_submitted("Spin", &handle);
        }
    }

    Ok(())
}
