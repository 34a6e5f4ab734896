use clap::Subcommand;
use roulette_core::units::{chips_to_minimal, format_display_amount, minimal_to_chips};
use roulette_core::{from_minimal_units, to_minimal_units, MinimalAmount, Result};

#[derive(Subcommand)]
pub enum UnitsCommands {
    /// Display amount to minimal units
    ToMinimal {
        /// Amount such as 1.5 or 1,000
        amount: String,
    },
    /// Minimal units to display amount
    FromMinimal {
        amount: MinimalAmount,
        /// Round to this many fractional digits
        #[arg(short, long)]
        digits: Option<usize>,
    },
    /// Chips to minimal units
    Chips { chips: u64 },
}

pub fn handle_units_command(cmd: UnitsCommands) -> Result<()> {
    match cmd {
        UnitsCommands::ToMinimal { amount } => {
            let minimal = to_minimal_units(&amount)?;
            println!("{}", minimal);
        }

        UnitsCommands::FromMinimal { amount, digits } => match digits {
            Some(digits) => println!("{}", format_display_amount(amount.as_u128(), digits)),
            None => {
                println!("{}", from_minimal_units(amount.as_u128()));
                println!("({} chips)", minimal_to_chips(amount.as_u128()));
            }
        },

        UnitsCommands::Chips { chips } => {
            let minimal = chips_to_minimal(chips)?;
            println!("{} ({})", minimal, from_minimal_units(minimal));
        }
    }

    Ok(())
}
