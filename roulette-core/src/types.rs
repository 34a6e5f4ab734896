use crate::error::{GatewayError, Result};
use crate::units::{chips_to_minimal, MinimalAmount};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// `u64` carried as a JSON string, the way the contract encodes block
/// heights, round indices and timestamps.
pub mod string_u64 {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &u64, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BetType {
    Color,
    Column,
    Dozen,
    Eighteen,
    Modulus,
    Number,
}

impl BetType {
    pub fn code(&self) -> u8 {
        match self {
            BetType::Color => 0,
            BetType::Column => 1,
            BetType::Dozen => 2,
            BetType::Eighteen => 3,
            BetType::Modulus => 4,
            BetType::Number => 5,
        }
    }

    /// Highest `number` the contract accepts for this bet type. Used for
    /// input hints only.
    pub fn max_number(&self) -> u8 {
        match self {
            BetType::Color | BetType::Eighteen | BetType::Modulus => 1,
            BetType::Column | BetType::Dozen => 2,
            BetType::Number => 36,
        }
    }
}

impl TryFrom<u8> for BetType {
    type Error = GatewayError;

    fn try_from(code: u8) -> Result<Self> {
        match code {
            0 => Ok(BetType::Color),
            1 => Ok(BetType::Column),
            2 => Ok(BetType::Dozen),
            3 => Ok(BetType::Eighteen),
            4 => Ok(BetType::Modulus),
            5 => Ok(BetType::Number),
            _ => Err(GatewayError::invalid_input(format!(
                "unknown bet type {}",
                code
            ))),
        }
    }
}

/// A wager as entered by the player; `chips` are hundredths of a display unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bet {
    pub bet_type: u8,
    pub number: u8,
    pub chips: u64,
}

impl Bet {
    pub fn new(bet_type: BetType, number: u8, chips: u64) -> Self {
        Self {
            bet_type: bet_type.code(),
            number,
            chips,
        }
    }

    /// Checks what the wire format needs. Whether `number` fits the bet type
    /// is left to the contract.
    pub fn validate(&self) -> Result<()> {
        BetType::try_from(self.bet_type)?;
        if self.chips == 0 {
            return Err(GatewayError::invalid_input("bet with zero chips"));
        }
        Ok(())
    }

    /// Wire form with the chips rescaled to minimal units.
    pub fn to_info(&self) -> Result<BetInfo> {
        Ok(BetInfo {
            bet_type: self.bet_type,
            number: self.number,
            chips: MinimalAmount(chips_to_minimal(self.chips)?),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BetInfo {
    pub bet_type: u8,
    pub number: u8,
    pub chips: MinimalAmount,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StakeInfo {
    pub amount: MinimalAmount,
    #[serde(with = "string_u64")]
    pub time: u64,
    pub profit: MinimalAmount,
    #[serde(default)]
    pub loss: MinimalAmount,
}

impl StakeInfo {
    pub fn staked_at(&self) -> DateTime<Utc> {
        // block timestamps are nanoseconds
        DateTime::from_timestamp_nanos(self.time as i64)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountStatus {
    #[serde(default)]
    pub bets: Vec<BetInfo>,
    pub balance: MinimalAmount,
    #[serde(default)]
    pub stakes: Vec<StakeInfo>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundStatus {
    #[serde(with = "string_u64")]
    pub current_round_block_index: u64,
    #[serde(with = "string_u64")]
    pub round_index: u64,
    #[serde(with = "string_u64")]
    pub next_round_block_index: u64,
    pub last_round_win_number: u8,
    pub spinning: bool,
    pub bet_amount: MinimalAmount,
    pub bet_count: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractStatus {
    pub balance: MinimalAmount,
    pub max_bet_amount: MinimalAmount,
    pub stake_amount: MinimalAmount,
    pub profit_amount: MinimalAmount,
    pub loss_amount: MinimalAmount,
}

/// Identifies a submitted transaction for a later [`crate::Gateway::get_result`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionHandle {
    pub hash: String,
    pub signer_id: String,
}

/// Where the session provider wants the user sent to finish signing in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignInRequest {
    pub contract_id: String,
    pub display_name: String,
    pub redirect_url: String,
}
