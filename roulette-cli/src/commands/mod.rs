pub mod play;
pub mod session;
pub mod settings;
pub mod status;
pub mod units;

pub use play::{handle_play_command, PlayCommands};
pub use session::{handle_session_command, SessionCommands};
pub use settings::{handle_config_command, ConfigCommands};
pub use status::{handle_result_command, handle_status_command, StatusCommands};
pub use units::{handle_units_command, UnitsCommands};

use roulette_core::{Gateway, LocalSession};
use std::sync::Arc;

/// What the network-facing commands run against.
pub struct Context {
    pub gateway: Gateway,
    pub session: Arc<LocalSession>,
}
