use thiserror::Error;

use crate::grid::Loc;

/// Violations of the environment protocol or of the shared-store layout.
///
/// These are programming defects, not recoverable game situations: every
/// actuation has a legality predicate that must be consulted first, and the
/// shared flag table is sized so it can never fill. The turn harness catches
/// them so one bad turn never forfeits the agent.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProtocolError {
    #[error("illegal {action} targeting {at}")]
    IllegalAction { action: &'static str, at: Loc },

    #[error("no empty shared slot for flag {flag_id}")]
    SharedTableFull { flag_id: u16 },

    #[error("location {at} does not fit the shared-word encoding")]
    UnencodableLocation { at: Loc },
}
