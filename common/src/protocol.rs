use serde::{Deserialize, Serialize};

use crate::models::{CellIndex, SymbolId, VariantConfig};

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(tag = "action")]
pub enum Command {
    #[serde(rename = "start_round")]
    StartRound {
        #[serde(default)]
        config: VariantConfig,
    },
    #[serde(rename = "click")]
    Click { cell: CellIndex },
    #[serde(rename = "pause")]
    Pause,
    #[serde(rename = "resume")]
    Resume,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    #[serde(rename = "round_started")]
    RoundStarted {
        cell_count: usize,
        total_pairs: usize,
        duration_seconds: u32,
    },
    #[serde(rename = "tile_placed")]
    TilePlaced {
        cell: CellIndex,
        depth: usize,
        symbol: SymbolId,
    },
    #[serde(rename = "tile_selected")]
    TileSelected { cell: CellIndex },
    #[serde(rename = "tile_deselected")]
    TileDeselected { cell: CellIndex },
    #[serde(rename = "tiles_matched")]
    TilesMatched {
        first: CellIndex,
        second: CellIndex,
        remaining_pairs: usize,
    },
    #[serde(rename = "tiles_mismatched")]
    TilesMismatched { first: CellIndex, second: CellIndex },
    #[serde(rename = "time_tick")]
    TimeTick { remaining_seconds: u32 },
    #[serde(rename = "round_paused")]
    RoundPaused,
    #[serde(rename = "round_resumed")]
    RoundResumed,
    #[serde(rename = "round_won")]
    RoundWon { elapsed_seconds: u32 },
    #[serde(rename = "round_lost")]
    RoundLost,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn click_command_parses_from_json_line() {
        let command: Command = serde_json::from_str(r#"{"action":"click","cell":7}"#).unwrap();
        assert_eq!(command, Command::Click { cell: 7 });
    }

    #[test]
    fn start_round_without_config_uses_default_variant() {
        let command: Command = serde_json::from_str(r#"{"action":"start_round"}"#).unwrap();
        assert_eq!(
            command,
            Command::StartRound {
                config: VariantConfig::default()
            }
        );
    }

    #[test]
    fn events_are_tagged_by_type() {
        let text = serde_json::to_string(&GameEvent::TimeTick {
            remaining_seconds: 42,
        })
        .unwrap();
        assert_eq!(text, r#"{"type":"time_tick","remaining_seconds":42}"#);

        let text = serde_json::to_string(&GameEvent::RoundLost).unwrap();
        assert_eq!(text, r#"{"type":"round_lost"}"#);
    }
}
