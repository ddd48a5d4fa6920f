//! WebAssembly bindings for the board engine.
//!
//! This module exposes a board session and the coordinate mapper to the
//! JavaScript renderer through wasm-bindgen. Structured values cross the boundary
//! as JSON strings.

use wasm_bindgen::prelude::*;

use crate::actions::SessionCommand;
use crate::board::BoardShape;
use crate::hex::{CornerCoord, HexOffset, TileCoord};
use crate::session::BoardSession;

/// Initialize panic hook for better error messages in browser console
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

fn parse_offset(offset_json: &str) -> Result<HexOffset, JsValue> {
    serde_json::from_str(offset_json)
        .map_err(|e| JsValue::from_str(&format!("Invalid offset: {}", e)))
}

/// WASM-exposed board session
#[wasm_bindgen]
pub struct WasmBoardSession {
    session: BoardSession,
}

#[wasm_bindgen]
impl WasmBoardSession {
    /// Create a session with a freshly generated board
    #[wasm_bindgen(constructor)]
    pub fn new(length: u16, width: u16, seed: Option<u64>) -> WasmBoardSession {
        WasmBoardSession {
            session: BoardSession::new(BoardShape::new(length, width), seed),
        }
    }

    /// Apply a command from JSON, returns events JSON or error
    #[wasm_bindgen(js_name = applyCommand)]
    pub fn apply_command(&mut self, command_json: &str) -> Result<String, JsValue> {
        let command: SessionCommand = serde_json::from_str(command_json)
            .map_err(|e| JsValue::from_str(&format!("Invalid command JSON: {}", e)))?;

        match self.session.apply(command) {
            Ok(events) => Ok(serde_json::to_string(&events).unwrap_or_else(|_| "[]".to_string())),
            Err(e) => Err(JsValue::from_str(&format!("Command rejected: {}", e))),
        }
    }

    /// Get board state as JSON (for rendering)
    #[wasm_bindgen(js_name = getBoard)]
    pub fn get_board(&self) -> String {
        let board_json = self.session.board().to_json_friendly();
        serde_json::to_string(&board_json).unwrap_or_else(|_| "{}".to_string())
    }

    /// Get the current interaction mode as a string
    #[wasm_bindgen(js_name = getMode)]
    pub fn get_mode(&self) -> String {
        self.session.mode().name().to_string()
    }

    /// Get the last dice roll (if any)
    #[wasm_bindgen(js_name = getDiceRoll)]
    pub fn get_dice_roll(&self) -> Option<Vec<u8>> {
        self.session.last_roll().map(|(a, b)| vec![a, b])
    }
}

/// World `[x, y]` of a tile centre
#[wasm_bindgen(js_name = tileWorldPosition)]
pub fn tile_world_position(x: i32, y: i32) -> Vec<f64> {
    let pos = TileCoord::new(x, y).to_world();
    vec![pos.x, pos.y]
}

/// World `[x, y]` of a corner, named by a tile and a JSON offset such as `"Top"`
#[wasm_bindgen(js_name = cornerWorldPosition)]
pub fn corner_world_position(x: i32, y: i32, offset_json: &str) -> Result<Vec<f64>, JsValue> {
    let pos = TileCoord::new(x, y).corner_to_world(parse_offset(offset_json)?);
    Ok(vec![pos.x, pos.y])
}

/// World `[x, y]` of a corner from its own coordinate
#[wasm_bindgen(js_name = cornerCoordWorldPosition)]
pub fn corner_coord_world_position(x: i32, y: i32) -> Vec<f64> {
    let pos = CornerCoord::new(x, y).to_world();
    vec![pos.x, pos.y]
}

/// Edge placement as JSON `{position, rotation, corner, edge}`
#[wasm_bindgen(js_name = edgeLocation)]
pub fn edge_location(x: i32, y: i32, corner_json: &str, edge_json: &str) -> Result<String, JsValue> {
    let location =
        TileCoord::new(x, y).edge_location(parse_offset(corner_json)?, parse_offset(edge_json)?);
    serde_json::to_string(&location).map_err(|e| JsValue::from_str(&e.to_string()))
}
