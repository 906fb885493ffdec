//! WASM bindings for chesslock-core
//!
//! The content script forwards square clicks and focus changes here and
//! applies the returned events to the page: appended text goes into the
//! password input, snapshots redraw the board.

use wasm_bindgen::prelude::*;

use crate::{Error, FieldId, OverlayConfig, Session, Square, TargetField, TextField};

/// Install the console logger and panic hook. Safe to call more than once.
#[wasm_bindgen(js_name = initLogging)]
pub fn init_logging() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
}

/// WASM-friendly wrapper around Session
#[wasm_bindgen]
pub struct WasmSession {
    inner: Session<TextField>,
}

#[wasm_bindgen]
impl WasmSession {
    /// Create a session. `config` may be undefined for defaults, or an
    /// object like `{ layout: "RNBKQBNR", symbol_mode: true }`.
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<WasmSession, JsError> {
        let config: OverlayConfig = if config.is_undefined() || config.is_null() {
            OverlayConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config).map_err(|e| JsError::new(&e.to_string()))?
        };
        Ok(WasmSession {
            inner: Session::new(config),
        })
    }

    /// Handle a click on a square. Returns an array of events.
    ///
    /// A commit with no bound field is dropped silently and the selection
    /// stays.
    #[wasm_bindgen(js_name = activateSquare)]
    pub fn activate_square(&mut self, row: u8, col: u8) -> Result<JsValue, JsError> {
        let square = Square::try_new(row, col).map_err(to_js_error)?;
        let events = match self.inner.activate(square) {
            Ok(events) => events,
            Err(Error::NoTargetBound) => Vec::new(),
            Err(e) => return Err(to_js_error(e)),
        };
        to_js(&events)
    }

    /// A password input gained focus. `value` is its current content.
    #[wasm_bindgen(js_name = bindTargetField)]
    pub fn bind_target_field(&mut self, field_id: u32, value: String) {
        self.inner.bind_target(TextField::new(FieldId(field_id), value));
    }

    #[wasm_bindgen(js_name = unbindTargetField)]
    pub fn unbind_target_field(&mut self) {
        self.inner.unbind_target();
    }

    #[wasm_bindgen(js_name = requestReset)]
    pub fn request_reset(&mut self) -> Result<JsValue, JsError> {
        let events = self.inner.request_reset();
        to_js(&events)
    }

    /// Returns the new symbol-mode setting.
    #[wasm_bindgen(js_name = toggleSymbolMode)]
    pub fn toggle_symbol_mode(&mut self) -> bool {
        self.inner.toggle_symbol_mode()
    }

    /// The board overlay was opened.
    #[wasm_bindgen(js_name = showBoard)]
    pub fn show_board(&mut self) -> Result<JsValue, JsError> {
        let events = self.inner.show_board();
        to_js(&events)
    }

    pub fn snapshot(&self) -> Result<JsValue, JsError> {
        to_js(&self.inner.snapshot())
    }

    /// Value of the bound field as the session sees it.
    #[wasm_bindgen(js_name = targetValue)]
    pub fn target_value(&self) -> Option<String> {
        self.inner.target().map(|f| f.value().to_string())
    }
}

fn to_js<T: serde::Serialize + ?Sized>(value: &T) -> Result<JsValue, JsError> {
    serde_wasm_bindgen::to_value(value).map_err(|e| JsError::new(&e.to_string()))
}

fn to_js_error(e: Error) -> JsError {
    JsError::new(&e.to_string())
}
