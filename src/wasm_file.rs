//! WASM file loading utilities.
//!
//! Opens the page's file input and reads every selected image with its own
//! `FileReader`. Each file is reported as soon as its read finishes, so
//! completions arrive in no particular order.

use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Event, FileReader, HtmlInputElement};

use crate::constants::is_image_filename;

/// Callback receiving `(file name, raw bytes)` for each read file.
pub type FileCallback = Rc<dyn Fn(String, Vec<u8>)>;

/// Let the user pick image files through `input` and read each one.
///
/// The change handler is detached after the first selection, so every call
/// handles exactly one pick.
pub fn pick_files(input: &HtmlInputElement, on_file: FileCallback) {
    input.set_accept("image/*");
    input.set_multiple(true);
    // Allow picking the same files again
    input.set_value("");

    let onchange = Closure::wrap(Box::new(move |event: Event| {
        let Some(input) = event
            .target()
            .and_then(|t| t.dyn_into::<HtmlInputElement>().ok())
        else {
            log::error!("📂 File change event without an input target");
            return;
        };
        input.set_onchange(None);

        let Some(files) = input.files() else {
            return;
        };
        let count = files.length();
        if count == 0 {
            log::warn!("📂 No files selected");
            return;
        }

        for i in 0..count {
            let Some(file) = files.get(i) else {
                continue;
            };
            let name = file.name();
            if !is_image_filename(&name) {
                log::warn!("📂 Skipping non-image file {}", name);
                continue;
            }
            log::info!("📂 Reading file: {}", name);
            read_file(&file, name, on_file.clone());
        }
    }) as Box<dyn FnMut(Event)>);

    input.set_onchange(Some(onchange.as_ref().unchecked_ref()));
    onchange.forget(); // Leak the closure to keep it alive

    input.click();
}

/// Read one file as an array buffer and hand its bytes to `on_file`.
fn read_file(file: &web_sys::File, name: String, on_file: FileCallback) {
    let reader = match FileReader::new() {
        Ok(reader) => reader,
        Err(e) => {
            log::error!("📂 Failed to create FileReader for {}: {:?}", name, e);
            return;
        }
    };

    let onload = Closure::wrap(Box::new(move |event: Event| {
        let Some(reader) = event
            .target()
            .and_then(|t| t.dyn_into::<FileReader>().ok())
        else {
            return;
        };

        match reader.result() {
            Ok(result) => {
                let bytes = js_sys::Uint8Array::new(&result).to_vec();
                log::debug!("📂 File {} read: {} bytes", name, bytes.len());
                on_file(name.clone(), bytes);
            }
            Err(e) => log::error!("📂 Failed to read {}: {:?}", name, e),
        }
    }) as Box<dyn FnMut(Event)>);

    reader.set_onload(Some(onload.as_ref().unchecked_ref()));
    onload.forget(); // Leak the closure to keep it alive

    if let Err(e) = reader.read_as_array_buffer(file) {
        log::error!("📂 Failed to start reading file: {:?}", e);
    }
}
