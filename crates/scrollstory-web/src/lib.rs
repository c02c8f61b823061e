//! Browser bridge for the story page.
//!
//! The page lives in a `thread_local!` runner; wasm-bindgen exports free
//! functions that forward DOM events into it and expose the frame buffer
//! for the host script to read after every tick.

pub mod runner;

pub use runner::PageRunner;

use std::cell::RefCell;

use scrollstory::{ContentStore, InputEvent, PageConfig, SectionId, Viewport};
use wasm_bindgen::prelude::*;

thread_local! {
    static RUNNER: RefCell<Option<PageRunner>> = RefCell::new(None);
}

fn with_runner<R>(f: impl FnOnce(&mut PageRunner) -> R) -> R {
    RUNNER.with(|cell| {
        let mut borrow = cell.borrow_mut();
        let runner = borrow.as_mut().expect("Page not initialized. Call page_init() first.");
        f(runner)
    })
}

/// Build the page. `content_json` replaces the embedded story when given.
#[wasm_bindgen]
pub fn page_init(content_json: Option<String>, width: f64, height: f64) -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    web_sys::console::time_with_label("scrollstory init");

    let content = match content_json {
        Some(json) => ContentStore::from_json(&json),
        None => ContentStore::default_story(),
    }
    .map_err(|e| JsValue::from_str(&e.to_string()))?;

    let config = PageConfig {
        viewport: Viewport::new(width, height),
        grain_seed: js_sys::Date::now() as u64,
        ..PageConfig::default()
    };
    let runner = PageRunner::new(content, config);

    RUNNER.with(|cell| {
        *cell.borrow_mut() = Some(runner);
    });

    web_sys::console::time_end_with_label("scrollstory init");
    log::info!("scrollstory: initialized");
    Ok(())
}

#[wasm_bindgen]
pub fn page_tick(now_ms: f64) {
    with_runner(|r| r.tick(now_ms));
}

// ---- Input: each returns true when the host should call preventDefault ----

#[wasm_bindgen]
pub fn page_wheel(delta_y: f32) -> bool {
    with_runner(|r| r.input(InputEvent::Wheel { delta_y }))
}

#[wasm_bindgen]
pub fn page_touch_start(y: f32) -> bool {
    with_runner(|r| r.input(InputEvent::TouchStart { y }))
}

#[wasm_bindgen]
pub fn page_touch_move(y: f32) -> bool {
    with_runner(|r| r.input(InputEvent::TouchMove { y }))
}

#[wasm_bindgen]
pub fn page_touch_end() {
    with_runner(|r| r.input(InputEvent::TouchEnd));
}

#[wasm_bindgen]
pub fn page_key_down(key_code: u32) -> bool {
    with_runner(|r| r.input(InputEvent::KeyDown { key_code }))
}

#[wasm_bindgen]
pub fn page_pointer_down(x: f32, y: f32) {
    with_runner(|r| r.input(InputEvent::PointerDown { x, y }));
}

#[wasm_bindgen]
pub fn page_resize(width: f32, height: f32) {
    with_runner(|r| r.input(InputEvent::Resize { width, height }));
}

// ---- Host notifications ----

#[wasm_bindgen]
pub fn page_intersection(index: u32, ratio: f32) {
    with_runner(|r| r.report_intersection(index, ratio));
}

#[wasm_bindgen]
pub fn page_section_height(index: u32, height: f64) -> bool {
    with_runner(|r| r.page_mut().set_section_height(SectionId(index), height))
}

#[wasm_bindgen]
pub fn page_image_loaded(index: u32, width: f32, height: f32) {
    with_runner(|r| r.page_mut().image_loaded(SectionId(index), width, height));
}

#[wasm_bindgen]
pub fn page_image_failed(index: u32) {
    with_runner(|r| r.page_mut().image_failed(SectionId(index)));
}

#[wasm_bindgen]
pub fn page_playback_rejected(reason: &str) {
    with_runner(|r| r.page_mut().playback_rejected(reason));
}

#[wasm_bindgen]
pub fn page_toggle_mute() -> bool {
    with_runner(|r| r.page_mut().toggle_mute())
}

#[wasm_bindgen]
pub fn page_scroll_to(y: f64, immediate: bool) {
    with_runner(|r| r.page_mut().scroll_to(y, immediate));
}

#[wasm_bindgen]
pub fn page_scroll_to_section(index: u32, immediate: bool) -> bool {
    with_runner(|r| r.page_mut().scroll_to_section(SectionId(index), immediate))
}

#[wasm_bindgen]
pub fn page_stop_scroll() {
    with_runner(|r| r.page_mut().stop_scroll());
}

#[wasm_bindgen]
pub fn page_start_scroll() {
    with_runner(|r| r.page_mut().start_scroll());
}

#[wasm_bindgen]
pub fn page_teardown() {
    with_runner(|r| r.teardown());
    log::info!("scrollstory: torn down");
}

// ---- Data accessors ----

#[wasm_bindgen]
pub fn get_frame_ptr() -> *const f32 {
    with_runner(|r| r.frame_ptr())
}

#[wasm_bindgen]
pub fn get_buffer_total_floats() -> u32 {
    with_runner(|r| r.buffer_total_floats())
}

#[wasm_bindgen]
pub fn get_section_count() -> u32 {
    with_runner(|r| r.section_count())
}

#[wasm_bindgen]
pub fn get_max_lines() -> u32 {
    with_runner(|r| r.max_lines())
}

#[wasm_bindgen]
pub fn get_section_data_offset() -> u32 {
    with_runner(|r| r.section_data_offset())
}

#[wasm_bindgen]
pub fn get_line_data_offset() -> u32 {
    with_runner(|r| r.line_data_offset())
}

/// Pending audio commands as flat (opcode, arg) pairs. Clears the queue.
#[wasm_bindgen]
pub fn take_audio_commands() -> js_sys::Float32Array {
    with_runner(|r| js_sys::Float32Array::from(r.take_audio_commands()))
}

/// Degradations since the last call, as human-readable strings.
#[wasm_bindgen]
pub fn take_degradations() -> js_sys::Array {
    with_runner(|r| {
        r.take_degradations()
            .iter()
            .map(|d| JsValue::from_str(&d.to_string()))
            .collect()
    })
}

#[wasm_bindgen]
pub fn get_content_json() -> Result<String, JsValue> {
    with_runner(|r| r.page().content().to_json()).map_err(|e| JsValue::from_str(&e.to_string()))
}

#[wasm_bindgen]
pub fn get_section_label(index: u32) -> String {
    with_runner(|r| r.section_label(index))
}

#[wasm_bindgen]
pub fn get_section_background_css(index: u32) -> String {
    with_runner(|r| r.section_background_css(index))
}
