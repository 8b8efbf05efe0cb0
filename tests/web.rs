// Browser smoke tests, run with `wasm-pack test --headless --chrome`.
// Exercises the real HtmlAudioElement backing, which native tests cannot.

#![cfg(target_arch = "wasm32")]

use wasm_bindgen_test::*;
use whisker_quest::audio::{AudioCueManager, CueId, WebCueBackend};

wasm_bindgen_test_configure!(run_in_browser);

// Before any user gesture the autoplay policy rejects playback through the
// promise `play()` returns. The manager must absorb that rejection (it gets
// logged to the console) and return normally from every operation.
#[wasm_bindgen_test]
fn pre_gesture_playback_is_absorbed() {
    let mut audio = AudioCueManager::new(WebCueBackend::new().expect("audio elements"));
    audio.start_ambient();
    audio.play_effect(CueId::Click);
    audio.stop_effect(CueId::Click);
    assert!(!audio.is_muted());
    assert!(audio.toggle_mute());
}
