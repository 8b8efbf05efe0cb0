//! Audio cue manager: a closed set of named cues (two one-shot effects and a
//! looping ambient track) with a process-wide mute flag.
//!
//! The manager itself is browser-free; all device access goes through the
//! `CueBackend` seam so the mute / rewind / playback semantics can be tested
//! natively. `WebCueBackend` is the real backing over `HtmlAudioElement`s.

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsValue;
use web_sys::HtmlAudioElement;

/// The fixed cue set. Closed by construction: there is no way to register
/// further cues at runtime.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CueId {
    Hover,
    Click,
    Bgm,
}

impl CueId {
    pub const ALL: [CueId; 3] = [CueId::Hover, CueId::Click, CueId::Bgm];

    /// Name lookup; a miss preserves the "unknown name is a safe no-op"
    /// contract at the call sites.
    pub fn from_name(name: &str) -> Option<CueId> {
        match name {
            "hover" => Some(CueId::Hover),
            "click" => Some(CueId::Click),
            "bgm" => Some(CueId::Bgm),
            _ => None,
        }
    }

    /// Only the ambient track loops; effects are one-shot.
    pub fn loops(self) -> bool {
        matches!(self, CueId::Bgm)
    }
}

/// Device operations the manager needs. Implemented over audio elements in
/// the browser and over a recording double in tests.
pub trait CueBackend {
    fn rewind(&mut self, cue: CueId);
    fn play(&mut self, cue: CueId);
    fn pause(&mut self, cue: CueId);
    fn set_muted(&mut self, cue: CueId, muted: bool);
}

pub struct AudioCueManager<B: CueBackend> {
    backend: B,
    muted: bool,
}

impl<B: CueBackend> AudioCueManager<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            muted: false,
        }
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// Read access to the underlying device handles (test doubles assert
    /// against this).
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Starts a cue. No-op while muted (no playback-position reset happens
    /// either). Effects restart from the top; the ambient track resumes from
    /// wherever it was.
    pub fn play_effect(&mut self, cue: CueId) {
        if self.muted {
            return;
        }
        if !cue.loops() {
            self.backend.rewind(cue);
        }
        self.backend.play(cue);
    }

    /// Name-based entry point; unknown names are a safe no-op.
    pub fn play_named(&mut self, name: &str) {
        if let Some(cue) = CueId::from_name(name) {
            self.play_effect(cue);
        }
    }

    /// Pauses a cue and resets its position to the start.
    pub fn stop_effect(&mut self, cue: CueId) {
        self.backend.pause(cue);
        self.backend.rewind(cue);
    }

    /// Begins the looping track without forcing a restart.
    pub fn start_ambient(&mut self) {
        self.play_effect(CueId::Bgm);
    }

    /// Flips the global mute flag and applies it to every cue as a device
    /// mute; in-flight playback keeps running inaudibly. Returns the new
    /// state.
    pub fn toggle_mute(&mut self) -> bool {
        self.muted = !self.muted;
        for cue in CueId::ALL {
            self.backend.set_muted(cue, self.muted);
        }
        self.muted
    }
}

// --- Browser backing ---------------------------------------------------------

/// Preloaded `HtmlAudioElement` per cue, fixed volumes, loop flag on the
/// ambient track only.
pub struct WebCueBackend {
    hover: HtmlAudioElement,
    click: HtmlAudioElement,
    bgm: HtmlAudioElement,
}

impl WebCueBackend {
    pub fn new() -> Result<Self, JsValue> {
        let hover = HtmlAudioElement::new_with_src("assets/audio/hover.wav")?;
        hover.set_volume(0.2);
        let click = HtmlAudioElement::new_with_src("assets/audio/click.wav")?;
        click.set_volume(0.3);
        let bgm = HtmlAudioElement::new_with_src("assets/audio/bgm.mp3")?;
        bgm.set_volume(0.3);
        bgm.set_loop(true);
        Ok(Self { hover, click, bgm })
    }

    fn element(&self, cue: CueId) -> &HtmlAudioElement {
        match cue {
            CueId::Hover => &self.hover,
            CueId::Click => &self.click,
            CueId::Bgm => &self.bgm,
        }
    }
}

impl CueBackend for WebCueBackend {
    fn rewind(&mut self, cue: CueId) {
        self.element(cue).set_current_time(0.0);
    }

    fn play(&mut self, cue: CueId) {
        // Autoplay policy may reject playback before the first user gesture.
        // That rejection arrives through the returned promise, not as a
        // synchronous throw; catch and log either way, the scene runs fine
        // silently.
        match self.element(cue).play() {
            Ok(promise) => {
                let on_rejected = Closure::once(|err: JsValue| {
                    log_playback_failure(&err);
                });
                let _ = promise.catch(&on_rejected);
                on_rejected.forget();
            }
            Err(err) => log_playback_failure(&err),
        }
    }

    fn pause(&mut self, cue: CueId) {
        self.element(cue).pause().ok();
    }

    fn set_muted(&mut self, cue: CueId, muted: bool) {
        self.element(cue).set_muted(muted);
    }
}

fn log_playback_failure(err: &JsValue) {
    web_sys::console::log_2(&"Audio playback failed:".into(), err);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    enum Op {
        Rewind(CueId),
        Play(CueId),
        Pause(CueId),
        SetMuted(CueId, bool),
    }

    #[derive(Default)]
    struct RecordingBackend {
        ops: Vec<Op>,
    }

    impl CueBackend for RecordingBackend {
        fn rewind(&mut self, cue: CueId) {
            self.ops.push(Op::Rewind(cue));
        }
        fn play(&mut self, cue: CueId) {
            self.ops.push(Op::Play(cue));
        }
        fn pause(&mut self, cue: CueId) {
            self.ops.push(Op::Pause(cue));
        }
        fn set_muted(&mut self, cue: CueId, muted: bool) {
            self.ops.push(Op::SetMuted(cue, muted));
        }
    }

    fn manager() -> AudioCueManager<RecordingBackend> {
        AudioCueManager::new(RecordingBackend::default())
    }

    #[test]
    fn effects_rewind_before_playing() {
        let mut m = manager();
        m.play_effect(CueId::Click);
        assert_eq!(
            m.backend.ops,
            vec![Op::Rewind(CueId::Click), Op::Play(CueId::Click)]
        );
    }

    #[test]
    fn ambient_track_never_rewinds() {
        let mut m = manager();
        m.start_ambient();
        assert_eq!(m.backend.ops, vec![Op::Play(CueId::Bgm)]);
    }

    #[test]
    fn muted_play_touches_nothing() {
        let mut m = manager();
        m.toggle_mute();
        m.backend.ops.clear();
        m.play_effect(CueId::Click);
        m.start_ambient();
        assert!(m.backend.ops.is_empty());
    }

    #[test]
    fn unknown_name_is_a_noop() {
        let mut m = manager();
        m.play_named("explosion");
        assert!(m.backend.ops.is_empty());
        m.play_named("hover");
        assert_eq!(
            m.backend.ops,
            vec![Op::Rewind(CueId::Hover), Op::Play(CueId::Hover)]
        );
    }

    #[test]
    fn toggle_mute_is_an_involution() {
        let mut m = manager();
        assert!(m.toggle_mute());
        assert!(m.is_muted());
        assert!(!m.toggle_mute());
        assert!(!m.is_muted());
        // Every cue saw mute applied then removed, uniformly.
        let mutes: Vec<_> = m
            .backend
            .ops
            .iter()
            .filter(|op| matches!(op, Op::SetMuted(..)))
            .collect();
        assert_eq!(mutes.len(), 6);
    }

    #[test]
    fn stop_pauses_then_rewinds() {
        let mut m = manager();
        m.stop_effect(CueId::Hover);
        assert_eq!(
            m.backend.ops,
            vec![Op::Pause(CueId::Hover), Op::Rewind(CueId::Hover)]
        );
    }

    #[test]
    fn stop_works_even_while_muted() {
        let mut m = manager();
        m.toggle_mute();
        m.backend.ops.clear();
        m.stop_effect(CueId::Click);
        assert_eq!(
            m.backend.ops,
            vec![Op::Pause(CueId::Click), Op::Rewind(CueId::Click)]
        );
    }
}
