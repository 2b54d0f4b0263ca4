/// Background music control
///
/// The page has two orthogonal toggles, mute and play, mediated here against
/// an opaque audio handle. The controller owns the intent; the handle is
/// only ever told to match it. A handle that cannot play (no device, no song
/// file, platform refusal) costs nothing: the requested state is retained
/// and a later user toggle is the only retry path.
use std::io::BufReader;
use std::path::Path;

use rodio::Source;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PlaybackState {
    pub muted: bool,
    pub playing: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum PlaybackError {
    #[error("playback rejected: {0}")]
    Rejected(String),
}

/// The opaque media handle the controller drives. Pausing is assumed always
/// to succeed; playing may be rejected.
pub trait AudioHandle {
    fn set_muted(&mut self, muted: bool);
    fn play(&mut self) -> Result<(), PlaybackError>;
    fn pause(&mut self);
}

/// Mediates mute/play intent against the handle.
pub struct Player {
    state: PlaybackState,
    handle: Option<Box<dyn AudioHandle>>,
}

impl Player {
    pub fn new(handle: Option<Box<dyn AudioHandle>>) -> Self {
        Self {
            state: PlaybackState::default(),
            handle,
        }
    }

    /// Build a player around the song file at `path`, or a silent one when
    /// the file or an output device is missing.
    pub fn from_song_file(path: &Path) -> Self {
        match RodioAudio::open(path) {
            Ok(audio) => {
                log::info!("🎵 Song loaded from {}", path.display());
                Self::new(Some(Box::new(audio)))
            }
            Err(e) => {
                log::info!("no background music: {e}");
                Self::new(None)
            }
        }
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    /// Idempotent: repeating the current value changes nothing and touches
    /// the handle not at all.
    pub fn set_muted(&mut self, muted: bool) {
        if self.state.muted == muted {
            return;
        }
        self.state.muted = muted;
        self.apply();
    }

    pub fn set_playing(&mut self, playing: bool) {
        if self.state.playing == playing {
            return;
        }
        self.state.playing = playing;
        self.apply();
    }

    pub fn toggle_muted(&mut self) {
        self.set_muted(!self.state.muted);
    }

    pub fn toggle_playing(&mut self) {
        self.set_playing(!self.state.playing);
    }

    /// Push both flags to the handle. A rejected play keeps the requested
    /// intent; nothing propagates to the caller.
    fn apply(&mut self) {
        let Some(handle) = self.handle.as_mut() else {
            return;
        };
        handle.set_muted(self.state.muted);
        if self.state.playing {
            if let Err(e) = handle.play() {
                log::debug!("play request not honored, keeping intent: {e}");
            }
        } else {
            handle.pause();
        }
    }
}

/// The real handle: a rodio sink looping the configured song.
///
/// Mute is volume 0 rather than a true stream mute; the sink keeps advancing
/// so unmuting resumes mid-song like the original page's audio element.
struct RodioAudio {
    _stream: rodio::OutputStream,
    sink: rodio::Sink,
}

impl RodioAudio {
    fn open(path: &Path) -> Result<Self, PlaybackError> {
        let (stream, stream_handle) = rodio::OutputStream::try_default()
            .map_err(|e| PlaybackError::Rejected(format!("no output device ({e})")))?;
        let sink = rodio::Sink::try_new(&stream_handle)
            .map_err(|e| PlaybackError::Rejected(format!("no sink ({e})")))?;

        let file = std::fs::File::open(path)
            .map_err(|e| PlaybackError::Rejected(format!("song file unavailable ({e})")))?;
        let source = rodio::Decoder::new(BufReader::new(file))
            .map_err(|e| PlaybackError::Rejected(format!("song not decodable ({e})")))?;

        sink.append(source.repeat_infinite());
        sink.pause();

        Ok(Self {
            _stream: stream,
            sink,
        })
    }
}

impl AudioHandle for RodioAudio {
    fn set_muted(&mut self, muted: bool) {
        self.sink.set_volume(if muted { 0.0 } else { 1.0 });
    }

    fn play(&mut self) -> Result<(), PlaybackError> {
        self.sink.play();
        Ok(())
    }

    fn pause(&mut self) {
        self.sink.pause();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Debug, PartialEq, Eq, Clone)]
    enum Call {
        Muted(bool),
        Play,
        Pause,
    }

    struct FakeHandle {
        calls: Rc<RefCell<Vec<Call>>>,
        reject_play: bool,
    }

    impl AudioHandle for FakeHandle {
        fn set_muted(&mut self, muted: bool) {
            self.calls.borrow_mut().push(Call::Muted(muted));
        }
        fn play(&mut self) -> Result<(), PlaybackError> {
            self.calls.borrow_mut().push(Call::Play);
            if self.reject_play {
                Err(PlaybackError::Rejected("autoplay blocked".into()))
            } else {
                Ok(())
            }
        }
        fn pause(&mut self) {
            self.calls.borrow_mut().push(Call::Pause);
        }
    }

    fn player(reject_play: bool) -> (Player, Rc<RefCell<Vec<Call>>>) {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let handle = FakeHandle {
            calls: Rc::clone(&calls),
            reject_play,
        };
        (Player::new(Some(Box::new(handle))), calls)
    }

    #[test]
    fn test_set_muted_twice_equals_once() {
        let (mut p, calls) = player(false);
        p.set_muted(true);
        let after_once = (p.state(), calls.borrow().clone());
        p.set_muted(true);
        assert_eq!(p.state(), after_once.0);
        assert_eq!(*calls.borrow(), after_once.1, "second call must not touch the handle");
    }

    #[test]
    fn test_flags_are_orthogonal() {
        let (mut p, calls) = player(false);
        p.set_playing(true);
        p.set_muted(true);
        assert_eq!(
            p.state(),
            PlaybackState {
                muted: true,
                playing: true
            }
        );
        // Muting re-applies both flags but does not pause
        assert_eq!(
            *calls.borrow(),
            vec![
                Call::Muted(false),
                Call::Play,
                Call::Muted(true),
                Call::Play
            ]
        );
    }

    #[test]
    fn test_pause_applies_on_change() {
        let (mut p, calls) = player(false);
        p.set_playing(true);
        p.set_playing(false);
        assert_eq!(
            *calls.borrow(),
            vec![Call::Muted(false), Call::Play, Call::Muted(false), Call::Pause]
        );
    }

    #[test]
    fn test_rejected_play_retains_intent() {
        let (mut p, _calls) = player(true);
        p.set_playing(true);
        assert!(p.state().playing, "intent survives a rejected play");

        // The explicit user toggle is the retry path
        p.set_playing(false);
        p.set_playing(true);
        assert!(p.state().playing);
    }

    #[test]
    fn test_no_handle_is_a_silent_no_op() {
        let mut p = Player::new(None);
        p.set_playing(true);
        p.toggle_muted();
        assert_eq!(
            p.state(),
            PlaybackState {
                muted: true,
                playing: true
            }
        );
    }
}
