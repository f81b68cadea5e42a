/// Lifecycle of the single playback voice.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlaybackState {
    Idle,
    Loading,
    Ready,
    Playing,
}

/// What the graph layer must do after a toggle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToggleAction {
    /// Tear down any existing voice, then create and start a new one.
    Start,
    /// Stop and release the current voice.
    Stop,
    /// Not ready yet (or already torn down); do nothing.
    Ignore,
}

/// Pure playback state machine: `Idle -> Loading -> Ready <-> Playing`.
///
/// The graph layer owns the actual audio nodes; this type only decides the
/// transitions so rapid toggles cannot produce more than one voice. Each
/// started voice gets an epoch, and an end notification only counts when it
/// names the current one; `ended` events are delivered asynchronously, so a
/// stopped voice's event can arrive after its replacement already started.
#[derive(Clone, Copy, Debug, Default)]
pub struct PlaybackMachine {
    state: PlaybackState,
    voice_epoch: u32,
}

impl Default for PlaybackState {
    fn default() -> Self {
        PlaybackState::Idle
    }
}

impl PlaybackMachine {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn state(&self) -> PlaybackState {
        self.state
    }

    /// Epoch of the voice started by the most recent `Start`.
    #[inline]
    pub fn voice_epoch(&self) -> u32 {
        self.voice_epoch
    }

    /// Returns true only on the first call: asset loading is issued once.
    pub fn begin_loading(&mut self) -> bool {
        if self.state == PlaybackState::Idle {
            self.state = PlaybackState::Loading;
            true
        } else {
            false
        }
    }

    /// All assets decoded and the graph built.
    pub fn finish_loading(&mut self) {
        if self.state == PlaybackState::Loading {
            self.state = PlaybackState::Ready;
        }
    }

    /// A fetch or decode failed; audio stays unavailable, visuals continue.
    pub fn fail_loading(&mut self) {
        if self.state == PlaybackState::Loading {
            self.state = PlaybackState::Idle;
        }
    }

    /// User toggle. Toggles before the load resolves are ignored, so after
    /// the load settles at most one voice can exist.
    pub fn toggle(&mut self) -> ToggleAction {
        match self.state {
            PlaybackState::Ready => {
                self.state = PlaybackState::Playing;
                self.voice_epoch = self.voice_epoch.wrapping_add(1);
                ToggleAction::Start
            }
            PlaybackState::Playing => {
                self.state = PlaybackState::Ready;
                ToggleAction::Stop
            }
            PlaybackState::Idle | PlaybackState::Loading => ToggleAction::Ignore,
        }
    }

    /// A voice ran to its natural end. Acts only when `epoch` names the
    /// voice currently playing; a stale event from a replaced voice must not
    /// stop its successor. Returns whether the machine transitioned.
    pub fn ended(&mut self, epoch: u32) -> bool {
        if self.state == PlaybackState::Playing && epoch == self.voice_epoch {
            self.state = PlaybackState::Ready;
            true
        } else {
            false
        }
    }
}
