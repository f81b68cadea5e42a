use crate::assets::LoadedAssets;
use crate::constants::{LABEL_DISABLE, LABEL_ENABLE};
use crate::core::automation::{
    self, FxFrame, COMP_RAMP_TAU, COMP_SHELF_FREQ_HZ, DELAY_RAMP_TAU, PAN_RAMP_TAU,
    REVERB_RAMP_TAU,
};
use crate::core::playback::{PlaybackMachine, PlaybackState, ToggleAction};
use crate::dom;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

fn create_gain(
    audio_ctx: &web::AudioContext,
    value: f32,
    label: &str,
) -> Result<web::GainNode, ()> {
    match web::GainNode::new(audio_ctx) {
        Ok(g) => {
            g.gain().set_value(value);
            Ok(g)
        }
        Err(e) => {
            log::error!("{} GainNode error: {:?}", label, e);
            Err(())
        }
    }
}

/// The signal-routing graph, built exactly once from decoded assets.
///
/// source voice -> splitter -> L/R gains -> merger, then parallel sends from
/// the merger: dry, delay (with tone + feedback loop), the shared reverb bus
/// (predelay -> tone -> three convolvers -> wet gains) and the parallel
/// compression bus (low shelf -> compressor -> makeup -> wet). Everything
/// sums into the mix, then master, then the destination.
pub struct AudioGraph {
    splitter: web::ChannelSplitterNode,
    left_gain: web::GainNode,
    right_gain: web::GainNode,

    delay: web::DelayNode,
    delay_tone: web::BiquadFilterNode,
    delay_feedback: web::GainNode,
    delay_wet: web::GainNode,

    reverb_predelay: web::DelayNode,
    reverb_tone: web::BiquadFilterNode,
    wet_small: web::GainNode,
    wet_large: web::GainNode,
    wet_medium: web::GainNode,

    comp_shelf: web::BiquadFilterNode,
    compressor: web::DynamicsCompressorNode,
    comp_makeup: web::GainNode,
    comp_wet: web::GainNode,
}

impl AudioGraph {
    fn build(audio_ctx: &web::AudioContext, assets: &LoadedAssets) -> Result<Self, ()> {
        // --- panned stereo path: splitter -> per-channel gains -> merger ---
        let splitter = audio_ctx
            .create_channel_splitter_with_number_of_outputs(2)
            .map_err(|e| log::error!("ChannelSplitterNode error: {:?}", e))?;
        let left_gain = create_gain(audio_ctx, 1.0, "pan left")?;
        let right_gain = create_gain(audio_ctx, 1.0, "pan right")?;
        let merger = audio_ctx
            .create_channel_merger_with_number_of_inputs(2)
            .map_err(|e| log::error!("ChannelMergerNode error: {:?}", e))?;
        _ = splitter.connect_with_audio_node_and_output(&left_gain, 0);
        _ = splitter.connect_with_audio_node_and_output(&right_gain, 1);
        _ = left_gain.connect_with_audio_node_and_output_and_input(&merger, 0, 0);
        _ = right_gain.connect_with_audio_node_and_output_and_input(&merger, 0, 1);

        let mix = create_gain(audio_ctx, 1.0, "mix")?;
        let dry_gain = create_gain(audio_ctx, 1.0, "dry")?;
        _ = merger.connect_with_audio_node(&dry_gain);
        _ = dry_gain.connect_with_audio_node(&mix);

        // --- delay send with lowpass tone inside the feedback loop ---
        let delay = audio_ctx
            .create_delay_with_max_delay_time(3.0)
            .map_err(|e| log::error!("DelayNode error: {:?}", e))?;
        delay.delay_time().set_value(0.35);
        let delay_tone = web::BiquadFilterNode::new(audio_ctx)
            .map_err(|e| log::error!("BiquadFilterNode error: {:?}", e))?;
        delay_tone.set_type(web::BiquadFilterType::Lowpass);
        delay_tone.frequency().set_value(6500.0);
        let delay_feedback = create_gain(audio_ctx, 0.2, "delay feedback")?;
        let delay_wet = create_gain(audio_ctx, 0.0, "delay wet")?;
        _ = merger.connect_with_audio_node(&delay);
        _ = delay.connect_with_audio_node(&delay_tone);
        _ = delay_tone.connect_with_audio_node(&delay_feedback);
        _ = delay_feedback.connect_with_audio_node(&delay);
        _ = delay_tone.connect_with_audio_node(&delay_wet);
        _ = delay_wet.connect_with_audio_node(&mix);

        // --- shared reverb bus feeding three convolver voices ---
        let reverb_predelay = audio_ctx
            .create_delay_with_max_delay_time(1.0)
            .map_err(|e| log::error!("predelay DelayNode error: {:?}", e))?;
        reverb_predelay.delay_time().set_value(0.01);
        let reverb_tone = web::BiquadFilterNode::new(audio_ctx)
            .map_err(|e| log::error!("reverb BiquadFilterNode error: {:?}", e))?;
        reverb_tone.set_type(web::BiquadFilterType::Lowpass);
        reverb_tone.frequency().set_value(8000.0);
        _ = merger.connect_with_audio_node(&reverb_predelay);
        _ = reverb_predelay.connect_with_audio_node(&reverb_tone);

        let wet_small = create_gain(audio_ctx, 0.25, "reverb wet small")?;
        let wet_large = create_gain(audio_ctx, 0.0, "reverb wet large")?;
        let wet_medium = create_gain(audio_ctx, 0.0, "reverb wet medium")?;
        for (ir, wet, label) in [
            (&assets.ir_small, &wet_small, "small"),
            (&assets.ir_large, &wet_large, "large"),
            (&assets.ir_medium, &wet_medium, "medium"),
        ] {
            let convolver = web::ConvolverNode::new(audio_ctx)
                .map_err(|e| log::error!("{} ConvolverNode error: {:?}", label, e))?;
            convolver.set_normalize(true);
            convolver.set_buffer(Some(ir));
            _ = reverb_tone.connect_with_audio_node(&convolver);
            _ = convolver.connect_with_audio_node(wet);
            _ = wet.connect_with_audio_node(&mix);
        }

        // --- parallel compression bus, added back to the dry mix ---
        let comp_shelf = web::BiquadFilterNode::new(audio_ctx)
            .map_err(|e| log::error!("shelf BiquadFilterNode error: {:?}", e))?;
        comp_shelf.set_type(web::BiquadFilterType::Lowshelf);
        comp_shelf.frequency().set_value(COMP_SHELF_FREQ_HZ);
        comp_shelf.gain().set_value(0.0);
        let compressor = audio_ctx
            .create_dynamics_compressor()
            .map_err(|e| log::error!("DynamicsCompressorNode error: {:?}", e))?;
        compressor.threshold().set_value(-18.0);
        compressor.knee().set_value(6.0);
        compressor.ratio().set_value(3.0);
        compressor.attack().set_value(0.01);
        compressor.release().set_value(0.15);
        let comp_makeup = create_gain(audio_ctx, 1.0, "compression makeup")?;
        let comp_wet = create_gain(audio_ctx, 0.25, "compression wet")?;
        _ = merger.connect_with_audio_node(&comp_shelf);
        _ = comp_shelf.connect_with_audio_node(&compressor);
        _ = compressor.connect_with_audio_node(&comp_makeup);
        _ = comp_makeup.connect_with_audio_node(&comp_wet);
        _ = comp_wet.connect_with_audio_node(&mix);

        let master = create_gain(audio_ctx, 1.0, "master")?;
        _ = mix.connect_with_audio_node(&master);
        _ = master.connect_with_audio_node(&audio_ctx.destination());

        Ok(Self {
            splitter,
            left_gain,
            right_gain,
            delay,
            delay_tone,
            delay_feedback,
            delay_wet,
            reverb_predelay,
            reverb_tone,
            wet_small,
            wet_large,
            wet_medium,
            comp_shelf,
            compressor,
            comp_makeup,
            comp_wet,
        })
    }

    /// Push one frame of parameter targets onto the node automation. Snapped
    /// pan extremes are set immediately; everything else ramps with its time
    /// constant.
    fn apply(&self, frame: &FxFrame, now: f64) {
        let pan = &frame.pan;
        if pan.snapped {
            _ = self.left_gain.gain().set_value_at_time(pan.left, now);
            _ = self.right_gain.gain().set_value_at_time(pan.right, now);
        } else {
            _ = self
                .left_gain
                .gain()
                .set_target_at_time(pan.left, now, PAN_RAMP_TAU);
            _ = self
                .right_gain
                .gain()
                .set_target_at_time(pan.right, now, PAN_RAMP_TAU);
        }

        let delay = &frame.delay;
        _ = self
            .delay_wet
            .gain()
            .set_target_at_time(delay.wet, now, DELAY_RAMP_TAU);
        _ = self
            .delay_feedback
            .gain()
            .set_target_at_time(delay.feedback, now, DELAY_RAMP_TAU);
        _ = self
            .delay
            .delay_time()
            .set_target_at_time(delay.time_sec, now, DELAY_RAMP_TAU);
        _ = self
            .delay_tone
            .frequency()
            .set_target_at_time(delay.tone_hz, now, DELAY_RAMP_TAU);

        let reverb = &frame.reverb;
        _ = self
            .wet_small
            .gain()
            .set_target_at_time(reverb.small, now, REVERB_RAMP_TAU);
        _ = self
            .wet_large
            .gain()
            .set_target_at_time(reverb.large, now, REVERB_RAMP_TAU);
        _ = self
            .wet_medium
            .gain()
            .set_target_at_time(reverb.medium, now, REVERB_RAMP_TAU);
        _ = self
            .reverb_predelay
            .delay_time()
            .set_target_at_time(reverb.predelay_sec, now, REVERB_RAMP_TAU);
        _ = self
            .reverb_tone
            .frequency()
            .set_target_at_time(reverb.tone_hz, now, REVERB_RAMP_TAU);

        let comp = &frame.compressor;
        _ = self
            .compressor
            .threshold()
            .set_target_at_time(comp.threshold_db, now, COMP_RAMP_TAU);
        _ = self
            .compressor
            .ratio()
            .set_target_at_time(comp.ratio, now, COMP_RAMP_TAU);
        _ = self
            .compressor
            .attack()
            .set_target_at_time(comp.attack_sec, now, COMP_RAMP_TAU);
        _ = self
            .compressor
            .release()
            .set_target_at_time(comp.release_sec, now, COMP_RAMP_TAU);
        _ = self
            .comp_shelf
            .gain()
            .set_target_at_time(comp.shelf_gain_db, now, COMP_RAMP_TAU);
        _ = self
            .comp_wet
            .gain()
            .set_target_at_time(comp.wet, now, COMP_RAMP_TAU);
        _ = self
            .comp_makeup
            .gain()
            .set_target_at_time(comp.makeup, now, COMP_RAMP_TAU);
    }
}

/// Owns the context, the built-once graph, the decoded clip and the single
/// playback voice.
pub struct AudioEngine {
    audio_ctx: web::AudioContext,
    machine: PlaybackMachine,
    graph: Option<AudioGraph>,
    clip: Option<web::AudioBuffer>,
    voice: Option<web::AudioBufferSourceNode>,
}

impl AudioEngine {
    pub fn new() -> Result<Self, ()> {
        let audio_ctx = web::AudioContext::new()
            .map_err(|e| log::error!("AudioContext error: {:?}", e))?;
        Ok(Self {
            audio_ctx,
            machine: PlaybackMachine::new(),
            graph: None,
            clip: None,
            voice: None,
        })
    }

    #[inline]
    pub fn context(&self) -> &web::AudioContext {
        &self.audio_ctx
    }

    #[inline]
    pub fn state(&self) -> PlaybackState {
        self.machine.state()
    }

    /// Returns true only for the caller that should issue the asset load.
    pub fn begin_loading(&mut self) -> bool {
        self.machine.begin_loading()
    }

    pub fn fail_loading(&mut self) {
        self.machine.fail_loading();
    }

    /// Build the graph from decoded assets and become toggleable. Later
    /// calls find the graph already built and change nothing.
    pub fn finish_loading(&mut self, assets: LoadedAssets) {
        if self.graph.is_none() {
            match AudioGraph::build(&self.audio_ctx, &assets) {
                Ok(g) => self.graph = Some(g),
                Err(()) => {
                    self.machine.fail_loading();
                    return;
                }
            }
            self.clip = Some(assets.clip);
        }
        self.machine.finish_loading();
    }

    /// Per-frame parameter automation. Safe to call whether or not a voice
    /// is playing; a no-op until the graph exists.
    pub fn apply_frame(&self, position: f32) {
        let Some(graph) = &self.graph else {
            return;
        };
        let frame = automation::fx_frame(position);
        graph.apply(&frame, self.audio_ctx.current_time());
    }

    /// Stop and release the current voice, if any.
    fn teardown_voice(&mut self) {
        if let Some(voice) = self.voice.take() {
            _ = voice.stop();
            _ = voice.disconnect();
        }
    }

    /// Create and start the single playback voice. Any prior voice is torn
    /// down first.
    fn start_voice(&mut self) -> Option<web::AudioBufferSourceNode> {
        self.teardown_voice();
        let (graph, clip) = match (&self.graph, &self.clip) {
            (Some(g), Some(c)) => (g, c),
            _ => {
                log::error!("audio not loaded yet");
                return None;
            }
        };
        let voice = web::AudioBufferSourceNode::new(&self.audio_ctx)
            .map_err(|e| log::error!("AudioBufferSourceNode error: {:?}", e))
            .ok()?;
        voice.set_buffer(Some(clip));
        _ = voice.connect_with_audio_node(&graph.splitter);
        if voice.start().is_err() {
            _ = voice.disconnect();
            return None;
        }
        self.voice = Some(voice.clone());
        Some(voice)
    }
}

/// Handle a user toggle: `Ready` starts the voice, `Playing` stops it, and
/// anything earlier is ignored. Also resumes a suspended context, since
/// toggles are user gestures.
pub fn toggle(engine: &Rc<RefCell<AudioEngine>>) {
    {
        let e = engine.borrow();
        if e.audio_ctx.state() == web::AudioContextState::Suspended {
            _ = e.audio_ctx.resume();
        }
    }
    let action = engine.borrow_mut().machine.toggle();
    match action {
        ToggleAction::Start => {
            let voice = engine.borrow_mut().start_voice();
            match voice {
                Some(voice) => wire_voice_ended(engine, &voice),
                None => {
                    let mut e = engine.borrow_mut();
                    let epoch = e.machine.voice_epoch();
                    e.machine.ended(epoch);
                }
            }
        }
        ToggleAction::Stop => engine.borrow_mut().teardown_voice(),
        ToggleAction::Ignore => log::warn!("audio toggle ignored; not ready"),
    }
    update_button(&engine.borrow());
}

/// Natural end of the clip returns the machine to `Ready` and releases the
/// voice. The captured epoch names the voice this closure was wired to; the
/// machine rejects events from any voice that has since been replaced, so a
/// stopped voice's queued `ended` cannot stop its successor.
fn wire_voice_ended(engine: &Rc<RefCell<AudioEngine>>, voice: &web::AudioBufferSourceNode) {
    let weak = Rc::downgrade(engine);
    let epoch = engine.borrow().machine.voice_epoch();
    let closure = Closure::wrap(Box::new(move |_ev: web::Event| {
        if let Some(engine) = weak.upgrade() {
            {
                let mut e = engine.borrow_mut();
                if e.machine.ended(epoch) {
                    e.voice = None;
                }
            }
            update_button(&engine.borrow());
        }
    }) as Box<dyn FnMut(web::Event)>);
    voice.set_onended(Some(closure.as_ref().unchecked_ref()));
    closure.forget();
}

fn update_button(engine: &AudioEngine) {
    if let Some(document) = dom::window_document() {
        let label = match engine.state() {
            PlaybackState::Playing => LABEL_DISABLE,
            _ => LABEL_ENABLE,
        };
        dom::set_audio_button(&document, true, label);
    }
}
