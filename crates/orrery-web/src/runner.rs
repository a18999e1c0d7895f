use orrery_engine::systems::frame::run_frame;
use orrery_engine::{
    BodyCatalog, FrameData, FrameSink, InputEvent, InputQueue, OrreryError, ProtocolLayout,
    RenderBuffer, Result, SimConfig, SimulationState,
};

/// Packs submitted frames into the flat buffer the renderer reads.
struct FrameWriter {
    layout: ProtocolLayout,
    floats: Vec<f32>,
    sim_datetime: String,
}

impl FrameWriter {
    fn new(layout: ProtocolLayout) -> Self {
        let floats = vec![0.0; layout.buffer_total_floats];
        Self {
            layout,
            floats,
            sim_datetime: String::new(),
        }
    }
}

impl FrameSink for FrameWriter {
    fn submit(&mut self, frame: &FrameData<'_>) {
        self.layout.write_frame(&mut self.floats, frame);
        self.sim_datetime.clear();
        self.sim_datetime.push_str(frame.sim_datetime);
    }
}

/// Owns the simulation and wires it to the host's frame callback.
///
/// The browser side keeps a single `thread_local!` runner and calls into it
/// through the `#[wasm_bindgen]` exports in `lib.rs`. Frames are refused
/// until a body catalog has been loaded.
pub struct SimRunner {
    config: SimConfig,
    state: Option<SimulationState>,
    input: InputQueue,
    render_buffer: RenderBuffer,
    writer: FrameWriter,
    load_error: Option<String>,
}

impl SimRunner {
    pub fn new(config: SimConfig) -> Self {
        let layout = ProtocolLayout::from_config(&config);
        let render_buffer = RenderBuffer::with_capacity(config.max_bodies);
        Self {
            config,
            state: None,
            input: InputQueue::new(),
            render_buffer,
            writer: FrameWriter::new(layout),
            load_error: None,
        }
    }

    /// Build the simulation from the fetched body list. Fatal on failure:
    /// the runner stays unready and the error is kept for `load_error`.
    pub fn load_catalog(&mut self, json: &str) -> Result<()> {
        let loaded = BodyCatalog::from_json(json)
            .and_then(|catalog| SimulationState::new(self.config.clone(), &catalog));
        match loaded {
            Ok(state) => {
                if state.scene.len() > self.config.max_bodies {
                    log::warn!(
                        "{} bodies loaded but the frame buffer holds {}",
                        state.scene.len(),
                        self.config.max_bodies,
                    );
                }
                self.state = Some(state);
                self.load_error = None;
                Ok(())
            }
            Err(e) => {
                log::error!("failed to load bodies: {e}");
                self.state = None;
                self.input.drain();
                self.load_error = Some(e.to_string());
                Err(e)
            }
        }
    }

    /// Record that the fetch layer gave up. The simulation does not start.
    pub fn report_fetch_failure(&mut self, message: &str) -> OrreryError {
        let err = OrreryError::DataFetch(message.to_string());
        log::error!("{err}");
        self.state = None;
        self.input.drain();
        self.load_error = Some(err.to_string());
        err
    }

    pub fn is_ready(&self) -> bool {
        self.state.is_some()
    }

    pub fn load_error(&self) -> Option<&str> {
        self.load_error.as_deref()
    }

    /// Queue a UI event; it is applied before the next frame.
    /// Events arriving before a catalog is loaded are dropped.
    pub fn push_input(&mut self, event: InputEvent) {
        if self.state.is_none() {
            log::debug!("simulation not ready, dropping {event:?}");
            return;
        }
        self.input.push(event);
    }

    /// Run one frame. `now` is the frame timestamp and `wall_clock_unix` the
    /// current wall-clock time, both in seconds. Returns the time factor, or
    /// `None` if no catalog is loaded yet.
    pub fn tick(&mut self, now: f64, wall_clock_unix: f64) -> Option<f64> {
        let state = self.state.as_mut()?;

        for event in self.input.drain() {
            state.apply(event);
        }

        Some(run_frame(
            state,
            now,
            wall_clock_unix,
            &mut self.render_buffer,
            &mut self.writer,
        ))
    }

    pub fn state(&self) -> Option<&SimulationState> {
        self.state.as_ref()
    }

    // ---- Frame buffer accessors ----

    pub fn frame_ptr(&self) -> *const f32 {
        self.writer.floats.as_ptr()
    }

    pub fn frame_floats(&self) -> &[f32] {
        &self.writer.floats
    }

    pub fn buffer_total_floats(&self) -> u32 {
        self.writer.layout.buffer_total_floats as u32
    }

    pub fn max_bodies(&self) -> u32 {
        self.writer.layout.max_bodies as u32
    }

    pub fn body_count(&self) -> u32 {
        self.state.as_ref().map_or(0, |s| s.scene.len() as u32)
    }

    /// Simulated date/time of the last frame.
    pub fn sim_datetime(&self) -> &str {
        &self.writer.sim_datetime
    }

    // ---- Body data for the UI ----

    pub fn body_name(&self, index: u32) -> Option<String> {
        let state = self.state.as_ref()?;
        state.scene.iter().nth(index as usize).map(|b| b.name().to_string())
    }

    /// Body names in canonical order, as a JSON array.
    pub fn body_names_json(&self) -> String {
        let names: Vec<&str> = self
            .state
            .iter()
            .flat_map(|s| s.scene.iter().map(|b| b.name()))
            .collect();
        serde_json::to_string(&names).unwrap_or_else(|_| "[]".to_string())
    }

    /// Info sheet of one body as a JSON array of `{label, value}`.
    pub fn body_info_json(&self, index: u32) -> Option<String> {
        let state = self.state.as_ref()?;
        let body = state.scene.iter().nth(index as usize)?;
        match serde_json::to_string(&body.descriptor.info()) {
            Ok(json) => Some(json),
            Err(e) => {
                log::warn!("failed to serialize info for {}: {e}", body.name());
                None
            }
        }
    }

    pub fn selected(&self) -> Option<u32> {
        self.state.as_ref()?.selected().map(|id| id.0)
    }

    pub fn speed(&self) -> f64 {
        self.state.as_ref().map_or(self.config.initial_speed, |s| s.clock.speed())
    }

    pub fn compression(&self) -> f64 {
        self.state
            .as_ref()
            .map_or(self.config.initial_compression, |s| s.compression().get())
    }
}
