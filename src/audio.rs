use chaos_core::constants::FFT_SIZE;
use thiserror::Error;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys as web;

#[derive(Debug, Error)]
pub enum AudioError {
    #[error("audio input unavailable: {0}")]
    Unavailable(String),
    #[error("microphone permission denied: {0}")]
    PermissionDenied(String),
    #[error("audio graph error: {0}")]
    Graph(String),
}

fn describe(e: &JsValue) -> String {
    js_sys::Reflect::get(e, &JsValue::from_str("message"))
        .ok()
        .and_then(|m| m.as_string())
        .unwrap_or_else(|| format!("{:?}", e))
}

// getUserMedia rejects with a DOMException; its name tells refusal from absence
fn classify_media_error(e: JsValue) -> AudioError {
    let name = js_sys::Reflect::get(&e, &JsValue::from_str("name"))
        .ok()
        .and_then(|n| n.as_string())
        .unwrap_or_default();
    match name.as_str() {
        "NotAllowedError" | "SecurityError" => AudioError::PermissionDenied(describe(&e)),
        _ => AudioError::Unavailable(describe(&e)),
    }
}

/// Live microphone routed into a frequency analyser.
pub struct MicInput {
    ctx: web::AudioContext,
    analyser: web::AnalyserNode,
    _source: web::MediaStreamAudioSourceNode,
    stream: web::MediaStream,
    bins: Vec<u8>,
}

impl MicInput {
    /// Refresh and return the byte magnitude spectrum (`fft_size / 2` bins).
    pub fn read_bins(&mut self) -> &[u8] {
        self.analyser.get_byte_frequency_data(&mut self.bins);
        &self.bins
    }

    /// Stop capture and release the device.
    pub fn close(self) {
        stop_tracks(&self.stream);
        _ = self.ctx.close();
        log::info!("[audio] microphone released");
    }
}

fn stop_tracks(stream: &web::MediaStream) {
    for track in stream.get_tracks().iter() {
        if let Ok(t) = track.dyn_into::<web::MediaStreamTrack>() {
            t.stop();
        }
    }
}

// Create analyser and an appropriately sized byte buffer
pub fn create_analyser(
    audio_ctx: &web::AudioContext,
) -> Result<(web::AnalyserNode, Vec<u8>), AudioError> {
    let analyser =
        web::AnalyserNode::new(audio_ctx).map_err(|e| AudioError::Graph(describe(&e)))?;
    analyser.set_fft_size(FFT_SIZE);
    let bins = vec![0u8; analyser.frequency_bin_count() as usize];
    Ok((analyser, bins))
}

/// Ask for the microphone and build `source -> analyser`. The analyser is
/// left unconnected to the destination so the input is never played back.
pub async fn acquire_microphone() -> Result<MicInput, AudioError> {
    let window = web::window().ok_or_else(|| AudioError::Unavailable("no window".into()))?;
    let ctx = web::AudioContext::new().map_err(|e| AudioError::Unavailable(describe(&e)))?;
    match connect_microphone(&window, &ctx).await {
        Ok(mic) => {
            _ = ctx.resume();
            log::info!(
                "[audio] microphone ready: fft={} bins={}",
                mic.analyser.fft_size(),
                mic.bins.len()
            );
            Ok(mic)
        }
        Err(e) => {
            _ = ctx.close();
            Err(e)
        }
    }
}

async fn connect_microphone(
    window: &web::Window,
    ctx: &web::AudioContext,
) -> Result<MicInput, AudioError> {
    let (analyser, bins) = create_analyser(ctx)?;

    let devices = window
        .navigator()
        .media_devices()
        .map_err(|e| AudioError::Unavailable(describe(&e)))?;
    let constraints = web::MediaStreamConstraints::new();
    constraints.set_audio(&JsValue::TRUE);
    let promise = devices
        .get_user_media_with_constraints(&constraints)
        .map_err(classify_media_error)?;
    let stream: web::MediaStream = JsFuture::from(promise)
        .await
        .map_err(classify_media_error)?
        .dyn_into()
        .map_err(|e| AudioError::Graph(describe(&e)))?;

    let source = ctx
        .create_media_stream_source(&stream)
        .and_then(|source| source.connect_with_audio_node(&analyser).map(|_| source));
    match source {
        Ok(source) => Ok(MicInput {
            ctx: ctx.clone(),
            analyser,
            _source: source,
            stream,
            bins,
        }),
        Err(e) => {
            stop_tracks(&stream);
            Err(AudioError::Graph(describe(&e)))
        }
    }
}
