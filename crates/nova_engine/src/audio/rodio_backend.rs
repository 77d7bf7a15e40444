//! Rodio audio backend
//!
//! Plays sound identifiers as `.ogg` files relative to an asset root.
//! Rodio sinks take `&self` for every control, so one sink maps directly
//! onto one [`AudioInstance`].

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink, Source};

use super::{AudioBackend, AudioError, AudioInstance};

/// Rodio-backed audio output.
pub struct RodioAudio {
    // Dropping the stream silences every sink created from it.
    _stream: OutputStream,
    handle: OutputStreamHandle,
    root: PathBuf,
}

impl RodioAudio {
    /// Open the default output device, resolving sound ids under `root`.
    pub fn new(root: impl Into<PathBuf>) -> Result<Self, AudioError> {
        let (stream, handle) = OutputStream::try_default()
            .map_err(|e| AudioError::BackendUnavailable(e.to_string()))?;

        Ok(Self {
            _stream: stream,
            handle,
            root: root.into(),
        })
    }

    fn open_sink(&self, id: &str) -> Result<(Sink, Decoder<BufReader<File>>), AudioError> {
        let path = self.root.join(format!("{id}.ogg"));
        let file = File::open(&path).map_err(|e| AudioError::PlaybackFailed {
            id: id.to_string(),
            reason: format!("{}: {e}", path.display()),
        })?;

        let source = Decoder::new(BufReader::new(file)).map_err(|e| AudioError::PlaybackFailed {
            id: id.to_string(),
            reason: e.to_string(),
        })?;

        let sink = Sink::try_new(&self.handle).map_err(|e| AudioError::PlaybackFailed {
            id: id.to_string(),
            reason: e.to_string(),
        })?;

        Ok((sink, source))
    }
}

impl AudioBackend for RodioAudio {
    fn play(&self, id: &str) -> Result<Box<dyn AudioInstance>, AudioError> {
        let (sink, source) = self.open_sink(id)?;
        sink.append(source);
        Ok(Box::new(RodioInstance { sink }))
    }

    fn play_looping(&self, id: &str) -> Result<Box<dyn AudioInstance>, AudioError> {
        let (sink, source) = self.open_sink(id)?;
        sink.append(source.repeat_infinite());
        Ok(Box::new(RodioInstance { sink }))
    }
}

struct RodioInstance {
    sink: Sink,
}

impl AudioInstance for RodioInstance {
    fn pause(&self) {
        self.sink.pause();
    }

    fn resume(&self) {
        self.sink.play();
    }

    fn stop(&self) {
        self.sink.stop();
    }

    fn is_stopped(&self) -> bool {
        self.sink.empty()
    }

    fn set_volume(&self, volume: f32) {
        self.sink.set_volume(volume);
    }
}
