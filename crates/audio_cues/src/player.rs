use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use std::sync::mpsc::{self, Sender};
use std::thread;

use rodio::{Decoder, OutputStream, Sink};
use tracing::{debug, warn};

use crate::clip_for;

/// Plays the cue for a move token. Fire-and-forget: implementations must not
/// block the caller and must swallow playback failures.
pub trait CuePlayer: Send + Sync {
    fn play(&self, notation: &str);
}

/// Cue playback through rodio on a dedicated worker thread.
///
/// The worker owns the output stream; if no output device is available it
/// keeps retrying lazily on each request. Every failure path logs and drops
/// the cue.
pub struct RodioCuePlayer {
    tx: Sender<&'static str>,
    sounds_dir: PathBuf,
}

impl RodioCuePlayer {
    pub fn new(sounds_dir: PathBuf) -> Self {
        let (tx, rx) = mpsc::channel::<&'static str>();
        let dir = sounds_dir.clone();
        thread::spawn(move || {
            let mut output = OutputStream::try_default().ok();
            if output.is_none() {
                warn!("audio output unavailable; move cues disabled until a device appears");
            }
            let mut active_sinks: Vec<Sink> = Vec::new();

            while let Ok(clip) = rx.recv() {
                active_sinks.retain(|sink| !sink.empty());

                if output.is_none() {
                    output = OutputStream::try_default().ok();
                    if output.is_none() {
                        continue;
                    }
                }
                let Some((_, handle)) = output.as_ref() else {
                    continue;
                };

                let path = dir.join(clip);
                let file = match File::open(&path) {
                    Ok(file) => file,
                    Err(err) => {
                        debug!(?err, path = %path.display(), "failed opening cue clip");
                        continue;
                    }
                };
                let decoder = match Decoder::new(BufReader::new(file)) {
                    Ok(decoder) => decoder,
                    Err(err) => {
                        debug!(?err, path = %path.display(), "failed decoding cue clip");
                        continue;
                    }
                };

                match Sink::try_new(handle) {
                    Ok(sink) => {
                        sink.append(decoder);
                        active_sinks.push(sink);
                    }
                    Err(err) => {
                        warn!(?err, "failed to create audio sink");
                        output = None;
                    }
                }
            }
        });
        Self { tx, sounds_dir }
    }

    pub fn sounds_dir(&self) -> &PathBuf {
        &self.sounds_dir
    }
}

impl CuePlayer for RodioCuePlayer {
    fn play(&self, notation: &str) {
        let Some(clip) = clip_for(notation) else {
            return;
        };
        let _ = self.tx.send(clip);
    }
}
