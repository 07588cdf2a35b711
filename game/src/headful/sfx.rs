use std::time::Duration;

use rodio::source::{SineWave, Source};
use rodio::{OutputStream, OutputStreamHandle, Sink};

use crate::host::Haptic;
use crate::settings::AudioSettings;

/// `(frequency Hz, length ms)` notes played for each haptic kind.
pub fn tone_sequence(kind: Haptic) -> &'static [(f32, u64)] {
    match kind {
        Haptic::Success => &[(660.0, 70), (880.0, 110)],
        Haptic::Error => &[(220.0, 90), (165.0, 160)],
        Haptic::Warning => &[(440.0, 80)],
    }
}

/// Short procedural tones standing in for a phone's haptic pulses.
pub struct FeedbackSfx {
    _stream: OutputStream,
    handle: OutputStreamHandle,
    gain: f32,
}

impl FeedbackSfx {
    pub fn new(audio: AudioSettings) -> Result<Self, rodio::StreamError> {
        let (stream, handle) = OutputStream::try_default()?;
        Ok(Self {
            _stream: stream,
            handle,
            gain: audio.effective_gain(),
        })
    }

    pub fn play(&self, kind: Haptic) {
        if self.gain <= 0.0 {
            return;
        }
        let Ok(sink) = Sink::try_new(&self.handle) else {
            return;
        };
        sink.set_volume(self.gain);
        for &(freq, ms) in tone_sequence(kind) {
            sink.append(
                SineWave::new(freq)
                    .take_duration(Duration::from_millis(ms))
                    .fade_in(Duration::from_millis(5))
                    .amplify(0.6),
            );
        }
        sink.detach();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_rises_and_error_falls() {
        let up = tone_sequence(Haptic::Success);
        let down = tone_sequence(Haptic::Error);
        assert!(up.windows(2).all(|w| w[0].0 < w[1].0));
        assert!(down.windows(2).all(|w| w[0].0 > w[1].0));
        assert_eq!(tone_sequence(Haptic::Warning).len(), 1);
    }
}
