//! Audible feedback for scans.
//!
//! Playback is best effort: handlers spawn it and never look at the
//! outcome.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

/// Playback volume, 0.0 to 1.0.
pub const VOLUME: f32 = 0.3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundCue {
    Success,
    Error,
}

impl SoundCue {
    /// Asset the web client plays for this cue.
    pub fn asset(self) -> &'static str {
        match self {
            SoundCue::Success => "/mrp_barcode_scrap/static/src/sounds/beep.mp3",
            SoundCue::Error => "/mrp_barcode_scrap/static/src/sounds/error.mp3",
        }
    }
}

#[async_trait]
pub trait SoundPlayer: Send + Sync + 'static {
    async fn play(&self, cue: SoundCue) -> std::io::Result<()>;
}

/// Plays nothing.
pub struct Silent;

#[async_trait]
impl SoundPlayer for Silent {
    async fn play(&self, _cue: SoundCue) -> std::io::Result<()> {
        Ok(())
    }
}

/// Fire and forget: spawn playback and drop whatever it returns.
///
/// Outside a tokio runtime the cue is skipped.
pub fn play_detached(player: &Arc<dyn SoundPlayer>, cue: SoundCue) {
    let Ok(rt) = tokio::runtime::Handle::try_current() else {
        debug!(?cue, "no runtime, sound skipped");
        return;
    };
    let player = Arc::clone(player);
    rt.spawn(async move {
        if let Err(e) = player.play(cue).await {
            debug!(?cue, error = %e, "sound failed");
        }
    });
}
