//! Sound cues as terminal bells.

use async_trait::async_trait;
use openerp_scrap::{SoundCue, SoundPlayer};
use tokio::io::AsyncWriteExt;

/// One bell for a good scan, two for an error.
pub struct TerminalBell;

impl TerminalBell {
    fn bells(cue: SoundCue) -> &'static [u8] {
        match cue {
            SoundCue::Success => b"\x07",
            SoundCue::Error => b"\x07\x07",
        }
    }
}

#[async_trait]
impl SoundPlayer for TerminalBell {
    async fn play(&self, cue: SoundCue) -> std::io::Result<()> {
        let mut err = tokio::io::stderr();
        err.write_all(Self::bells(cue)).await?;
        err.flush().await
    }
}
