use gtk4::prelude::*;
use gtk4::MediaFile;
use rand::Rng;
use std::fmt::Debug;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use crate::game::{NotificationError, NotificationSink};
use crate::model::Notification;

const SOUND_EXTENSIONS: [&str; 3] = ["ogg", "mp3", "wav"];
const MAX_VARIANTS: usize = 3;

/// Plays a short cue per notification: a confirmation sound for round starts and
/// correct guesses, an error sound for everything else.
pub struct AudioSet {
    sounds_dir: PathBuf,
    confirm_sounds: Vec<Rc<MediaFile>>,
    error_sounds: Vec<Rc<MediaFile>>,
}

/// Finds `<prefix>-1.ogg`, `<prefix>-2.mp3`, ... in `dir`, first matching extension wins.
pub fn sound_paths(dir: &Path, prefix: &str) -> Vec<PathBuf> {
    (1..=MAX_VARIANTS)
        .filter_map(|n| {
            SOUND_EXTENSIONS
                .iter()
                .map(|ext| dir.join(format!("{}-{}.{}", prefix, n, ext)))
                .find(|path| path.is_file())
        })
        .collect()
}

impl AudioSet {
    /// Must be called after GTK has been initialised.
    pub fn new(sounds_dir: &Path) -> Self {
        let load = |prefix: &str| -> Vec<Rc<MediaFile>> {
            sound_paths(sounds_dir, prefix)
                .into_iter()
                .map(|path| {
                    log::trace!(target: "audio", "Loading {}", path.display());
                    Rc::new(MediaFile::for_filename(&path))
                })
                .collect()
        };
        let set = Self {
            sounds_dir: sounds_dir.to_path_buf(),
            confirm_sounds: load("confirm"),
            error_sounds: load("error"),
        };
        if set.confirm_sounds.is_empty() || set.error_sounds.is_empty() {
            log::warn!(
                target: "audio",
                "Incomplete sound set in {}; some cues will be silent",
                sounds_dir.display()
            );
        }
        set
    }

    fn pick(sounds: &[Rc<MediaFile>]) -> Option<Rc<MediaFile>> {
        if sounds.is_empty() {
            return None;
        }
        let index = rand::rng().random_range(0..sounds.len());
        Some(Rc::clone(&sounds[index]))
    }
}

impl NotificationSink for AudioSet {
    fn notify(&self, notification: &Notification) -> Result<(), NotificationError> {
        let (sounds, prefix) = if notification.is_positive() {
            (&self.confirm_sounds, "confirm")
        } else {
            (&self.error_sounds, "error")
        };
        let media = Self::pick(sounds).ok_or_else(|| {
            NotificationError::MissingAsset(self.sounds_dir.join(format!("{}-1.ogg", prefix)))
        })?;
        if media.is_playing() {
            media.set_playing(false);
            media.seek(0);
        }
        media.play();
        Ok(())
    }
}

impl Debug for AudioSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "AudioSet({} confirm, {} error)",
            self.confirm_sounds.len(),
            self.error_sounds.len()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_sound_paths() {
        let dir = std::env::temp_dir()
            .join(format!("guess-the-number-sounds-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        for name in ["confirm-1.ogg", "confirm-2.wav", "error-2.mp3", "error-9.ogg"] {
            fs::write(dir.join(name), b"").unwrap();
        }

        let confirm = sound_paths(&dir, "confirm");
        let error = sound_paths(&dir, "error");
        fs::remove_dir_all(&dir).unwrap();

        assert_eq!(
            confirm,
            vec![dir.join("confirm-1.ogg"), dir.join("confirm-2.wav")]
        );
        assert_eq!(error, vec![dir.join("error-2.mp3")]);
    }

    #[test]
    fn test_missing_dir_has_no_sounds() {
        assert!(sound_paths(Path::new("/nonexistent/sounds"), "confirm").is_empty());
    }
}
