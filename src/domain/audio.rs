use super::error::AudioError;
use super::kv_store::KeyValueStore;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::rc::Rc;

pub const USER_TRACK_KEY: &str = "dailyreset_user_track";
pub const PREFERENCES_KEY: &str = "dailyreset_preferences";

/// Largest upload kept in the store.
pub const MAX_STORED_BYTES: u64 = 2_000_000;

pub const USER_TRACK_ID: &str = "user-upload";
pub const TEMP_TRACK_ID: &str = "user-upload-temp";

pub const DEFAULT_VOLUME: f32 = 0.8;

const BUILT_IN: &[(&str, &str)] = &[
    ("calm-start", "Calm Start"),
    ("gentle-focus", "Gentle Focus"),
    ("soft-motivation", "Soft Motivation"),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrackSource {
    File(String),
    DataUrl(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Track {
    pub id: String,
    pub title: String,
    pub source: TrackSource,
    pub duration_hint: Option<String>,
}

/// A user upload as kept in the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredTrack {
    pub name: String,
    pub data_url: String,
}

impl StoredTrack {
    pub fn from_bytes(name: &str, bytes: &[u8]) -> Self {
        Self {
            name: name.to_string(),
            data_url: encode_data_url(guess_mime(name), bytes),
        }
    }

    pub fn to_track(&self) -> Track {
        Track {
            id: USER_TRACK_ID.to_string(),
            title: format!("Your audio: {}", self.name),
            source: TrackSource::DataUrl(self.data_url.clone()),
            duration_hint: Some("your file".to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerPreferences {
    pub selected_track: Option<String>,
    pub volume: f32,
}

impl Default for PlayerPreferences {
    fn default() -> Self {
        Self {
            selected_track: None,
            volume: DEFAULT_VOLUME,
        }
    }
}

impl PlayerPreferences {
    pub fn set_volume(&mut self, volume: f32) {
        self.volume = if volume.is_finite() {
            volume.clamp(0.0, 1.0)
        } else {
            DEFAULT_VOLUME
        };
    }
}

pub fn built_in_tracks(audio_dir: &Path) -> Vec<Track> {
    BUILT_IN
        .iter()
        .map(|(id, title)| Track {
            id: id.to_string(),
            title: title.to_string(),
            source: TrackSource::File(
                audio_dir
                    .join(format!("{}.mp3", id))
                    .to_string_lossy()
                    .into_owned(),
            ),
            duration_hint: Some("2–3 min".to_string()),
        })
        .collect()
}

/// A track for an oversized upload; it lives only as long as the process.
pub fn temporary_track(path: &Path) -> Track {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    Track {
        id: TEMP_TRACK_ID.to_string(),
        title: format!("Your audio (temp): {}", name),
        source: TrackSource::File(path.to_string_lossy().into_owned()),
        duration_hint: Some("temp".to_string()),
    }
}

pub fn guess_mime(name: &str) -> &'static str {
    let ext = Path::new(name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    match ext.as_deref() {
        Some("mp3") => "audio/mpeg",
        Some("wav") => "audio/wav",
        Some("ogg") | Some("oga") => "audio/ogg",
        Some("m4a") | Some("mp4") => "audio/mp4",
        Some("aac") => "audio/aac",
        Some("flac") => "audio/flac",
        Some("webm") => "audio/webm",
        _ => "application/octet-stream",
    }
}

pub fn encode_data_url(mime: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", mime, BASE64.encode(bytes))
}

/// Returns the MIME type and decoded payload of a base64 data URL.
pub fn decode_data_url(data_url: &str) -> Result<(String, Vec<u8>), AudioError> {
    let rest = data_url
        .strip_prefix("data:")
        .ok_or_else(|| AudioError::InvalidDataUrl("missing 'data:' prefix".to_string()))?;
    let (header, payload) = rest
        .split_once(',')
        .ok_or_else(|| AudioError::InvalidDataUrl("missing payload".to_string()))?;
    let mime = header
        .strip_suffix(";base64")
        .ok_or_else(|| AudioError::InvalidDataUrl("only base64 payloads are supported".to_string()))?;

    let bytes = BASE64
        .decode(payload)
        .map_err(|e| AudioError::InvalidDataUrl(e.to_string()))?;
    Ok((mime.to_string(), bytes))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadOutcome {
    Stored(Track),
    /// Too large for the store, or the write failed; usable for this run only.
    Temporary { track: Track, reason: String },
}

/// Built-in tracks plus the user's own upload.
pub struct AudioLibrary<S: KeyValueStore> {
    store: Rc<S>,
    audio_dir: PathBuf,
    temporary: Option<Track>,
}

impl<S: KeyValueStore> AudioLibrary<S> {
    pub fn new(store: Rc<S>, audio_dir: impl Into<PathBuf>) -> Self {
        Self {
            store,
            audio_dir: audio_dir.into(),
            temporary: None,
        }
    }

    pub fn stored_track(&self) -> Option<StoredTrack> {
        self.store
            .get_json::<StoredTrack>(USER_TRACK_KEY)
            .filter(|t| !t.data_url.is_empty())
    }

    pub fn tracks(&self) -> Vec<Track> {
        let mut tracks = built_in_tracks(&self.audio_dir);
        if let Some(stored) = self.stored_track() {
            tracks.push(stored.to_track());
        }
        if let Some(temp) = &self.temporary {
            tracks.push(temp.clone());
        }
        tracks
    }

    pub fn find(&self, id: &str) -> Result<Track, AudioError> {
        self.tracks()
            .into_iter()
            .find(|t| t.id == id)
            .ok_or_else(|| AudioError::TrackNotFound(id.to_string()))
    }

    /// Stores `bytes` when they fit under [`MAX_STORED_BYTES`]; otherwise the
    /// file is only referenced for the current run.
    pub fn upload(&mut self, path: &Path, bytes: &[u8]) -> UploadOutcome {
        if bytes.len() as u64 > MAX_STORED_BYTES {
            return self.keep_temporary(
                path,
                "File too large to save. It will play now but won’t persist after restart.",
            );
        }

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "audio".to_string());
        let stored = StoredTrack::from_bytes(&name, bytes);

        if self.store.set_json(USER_TRACK_KEY, &stored) {
            UploadOutcome::Stored(stored.to_track())
        } else {
            self.keep_temporary(path, "Could not save audio. Try a smaller file.")
        }
    }

    fn keep_temporary(&mut self, path: &Path, reason: &str) -> UploadOutcome {
        let track = temporary_track(path);
        self.temporary = Some(track.clone());
        UploadOutcome::Temporary {
            track,
            reason: reason.to_string(),
        }
    }

    pub fn clear(&mut self) -> bool {
        let had_track = self.stored_track().is_some();
        self.store.remove(USER_TRACK_KEY);
        had_track
    }

    /// Decoded bytes of a track kept in the store.
    pub fn stored_bytes(&self, id: &str) -> Result<Vec<u8>, AudioError> {
        match self.find(id)?.source {
            TrackSource::DataUrl(url) => decode_data_url(&url).map(|(_, bytes)| bytes),
            TrackSource::File(_) => Err(AudioError::NotStored(id.to_string())),
        }
    }

    pub fn preferences(&self) -> PlayerPreferences {
        self.store.get_json(PREFERENCES_KEY).unwrap_or_default()
    }

    pub fn save_preferences(&self, prefs: &PlayerPreferences) -> bool {
        self.store.set_json(PREFERENCES_KEY, prefs)
    }

    /// The selected track, falling back to the first one when the selection is gone.
    pub fn selected(&self) -> Option<Track> {
        let tracks = self.tracks();
        let selected = self.preferences().selected_track;
        selected
            .and_then(|id| tracks.iter().find(|t| t.id == id).cloned())
            .or_else(|| tracks.first().cloned())
    }
}

/// Formats seconds as `m:ss`; negative or non-finite input shows `0:00`.
pub fn format_time(seconds: f64) -> String {
    if !seconds.is_finite() || seconds < 0.0 {
        return "0:00".to_string();
    }
    let total = seconds.floor() as u64;
    format!("{}:{:02}", total / 60, total % 60)
}
