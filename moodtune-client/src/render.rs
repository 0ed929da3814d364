//! Results rendering
//!
//! Pure formatting of the analysis summary and one page of songs into
//! display content: an HTML fragment for the page host and a plain-text
//! form for terminals. No state is read other than the arguments.

use crate::models::{AnalysisResult, Song};
use moodtune_common::api::ObjectsField;

/// Placeholder for missing emotion or objects
pub const NONE_DETECTED: &str = "None detected";

/// Placeholder for a missing scene
pub const UNKNOWN_SCENE: &str = "Unknown";

/// Link label on every song card
pub const PLAY_LINK_LABEL: &str = "🎵 Play on Spotify";

/// Upper-case the first character only; the rest is left as-is
pub fn capitalize_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub fn emotion_text(emotion: Option<&str>) -> String {
    match emotion.filter(|e| !e.is_empty()) {
        Some(e) => capitalize_first(e),
        None => NONE_DETECTED.to_string(),
    }
}

pub fn scene_text(scene: Option<&str>) -> String {
    match scene.filter(|s| !s.is_empty()) {
        Some(s) => capitalize_first(s),
        None => UNKNOWN_SCENE.to_string(),
    }
}

/// Lists are capitalized and comma-joined; a bare string is shown verbatim
pub fn objects_text(objects: Option<&ObjectsField>) -> String {
    match objects {
        Some(ObjectsField::List(items)) if !items.is_empty() => items
            .iter()
            .map(|o| capitalize_first(o))
            .collect::<Vec<_>>()
            .join(", "),
        Some(ObjectsField::Single(text)) if !text.is_empty() => text.clone(),
        _ => NONE_DETECTED.to_string(),
    }
}

/// Escape text for safe insertion into markup (element content or
/// quoted attribute values)
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Normalized analysis labels
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisSummary {
    pub emotion: String,
    pub scene: String,
    pub objects: String,
}

impl AnalysisSummary {
    pub fn from_analysis(analysis: &AnalysisResult) -> Self {
        Self {
            emotion: emotion_text(analysis.emotion.as_deref()),
            scene: scene_text(analysis.scene.as_deref()),
            objects: objects_text(analysis.objects.as_ref()),
        }
    }

    pub fn to_html(&self) -> String {
        format!(
            "<h3>🎭 Image Analysis</h3>\n\
             <p><strong>Face Emotion:</strong> {}</p>\n\
             <p><strong>Scene Detected:</strong> {}</p>\n\
             <p><strong>Objects Detected:</strong> {}</p>\n",
            escape_html(&self.emotion),
            escape_html(&self.scene),
            escape_html(&self.objects),
        )
    }
}

/// One song with its absolute 1-based position in the playlist
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SongCard {
    pub ordinal: usize,
    pub title: String,
    pub artist: String,
    pub link: String,
}

impl SongCard {
    pub fn to_html(&self) -> String {
        format!(
            "<div class=\"song-card\">\n  \
             <div class=\"song-number\">{}</div>\n  \
             <div class=\"song-title\">{}</div>\n  \
             <div class=\"song-artist\">{}</div>\n  \
             <a href=\"{}\" target=\"_blank\" rel=\"noopener noreferrer\" class=\"song-link\">{}</a>\n\
             </div>\n",
            self.ordinal,
            escape_html(&self.title),
            escape_html(&self.artist),
            escape_html(&self.link),
            PLAY_LINK_LABEL,
        )
    }
}

/// Rendered analysis block and song cards for one page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayContent {
    pub summary: AnalysisSummary,
    pub cards: Vec<SongCard>,
}

impl DisplayContent {
    pub fn analysis_html(&self) -> String {
        self.summary.to_html()
    }

    pub fn songs_html(&self) -> String {
        self.cards.iter().map(SongCard::to_html).collect()
    }

    pub fn to_text(&self) -> String {
        let mut out = format!(
            "Face Emotion:     {}\nScene Detected:   {}\nObjects Detected: {}\n",
            self.summary.emotion, self.summary.scene, self.summary.objects
        );
        if !self.cards.is_empty() {
            out.push('\n');
        }
        for card in &self.cards {
            out.push_str(&format!(
                "{:>3}. {} - {}\n     {}\n",
                card.ordinal, card.title, card.artist, card.link
            ));
        }
        out
    }
}

/// Render the analysis and one page of songs
///
/// `first_ordinal` is the absolute 1-based position of `page_songs[0]`.
pub fn render(analysis: &AnalysisResult, page_songs: &[Song], first_ordinal: usize) -> DisplayContent {
    let cards = page_songs
        .iter()
        .enumerate()
        .map(|(i, song)| SongCard {
            ordinal: first_ordinal + i,
            title: song.title.clone(),
            artist: song.artist.clone(),
            link: song.link.clone(),
        })
        .collect();

    DisplayContent {
        summary: AnalysisSummary::from_analysis(analysis),
        cards,
    }
}
