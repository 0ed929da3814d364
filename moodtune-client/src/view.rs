//! Page view derived from session state
//!
//! Every visibility flag, the busy indicator, and both navigation control
//! pairs are computed from the session. Nothing here is stored.

use crate::pagination::PageControls;
use crate::render::{self, escape_html, DisplayContent};
use crate::session::{WorkflowSession, WorkflowState};

/// Results section contents
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultsView {
    pub content: DisplayContent,
    pub nav_top: PageControls,
    pub nav_bottom: PageControls,
}

/// Everything a display surface needs to draw the page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewModel {
    pub upload_section_visible: bool,
    /// Preview `data:` URL of the staged image
    pub preview: Option<String>,
    pub submit_enabled: bool,
    pub busy: bool,
    pub error: Option<String>,
    pub results: Option<ResultsView>,
}

impl ViewModel {
    pub fn from_session(session: &WorkflowSession) -> Self {
        let state = session.state();

        let results = match (state, session.analysis(), session.playlist()) {
            (WorkflowState::ResultsReady, Some(analysis), Some(playlist)) => {
                let controls = playlist.controls();
                Some(ResultsView {
                    content: render::render(analysis, playlist.slice(), playlist.first_ordinal()),
                    nav_top: controls,
                    nav_bottom: controls,
                })
            }
            _ => None,
        };

        Self {
            upload_section_visible: !matches!(
                state,
                WorkflowState::Uploading | WorkflowState::ResultsReady
            ),
            preview: session.staged().map(|s| s.preview().to_string()),
            submit_enabled: session.can_submit(),
            busy: session.is_busy(),
            error: session.error_message().map(str::to_string),
            results,
        }
    }

    /// HTML fragment for the current view
    pub fn to_html(&self) -> String {
        let mut out = String::new();

        if self.busy {
            out.push_str("<div id=\"loading\">Analyzing image...</div>\n");
        }

        if let Some(error) = &self.error {
            out.push_str(&format!("<div id=\"error\">{}</div>\n", escape_html(error)));
        }

        if self.upload_section_visible {
            out.push_str("<section id=\"uploadSection\">\n");
            if let Some(preview) = &self.preview {
                out.push_str(&format!(
                    "<div id=\"previewContainer\"><img id=\"previewImage\" src=\"{}\" alt=\"Preview\"></div>\n",
                    escape_html(preview)
                ));
            }
            out.push_str(&format!(
                "<button id=\"uploadBtn\"{}>Get Recommendations</button>\n",
                disabled_attr(!self.submit_enabled)
            ));
            out.push_str("</section>\n");
        }

        if let Some(results) = &self.results {
            out.push_str("<section id=\"resultsSection\">\n");
            out.push_str("<div id=\"analysisInfo\">\n");
            out.push_str(&results.content.analysis_html());
            out.push_str("</div>\n");
            out.push_str(&nav_html(&results.nav_top, ""));
            out.push_str("<div id=\"songsContainer\">\n");
            out.push_str(&results.content.songs_html());
            out.push_str("</div>\n");
            out.push_str(&nav_html(&results.nav_bottom, "Bottom"));
            out.push_str("<button id=\"newSearchBtn\">New Search</button>\n");
            out.push_str("</section>\n");
        }

        out
    }

    /// Plain-text form for terminals
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        if let Some(error) = &self.error {
            out.push_str(&format!("Error: {}\n", error));
        }
        if let Some(results) = &self.results {
            out.push_str(&results.content.to_text());
            out.push_str(&format!("\n{}\n", results.nav_bottom.label()));
        }
        out
    }
}

fn disabled_attr(disabled: bool) -> &'static str {
    if disabled {
        " disabled"
    } else {
        ""
    }
}

fn nav_html(controls: &PageControls, suffix: &str) -> String {
    format!(
        "<div class=\"pagination\">\
         <button id=\"prevBtn{suffix}\"{prev}>Previous</button>\
         <span id=\"pageInfo{suffix}\">{label}</span>\
         <button id=\"nextBtn{suffix}\"{next}>Next</button>\
         </div>\n",
        suffix = suffix,
        prev = disabled_attr(!controls.prev_enabled),
        label = controls.label(),
        next = disabled_attr(!controls.next_enabled),
    )
}
