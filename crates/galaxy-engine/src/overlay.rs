//! Display-only overlay text (window title)

use crate::controller::QueryController;
use crate::state::{AppState, LoadingState};

use galaxy_core::StarRecord;

use std::fmt;

pub const APP_TITLE: &str = "Galaxy Explorer";

/// "ID / Dist / Mag" line for a hovered star
pub struct StarDetails<'a>(pub &'a StarRecord);

impl fmt::Display for StarDetails<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let star = self.0;
        write!(f, "ID: {} | Dist: ", star.source_id)?;
        match star.dist {
            Some(d) => write!(f, "{d:.2} ly")?,
            None => f.write_str("n/a")?,
        }
        f.write_str(" | Mag: ")?;
        match star.mag {
            Some(m) => write!(f, "{m:.2}"),
            None => f.write_str("n/a"),
        }
    }
}

/// Loading status; after a failure the previous count is kept
pub fn status_line(state: &AppState) -> String {
    match state.loading() {
        LoadingState::Error => format!(
            "{} (last query failed)",
            LoadingState::Loaded(state.loaded_count())
        ),
        other => other.to_string(),
    }
}

/// Current filter controls, e.g. "Year 2016 | 10-400 ly | Sector All"
pub fn filter_line(controller: &QueryController) -> String {
    format!(
        "Year {} | {}-{} ly | Sector {}",
        controller.year().value(),
        controller.min_dist().value(),
        controller.max_dist().value(),
        controller.sector()
    )
}

pub fn window_title(
    state: &AppState,
    controller: &QueryController,
    hovered: Option<&StarRecord>,
) -> String {
    let mut title = format!(
        "{APP_TITLE} | {} | {}",
        status_line(state),
        filter_line(controller)
    );
    if let Some(star) = hovered {
        title.push_str(" | ");
        title.push_str(&StarDetails(star).to_string());
    }
    title
}
