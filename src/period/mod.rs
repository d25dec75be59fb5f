//! The period engine: pure functions for filtering, aggregating, and
//! navigating sales by day, week, month, or year.

pub mod aggregate;
pub mod calendar;
pub mod filter;
pub mod format;
pub mod navigate;

use std::fmt::Display;

/// How sales should be grouped and displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    /// Show sales for a single day.
    #[default]
    Daily,
    /// Show sales for a Sunday to Saturday week.
    Weekly,
    /// Show sales for a calendar month.
    Monthly,
    /// Show sales for a calendar year.
    Yearly,
}

impl ViewMode {
    /// All the view modes, in the order they appear in the view selector.
    pub const ALL: [ViewMode; 4] = [
        ViewMode::Daily,
        ViewMode::Weekly,
        ViewMode::Monthly,
        ViewMode::Yearly,
    ];

    /// The name of the view mode as used in URL query strings.
    pub fn as_query_str(&self) -> &'static str {
        match self {
            ViewMode::Daily => "daily",
            ViewMode::Weekly => "weekly",
            ViewMode::Monthly => "monthly",
            ViewMode::Yearly => "yearly",
        }
    }

    /// The name of the view mode shown on view selector buttons.
    pub fn button_label(&self) -> &'static str {
        match self {
            ViewMode::Daily => "Day",
            ViewMode::Weekly => "Week",
            ViewMode::Monthly => "Month",
            ViewMode::Yearly => "Year",
        }
    }
}

impl Display for ViewMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_query_str())
    }
}
