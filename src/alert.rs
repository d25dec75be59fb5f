//! Alerts shown in the corner of the page via HTMX out-of-band swaps.

use maud::{Markup, html};

/// A message displayed in the alert container at the top right of the page.
pub struct Alert<'a> {
    title: &'a str,
    description: &'a str,
    style: &'static str,
}

impl<'a> Alert<'a> {
    /// Create an alert for an error with a `title` summarising the error and a
    /// `description` telling the user what to do about it.
    pub fn error(title: &'a str, description: &'a str) -> Self {
        Self {
            title,
            description,
            style: "bg-red-100 border border-red-400 text-red-700",
        }
    }

    /// Render the alert as HTML targeting the alert container.
    pub fn into_html(self) -> Markup {
        html! {
            div id="alert-container" hx-swap-oob="afterbegin" {
                div class=(format!("{} rounded-sm px-4 py-3 shadow-md max-w-sm", self.style)) role="alert" {
                    p class="font-bold" { (self.title) }
                    p { (self.description) }
                }
            }
        }
    }
}
