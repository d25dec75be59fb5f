//! The navigation bar shown on pages accessible to a logged-in user.

use maud::{Markup, html};

use crate::endpoints;

struct Link<'a> {
    url: &'a str,
    title: &'a str,
    is_current: bool,
}

impl Link<'_> {
    fn into_desktop_html(self) -> Markup {
        let style = if self.is_current {
            "font-bold text-blue-600"
        } else {
            "text-gray-700 hover:text-blue-600"
        };

        html! {
            a href=(self.url) class=(style) aria-current=[self.is_current.then_some("page")] {
                (self.title)
            }
        }
    }

    fn into_mobile_html(self) -> Markup {
        let style = if self.is_current {
            "flex-1 py-3 text-center font-bold text-blue-600"
        } else {
            "flex-1 py-3 text-center text-gray-700"
        };

        html! {
            a href=(self.url) class=(style) aria-current=[self.is_current.then_some("page")] {
                (self.title)
            }
        }
    }
}

/// The navigation bar listing the application's pages, highlighting the page
/// the user is currently on.
pub struct NavBar<'a> {
    links: Vec<Link<'a>>,
}

impl NavBar<'_> {
    /// Create a navigation bar where the link to `active_endpoint` is
    /// highlighted as the current page.
    pub fn new(active_endpoint: &str) -> Self {
        let links = vec![
            Link {
                url: endpoints::OVERVIEW_VIEW,
                title: "Overview",
                is_current: active_endpoint == endpoints::OVERVIEW_VIEW,
            },
            Link {
                url: endpoints::SALES_VIEW,
                title: "Sales",
                is_current: active_endpoint == endpoints::SALES_VIEW,
            },
            Link {
                url: endpoints::LOG_OUT,
                title: "Log out",
                is_current: false,
            },
        ];

        Self { links }
    }

    /// Render the navigation bar as HTML.
    ///
    /// Renders a horizontal bar at the top of the page on desktop and a fixed
    /// bar at the bottom of the screen on mobile.
    pub fn into_html(self) -> Markup {
        html! {
            nav class="hidden md:flex gap-6 bg-white shadow-sm px-6 py-4" {
                @for link in &self.links {
                    (Link { url: link.url, title: link.title, is_current: link.is_current }.into_desktop_html())
                }
            }
            nav class="flex md:hidden fixed bottom-0 inset-x-0 bg-white border-t border-gray-200 z-40" {
                @for link in &self.links {
                    (Link { url: link.url, title: link.title, is_current: link.is_current }.into_mobile_html())
                }
            }
        }
    }
}
