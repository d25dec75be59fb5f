//! Shared building blocks for the application's HTML views.

use std::sync::OnceLock;

use maud::{DOCTYPE, Markup, PreEscaped, html};
use numfmt::{Formatter, Precision};

/// The style for hyperlinks.
pub const LINK_STYLE: &str = "text-blue-600 hover:text-blue-800 hover:underline";

/// The style for the primary button of a form or page.
pub const BUTTON_PRIMARY_STYLE: &str = "w-full rounded-sm bg-blue-500 hover:bg-blue-700 \
    disabled:bg-gray-500 text-white font-bold py-2 px-4";

/// The style for the container of a form.
pub const FORM_CONTAINER_STYLE: &str =
    "flex flex-col gap-4 bg-white p-6 rounded-lg shadow-lg w-full max-w-md";

/// The style for a form's input fields.
pub const FORM_INPUT_STYLE: &str = "rounded-sm border border-gray-300 p-2";

/// The style for the label of a form input.
pub const FORM_LABEL_STYLE: &str = "font-medium text-gray-700";

/// The style for centering a page's content.
pub const PAGE_CONTAINER_STYLE: &str = "flex flex-col items-center gap-4 p-4 pb-24 md:pb-4";

/// The style for tables.
pub const TABLE_STYLE: &str = "w-full max-w-3xl table-auto border-collapse";

/// The style for table header cells.
pub const TABLE_HEADER_STYLE: &str = "border-b border-gray-300 p-2 text-left font-semibold";

/// The style for table body cells.
pub const TABLE_CELL_STYLE: &str = "border-b border-gray-200 p-2";

/// An element to add to the head of an HTML document.
pub enum HeadElement {
    /// A link to a script file.
    ScriptLink(String),
    /// An inline script.
    ScriptSource(PreEscaped<String>),
}

/// Create the base HTML document that all pages use.
///
/// The tab title is set to "`title` - Salestrack" and `content` is rendered
/// inside the document body along with a container for out-of-band alerts.
pub fn base(title: &str, head_elements: &[HeadElement], content: &Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) " - Salestrack" }
                link rel="stylesheet" href="/static/main.css";
                script src="/static/htmx.2.0.4.min.js" {}
                script src="/static/htmx-ext-response-targets.2.0.2.min.js" {}
                style {
                    (PreEscaped("
                    .htmx-indicator{
                        display: none;
                    }
                    .htmx-request .htmx-indicator{
                        display: inline;
                    }
                    .htmx-request.htmx-indicator{
                        display: inline;
                    }
                    "))
                }
                @for head_element in head_elements {
                    @match head_element {
                        HeadElement::ScriptLink(url) => script src=(url) {},
                        HeadElement::ScriptSource(source) => script { (source) },
                    }
                }
            }
            body class="bg-gray-100 min-h-screen" hx-ext="response-targets" {
                div id="alert-container" class="fixed top-4 right-4 z-50 flex flex-col gap-2" {}
                (content)
            }
        }
    }
}

/// Create an error page with a `header` (e.g. "404"), a `description` of what
/// went wrong, and a suggested `fix`.
pub fn error_view(title: &str, header: &str, description: &str, fix: &str) -> Markup {
    base(
        title,
        &[],
        &html! {
            main class="flex flex-col items-center justify-center min-h-screen gap-4 p-4" {
                h1 class="text-6xl font-bold text-gray-800" { (header) }
                h2 class="text-2xl font-semibold text-gray-700" { (title) }
                p class="text-gray-600" { (description) }
                p class="text-gray-600" { (fix) }
                a href="/" class=(LINK_STYLE) { "Return to the home page" }
            }
        },
    )
}

/// Create a page that displays `form` in a centered card with `form_title`,
/// used by the log-in and registration pages.
pub fn log_in_register(form_title: &str, form: Markup) -> Markup {
    base(
        form_title,
        &[],
        &html! {
            main class="flex items-center justify-center min-h-screen p-4" {
                div class=(FORM_CONTAINER_STYLE) {
                    h1 class="text-2xl font-bold text-gray-800" { (form_title) }
                    (form)
                }
            }
        },
    )
}

/// Create a password input with an optional pre-filled `password`, a minimum
/// length, and an error message shown when the input is too short.
pub fn password_input(password: &str, min_length: usize, error_message: &str) -> Markup {
    html! {
        label for="password" class=(FORM_LABEL_STYLE) { "Password" }
        input
            id="password"
            name="password"
            type="password"
            value=(password)
            minlength=(min_length)
            oninvalid=(format!("this.setCustomValidity('{error_message}')"))
            oninput="this.setCustomValidity('')"
            class=(FORM_INPUT_STYLE)
            required;
    }
}

/// Create a loading spinner that HTMX shows while a request is in flight.
pub fn loading_spinner() -> Markup {
    html! {
        span class="htmx-indicator" { "Loading..." }
    }
}

/// Create a hyperlink to `url` with the display text `text`.
pub fn link(url: &str, text: &str) -> Markup {
    html! {
        a href=(url) class=(LINK_STYLE) { (text) }
    }
}

/// Format a dollar amount, e.g. 1234.5 becomes "$1,234.50".
pub fn format_currency(amount: f64) -> String {
    static FORMATTER: OnceLock<Formatter> = OnceLock::new();

    if amount == 0.0 {
        // The formatter renders zero as "$0" which lacks the decimals.
        return "$0.00".to_owned();
    }

    let mut formatter = FORMATTER
        .get_or_init(|| {
            Formatter::currency("$")
                .expect("could not create currency formatter")
                .precision(Precision::Decimals(2))
        })
        .clone();

    let formatted = formatter.fmt2(amount).to_owned();

    // The formatter drops trailing zeros, e.g. "$1.50" becomes "$1.5".
    match formatted.split_once('.') {
        Some((_, decimals)) if decimals.len() == 1 => formatted + "0",
        Some(_) => formatted,
        None => formatted + ".00",
    }
}
