//! Shared HTML building blocks: the document head, style constants and error pages.

use maud::{DOCTYPE, Markup, html};

// Text styles
pub const HEADING_STYLE: &str = "text-2xl font-semibold text-white";

// Link styles
pub const LINK_STYLE: &str = "text-emerald-400 hover:text-emerald-300 underline";

// Button styles
pub const BUTTON_PRIMARY_STYLE: &str = "w-full px-4 py-2 bg-emerald-600 \
    disabled:bg-emerald-800 hover:enabled:bg-emerald-700 text-white rounded";

pub const BUTTON_DELETE_STYLE: &str = "text-red-500 hover:text-red-700 \
    transition-colors bg-transparent border-none cursor-pointer";

// Form styles
pub const FORM_CONTAINER_STYLE: &str = "flex flex-col items-center px-6 py-8 \
    mx-auto max-w-md text-white";
pub const FORM_LABEL_STYLE: &str = "block mb-2 text-sm font-medium text-white";
pub const FORM_TEXT_INPUT_STYLE: &str = "block w-full p-2.5 rounded-md text-sm \
    text-white bg-black/60 border border-gray-300 placeholder-gray-400 \
    focus:outline-none focus:ring-2 focus:ring-emerald-400 focus:border-transparent";
pub const SELECT_STYLE: &str = "px-3 py-1 rounded-md border bg-black/60 \
    text-white border-gray-300 focus:outline-none focus:ring-2 \
    focus:ring-emerald-400 focus:border-transparent";

// Table styles
pub const TABLE_HEADER_CELL_STYLE: &str = "px-6 py-3 text-left font-bold text-sm \
    border text-white uppercase tracking-wider";
pub const TABLE_ROW_STYLE: &str = "hover:bg-gray-900 transition-colors";
pub const TABLE_CELL_STYLE: &str = "px-6 py-4 whitespace-nowrap text-sm \
    font-medium text-white border";

// Page container
pub const PAGE_CONTAINER_STYLE: &str = "max-w-7xl mx-auto px-4 sm:px-6 lg:px-8 py-8";

/// The `<html>` document with the shared `<head>` and `body` wrapping `content`.
pub fn document(title: &str, content: &Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en"
        {
            head
            {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) " - ExpenseTracker" }

                script src="https://cdn.jsdelivr.net/npm/@tailwindcss/browser@4" {}
                script src="https://unpkg.com/htmx.org@2.0.8/dist/htmx.min.js" {}
                script src="https://unpkg.com/htmx-ext-response-targets@2.0.4/response-targets.js" {}
                script src="/static/app.js" defer {}
            }

            body
                hx-ext="response-targets"
                class="min-h-screen bg-black/80"
            {
                (content)
            }
        }
    }
}

/// A full page describing an error, with a link back to the expense list.
pub fn error_view(title: &str, header: &str, description: &str, fix: &str) -> Markup {
    // Template adapted from https://flowbite.com/blocks/marketing/404/
    let content = html!(
        section class="min-h-screen"
        {
            div class="py-8 px-4 mx-auto max-w-screen-xl lg:py-16 lg:px-6"
            {
                div class="mx-auto max-w-screen-sm text-center"
                {
                    h1
                        class="mb-4 text-7xl tracking-tight font-extrabold
                            lg:text-9xl text-emerald-500"
                    {
                        (header)
                    }

                    p class="mb-4 text-3xl md:text-4xl tracking-tight font-bold text-white"
                    {
                        (description)
                    }

                    p class="mb-4 text-1xl md:text-2xl tracking-tight text-white"
                    {
                        (fix)
                    }

                    a
                        href="/"
                        class="inline-flex text-white bg-emerald-600
                            hover:bg-emerald-800 focus:ring-4 focus:outline-hidden
                            focus:ring-emerald-300 font-medium rounded text-sm px-5
                            py-2.5 text-center my-4"
                    {
                        "Back to Expenses"
                    }
                }
            }
        }
    );

    document(title, &content)
}
