//! The page shell shared by every page: header, content slot, footer and the
//! notification surface.

use maud::{Markup, html};

use crate::{
    endpoints,
    html::{PAGE_CONTAINER_STYLE, document},
    toast::Notifier,
};

/// The app name shown in the header, footer and page titles.
pub const APP_NAME: &str = "ExpenseTracker";

/// The tagline shown next to the app name in the header.
pub const TAGLINE: &str = "Track your expenses with ease";

/// Wrap `content` in the dashboard layout.
///
/// `copyright_year` is shown in the footer and should be the current year in
/// the server's local timezone. The notification surface is rendered empty so
/// that toasts from later htmx responses have somewhere to go.
pub fn dashboard_layout(
    title: &str,
    copyright_year: i32,
    notifier: &Notifier,
    content: &Markup,
) -> Markup {
    let page = html! {
        (notifier.surface(&[]))

        header class="bg-black/60 shadow-sm"
        {
            div class="max-w-7xl mx-auto px-4 sm:px-6 lg:px-8 py-4"
            {
                div class="flex justify-center md:justify-between items-center"
                {
                    h1 class="text-3xl font-bold text-white"
                    {
                        a href=(endpoints::EXPENSES_VIEW) { (APP_NAME) }
                    }

                    p class="hidden md:block text-white" { (TAGLINE) }
                }
            }
        }

        main class=(PAGE_CONTAINER_STYLE)
        {
            (content)
        }

        footer class="bg-black/60 shadow-[0_-4px_6px_-1px_rgba(0,0,0,0.1)]"
        {
            div class="max-w-7xl mx-auto px-4 sm:px-6 lg:px-8 py-4"
            {
                p class="text-center text-white text-sm"
                {
                    (APP_NAME) " © " (copyright_year)
                }
            }
        }
    };

    document(title, &page)
}
