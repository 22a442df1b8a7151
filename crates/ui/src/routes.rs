use dioxus::prelude::*;
use dioxus_router::{Outlet, Routable};

use crate::views::{QuizView, ResultsView};

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Layout)]
        #[route("/", QuizView)] Quiz {},
        #[route("/results", ResultsView)] Results {},
}

#[component]
fn Layout() -> Element {
    rsx! {
        main { class: "content",
            Outlet::<Route> {}
        }
    }
}
