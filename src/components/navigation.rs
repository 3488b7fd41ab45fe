use crate::components::Icon;
use dioxus::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Home,
    Songs,
    Albums,
    Artists,
    Search,
}

impl Tab {
    pub const ALL: [Tab; 5] = [
        Tab::Home,
        Tab::Songs,
        Tab::Albums,
        Tab::Artists,
        Tab::Search,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Tab::Home => "Home",
            Tab::Songs => "Songs",
            Tab::Albums => "Albums",
            Tab::Artists => "Artists",
            Tab::Search => "Search",
        }
    }

    fn icon(self) -> &'static str {
        match self {
            Tab::Home => "home",
            Tab::Songs => "music",
            Tab::Albums => "album",
            Tab::Artists => "artist",
            Tab::Search => "search",
        }
    }
}

/// Chip row at the top of the library.
#[component]
pub fn TabBar() -> Element {
    let mut current = use_context::<Signal<Tab>>();

    rsx! {
        div { class: "tab-bar",
            for tab in Tab::ALL {
                button {
                    class: if current() == tab { "tab-chip active" } else { "tab-chip" },
                    onclick: move |_| current.set(tab),
                    "{tab.label()}"
                }
            }
        }
    }
}

/// Bottom navigation for small screens.
#[component]
pub fn BottomNav() -> Element {
    let mut current = use_context::<Signal<Tab>>();

    rsx! {
        nav { class: "bottom-nav",
            for tab in [Tab::Home, Tab::Search, Tab::Albums] {
                button {
                    class: if current() == tab { "nav-item active" } else { "nav-item" },
                    onclick: move |_| current.set(tab),
                    Icon { name: tab.icon().to_string(), class: "w-5 h-5".to_string() }
                    span { "{tab.label()}" }
                }
            }
        }
    }
}
