use cauzify::components::{AppShell, APP_CSS, MANIFEST};
use dioxus::prelude::*;

fn main() {
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    rsx! {
        // Web app manifest
        document::Link { rel: "manifest", href: MANIFEST }

        // Theme color for mobile browsers
        document::Meta { name: "theme-color", content: "#0a0a0a" }
        document::Meta { name: "mobile-web-app-capable", content: "yes" }
        document::Meta { name: "apple-mobile-web-app-status-bar-style", content: "black-translucent" }
        document::Meta { name: "apple-mobile-web-app-title", content: "Cauzify" }
        document::Meta {
            name: "viewport",
            content: "width=device-width, initial-scale=1, viewport-fit=cover",
        }

        document::Stylesheet { href: APP_CSS }

        AppShell {}
    }
}
