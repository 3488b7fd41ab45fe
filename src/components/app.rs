use crate::api::SubsonicClient;
use crate::components::views::{
    AlbumsView, ArtistsView, HomeView, LibraryData, SearchView, SongsView,
};
use crate::components::{
    AudioController, BottomNav, ClientSignal, FullPlayer, FullPlayerSignal, Icon, LoginScreen,
    OnlineSignal, PlayerBar, PlayerSignal, QueueOpenSignal, QueueSheet, SeekRequestSignal,
    SettingsOpenSignal, SettingsSheet, Tab, TabBar, ToastView, Toaster,
};
use crate::db::load_settings;
use crate::notify::Toast;
use crate::offline;
use crate::player::PlayerState;
use crate::session;
use crate::utils::sleep_ms;
use dioxus::prelude::*;
use tracing::info;

pub const APP_CSS: Asset = asset!("/assets/styling/app.css");
pub const MANIFEST: Asset = asset!("/assets/manifest.json");

/// Root component: owns every piece of shared state and switches between the
/// login screen and the library.
#[component]
pub fn AppShell() -> Element {
    let settings = use_signal(load_settings);
    let mut client = use_signal(|| None::<SubsonicClient>);
    let player = use_signal(|| PlayerState::from_settings(&settings.peek()));
    let seek_request = use_signal(|| None::<f64>);
    let full_player = use_signal(|| false);
    let queue_open = use_signal(|| false);
    let settings_open = use_signal(|| false);
    let online = use_signal(|| true);
    let tab = use_signal(|| Tab::Home);
    let toast = use_signal(|| None::<Toast>);
    let mut restoring = use_signal(|| true);

    use_context_provider(|| ClientSignal(client));
    use_context_provider(|| PlayerSignal(player));
    use_context_provider(|| SeekRequestSignal(seek_request));
    use_context_provider(|| FullPlayerSignal(full_player));
    use_context_provider(|| QueueOpenSignal(queue_open));
    use_context_provider(|| SettingsOpenSignal(settings_open));
    use_context_provider(|| OnlineSignal(online));
    use_context_provider(|| tab);
    use_context_provider(|| settings);
    use_context_provider(|| Toaster::new(toast));
    let library = use_hook(LibraryData::new);
    use_context_provider(|| library);

    // Startup: offline cache, then auto-login from the stored session.
    use_hook(move || {
        offline::shared().set_enabled(settings.peek().cache_enabled);
        #[cfg(target_arch = "wasm32")]
        install_static_assets();

        // Writes the stores the persist throttle held back.
        spawn(async move {
            loop {
                sleep_ms(offline::PERSIST_INTERVAL_MS).await;
                offline::shared().flush();
            }
        });

        spawn(async move {
            if let Some(restored) = session::restore().await {
                info!(server = %restored.server.host(), "session restored");
                client.set(Some(restored));
            }
            restoring.set(false);
        });
    });

    if restoring() {
        return rsx! {
            div { class: "splash",
                div { class: "logo", "Cauzify" }
                div { class: "spinner" }
            }
        };
    }

    rsx! {
        if client().is_some() {
            LibraryShell {}
        } else {
            LoginScreen {}
        }
        ToastView {}
        AudioController {}
    }
}

/// Copies the app shell into the static partition. The browser still loads
/// the page's own assets itself; this copy is what `CachingTransport` serves
/// for those URLs when something fetches them through a client transport.
#[cfg(target_arch = "wasm32")]
fn install_static_assets() {
    let Some(origin) = web_sys::window().and_then(|win| win.location().origin().ok()) else {
        return;
    };
    let assets = vec![
        "/".to_string(),
        "/index.html".to_string(),
        APP_CSS.to_string(),
        MANIFEST.to_string(),
    ];
    spawn(async move {
        match offline::shared()
            .install_assets(&crate::api::transport::HttpTransport, &origin, &assets)
            .await
        {
            Ok(count) => info!(count, "offline cache installed"),
            Err(err) => tracing::warn!("offline cache install failed: {err}"),
        }
    });
}

#[component]
fn LibraryShell() -> Element {
    let client = use_context::<ClientSignal>().0;
    let online = use_context::<OnlineSignal>().0;
    let mut settings_open = use_context::<SettingsOpenSignal>().0;
    let tab = use_context::<Signal<Tab>>();
    let host = client()
        .map(|client| client.server.host())
        .unwrap_or_default();

    rsx! {
        div { class: "app",
            header { class: "app-header",
                div { class: "logo", "Cauzify" }
                div { class: "header-right",
                    span { class: if online() { "server-badge" } else { "server-badge offline" },
                        span { class: "status-dot" }
                        "{host}"
                    }
                    button {
                        class: "ctrl-btn",
                        aria_label: "Settings",
                        onclick: move |_| settings_open.set(true),
                        Icon { name: "settings".to_string(), class: "w-5 h-5".to_string() }
                    }
                }
            }
            TabBar {}
            main { class: "main-content",
                match tab() {
                    Tab::Home => rsx! { HomeView {} },
                    Tab::Songs => rsx! { SongsView {} },
                    Tab::Albums => rsx! { AlbumsView {} },
                    Tab::Artists => rsx! { ArtistsView {} },
                    Tab::Search => rsx! { SearchView {} },
                }
            }
            PlayerBar {}
            BottomNav {}
        }
        FullPlayer {}
        QueueSheet {}
        SettingsSheet {}
    }
}
