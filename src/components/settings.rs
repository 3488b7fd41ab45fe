use crate::components::views::LibraryData;
use crate::components::{
    ClientSignal, FullPlayerSignal, Icon, PlayerSignal, QueueOpenSignal, SettingsOpenSignal, Tab,
    Toaster,
};
use crate::db::{save_settings, AppSettings};
use crate::offline::{self, shared_outbox, ControlMessage, MessageOutcome};
use crate::session;
use crate::utils::pluralize;
use dioxus::prelude::*;
use tracing::{info, warn};

/// Bottom sheet with cache status, library refresh and disconnect.
#[component]
pub fn SettingsSheet() -> Element {
    let mut open = use_context::<SettingsOpenSignal>().0;
    let mut client = use_context::<ClientSignal>().0;
    let mut player = use_context::<PlayerSignal>().0;
    let mut full_player = use_context::<FullPlayerSignal>().0;
    let mut queue_open = use_context::<QueueOpenSignal>().0;
    let mut settings = use_context::<Signal<AppSettings>>();
    let mut tab = use_context::<Signal<Tab>>();
    let library = use_context::<LibraryData>();
    let toaster = use_context::<Toaster>();
    // Bumped to re-read the cache counters after a clear.
    let mut cache_version = use_signal(|| 0u32);

    if !open() {
        return rsx! {};
    }

    let _ = cache_version();
    let cache = offline::shared();
    let cached = format!("{} cached", pluralize(cache.item_count(), "item"));
    let pending = shared_outbox().len();
    let waiting = format!("{} waiting to sync", pluralize(pending, "scrobble"));
    let cache_enabled = settings().cache_enabled;
    let server = client()
        .map(|client| format!("{} · {}", client.server.username, client.server.host()))
        .unwrap_or_default();

    let on_clear_cache = {
        let toaster = toaster.clone();
        move |_: MouseEvent| {
            if let MessageOutcome::Cleared(count) =
                offline::shared().handle_message(ControlMessage::ClearCache)
            {
                info!(partitions = count, "offline cache cleared");
            }
            cache_version += 1;
            toaster.show("✓ Cache cleared");
        }
    };

    let on_toggle_cache = move |_: MouseEvent| {
        let enabled = !settings.peek().cache_enabled;
        settings.write().cache_enabled = enabled;
        offline::shared().set_enabled(enabled);
        let saved = save_settings(&settings.peek());
        if let Err(err) = saved {
            warn!("settings not saved: {err}");
        }
    };

    let on_refresh = {
        let toaster = toaster.clone();
        move |_: MouseEvent| {
            library.invalidate();
            tab.set(Tab::Home);
            open.set(false);
            toaster.show("🔄 Refreshing library…");
        }
    };

    let on_disconnect = move |_: MouseEvent| {
        session::disconnect();
        player.write().stop();
        full_player.set(false);
        queue_open.set(false);
        library.clear();
        tab.set(Tab::Home);
        client.set(None);
        open.set(false);
        toaster.show("🔓 Disconnected");
    };

    rsx! {
        div { class: "sheet-backdrop", onclick: move |_| open.set(false) }
        aside { class: "settings-sheet open",
            header { class: "sheet-header",
                h3 { "Settings" }
                button {
                    class: "ctrl-btn",
                    aria_label: "Close settings",
                    onclick: move |_| open.set(false),
                    Icon { name: "x".to_string(), class: "w-5 h-5".to_string() }
                }
            }
            div { class: "settings-body",
                div { class: "settings-row",
                    div {
                        div { class: "settings-label", "Server" }
                        div { class: "song-meta", "{server}" }
                    }
                }
                div { class: "settings-row",
                    div {
                        div { class: "settings-label", "Offline cache" }
                        div { class: "song-meta", "{cached}" }
                        if pending > 0 {
                            div { class: "song-meta", "{waiting}" }
                        }
                    }
                    button {
                        class: if cache_enabled { "toggle on" } else { "toggle" },
                        aria_label: "Toggle offline cache",
                        onclick: on_toggle_cache,
                        span { class: "toggle-knob" }
                    }
                }
                button { class: "settings-btn", onclick: on_clear_cache,
                    Icon { name: "trash".to_string(), class: "w-4 h-4".to_string() }
                    "Clear cache"
                }
                button { class: "settings-btn", onclick: on_refresh,
                    Icon { name: "refresh".to_string(), class: "w-4 h-4".to_string() }
                    "Refresh library"
                }
                button { class: "settings-btn danger", onclick: on_disconnect,
                    Icon { name: "logout".to_string(), class: "w-4 h-4".to_string() }
                    "Disconnect"
                }
            }
        }
    }
}
