use crate::api::models::format_duration;
use crate::components::{Icon, Playback, PlayerSignal, QueueOpenSignal};
use crate::utils::pluralize;
use dioxus::prelude::*;

#[component]
pub fn QueueSheet() -> Element {
    let playback = Playback::from_context();
    let player = use_context::<PlayerSignal>().0;
    let mut open = use_context::<QueueOpenSignal>().0;
    if !open() {
        return rsx! {};
    }
    let state = player();
    let current = state.queue.index();
    let summary = format!(
        "{} · {}",
        pluralize(state.queue.len(), "song"),
        format_duration(state.queue.total_duration())
    );

    rsx! {
        div { class: "sheet-backdrop", onclick: move |_| open.set(false) }
        aside { class: "queue-panel open",
            header { class: "sheet-header",
                div {
                    h3 { "Up next" }
                    span { class: "song-meta", "{summary}" }
                }
                button {
                    class: "ctrl-btn",
                    aria_label: "Close queue",
                    onclick: move |_| open.set(false),
                    Icon { name: "x".to_string(), class: "w-5 h-5".to_string() }
                }
            }
            div { class: "queue-body",
                for (idx, song) in state.queue.songs().iter().cloned().enumerate() {
                    div {
                        key: "{idx}-{song.id}",
                        class: if current == Some(idx) { "queue-item current" } else { "queue-item" },
                        onclick: {
                            let playback = playback.clone();
                            move |_| {
                                playback.jump(idx);
                                open.set(false);
                            }
                        },
                        div { class: "queue-num",
                            if current == Some(idx) { "▶" } else { "{idx + 1}" }
                        }
                        div { class: "song-info",
                            div { class: "song-name", "{song.title}" }
                            div { class: "song-meta", "{song.artist_label()}" }
                        }
                        div { class: "song-dur", "{format_duration(song.duration)}" }
                    }
                }
            }
        }
    }
}
