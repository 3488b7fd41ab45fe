use crate::api::models::format_duration;
use crate::components::{Icon, Playback, PlayerSignal};
use crate::db::RepeatMode;
use dioxus::prelude::*;

/// Slider resolution for seek and volume.
const SLIDER_STEPS: f64 = 1000.0;

fn slider_ratio(evt: &FormEvent) -> Option<f64> {
    evt.value()
        .parse::<f64>()
        .ok()
        .map(|value| value / SLIDER_STEPS)
}

#[component]
pub fn TransportControls(#[props(default = false)] large: bool) -> Element {
    let playback = Playback::from_context();
    let player = use_context::<PlayerSignal>().0;
    let state = player();
    let size = if large { "w-8 h-8" } else { "w-5 h-5" };
    let repeat_icon = if state.repeat == RepeatMode::One { "repeat-one" } else { "repeat" };

    rsx! {
        div { class: "controls",
            button {
                class: if state.shuffle { "ctrl-btn on" } else { "ctrl-btn" },
                aria_label: "Shuffle",
                onclick: {
                    let playback = playback.clone();
                    move |_| playback.toggle_shuffle()
                },
                Icon { name: "shuffle".to_string(), class: "w-5 h-5".to_string() }
            }
            button {
                class: "ctrl-btn",
                aria_label: "Previous",
                onclick: {
                    let playback = playback.clone();
                    move |_| playback.previous()
                },
                Icon { name: "prev".to_string(), class: size.to_string() }
            }
            button {
                class: "ctrl-btn play",
                aria_label: if state.playing { "Pause" } else { "Play" },
                onclick: {
                    let playback = playback.clone();
                    move |_| playback.toggle_play()
                },
                Icon {
                    name: if state.playing { "pause".to_string() } else { "play".to_string() },
                    class: size.to_string(),
                }
            }
            button {
                class: "ctrl-btn",
                aria_label: "Next",
                onclick: {
                    let playback = playback.clone();
                    move |_| playback.next()
                },
                Icon { name: "next".to_string(), class: size.to_string() }
            }
            button {
                class: if state.repeat != RepeatMode::Off { "ctrl-btn on" } else { "ctrl-btn" },
                aria_label: "{state.repeat.label()}",
                onclick: move |_| playback.cycle_repeat(),
                Icon { name: repeat_icon.to_string(), class: "w-5 h-5".to_string() }
            }
        }
    }
}

#[component]
pub fn SeekBar() -> Element {
    let playback = Playback::from_context();
    let player = use_context::<PlayerSignal>().0;
    let state = player();
    let value = (state.progress_percent() / 100.0 * SLIDER_STEPS).round();

    rsx! {
        div { class: "seek",
            input {
                class: "seek-bar",
                r#type: "range",
                min: "0",
                max: "{SLIDER_STEPS}",
                value: "{value}",
                oninput: move |evt| {
                    if let Some(ratio) = slider_ratio(&evt) {
                        playback.seek_ratio(ratio);
                    }
                },
            }
            div { class: "seek-times",
                span { "{format_duration(state.progress as u32)}" }
                span { "{format_duration(state.duration as u32)}" }
            }
        }
    }
}

#[component]
pub fn VolumeSlider() -> Element {
    let playback = Playback::from_context();
    let player = use_context::<PlayerSignal>().0;
    let value = (player().volume * SLIDER_STEPS).round();

    rsx! {
        div { class: "volume",
            Icon { name: "volume".to_string(), class: "w-4 h-4".to_string() }
            input {
                class: "volume-bar",
                r#type: "range",
                min: "0",
                max: "{SLIDER_STEPS}",
                value: "{value}",
                oninput: move |evt| {
                    if let Some(ratio) = slider_ratio(&evt) {
                        playback.set_volume(ratio);
                    }
                },
            }
        }
    }
}
