use dioxus::prelude::*;

/// Drives the hidden `<audio>` element from the player state. Renders nothing.
/// Native builds have no audio backend; the player state still works.
#[component]
pub fn AudioController() -> Element {
    #[cfg(target_arch = "wasm32")]
    web::use_audio_element();

    rsx! {}
}

#[cfg(target_arch = "wasm32")]
mod web {
    use crate::components::{
        ClientSignal, OnlineSignal, Playback, PlayerSignal, SeekRequestSignal, Toaster,
    };
    use crate::offline::shared_outbox;
    use dioxus::core::{Runtime, RuntimeGuard};
    use dioxus::prelude::*;
    use wasm_bindgen::closure::Closure;
    use wasm_bindgen::JsCast;
    use web_sys::{window, HtmlAudioElement};

    const AUDIO_ELEMENT_ID: &str = "cauzify-audio";

    pub fn audio_element() -> Option<HtmlAudioElement> {
        let document = window()?.document()?;

        if let Some(existing) = document.get_element_by_id(AUDIO_ELEMENT_ID) {
            return existing.dyn_into::<HtmlAudioElement>().ok();
        }

        let audio: HtmlAudioElement = document.create_element("audio").ok()?.dyn_into().ok()?;
        audio.set_id(AUDIO_ELEMENT_ID);
        audio.set_attribute("preload", "metadata").ok()?;
        document.body()?.append_child(&audio).ok()?;
        Some(audio)
    }

    fn try_play(audio: &HtmlAudioElement, toaster: Toaster) {
        if let Ok(promise) = audio.play() {
            spawn(async move {
                if let Err(err) = wasm_bindgen_futures::JsFuture::from(promise).await {
                    tracing::warn!("play() rejected: {err:?}");
                    toaster.show("⚠ Playback failed");
                }
            });
        }
    }

    /// Must run inside a component scope so the callback can re-enter it.
    fn listen<F>(target: &web_sys::EventTarget, event: &str, mut f: F)
    where
        F: FnMut() + 'static,
    {
        let runtime = Runtime::current();
        let callback = Closure::wrap(Box::new(move || {
            let _guard = RuntimeGuard::new(runtime.clone());
            f();
        }) as Box<dyn FnMut()>);
        let _ = target.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref());
        callback.forget();
    }

    pub fn use_audio_element() {
        let playback = Playback::from_context();
        let mut player = use_context::<PlayerSignal>().0;
        let mut seek = use_context::<SeekRequestSignal>().0;
        let client = use_context::<ClientSignal>().0;
        let mut online = use_context::<OnlineSignal>().0;
        let toaster = use_context::<Toaster>();
        let mut loaded = use_signal(|| 0u64);

        // One-time listener setup.
        {
            let playback = playback.clone();
            let toaster = toaster.clone();
            use_hook(move || {
                let Some(audio) = audio_element() else {
                    return;
                };
                {
                    let playback = playback.clone();
                    listen(&audio, "ended", move || playback.track_ended());
                }
                {
                    let playback = playback.clone();
                    listen(&audio, "error", move || {
                        if player.peek().current_song().is_some() {
                            playback.playback_failed();
                        }
                    });
                }
                {
                    let audio_el = audio.clone();
                    listen(&audio, "timeupdate", move || {
                        player
                            .write()
                            .update_progress(audio_el.current_time(), audio_el.duration());
                    });
                }
                // Keep the state in sync with browser media keys.
                listen(&audio, "play", move || {
                    if !player.peek().playing {
                        player.write().playing = true;
                    }
                });
                {
                    let audio_el = audio.clone();
                    listen(&audio, "pause", move || {
                        if player.peek().playing && !audio_el.ended() {
                            player.write().playing = false;
                        }
                    });
                }

                let Some(win) = window() else {
                    return;
                };
                online.set(win.navigator().on_line());
                {
                    let toaster = toaster.clone();
                    listen(&win, "online", move || {
                        online.set(true);
                        toaster.show("✓ Back online");
                        let Some(client) = client.peek().clone() else {
                            return;
                        };
                        spawn(async move {
                            let delivered = shared_outbox().sync(&client).await;
                            tracing::info!(delivered, "pending scrobbles synced");
                        });
                    });
                }
                listen(&win, "offline", move || {
                    online.set(false);
                    toaster.show("⚠ You're offline");
                });
            });
        }

        // Load a new source whenever the current song changes.
        {
            let toaster = toaster.clone();
            use_effect(move || {
                let state = player();
                let Some(audio) = audio_element() else {
                    return;
                };
                if *loaded.peek() == state.loads && state.current_song().is_some() {
                    return;
                }
                loaded.set(state.loads);
                let song_id = state.current_song().map(|song| song.id.clone());
                let current_client = client.peek().clone();

                match (song_id, current_client) {
                    (Some(id), Some(client)) => {
                        audio.set_src(&client.stream_url(&id));
                        audio.set_volume(state.volume);
                        if state.playing {
                            try_play(&audio, toaster.clone());
                        }
                    }
                    _ => {
                        let _ = audio.pause();
                        audio.remove_attribute("src").ok();
                    }
                }
            });
        }

        // Play/pause and volume.
        use_effect(move || {
            let state = player();
            let Some(audio) = audio_element() else {
                return;
            };
            if (audio.volume() - state.volume).abs() > f64::EPSILON {
                audio.set_volume(state.volume);
            }
            if state.current_song().is_none() {
                return;
            }
            if state.playing && audio.paused() {
                try_play(&audio, toaster.clone());
            } else if !state.playing && !audio.paused() {
                let _ = audio.pause();
            }
        });

        use_effect(move || {
            let Some(position) = seek() else {
                return;
            };
            if let Some(audio) = audio_element() {
                audio.set_current_time(position);
                if player.peek().playing && audio.paused() {
                    let _ = audio.play();
                }
            }
            seek.set(None);
        });
    }
}
