use crate::api::DEFAULT_COVER_SIZE;
use crate::components::ClientSignal;
use dioxus::prelude::*;

/// Cover art fetched through the offline cache, so it still renders without
/// a connection once seen. Falls back to `placeholder` when the item has no
/// artwork or the fetch fails.
#[component]
pub fn CachedImage(
    #[props(!optional)] cover_art: Option<String>,
    alt: String,
    class: String,
    #[props(default = "🎵".to_string())] placeholder: String,
    #[props(default = DEFAULT_COVER_SIZE)] size: u32,
) -> Element {
    let client = use_context::<ClientSignal>().0;

    let src = use_resource(use_reactive!(|(cover_art, size)| async move {
        let id = cover_art?;
        let client = client.peek().clone()?;
        client.cover_art_data_url(&id, size).await
    }));

    match src() {
        Some(Some(src)) => rsx! {
            img {
                src: "{src}",
                alt: "{alt}",
                class: "{class}",
                loading: "lazy",
            }
        },
        _ => rsx! {
            div { class: "{class} art-placeholder", "{placeholder}" }
        },
    }
}
