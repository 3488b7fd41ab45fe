use dioxus::prelude::*;

/// Path data for each icon and whether it is drawn filled.
fn glyph(name: &str) -> (Vec<&'static str>, bool) {
    match name {
        "home" => (
            vec!["M3 9l9-7 9 7v11a2 2 0 0 1-2 2H5a2 2 0 0 1-2-2z", "M9 22V12h6v10"],
            false,
        ),
        "search" => (
            vec!["M11 3a8 8 0 1 0 0 16 8 8 0 0 0 0-16z", "M21 21l-4.35-4.35"],
            false,
        ),
        "album" => (
            vec![
                "M5 3h14a2 2 0 0 1 2 2v14a2 2 0 0 1-2 2H5a2 2 0 0 1-2-2V5a2 2 0 0 1 2-2z",
                "M12 7a5 5 0 1 0 0 10 5 5 0 0 0 0-10z",
            ],
            false,
        ),
        "artist" => (
            vec![
                "M20 21v-2a4 4 0 0 0-4-4H8a4 4 0 0 0-4 4v2",
                "M12 3a4 4 0 1 0 0 8 4 4 0 0 0 0-8z",
            ],
            false,
        ),
        "music" => (
            vec![
                "M9 18V5l12-2v13",
                "M6 15a3 3 0 1 0 0 6 3 3 0 0 0 0-6z",
                "M18 13a3 3 0 1 0 0 6 3 3 0 0 0 0-6z",
            ],
            false,
        ),
        "heart" | "heart-filled" => (
            vec!["M20.84 4.61a5.5 5.5 0 0 0-7.78 0L12 5.67l-1.06-1.06a5.5 5.5 0 0 0-7.78 7.78l1.06 1.06L12 21.23l7.78-7.78 1.06-1.06a5.5 5.5 0 0 0 0-7.78z"],
            name == "heart-filled",
        ),
        "settings" => (
            vec![
                "M12 9a3 3 0 1 0 0 6 3 3 0 0 0 0-6z",
                "M19.4 15a1.65 1.65 0 0 0 .33 1.82l.06.06a2 2 0 1 1-2.83 2.83l-.06-.06a1.65 1.65 0 0 0-2.82 1.18V21a2 2 0 0 1-4 0v-.09A1.65 1.65 0 0 0 7.18 19.7l-.06.06a2 2 0 1 1-2.83-2.83l.06-.06A1.65 1.65 0 0 0 3.17 14H3a2 2 0 0 1 0-4h.09A1.65 1.65 0 0 0 4.3 7.18l-.06-.06a2 2 0 1 1 2.83-2.83l.06.06A1.65 1.65 0 0 0 10 3.17V3a2 2 0 0 1 4 0v.09a1.65 1.65 0 0 0 2.82 1.18l.06-.06a2 2 0 1 1 2.83 2.83l-.06.06A1.65 1.65 0 0 0 20.83 10H21a2 2 0 0 1 0 4h-.09a1.65 1.65 0 0 0-1.51 1z",
            ],
            false,
        ),
        "shuffle" => (
            vec![
                "M16 3h5v5",
                "M4 20L21 3",
                "M21 16v5h-5",
                "M15 15l6 6",
                "M4 4l5 5",
            ],
            false,
        ),
        "repeat" => (
            vec![
                "M17 1l4 4-4 4",
                "M3 11V9a4 4 0 0 1 4-4h14",
                "M7 23l-4-4 4-4",
                "M21 13v2a4 4 0 0 1-4 4H3",
            ],
            false,
        ),
        "repeat-one" => (
            vec![
                "M17 1l4 4-4 4",
                "M3 11V9a4 4 0 0 1 4-4h14",
                "M7 23l-4-4 4-4",
                "M21 13v2a4 4 0 0 1-4 4H3",
                "M11 10h1v5",
            ],
            false,
        ),
        "play" => (vec!["M5 3l14 9-14 9V3z"], true),
        "pause" => (vec!["M6 4h4v16H6z", "M14 4h4v16h-4z"], true),
        "prev" => (vec!["M19 20L9 12l10-8v16z", "M5 19V5h1.5v14z"], true),
        "next" => (vec!["M5 4l10 8-10 8V4z", "M17.5 5H19v14h-1.5z"], true),
        "volume" => (
            vec![
                "M11 5L6 9H2v6h4l5 4V5z",
                "M15.54 8.46a5 5 0 0 1 0 7.07",
                "M19.07 4.93a10 10 0 0 1 0 14.14",
            ],
            false,
        ),
        "queue" => (
            vec!["M8 6h13", "M8 12h13", "M8 18h13", "M3 6h.01", "M3 12h.01", "M3 18h.01"],
            false,
        ),
        "chevron-down" => (vec!["M6 9l6 6 6-6"], false),
        "chevron-right" => (vec!["M9 18l6-6-6-6"], false),
        "x" => (vec!["M18 6L6 18", "M6 6l12 12"], false),
        "refresh" => (
            vec![
                "M23 4v6h-6",
                "M1 20v-6h6",
                "M3.51 9a9 9 0 0 1 14.85-3.36L23 10",
                "M1 14l4.64 4.36A9 9 0 0 0 20.49 15",
            ],
            false,
        ),
        "trash" => (
            vec!["M3 6h18", "M19 6l-1 14a2 2 0 0 1-2 2H8a2 2 0 0 1-2-2L5 6", "M10 11v6", "M14 11v6"],
            false,
        ),
        "logout" => (
            vec!["M9 21H5a2 2 0 0 1-2-2V5a2 2 0 0 1 2-2h4", "M16 17l5-5-5-5", "M21 12H9"],
            false,
        ),
        _ => (vec!["M12 3a9 9 0 1 0 0 18 9 9 0 0 0 0-18z"], false),
    }
}

#[component]
pub fn Icon(name: String, class: String) -> Element {
    let (paths, filled) = glyph(&name);
    let fill = if filled { "currentColor" } else { "none" };

    rsx! {
        svg {
            class: "{class}",
            view_box: "0 0 24 24",
            fill: "{fill}",
            stroke: "currentColor",
            stroke_width: if filled { "0" } else { "2" },
            stroke_linecap: "round",
            stroke_linejoin: "round",
            for d in paths.iter() {
                path { d: "{d}" }
            }
        }
    }
}
