use crate::components::Toaster;
use dioxus::prelude::*;

#[component]
pub fn ToastView() -> Element {
    let toaster = use_context::<Toaster>();
    match toaster.current() {
        Some(toast) => rsx! {
            div { key: "{toast.id}", class: "toast show", role: "status", "{toast.message}" }
        },
        None => rsx! {},
    }
}
