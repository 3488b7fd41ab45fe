use crate::components::{ClientSignal, Toaster};
use crate::session::{self, login_error_message};
use dioxus::prelude::*;

#[component]
pub fn LoginScreen() -> Element {
    let mut client = use_context::<ClientSignal>().0;
    let toaster = use_context::<Toaster>();
    let mut server = use_signal(String::new);
    let mut username = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut error = use_signal(|| None::<String>);
    let mut connecting = use_signal(|| false);

    let submit = move || {
        if connecting() {
            return;
        }
        connecting.set(true);
        error.set(None);
        let toaster = toaster.clone();
        let (server, username, password) = (server(), username(), password());
        spawn(async move {
            match session::login(&server, &username, &password).await {
                Ok(connected) => {
                    client.set(Some(connected));
                    toaster.show("✓ Connected to Navidrome");
                }
                Err(err) => error.set(Some(login_error_message(&err))),
            }
            connecting.set(false);
        });
    };

    let on_enter = {
        let mut submit = submit.clone();
        move |evt: KeyboardEvent| {
            if evt.key() == Key::Enter {
                submit();
            }
        }
    };

    rsx! {
        div { class: "login-screen",
            div { class: "login-card",
                div { class: "logo login-logo", "Cauzify" }
                p { class: "login-sub", "Connect to your Navidrome server" }
                input {
                    class: "login-input",
                    r#type: "url",
                    placeholder: "https://music.example.com",
                    value: "{server}",
                    oninput: move |evt| server.set(evt.value()),
                    onkeydown: on_enter.clone(),
                }
                input {
                    class: "login-input",
                    r#type: "text",
                    placeholder: "Username",
                    autocomplete: "username",
                    value: "{username}",
                    oninput: move |evt| username.set(evt.value()),
                    onkeydown: on_enter.clone(),
                }
                input {
                    class: "login-input",
                    r#type: "password",
                    placeholder: "Password",
                    autocomplete: "current-password",
                    value: "{password}",
                    oninput: move |evt| password.set(evt.value()),
                    onkeydown: on_enter,
                }
                if let Some(message) = error() {
                    div { class: "login-error", "{message}" }
                }
                button {
                    class: "login-btn",
                    disabled: connecting(),
                    onclick: {
                        let mut submit = submit.clone();
                        move |_| submit()
                    },
                    if connecting() { "Connecting…" } else { "Connect" }
                }
            }
        }
    }
}
