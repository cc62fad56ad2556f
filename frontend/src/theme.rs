use tracing::warn;
use yew::prelude::*;

const THEME_ATTRIBUTE: &str = "data-theme";

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }
}

// Mirrors the theme onto <html data-theme="..."> so the stylesheet can follow it
pub fn apply(theme: Theme) {
    let root = web_sys::window()
        .and_then(|window| window.document())
        .and_then(|document| document.document_element());
    let Some(root) = root else {
        warn!("no document root to apply theme to");
        return;
    };
    if let Err(err) = root.set_attribute(THEME_ATTRIBUTE, theme.as_str()) {
        warn!(?err, "failed to set theme attribute");
    }
}

#[derive(Properties, PartialEq)]
pub struct ThemeToggleProps {
    pub theme: Theme,
    pub ontoggle: Callback<()>,
}

#[function_component(ThemeToggle)]
pub fn theme_toggle(props: &ThemeToggleProps) -> Html {
    let ontoggle = props.ontoggle.clone();
    let onclick = Callback::from(move |_| ontoggle.emit(()));
    let label = match props.theme {
        Theme::Light => "Dark mode",
        Theme::Dark => "Light mode",
    };
    html! {
        <button class={classes!("theme-toggle")} {onclick}>{label}</button>
    }
}
