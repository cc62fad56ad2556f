use theme::{Theme, ThemeToggle};
use yew::prelude::*;

mod game;
mod logging;
mod theme;

#[function_component(App)]
fn app() -> Html {
    let theme = use_state(Theme::default);
    {
        let theme = *theme;
        use_effect_with_deps(
            move |current| {
                theme::apply(*current);
                || ()
            },
            theme,
        );
    }
    let ontoggle = {
        let theme = theme.clone();
        Callback::from(move |_: ()| theme.set((*theme).toggled()))
    };
    html! {
        <main class={classes!("app")}>
            <ThemeToggle theme={*theme} {ontoggle} />
            <game::Game />
        </main>
    }
}

fn main() {
    logging::init();
    tracing::info!("starting tic-tac-toe");
    yew::Renderer::<App>::new().render();
}
