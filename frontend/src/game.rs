use common::{Cell, CellIndex, GameState, Player};
use std::fmt;
use tracing::debug;
use yew::prelude::*;

#[derive(Debug, Clone)]
pub enum Message {
    ClickCell(CellIndex),
    Restart,
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Message::ClickCell(idx) => write!(f, "ClickCell: {}", idx),
            Message::Restart => write!(f, "Restart"),
        }
    }
}

#[derive(Properties, PartialEq)]
pub struct BoardProps {
    pub state: GameState,
    pub onclick: Callback<CellIndex>,
}

#[derive(Properties, PartialEq)]
pub struct CellProps {
    pub idx: CellIndex,
    pub cell: Cell,
    pub view: CellView,
    pub onclick: Callback<CellIndex>,
}

// How a single cell renders: inert once it can no longer take a move,
// highlighted when it belongs to the winning line
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct CellView {
    pub disabled: bool,
    pub winning: bool,
}

fn cell_view(state: &GameState, idx: CellIndex) -> CellView {
    CellView {
        disabled: !state.is_playable(idx),
        winning: state
            .outcome()
            .line()
            .map_or(false, |line| line.contains(&idx)),
    }
}

/// Owns the only `GameState`. Children get snapshots through props and send
/// intents back as messages.
pub struct Game {
    state: GameState,
}

impl Component for Game {
    type Message = Message;
    type Properties = ();

    fn create(_ctx: &Context<Self>) -> Self {
        Self {
            state: GameState::new(),
        }
    }

    fn update(&mut self, _ctx: &Context<Self>, msg: Self::Message) -> bool {
        let intent = msg.to_string();
        let changed = match msg {
            Message::ClickCell(idx) => self.state.apply_move(idx),
            Message::Restart => {
                self.state.reset();
                true
            }
        };
        if changed {
            match serde_json::to_string(&self.state) {
                Ok(snapshot) => debug!(%intent, %snapshot, "state updated"),
                Err(err) => debug!(%err, "could not serialize state"),
            }
        }
        changed
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let onclick_cell = ctx.link().callback(Message::ClickCell);
        let onclick_restart = ctx.link().callback(|_| Message::Restart);
        html! {
            <section id="game">
                <div class={classes!("status")}>{self.state.status().to_string()}</div>
                <BoardComponent
                    state={self.state.clone()}
                    onclick={onclick_cell}/>
                <button class={classes!("restart")} onclick={onclick_restart}>{"Restart"}</button>
            </section>
        }
    }
}

#[function_component(BoardComponent)]
pub fn board(props: &BoardProps) -> Html {
    html! {
        <div class={classes!("board-grid")}>
            {
                CellIndex::all().map(|idx| {
                    html! {
                        <CellComponent
                            key={idx.to_string()}
                            {idx}
                            cell={props.state.board().get(idx)}
                            view={cell_view(&props.state, idx)}
                            onclick={props.onclick.clone()}/>
                    }
                }).collect::<Html>()
            }
        </div>
    }
}

#[function_component(CellComponent)]
fn cell(props: &CellProps) -> Html {
    let callback = props.onclick.clone();
    let idx = props.idx;
    let disabled = props.view.disabled;
    let onclick = Callback::from(move |_| {
        if !disabled {
            callback.emit(idx)
        }
    });
    let style = format!("grid-row: {}; grid-column: {}", idx.row() + 1, idx.col() + 1);
    html! {
        <button class={cell_classes(&props.cell, props.view.winning)} {style} {disabled} {onclick}>
            { props.cell.player().map(|p| p.to_string()).unwrap_or_default() }
        </button>
    }
}

fn get_player_class(player: Player) -> &'static str {
    match player {
        Player::X => "x",
        Player::O => "o",
    }
}

fn cell_classes(cell: &Cell, winning: bool) -> Classes {
    let mut class = match cell {
        Cell::Empty => classes!("empty"),
        Cell::Marked { player } => classes!(get_player_class(*player), "marked"),
    };
    if winning {
        class.push("winning");
    }
    class.extend(classes!("cell"));
    class
}
