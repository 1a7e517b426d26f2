mod components;
mod config;
mod feedback;
mod game;
mod model;
mod runtime;
mod state;
mod util;

use components::app::App;

fn main() {
    yew::Renderer::<App>::new().render();
}
