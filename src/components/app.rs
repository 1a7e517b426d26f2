use super::game_view::GameView;
use crate::config::GameConfig;
use crate::util::{clog, cwarn};
use yew::prelude::*;

#[function_component(App)]
pub fn app() -> Html {
    // Parsed once; the bundled file is compiled in so a failure is a packaging bug
    let config = use_memo((), |_| GameConfig::bundled().map_err(|e| e.to_string()));

    match &*config {
        Ok(cfg) => {
            clog(&format!(
                "Loaded {} with {} {}",
                cfg.image.src,
                cfg.targets.len(),
                cfg.subject
            ));
            html! { <GameView config={cfg.clone()} /> }
        }
        Err(msg) => {
            cwarn(&format!("Invalid game config: {msg}"));
            html! {
                <div style="padding:24px; color:#f85149; font-family:monospace;">
                    <h2 style="margin:0 0 8px 0;">{"Could not start the game"}</h2>
                    <p style="margin:0;">{ msg.clone() }</p>
                </div>
            }
        }
    }
}
