use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct CompletionOverlayProps {
    pub show: bool,
    pub found: usize,
    pub subject: String,
    pub restart: Callback<()>,
}

#[function_component]
pub fn CompletionOverlay(props: &CompletionOverlayProps) -> Html {
    if !props.show {
        return html! {};
    }
    let restart_cb = props.restart.clone();
    let restart_btn = Callback::from(move |_| restart_cb.emit(()));
    html! {
        <div style="position:absolute; bottom:24px; left:50%; transform:translateX(-50%); background:rgba(0,0,0,0.85); border:2px solid #2ea043; padding:16px 28px; border-radius:12px; text-align:center; min-width:280px; z-index:10;">
            <h2 style="margin:0 0 8px 0; color:#3fb950;">{"Well spotted!"}</h2>
            <p style="margin:4px 0;">{ format!("All {} {} found.", props.found, props.subject) }</p>
            <div style="margin-top:12px; display:flex; gap:12px; justify-content:center;">
                <button onclick={restart_btn}>{"Play again"}</button>
            </div>
        </div>
    }
}
