use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct IntroOverlayProps {
    pub show: bool,
    pub subject: String,
    pub total: usize,
    pub hold_secs: f64,
    pub hide_intro: Callback<()>,
}

#[function_component(IntroOverlay)]
pub fn intro_overlay(props: &IntroOverlayProps) -> Html {
    if !props.show {
        return html! {};
    }
    let hide_cb = props.hide_intro.clone();
    let start_btn = Callback::from(move |_| hide_cb.emit(()));
    html! {
        <div style="position:absolute; top:50%; left:50%; transform:translate(-50%, -50%); background:rgba(0,0,0,0.87); border:2px solid #30363d; padding:28px 36px; border-radius:14px; max-width:520px; width:90%; box-shadow:0 0 0 1px #1a1f24, 0 6px 18px rgba(0,0,0,0.6); font-size:14px; line-height:1.4; z-index:30;">
            <h2 style="margin:0 0 12px 0; font-size:22px; color:#58a6ff; text-align:center;">{ format!("Find the {}", props.subject) }</h2>
            <p style="margin:4px 0 10px 0; text-align:center; opacity:0.85;">{ format!("{} {} are hidden in this picture.", props.total, props.subject) }</p>
            <ul style="margin:0 0 12px 18px; padding:0; list-style:disc; display:flex; flex-direction:column; gap:4px;">
                <li>{ format!("Press and hold on a spot for {:.0} seconds to check it.", props.hold_secs) }</li>
                <li>{"Lifting your finger or leaving the picture cancels the check."}</li>
                <li>{"Pinch or scroll to zoom; drag to move around when zoomed."}</li>
                <li>{"Double-tap to reset the view."}</li>
            </ul>
            <div style="display:flex; gap:12px; justify-content:center; margin-top:8px;">
                <button onclick={start_btn}>{"Start"}</button>
            </div>
        </div>
    }
}
