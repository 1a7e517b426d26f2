use crate::feedback::{StatusMessage, StatusTone};
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct StatusBannerProps {
    pub status: StatusMessage,
}

#[function_component]
pub fn StatusBanner(props: &StatusBannerProps) -> Html {
    let (border, color, class) = match props.status.tone {
        StatusTone::Info => ("#30363d", "#e6edf3", "feedback"),
        StatusTone::Success => ("#2ea043", "#3fb950", "feedback success success-animation"),
    };
    html! {
        <div
            class={class}
            style={format!("position:absolute; top:12px; left:50%; transform:translateX(-50%); background:rgba(22,27,34,0.9); border:1px solid {}; border-radius:8px; padding:8px 16px; font-size:15px; font-weight:600; color:{}; z-index:5; pointer-events:none; white-space:nowrap;", border, color)}
        >
            { props.status.text.clone() }
        </div>
    }
}
