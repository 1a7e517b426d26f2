use crate::feedback::ConfettiBurst;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct ConfettiLayerProps {
    pub burst: Option<ConfettiBurst>,
}

#[function_component(ConfettiLayer)]
pub fn confetti_layer(props: &ConfettiLayerProps) -> Html {
    let Some(burst) = &props.burst else {
        return html! {};
    };
    html! {
        <div key={burst.id.to_string()} style="position:fixed; inset:0; pointer-events:none; overflow:hidden; z-index:20;">
            { for burst.particles.iter().map(|p| html! {
                <div
                    class="confetti"
                    style={format!(
                        "left:{:.1}px; top:{:.1}px; width:{:.1}px; height:{:.1}px; background-color:{}; animation:confetti {:.2}s linear forwards;",
                        p.left_px, p.top_px, p.size_px, p.size_px, p.color, p.duration_s
                    )}
                ></div>
            }) }
        </div>
    }
}
