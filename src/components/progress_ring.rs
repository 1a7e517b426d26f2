use crate::state::hold::{IndicatorStatus, ProgressIndicator};
use yew::prelude::*;

const RING_SIZE: f64 = 64.0;
const RING_STROKE: f64 = 6.0;

#[derive(Properties, PartialEq, Clone)]
pub struct ProgressRingProps {
    pub indicator: ProgressIndicator,
}

/// Hold progress drawn as an SVG ring centered on the press.
#[function_component(ProgressRing)]
pub fn progress_ring(props: &ProgressRingProps) -> Html {
    let ind = &props.indicator;
    let r = (RING_SIZE - RING_STROKE) * 0.5;
    let circumference = 2.0 * std::f64::consts::PI * r;
    let fill = ind.fill.clamp(0.0, 1.0);
    let color = match ind.status {
        IndicatorStatus::Pending => "#58a6ff",
        IndicatorStatus::Success => "#2ea043",
        IndicatorStatus::Failure => "#f85149",
    };
    let class = match ind.status {
        IndicatorStatus::Pending => "progress-ring",
        IndicatorStatus::Success => "progress-ring progress-ring-success",
        IndicatorStatus::Failure => "progress-ring progress-ring-failure",
    };
    let c = RING_SIZE * 0.5;
    html! {
        <svg
            class={class}
            width={RING_SIZE.to_string()}
            height={RING_SIZE.to_string()}
            style={format!("position:absolute; left:{:.1}px; top:{:.1}px; transform:translate(-50%, -50%); pointer-events:none; z-index:4;", ind.at.x, ind.at.y)}
        >
            <circle cx={c.to_string()} cy={c.to_string()} r={r.to_string()} fill="rgba(0,0,0,0.35)" stroke="rgba(255,255,255,0.25)" stroke-width={RING_STROKE.to_string()} />
            <circle
                cx={c.to_string()}
                cy={c.to_string()}
                r={r.to_string()}
                fill="none"
                stroke={color}
                stroke-width={RING_STROKE.to_string()}
                stroke-linecap="round"
                stroke-dasharray={format!("{:.2} {:.2}", circumference * fill, circumference)}
                transform={format!("rotate(-90 {} {})", c, c)}
            />
        </svg>
    }
}
