//! Visual feedback derived from game transitions: status text, found markers,
//! resolved progress rings that linger briefly, and the completion confetti.
//! Nothing here feeds back into game state.

use crate::model::{Point, Size};
use crate::state::hold::ProgressIndicator;
use crate::state::targets::TargetRegistry;

pub const CONFETTI_COUNT: usize = 150;
pub const CONFETTI_COLORS: [&str; 10] = [
    "#ff0", "#f00", "#0f0", "#0ff", "#00f", "#f0f", "#FFD700", "#C0C0C0", "#FF69B4", "#7FFF00",
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatusTone {
    Info,
    Success,
}

#[derive(Clone, Debug, PartialEq)]
pub struct StatusMessage {
    pub text: String,
    pub tone: StatusTone,
}

/// Permanent marker left where a target was found.
#[derive(Clone, Debug, PartialEq)]
pub struct Marker {
    pub target: usize,
    /// Image-space position of the press that found it.
    pub at: Point,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Flash {
    pub id: u64,
    pub indicator: ProgressIndicator,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    pub left_px: f64,
    pub top_px: f64,
    pub size_px: f64,
    pub color: &'static str,
    pub duration_s: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ConfettiBurst {
    pub id: u64,
    pub particles: Vec<Particle>,
}

impl ConfettiBurst {
    /// `rng` yields uniform values in `[0, 1)`.
    pub fn generate(id: u64, window: Size, rng: &mut dyn FnMut() -> f64) -> Self {
        let top = window.height * 0.2;
        let particles = (0..CONFETTI_COUNT)
            .map(|_| {
                let left_px = rng() * window.width;
                let color_idx = ((rng() * CONFETTI_COLORS.len() as f64) as usize)
                    .min(CONFETTI_COLORS.len() - 1);
                Particle {
                    left_px,
                    top_px: top,
                    size_px: 5.0 + rng() * 10.0,
                    color: CONFETTI_COLORS[color_idx],
                    duration_s: 1.5 + rng() * 3.0,
                }
            })
            .collect();
        Self { id, particles }
    }
}

#[derive(Clone, Debug)]
pub struct FeedbackPresenter {
    subject: String,
    status: StatusMessage,
    markers: Vec<Marker>,
    flashes: Vec<Flash>,
    confetti: Option<ConfettiBurst>,
    next_id: u64,
}

impl FeedbackPresenter {
    pub fn new(subject: impl Into<String>, registry: &TargetRegistry) -> Self {
        let subject = subject.into();
        let status = status_for(&subject, registry);
        Self {
            subject,
            status,
            markers: Vec::new(),
            flashes: Vec::new(),
            confetti: None,
            next_id: 1,
        }
    }

    pub fn status(&self) -> &StatusMessage {
        &self.status
    }

    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    pub fn flashes(&self) -> &[Flash] {
        &self.flashes
    }

    pub fn confetti(&self) -> Option<&ConfettiBurst> {
        self.confetti.as_ref()
    }

    pub fn refresh_status(&mut self, registry: &TargetRegistry) {
        self.status = status_for(&self.subject, registry);
    }

    pub fn add_marker(&mut self, target: usize, at: Point) {
        self.markers.push(Marker { target, at });
    }

    /// Keeps a resolved indicator on screen; returns its id for expiry.
    pub fn flash(&mut self, indicator: ProgressIndicator) -> u64 {
        let id = self.alloc_id();
        self.flashes.push(Flash { id, indicator });
        id
    }

    pub fn expire_flash(&mut self, id: u64) -> bool {
        let before = self.flashes.len();
        self.flashes.retain(|f| f.id != id);
        before != self.flashes.len()
    }

    pub fn celebrate(&mut self, window: Size, rng: &mut dyn FnMut() -> f64) -> u64 {
        let id = self.alloc_id();
        self.confetti = Some(ConfettiBurst::generate(id, window, rng));
        id
    }

    pub fn expire_confetti(&mut self, id: u64) -> bool {
        if self.confetti.as_ref().is_some_and(|c| c.id == id) {
            self.confetti = None;
            return true;
        }
        false
    }

    /// Clears per-session artifacts for a fresh round.
    pub fn reset(&mut self, registry: &TargetRegistry) {
        self.markers.clear();
        self.flashes.clear();
        self.confetti = None;
        self.refresh_status(registry);
    }

    fn alloc_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

fn status_for(subject: &str, registry: &TargetRegistry) -> StatusMessage {
    if registry.all_found() {
        StatusMessage {
            text: format!("Congratulations! You found all the {subject}!"),
            tone: StatusTone::Success,
        }
    } else {
        StatusMessage {
            text: format!(
                "Keep looking! You've found {} of {} {subject}.",
                registry.found_count(),
                registry.total()
            ),
            tone: StatusTone::Info,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_config;
    use crate::state::hold::IndicatorStatus;

    fn registry() -> TargetRegistry {
        TargetRegistry::new(&test_config().targets)
    }

    #[test]
    fn status_tracks_progress() {
        let mut reg = registry();
        let mut fb = FeedbackPresenter::new("birds", &reg);
        assert_eq!(fb.status().text, "Keep looking! You've found 0 of 2 birds.");
        assert_eq!(fb.status().tone, StatusTone::Info);

        reg.commit(Point::new(1034.0, 1358.0));
        fb.refresh_status(&reg);
        assert_eq!(fb.status().text, "Keep looking! You've found 1 of 2 birds.");

        reg.commit(Point::new(2752.0, 764.0));
        fb.refresh_status(&reg);
        assert_eq!(fb.status().text, "Congratulations! You found all the birds!");
        assert_eq!(fb.status().tone, StatusTone::Success);
    }

    #[test]
    fn confetti_particles_stay_in_ranges() {
        let mut seed = 0.0f64;
        let mut rng = move || {
            seed = (seed + 0.377) % 1.0;
            seed
        };
        let burst = ConfettiBurst::generate(7, Size::new(1000.0, 500.0), &mut rng);
        assert_eq!(burst.particles.len(), CONFETTI_COUNT);
        for p in &burst.particles {
            assert!((0.0..1000.0).contains(&p.left_px));
            assert_eq!(p.top_px, 100.0);
            assert!((5.0..15.0).contains(&p.size_px));
            assert!((1.5..4.5).contains(&p.duration_s));
            assert!(CONFETTI_COLORS.contains(&p.color));
        }
    }

    #[test]
    fn flashes_and_confetti_expire_by_id() {
        let reg = registry();
        let mut fb = FeedbackPresenter::new("birds", &reg);
        let indicator = ProgressIndicator {
            at: Point::ORIGIN,
            fill: 1.0,
            status: IndicatorStatus::Failure,
        };
        let a = fb.flash(indicator.clone());
        let b = fb.flash(indicator);
        assert_eq!(fb.flashes().len(), 2);
        assert!(fb.expire_flash(a));
        assert!(!fb.expire_flash(a));
        assert_eq!(fb.flashes()[0].id, b);

        let burst = fb.celebrate(Size::new(10.0, 10.0), &mut || 0.5);
        assert!(!fb.expire_confetti(burst + 100));
        assert!(fb.expire_confetti(burst));
        assert!(fb.confetti().is_none());
    }
}
