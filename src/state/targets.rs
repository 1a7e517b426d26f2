// Hidden target zones and their found state, in original-image pixels.
use crate::config::TargetSpec;
use crate::model::Point;

#[derive(Clone, Debug, PartialEq)]
pub struct Target {
    pub x: f64,
    pub y: f64,
    pub radius: f64,
    pub found: bool,
    pub label: Option<String>,
}

impl Target {
    pub fn center(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Closed disk: the boundary counts as inside.
    pub fn contains(&self, p: Point) -> bool {
        self.center().distance(p) <= self.radius
    }
}

impl From<&TargetSpec> for Target {
    fn from(spec: &TargetSpec) -> Self {
        Self {
            x: spec.x,
            y: spec.y,
            radius: spec.radius,
            found: false,
            label: spec.label.clone(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CommitOutcome {
    /// Target at this index was newly marked found.
    Found(usize),
    /// The point only hits targets that were already found.
    AlreadyFound(usize),
    Miss,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct TargetRegistry {
    targets: Vec<Target>,
}

impl TargetRegistry {
    pub fn new(specs: &[TargetSpec]) -> Self {
        Self {
            targets: specs.iter().map(Target::from).collect(),
        }
    }

    pub fn targets(&self) -> &[Target] {
        &self.targets
    }

    pub fn hit_test(&self, p: Point) -> bool {
        self.targets.iter().any(|t| t.contains(p))
    }

    /// Marks the first unfound target containing `p`, in registration order.
    pub fn commit(&mut self, p: Point) -> CommitOutcome {
        if !self.hit_test(p) {
            return CommitOutcome::Miss;
        }
        if let Some(i) = self.targets.iter().position(|t| !t.found && t.contains(p)) {
            self.targets[i].found = true;
            return CommitOutcome::Found(i);
        }
        match self.targets.iter().position(|t| t.contains(p)) {
            Some(i) => CommitOutcome::AlreadyFound(i),
            None => CommitOutcome::Miss,
        }
    }

    pub fn found_count(&self) -> usize {
        self.targets.iter().filter(|t| t.found).count()
    }

    pub fn total(&self) -> usize {
        self.targets.len()
    }

    pub fn all_found(&self) -> bool {
        self.targets.iter().all(|t| t.found)
    }

    pub fn reset(&mut self) {
        for t in &mut self.targets {
            t.found = false;
        }
    }
}
