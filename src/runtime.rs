// Runs a `Game` in the browser: stamps events with `performance.now()`,
// turns `Effect`s into gloo timers and animation frames, and asks the view
// to redraw afterwards. Dropping a timer handle cancels it.
use std::cell::{Ref, RefCell};
use std::collections::HashMap;
use std::rc::{Rc, Weak};

use gloo::render::{request_animation_frame, AnimationFrame};
use gloo::timers::callback::Timeout;

use crate::game::{Effect, Game, InputEvent};
use crate::util::now_ms;

#[derive(Default)]
struct HoldTimers {
    arm: Option<Timeout>,
    deadline: Option<Timeout>,
    frame: Option<AnimationFrame>,
}

pub struct GameRuntime {
    game: RefCell<Game>,
    hold_timers: RefCell<HoldTimers>,
    /// Flash and confetti expiries, keyed by feedback id.
    expiry_timers: RefCell<HashMap<u64, Timeout>>,
    redraw: RefCell<Option<Rc<dyn Fn()>>>,
}

impl GameRuntime {
    pub fn new(game: Game) -> Rc<Self> {
        Rc::new(Self {
            game: RefCell::new(game),
            hold_timers: RefCell::new(HoldTimers::default()),
            expiry_timers: RefCell::new(HashMap::new()),
            redraw: RefCell::new(None),
        })
    }

    pub fn game(&self) -> Ref<'_, Game> {
        self.game.borrow()
    }

    pub fn set_redraw(&self, redraw: Rc<dyn Fn()>) {
        *self.redraw.borrow_mut() = Some(redraw);
    }

    pub fn dispatch(self: &Rc<Self>, event: InputEvent) {
        let effects = self.game.borrow_mut().handle(event, now_ms());
        self.run(effects);
        self.request_redraw();
    }

    pub fn restart(self: &Rc<Self>) {
        let effects = self.game.borrow_mut().restart();
        self.expiry_timers.borrow_mut().clear();
        self.run(effects);
        self.request_redraw();
    }

    /// Cancels everything; used when the view unmounts.
    pub fn shutdown(&self) {
        *self.hold_timers.borrow_mut() = HoldTimers::default();
        self.expiry_timers.borrow_mut().clear();
        self.redraw.borrow_mut().take();
    }

    fn request_redraw(&self) {
        let redraw = self.redraw.borrow().clone();
        if let Some(f) = redraw {
            f();
        }
    }

    fn run(self: &Rc<Self>, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::ScheduleArm { session, delay_ms } => {
                    let weak = Rc::downgrade(self);
                    let timer = Timeout::new(delay_ms, move || {
                        let Some(rt) = weak.upgrade() else { return };
                        rt.hold_timers.borrow_mut().arm.take();
                        rt.dispatch(InputEvent::ArmElapsed(session));
                    });
                    self.hold_timers.borrow_mut().arm = Some(timer);
                }
                Effect::ScheduleHoldDeadline { session, delay_ms } => {
                    let weak = Rc::downgrade(self);
                    let timer = Timeout::new(delay_ms, move || {
                        let Some(rt) = weak.upgrade() else { return };
                        rt.hold_timers.borrow_mut().deadline.take();
                        rt.dispatch(InputEvent::HoldDeadline(session));
                    });
                    self.hold_timers.borrow_mut().deadline = Some(timer);
                }
                Effect::StartProgressFrames => self.schedule_frame(),
                Effect::CancelHoldTimers => {
                    let old = std::mem::take(&mut *self.hold_timers.borrow_mut());
                    drop(old);
                }
                Effect::ScheduleFlashExpiry { flash, delay_ms } => {
                    self.schedule_expiry(flash, delay_ms, InputEvent::FlashExpired(flash));
                }
                Effect::ScheduleConfettiExpiry { burst, delay_ms } => {
                    self.schedule_expiry(burst, delay_ms, InputEvent::ConfettiExpired(burst));
                }
            }
        }
    }

    fn schedule_expiry(self: &Rc<Self>, id: u64, delay_ms: u32, event: InputEvent) {
        let weak: Weak<Self> = Rc::downgrade(self);
        let timer = Timeout::new(delay_ms, move || {
            let Some(rt) = weak.upgrade() else { return };
            rt.expiry_timers.borrow_mut().remove(&id);
            rt.dispatch(event);
        });
        self.expiry_timers.borrow_mut().insert(id, timer);
    }

    /// One frame per repaint while the hold is counting.
    fn schedule_frame(self: &Rc<Self>) {
        let weak = Rc::downgrade(self);
        let handle = request_animation_frame(move |_| {
            let Some(rt) = weak.upgrade() else { return };
            rt.hold_timers.borrow_mut().frame.take();
            rt.dispatch(InputEvent::Frame);
            if rt.game().active_indicator().is_some() {
                rt.schedule_frame();
            }
        });
        self.hold_timers.borrow_mut().frame = Some(handle);
    }
}
