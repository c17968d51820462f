use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use glib::SourceId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickControl {
    Continue,
    Stop,
}

pub type TickFn = Box<dyn FnMut() -> TickControl>;

/// A repeating task registered with a [`CountdownScheduler`].
pub trait ScheduledTask {
    /// Stops future ticks. Safe to call more than once.
    fn cancel(&mut self);
}

pub trait CountdownScheduler {
    fn schedule(&self, interval: Duration, tick: TickFn) -> Box<dyn ScheduledTask>;
}

/// Owns a scheduled task for the lifetime of one round. Dropping the guard
/// cancels the task.
pub struct Countdown {
    task: Option<Box<dyn ScheduledTask>>,
}

impl Countdown {
    pub fn start(scheduler: &dyn CountdownScheduler, interval: Duration, tick: TickFn) -> Self {
        log::trace!(target: "countdown", "Scheduling countdown every {:?}", interval);
        Self {
            task: Some(scheduler.schedule(interval, tick)),
        }
    }

    /// Releases the guard without cancelling, for when the task is already
    /// returning [`TickControl::Stop`] on its own.
    pub fn finish(mut self) {
        self.task.take();
    }
}

impl Drop for Countdown {
    fn drop(&mut self) {
        if let Some(mut task) = self.task.take() {
            log::trace!(target: "countdown", "Cancelling countdown");
            task.cancel();
        }
    }
}

/// Runs ticks from the thread-default glib main context.
#[derive(Debug, Default)]
pub struct GlibScheduler;

struct GlibTask {
    // cleared once the source has stopped, since removing twice causes a panic.
    source_id: Rc<RefCell<Option<SourceId>>>,
}

impl ScheduledTask for GlibTask {
    fn cancel(&mut self) {
        if let Some(source_id) = self.source_id.borrow_mut().take() {
            source_id.remove();
        }
    }
}

impl CountdownScheduler for GlibScheduler {
    fn schedule(&self, interval: Duration, mut tick: TickFn) -> Box<dyn ScheduledTask> {
        let slot: Rc<RefCell<Option<SourceId>>> = Rc::new(RefCell::new(None));
        let weak_slot = Rc::downgrade(&slot);
        let source_id = glib::timeout_add_local(interval, move || match tick() {
            TickControl::Continue => glib::ControlFlow::Continue,
            TickControl::Stop => {
                if let Some(slot) = weak_slot.upgrade() {
                    if let Ok(mut source_id) = slot.try_borrow_mut() {
                        *source_id = None;
                    }
                }
                glib::ControlFlow::Break
            }
        });
        *slot.borrow_mut() = Some(source_id);
        Box::new(GlibTask { source_id: slot })
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use std::cell::Cell;

    struct ManualTask {
        live: Rc<Cell<bool>>,
        tick: RefCell<TickFn>,
    }

    struct ManualHandle {
        live: Rc<Cell<bool>>,
    }

    impl ScheduledTask for ManualHandle {
        fn cancel(&mut self) {
            self.live.set(false);
        }
    }

    /// Deterministic scheduler: ticks only fire when the test advances it.
    #[derive(Clone, Default)]
    pub struct ManualScheduler {
        tasks: Rc<RefCell<Vec<Rc<ManualTask>>>>,
    }

    impl ManualScheduler {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn live_count(&self) -> usize {
            self.tasks.borrow().iter().filter(|t| t.live.get()).count()
        }

        pub fn scheduled_count(&self) -> usize {
            self.tasks.borrow().len()
        }

        /// Fires `ticks` rounds of every live task.
        pub fn advance(&self, ticks: u32) {
            for _ in 0..ticks {
                let live: Vec<Rc<ManualTask>> = self
                    .tasks
                    .borrow()
                    .iter()
                    .filter(|t| t.live.get())
                    .cloned()
                    .collect();
                for task in live {
                    if !task.live.get() {
                        continue;
                    }
                    let control = (task.tick.borrow_mut())();
                    if control == TickControl::Stop {
                        task.live.set(false);
                    }
                }
            }
        }
    }

    impl CountdownScheduler for ManualScheduler {
        fn schedule(&self, _interval: Duration, tick: TickFn) -> Box<dyn ScheduledTask> {
            let live = Rc::new(Cell::new(true));
            self.tasks.borrow_mut().push(Rc::new(ManualTask {
                live: Rc::clone(&live),
                tick: RefCell::new(tick),
            }));
            Box::new(ManualHandle { live })
        }
    }

    fn counting_tick(counter: &Rc<Cell<u32>>, stop_at: u32) -> TickFn {
        let counter = Rc::clone(counter);
        Box::new(move || {
            counter.set(counter.get() + 1);
            if counter.get() >= stop_at {
                TickControl::Stop
            } else {
                TickControl::Continue
            }
        })
    }

    #[test]
    fn test_dropping_countdown_cancels_task() {
        let scheduler = ManualScheduler::new();
        let counter = Rc::new(Cell::new(0));
        let countdown = Countdown::start(
            &scheduler,
            Duration::from_secs(1),
            counting_tick(&counter, 100),
        );

        scheduler.advance(3);
        drop(countdown);
        scheduler.advance(3);

        assert_eq!(counter.get(), 3);
        assert_eq!(scheduler.live_count(), 0);
    }

    #[test]
    fn test_task_stops_itself() {
        let scheduler = ManualScheduler::new();
        let counter = Rc::new(Cell::new(0));
        let countdown = Countdown::start(
            &scheduler,
            Duration::from_secs(1),
            counting_tick(&counter, 2),
        );

        scheduler.advance(5);
        assert_eq!(counter.get(), 2);
        assert_eq!(scheduler.live_count(), 0);
        countdown.finish();
    }

    #[test]
    fn test_replacing_countdown_leaves_one_live() {
        let scheduler = ManualScheduler::new();
        let first = Rc::new(Cell::new(0));
        let second = Rc::new(Cell::new(0));

        let mut slot = Some(Countdown::start(
            &scheduler,
            Duration::from_secs(1),
            counting_tick(&first, 100),
        ));
        scheduler.advance(1);
        let previous = slot.replace(Countdown::start(
            &scheduler,
            Duration::from_secs(1),
            counting_tick(&second, 100),
        ));
        drop(previous);
        scheduler.advance(2);

        assert_eq!(first.get(), 1);
        assert_eq!(second.get(), 2);
        assert_eq!(scheduler.live_count(), 1);
        assert_eq!(scheduler.scheduled_count(), 2);
        drop(slot);
    }

    #[test]
    fn test_glib_countdown_ticks_on_main_context() {
        let context = glib::MainContext::new();
        let _guard = context
            .acquire()
            .expect("main context should be free in this test");
        context
            .with_thread_default(|| {
                let counter = Rc::new(Cell::new(0));
                let countdown = Countdown::start(
                    &GlibScheduler,
                    Duration::from_millis(5),
                    counting_tick(&counter, 3),
                );
                while counter.get() < 3 {
                    context.iteration(true);
                }
                // the task stopped itself; releasing must not remove the source twice
                countdown.finish();
                assert_eq!(counter.get(), 3);
            })
            .expect("thread default context");
    }

    fn on_fresh_main_context<F: FnOnce(&glib::MainContext)>(body: F) {
        let context = glib::MainContext::new();
        let _guard = context
            .acquire()
            .expect("main context should be free in this test");
        context
            .with_thread_default(|| body(&context))
            .expect("thread default context");
    }

    /// Spins the context until `deadline` passes, dispatching whatever is due.
    fn run_for(context: &glib::MainContext, span: Duration) {
        let deadline = std::time::Instant::now() + span;
        while std::time::Instant::now() < deadline {
            context.iteration(false);
            std::thread::sleep(Duration::from_millis(1));
        }
    }

    #[test]
    fn test_dropping_glib_countdown_stops_ticks() {
        on_fresh_main_context(|context| {
            let counter = Rc::new(Cell::new(0));
            let countdown = Countdown::start(
                &GlibScheduler,
                Duration::from_millis(5),
                counting_tick(&counter, 100),
            );
            while counter.get() < 1 {
                context.iteration(true);
            }
            drop(countdown);
            let after_drop = counter.get();

            run_for(context, Duration::from_millis(40));
            assert_eq!(counter.get(), after_drop);
        });
    }

    #[test]
    fn test_replacing_glib_countdown_ticks_only_the_new_one() {
        on_fresh_main_context(|context| {
            let first = Rc::new(Cell::new(0));
            let second = Rc::new(Cell::new(0));
            let mut slot = Some(Countdown::start(
                &GlibScheduler,
                Duration::from_millis(5),
                counting_tick(&first, 100),
            ));
            while first.get() < 1 {
                context.iteration(true);
            }
            let previous = slot.replace(Countdown::start(
                &GlibScheduler,
                Duration::from_millis(5),
                counting_tick(&second, 100),
            ));
            drop(previous);
            let first_ticks = first.get();

            while second.get() < 3 {
                context.iteration(true);
            }
            assert_eq!(first.get(), first_ticks);

            // cancelling the survivor as well leaves nothing scheduled
            drop(slot);
            let second_ticks = second.get();
            run_for(context, Duration::from_millis(40));
            assert_eq!(second.get(), second_ticks);
        });
    }
}
