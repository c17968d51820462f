use log::{debug, info, trace, warn};
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use std::time::Duration;
use uuid::Uuid;

use super::countdown::{Countdown, CountdownScheduler, TickControl};
use super::notification_sink::NotificationSink;
use super::number_source::NumberSource;
use super::round_error::RoundError;
use super::session_stats::SessionStats;
use super::settings::Settings;
use crate::destroyable::Destroyable;
use crate::events::{EventEmitter, EventHandler, EventObserver, Unsubscriber};
use crate::model::{
    Difficulty, FeedbackKind, Notification, RoundCommand, RoundEvent, RoundPhase, RoundState,
    RoundStats,
};

const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Owns the round state and its countdown. Everything runs on one thread: public
/// operations and countdown ticks are never interleaved.
pub struct RoundController {
    state: RoundState,
    round_id: Uuid,
    countdown: Option<Countdown>,
    numbers: Box<dyn NumberSource>,
    scheduler: Rc<dyn CountdownScheduler>,
    notification_sink: Rc<dyn NotificationSink>,
    round_event_emitter: EventEmitter<RoundEvent>,
    session_stats: SessionStats,
    debug_mode: bool,
    command_subscription: Option<Unsubscriber<RoundCommand>>,
    self_ref: Weak<RefCell<RoundController>>,
}

impl Destroyable for RoundController {
    fn destroy(&mut self) {
        if let Some(subscription) = self.command_subscription.take() {
            subscription.unsubscribe();
        }
        self.countdown.take();
    }
}

impl RoundController {
    pub fn new(
        round_command_observer: EventObserver<RoundCommand>,
        round_event_emitter: EventEmitter<RoundEvent>,
        notification_sink: Rc<dyn NotificationSink>,
        scheduler: Rc<dyn CountdownScheduler>,
        mut numbers: Box<dyn NumberSource>,
        settings: &Settings,
    ) -> Rc<RefCell<Self>> {
        let difficulty = settings.difficulty;
        let secret_number = numbers.draw(difficulty.max_number());
        let controller = Rc::new_cyclic(|self_ref| {
            RefCell::new(Self {
                state: RoundState::new(difficulty, secret_number),
                round_id: Uuid::new_v4(),
                countdown: None,
                numbers,
                scheduler,
                notification_sink,
                round_event_emitter,
                session_stats: SessionStats::new(),
                debug_mode: Settings::is_debug_mode(),
                command_subscription: None,
                self_ref: self_ref.clone(),
            })
        });
        RoundController::wire_subscription(&controller, round_command_observer);
        controller.borrow().log_secret();
        controller
    }

    fn wire_subscription(
        controller: &Rc<RefCell<Self>>,
        round_command_observer: EventObserver<RoundCommand>,
    ) {
        let handler = Rc::downgrade(controller);
        let subscription = round_command_observer.subscribe(move |command| {
            let Some(controller) = handler.upgrade() else {
                return;
            };
            match controller.try_borrow_mut() {
                Ok(mut controller) => controller.handle_event(command),
                Err(_) => {
                    warn!(target: "round_controller", "Dropping re-entrant command {:?}", command)
                }
            };
        });
        controller.borrow_mut().command_subscription = Some(subscription);
    }

    pub fn snapshot(&self) -> RoundState {
        self.state.clone()
    }

    pub fn phase(&self) -> RoundPhase {
        self.state.phase()
    }

    pub fn session_stats(&self) -> &SessionStats {
        &self.session_stats
    }

    pub fn has_live_countdown(&self) -> bool {
        self.countdown.is_some()
    }

    /// Picks a new difficulty and secret number. Rejected while a round is active.
    pub fn set_difficulty(&mut self, difficulty: Difficulty) -> Result<(), RoundError> {
        if self.state.active {
            debug!(
                target: "round_controller",
                "Ignoring difficulty change to {:?} during an active round", difficulty
            );
            return Err(RoundError::NoOpDifficultyChange);
        }
        self.countdown.take();
        let secret_number = self.numbers.draw(difficulty.max_number());
        self.state.configure(difficulty, secret_number);
        info!(target: "round_controller", "Difficulty set to {:?}", difficulty);
        self.log_secret();
        self.emit_state();
        Ok(())
    }

    /// Starts a fresh round, replacing any round (and countdown) in progress.
    pub fn start_round(&mut self) {
        // the previous countdown must be gone before the next one is scheduled
        self.countdown.take();

        self.round_id = Uuid::new_v4();
        let secret_number = self.numbers.draw(self.state.difficulty.max_number());
        self.state.begin(secret_number);
        info!(
            target: "round_controller",
            "Round {} started; difficulty: {:?}; {}s on the clock",
            self.round_id,
            self.state.difficulty,
            self.state.remaining_seconds
        );
        self.log_secret();

        let controller = self.self_ref.clone();
        let round_id = self.round_id;
        let mut deferred_ticks: u32 = 0;
        self.countdown = Some(Countdown::start(
            self.scheduler.as_ref(),
            TICK_INTERVAL,
            Box::new(move || {
                let Some(controller) = controller.upgrade() else {
                    return TickControl::Stop;
                };
                let control = match controller.try_borrow_mut() {
                    Ok(mut controller) => {
                        let mut control = controller.handle_tick(round_id);
                        while deferred_ticks > 0 && control == TickControl::Continue {
                            deferred_ticks -= 1;
                            control = controller.handle_tick(round_id);
                        }
                        deferred_ticks = 0;
                        control
                    }
                    Err(_) => {
                        deferred_ticks += 1;
                        warn!(
                            target: "countdown",
                            "Controller busy; deferring tick ({} pending)", deferred_ticks
                        );
                        TickControl::Continue
                    }
                };
                control
            }),
        ));

        self.notify(Notification::RoundStarted);
        self.emit_state();
    }

    /// Scores a guess against the secret number.
    pub fn submit_guess(&mut self, raw_input: &str) -> Result<FeedbackKind, RoundError> {
        let guess = match raw_input.trim().parse::<i64>() {
            Ok(guess) => guess,
            Err(_) => {
                debug!(target: "round_controller", "Ignoring malformed guess {:?}", raw_input);
                return Err(RoundError::InvalidGuessFormat(raw_input.to_string()));
            }
        };
        if !self.state.active {
            debug!(target: "round_controller", "Ignoring guess {} with no active round", guess);
            return Err(RoundError::InactiveRoundGuess);
        }

        let feedback = self.state.evaluate(guess);
        trace!(
            target: "round_controller",
            "Guess {} -> {:?} (attempt {})", guess, feedback, self.state.attempts
        );
        match feedback {
            FeedbackKind::TooLow => self.notify(Notification::TooLow),
            FeedbackKind::TooHigh => self.notify(Notification::TooHigh),
            FeedbackKind::Correct => {
                self.countdown.take();
                self.notify(Notification::Correct);
                self.finish_round(true);
            }
            FeedbackKind::TimeUp => (),
        }
        self.emit_state();
        Ok(feedback)
    }

    fn handle_tick(&mut self, round_id: Uuid) -> TickControl {
        if round_id != self.round_id || !self.state.active {
            trace!(target: "countdown", "Stale tick for round {}", round_id);
            return TickControl::Stop;
        }

        let expired = self.state.tick();
        if !expired {
            self.emit_state();
            return TickControl::Continue;
        }

        if let Some(countdown) = self.countdown.take() {
            countdown.finish();
        }
        info!(target: "round_controller", "Round {} ran out of time", self.round_id);
        self.notify(Notification::TimeUp {
            secret_number: self.state.secret_number,
        });
        self.finish_round(false);
        self.emit_state();
        TickControl::Stop
    }

    fn finish_round(&mut self, won: bool) {
        let stats = RoundStats::new(
            self.round_id,
            self.state.difficulty,
            self.state.attempts,
            self.state.elapsed(),
            won,
        );
        self.session_stats.record_round(&stats);
        self.round_event_emitter.emit(RoundEvent::RoundFinished {
            stats,
            session_summary: self.session_stats.summary(),
        });
    }

    fn notify(&self, notification: Notification) {
        self.round_event_emitter
            .emit(RoundEvent::Notified(notification));
        if let Err(e) = self.notification_sink.notify(&notification) {
            warn!(target: "round_controller", "Notification {:?} failed: {}", notification, e);
        }
    }

    fn emit_state(&self) {
        self.round_event_emitter
            .emit(RoundEvent::StateChanged(self.state.clone()));
    }

    fn log_secret(&self) {
        if self.debug_mode {
            debug!(target: "round_controller", "Secret number: {}", self.state.secret_number);
        }
    }
}

impl EventHandler<RoundCommand> for RoundController {
    fn handle_event(&mut self, command: &RoundCommand) {
        trace!(target: "round_controller", "Handling command: {:?}", command);
        // rejected commands are already logged; the presentation layer has nothing to show
        match command {
            RoundCommand::SetDifficulty(difficulty) => {
                let _ = self.set_difficulty(*difficulty);
            }
            RoundCommand::StartRound => self.start_round(),
            RoundCommand::SubmitGuess(raw_input) => {
                let _ = self.submit_guess(raw_input);
            }
        }
    }
}
