use gtk4::prelude::*;
use gtk4::{Align, Button, Entry, InputPurpose, Label, Orientation};
use std::cell::RefCell;
use std::rc::Rc;

use crate::destroyable::Destroyable;
use crate::events::{EventEmitter, EventObserver, Unsubscriber};
use crate::model::{Difficulty, Notification, RoundCommand, RoundEvent, RoundState};

/// Renders round state and forwards user actions as commands.
pub struct RoundView {
    pub root: gtk4::Box,
    difficulty_label: Label,
    difficulty_buttons: Vec<Button>,
    start_button: Button,
    guess_entry: Entry,
    submit_button: Button,
    attempts_label: Label,
    timer_label: Label,
    feedback_label: Label,
    stats_label: Label,
    focus_pending: bool,
    round_event_subscription: Option<Unsubscriber<RoundEvent>>,
}

impl Destroyable for RoundView {
    fn destroy(&mut self) {
        if let Some(subscription) = self.round_event_subscription.take() {
            subscription.unsubscribe();
        }
    }
}

pub fn digits_only(text: &str) -> String {
    text.chars().filter(|c| c.is_ascii_digit()).collect()
}

pub fn format_remaining(seconds: u32) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

fn difficulty_css_class(difficulty: Difficulty) -> &'static str {
    match difficulty {
        Difficulty::Easy => "difficulty-easy",
        Difficulty::Medium => "difficulty-medium",
        Difficulty::Hard => "difficulty-hard",
    }
}

impl RoundView {
    pub fn new(
        round_command_emitter: EventEmitter<RoundCommand>,
        round_event_observer: EventObserver<RoundEvent>,
        initial_state: &RoundState,
        session_summary: &str,
    ) -> Rc<RefCell<Self>> {
        let root = gtk4::Box::builder()
            .orientation(Orientation::Vertical)
            .spacing(24)
            .margin_top(24)
            .margin_bottom(24)
            .margin_start(24)
            .margin_end(24)
            .build();

        let title = Label::builder()
            .label("Guess the Number!")
            .css_classes(["title-1"])
            .build();
        let difficulty_label = Label::builder().css_classes(["title-3"]).build();

        let difficulty_row = gtk4::Box::builder()
            .orientation(Orientation::Horizontal)
            .spacing(12)
            .halign(Align::Center)
            .build();
        let difficulty_buttons: Vec<Button> = Difficulty::all()
            .into_iter()
            .map(|difficulty| {
                let button = Button::builder()
                    .label(difficulty.label())
                    .css_classes(["difficulty-button", difficulty_css_class(difficulty)])
                    .build();
                let emitter = round_command_emitter.clone();
                button.connect_clicked(move |_| {
                    emitter.emit(RoundCommand::SetDifficulty(difficulty));
                });
                difficulty_row.append(&button);
                button
            })
            .collect();

        let start_button = Button::builder()
            .label("Start Round")
            .css_classes(["suggested-action"])
            .halign(Align::Center)
            .build();
        {
            let emitter = round_command_emitter.clone();
            start_button.connect_clicked(move |_| emitter.emit(RoundCommand::StartRound));
        }

        let guess_entry = Entry::builder()
            .placeholder_text("Enter your guess")
            .input_purpose(InputPurpose::Digits)
            .halign(Align::Center)
            .build();
        guess_entry.connect_changed(|entry| {
            let text = entry.text();
            let filtered = digits_only(&text);
            if filtered != text.as_str() {
                entry.set_text(&filtered);
            }
        });
        let submit_button = Button::builder()
            .label("Submit Guess")
            .halign(Align::Center)
            .build();
        let submit = {
            let emitter = round_command_emitter.clone();
            let entry = guess_entry.clone();
            move || {
                emitter.emit(RoundCommand::SubmitGuess(entry.text().to_string()));
                entry.set_text("");
            }
        };
        {
            let submit = submit.clone();
            submit_button.connect_clicked(move |_| submit());
        }
        guess_entry.connect_activate(move |_| submit());

        let attempts_label = Label::new(None);
        let timer_label = Label::builder().css_classes(["timer"]).build();
        let feedback_label = Label::builder().css_classes(["feedback"]).build();
        let stats_label = Label::builder().css_classes(["dim-label"]).build();

        root.append(&title);
        root.append(&difficulty_label);
        root.append(&difficulty_row);
        root.append(&start_button);
        root.append(&guess_entry);
        root.append(&submit_button);
        root.append(&attempts_label);
        root.append(&timer_label);
        root.append(&feedback_label);
        root.append(&stats_label);

        stats_label.set_text(session_summary);

        let view = Rc::new(RefCell::new(Self {
            root,
            difficulty_label,
            difficulty_buttons,
            start_button,
            guess_entry,
            submit_button,
            attempts_label,
            timer_label,
            feedback_label,
            stats_label,
            focus_pending: false,
            round_event_subscription: None,
        }));
        view.borrow_mut().render(initial_state);
        RoundView::bind_observer(&view, round_event_observer);
        view
    }

    fn bind_observer(view: &Rc<RefCell<Self>>, round_event_observer: EventObserver<RoundEvent>) {
        let handler = Rc::downgrade(view);
        let subscription = round_event_observer.subscribe(move |event| {
            if let Some(view) = handler.upgrade() {
                view.borrow_mut().handle_round_event(event);
            }
        });
        view.borrow_mut().round_event_subscription = Some(subscription);
    }

    fn handle_round_event(&mut self, event: &RoundEvent) {
        match event {
            RoundEvent::StateChanged(state) => self.render(state),
            RoundEvent::RoundFinished {
                session_summary, ..
            } => self.stats_label.set_text(session_summary),
            // the entry only becomes sensitive once the new state is rendered
            RoundEvent::Notified(Notification::RoundStarted) => self.focus_pending = true,
            RoundEvent::Notified(_) => (),
        }
    }

    fn render(&mut self, state: &RoundState) {
        self.difficulty_label
            .set_text(&format!("Difficulty: {}", state.difficulty));
        for (button, difficulty) in self.difficulty_buttons.iter().zip(Difficulty::all()) {
            button.set_sensitive(!state.active);
            if difficulty == state.difficulty {
                button.add_css_class("selected");
            } else {
                button.remove_css_class("selected");
            }
        }
        self.start_button.set_label(if state.active {
            "Restart Round"
        } else {
            "Start Round"
        });
        self.guess_entry.set_sensitive(state.active);
        self.submit_button.set_sensitive(state.active);
        if self.focus_pending && state.active {
            self.focus_pending = false;
            self.guess_entry.grab_focus();
        }
        self.attempts_label
            .set_text(&format!("Attempts: {}", state.attempts));
        self.timer_label.set_text(&format!(
            "Time remaining: {}",
            format_remaining(state.remaining_seconds)
        ));
        self.feedback_label
            .set_text(&state.feedback_message().unwrap_or_default());
    }
}
