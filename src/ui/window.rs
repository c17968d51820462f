use crate::destroyable::Destroyable;
use crate::events::Channel;
use crate::game::{
    GlibScheduler, NotificationSink, NullNotificationSink, RandomNumberSource, RoundController,
    Settings,
};
use crate::model::{RoundCommand, RoundEvent};
use gtk4::gdk::Display;
use gtk4::{prelude::*, Application, ApplicationWindow, CssProvider};
use std::rc::Rc;

use super::audio_set::AudioSet;
use super::round_view::RoundView;

const STYLE: &str = "
.difficulty-button { color: white; font-size: 1.2em; padding: 8px 16px; border-radius: 10px; }
.difficulty-easy { background: #2ec27e; }
.difficulty-medium { background: #ff7800; }
.difficulty-hard { background: #e01b24; }
.difficulty-button.selected { outline: 3px solid alpha(currentColor, 0.6); }
.difficulty-button:disabled { opacity: 0.5; }
.timer { font-family: monospace; font-size: 1.3em; }
.feedback { font-size: 1.2em; font-weight: bold; }
";

fn load_css() {
    let provider = CssProvider::new();
    provider.load_from_string(STYLE);
    match Display::default() {
        Some(display) => gtk4::style_context_add_provider_for_display(
            &display,
            &provider,
            gtk4::STYLE_PROVIDER_PRIORITY_APPLICATION,
        ),
        None => log::warn!(target: "window", "No display; skipping stylesheet"),
    }
}

fn notification_sink(settings: &Settings) -> Rc<dyn NotificationSink> {
    match (&settings.sounds_dir, settings.sounds_enabled) {
        (Some(sounds_dir), true) => {
            log::info!(target: "window", "Loading sounds from {}", sounds_dir.display());
            Rc::new(AudioSet::new(sounds_dir))
        }
        (None, true) => {
            log::info!(target: "window", "No sounds directory configured; playing silently");
            Rc::new(NullNotificationSink)
        }
        (_, false) => Rc::new(NullNotificationSink),
    }
}

pub fn build_ui(app: &Application) {
    let (round_command_emitter, round_command_observer) = Channel::<RoundCommand>::new();
    let (round_event_emitter, round_event_observer) = Channel::<RoundEvent>::new();

    let settings = Settings::load();
    log::debug!(target: "window", "Settings: {:?}", settings);

    let controller = RoundController::new(
        round_command_observer,
        round_event_emitter,
        notification_sink(&settings),
        Rc::new(GlibScheduler),
        Box::new(RandomNumberSource::new(settings.seed)),
        &settings,
    );
    let (initial_state, session_summary) = {
        let controller = controller.borrow();
        (controller.snapshot(), controller.session_stats().summary())
    };
    let view = RoundView::new(
        round_command_emitter,
        round_event_observer,
        &initial_state,
        &session_summary,
    );

    load_css();
    let window = ApplicationWindow::builder()
        .application(app)
        .title("Guess the Number")
        .default_width(480)
        .default_height(640)
        .resizable(true)
        .build();
    window.set_child(Some(&view.borrow().root));

    window.connect_close_request(move |_| {
        log::trace!(target: "window", "Tearing down round controller");
        controller.borrow_mut().destroy();
        view.borrow_mut().destroy();
        glib::Propagation::Proceed
    });

    window.present();
}
