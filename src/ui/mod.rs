pub mod audio_set;
pub mod round_view;
pub mod window;

pub use audio_set::AudioSet;
pub use round_view::RoundView;
