//! Game modes

pub mod endless_wave;

pub use endless_wave::EndlessWave;
